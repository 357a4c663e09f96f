// eda_utils.rs
use crate::clean_utils::classify_values;
use crate::dataset_utils::{ColumnKind, DatasetBuilder};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;

/// Summary statistics for a numeric column, in the shape the report screens tabulate.
#[derive(Debug, Clone, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

/// Per-column profile: semantic kind, missing and distinct cell counts, and summary statistics
/// for numeric columns.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    pub missing_count: usize,
    pub unique_count: usize,
    pub numeric_summary: Option<NumericSummary>,
}

/// Pearson correlation between two numeric columns.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationEntry {
    pub left: String,
    pub right: String,
    pub coefficient: f64,
}

/// An exploratory-data-analysis report over a dataset: shape, per-column profiles, and the
/// correlation pairs the dashboard's heatmap consumes.
#[derive(Debug, Clone, Serialize)]
pub struct EdaReport {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnProfile>,
    pub correlations: Vec<CorrelationEntry>,
}

impl EdaReport {
    /// Profiles a dataset. Profiling is read-only and never fails: a column whose kind cannot
    /// be settled is profiled as categorical rather than aborting the report.
    ///
    /// ```
    /// use datadocs::dataset_utils::{ColumnKind, DatasetBuilder};
    /// use datadocs::eda_utils::EdaReport;
    ///
    /// let mut builder = DatasetBuilder::new();
    /// builder.set_header(vec!["city", "temperature", "humidity"]).add_rows(vec![
    ///     vec!["Mumbai", "1", "2"],
    ///     vec!["Delhi", "2", "4"],
    ///     vec!["", "3", "6"],
    /// ]);
    ///
    /// let report = EdaReport::build(&builder);
    /// assert_eq!(report.row_count, 3);
    /// assert_eq!(report.column_count, 3);
    ///
    /// let city = &report.columns[0];
    /// assert_eq!(city.kind, ColumnKind::Categorical);
    /// assert_eq!(city.missing_count, 1);
    /// assert_eq!(city.unique_count, 2);
    /// assert!(city.numeric_summary.is_none());
    ///
    /// let temperature = &report.columns[1];
    /// assert_eq!(temperature.kind, ColumnKind::Numeric);
    /// let summary = temperature.numeric_summary.as_ref().unwrap();
    /// assert_eq!(summary.count, 3);
    /// assert_eq!(summary.median, 2.0);
    /// assert_eq!(summary.min, 1.0);
    /// assert_eq!(summary.max, 3.0);
    ///
    /// // humidity is exactly 2 * temperature
    /// assert_eq!(report.correlations.len(), 1);
    /// assert!((report.correlations[0].coefficient - 1.0).abs() < 1e-9);
    /// ```
    pub fn build(builder: &DatasetBuilder) -> EdaReport {
        let headers: Vec<String> = builder
            .get_headers()
            .map(|h| h.to_vec())
            .unwrap_or_default();
        let row_count = builder.get_data().map(|d| d.len()).unwrap_or(0);

        let mut columns = Vec::new();
        let mut numeric_columns: Vec<(String, Vec<Option<f64>>)> = Vec::new();

        for name in &headers {
            let values = builder.get_column(name).unwrap_or_default();
            let missing_count = values.iter().filter(|v| v.is_empty()).count();
            let unique_count = builder
                .get_unique(name)
                .iter()
                .filter(|v| !v.is_empty())
                .count();

            let kind = classify_values(name, &values, builder.declared_type(name))
                .unwrap_or(ColumnKind::Categorical);

            let parsed: Vec<Option<f64>> = values.iter().map(|v| v.parse::<f64>().ok()).collect();
            let present: Vec<f64> = parsed.iter().filter_map(|v| *v).collect();

            let numeric_summary = if kind == ColumnKind::Numeric && !present.is_empty() {
                Some(NumericSummary {
                    count: present.len(),
                    mean: sanitize_non_finite(builder.get_mean(name).unwrap_or(0.0)),
                    std_dev: sanitize_non_finite(
                        builder.get_standard_deviation(name).unwrap_or(0.0),
                    ),
                    min: sanitize_non_finite(builder.get_numeric_min(name).unwrap_or(0.0)),
                    median: sanitize_non_finite(builder.get_median(name).unwrap_or(0.0)),
                    max: sanitize_non_finite(builder.get_numeric_max(name).unwrap_or(0.0)),
                })
            } else {
                None
            };

            if kind == ColumnKind::Numeric {
                numeric_columns.push((name.clone(), parsed));
            }

            columns.push(ColumnProfile {
                name: name.clone(),
                kind,
                missing_count,
                unique_count,
                numeric_summary,
            });
        }

        let correlations = correlation_pairs(&numeric_columns);

        EdaReport {
            row_count,
            column_count: headers.len(),
            columns,
            correlations,
        }
    }

    /// Serializes the report for the HTTP layer. Non-finite numbers were already flattened to
    /// `0.0` at build time, so the emitted JSON is always valid.
    ///
    /// ```
    /// use datadocs::dataset_utils::DatasetBuilder;
    /// use datadocs::eda_utils::EdaReport;
    ///
    /// let builder = DatasetBuilder::from_raw_data(
    ///     vec!["reading".to_string()],
    ///     vec![vec!["1".to_string()], vec!["2".to_string()]],
    /// );
    ///
    /// let json = EdaReport::build(&builder).to_json();
    /// assert_eq!(json["row_count"], 2);
    /// assert_eq!(json["columns"][0]["name"], "reading");
    /// ```
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Prints the report to the console for interactive inspection.
    pub fn print_summary(&self) {
        println!("Shape: {} rows x {} columns", self.row_count, self.column_count);
        for column in &self.columns {
            println!(
                "Column '{}' [{:?}]: {} missing, {} unique",
                column.name, column.kind, column.missing_count, column.unique_count
            );
            if let Some(summary) = &column.numeric_summary {
                println!(
                    "  Count: {}  Mean: {:.2}  Std Dev: {:.2}  Min: {:.2}  Median: {:.2}  Max: {:.2}",
                    summary.count,
                    summary.mean,
                    summary.std_dev,
                    summary.min,
                    summary.median,
                    summary.max
                );
            }
        }
        for entry in &self.correlations {
            println!(
                "Correlation '{}' ~ '{}': {:.2}",
                entry.left, entry.right, entry.coefficient
            );
        }
    }
}

/// Computes Pearson coefficients for every pair of numeric columns, over the rows where both
/// cells hold a parseable number. Pairs are independent, so the sweep runs in parallel.
fn correlation_pairs(numeric_columns: &[(String, Vec<Option<f64>>)]) -> Vec<CorrelationEntry> {
    if numeric_columns.len() < 2 {
        return Vec::new();
    }

    let mut pairs = Vec::new();
    for a in 0..numeric_columns.len() {
        for b in (a + 1)..numeric_columns.len() {
            pairs.push((a, b));
        }
    }

    pairs
        .par_iter()
        .map(|&(a, b)| {
            let (left_name, left_cells) = &numeric_columns[a];
            let (right_name, right_cells) = &numeric_columns[b];

            let mut xs = Vec::new();
            let mut ys = Vec::new();
            for (x, y) in left_cells.iter().zip(right_cells.iter()) {
                if let (Some(x), Some(y)) = (x, y) {
                    xs.push(*x);
                    ys.push(*y);
                }
            }

            CorrelationEntry {
                left: left_name.clone(),
                right: right_name.clone(),
                coefficient: sanitize_non_finite(pearson(&xs, &ys)),
            }
        })
        .collect()
}

fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance_x = 0.0;
    let mut variance_y = 0.0;
    for (x, y) in xs.iter().zip(ys.iter()) {
        covariance += (x - mean_x) * (y - mean_y);
        variance_x += (x - mean_x).powi(2);
        variance_y += (y - mean_y).powi(2);
    }

    let denominator = (variance_x * variance_y).sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        covariance / denominator
    }
}

/// Flattens NaN and infinities to `0.0` so downstream JSON stays valid.
fn sanitize_non_finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
