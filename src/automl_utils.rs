// automl_utils.rs
use crate::dataset_utils::DatasetBuilder;
use anyhow::{anyhow, bail, Result as AnyhowResult};
use rand::{seq::SliceRandom, thread_rng};
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::linear_regression::{
    LinearRegression, LinearRegressionParameters, LinearRegressionSolverName,
};

/// Represents a train-and-score request for the dashboard's quick-model widget: which column to
/// predict, which columns to predict it from, and how much of the data to train on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionHarnessConfig {
    pub target_column: String,
    pub feature_columns: Vec<String>,
    pub train_ratio: f64,
}

/// Held-out scores of a fitted model, ready for the report screen.
#[derive(Debug, Clone, Serialize)]
pub struct RegressionReport {
    pub train_rows: usize,
    pub test_rows: usize,
    pub r_squared: f64,
    pub rmse: f64,
}

/// Implements the minimal AutoML harness: split, fit a linear regression, report the held-out
/// scores. Deliberately a thin call-through with no tuning surface.
pub struct AutomlHarness;

impl AutomlHarness {
    /// Trains a linear regression (QR solver) on a shuffled `train_ratio` share of the usable
    /// rows and scores it on the remainder. A row is usable when its target cell and every
    /// feature cell parse as numbers; other rows are dropped. R² is reported as `0.0` when the
    /// held-out targets have no variance, keeping the report JSON-safe.
    ///
    /// ```
    /// use datadocs::automl_utils::{AutomlHarness, RegressionHarnessConfig};
    /// use datadocs::dataset_utils::DatasetBuilder;
    ///
    /// let mut builder = DatasetBuilder::new();
    /// builder.set_header(vec!["x", "y"]);
    /// for i in 0..20 {
    ///     let x = i.to_string();
    ///     let y = (2 * i + 1).to_string();
    ///     builder.add_row(vec![x.as_str(), y.as_str()]);
    /// }
    ///
    /// let config = RegressionHarnessConfig {
    ///     target_column: "y".to_string(),
    ///     feature_columns: vec!["x".to_string()],
    ///     train_ratio: 0.8,
    /// };
    ///
    /// let report = AutomlHarness::train_and_score(&builder, &config).unwrap();
    /// assert_eq!(report.train_rows + report.test_rows, 20);
    /// // The data is an exact line, so the held-out fit is near perfect
    /// assert!(report.r_squared > 0.95);
    /// assert!(report.rmse < 1.0);
    /// ```
    pub fn train_and_score(
        builder: &DatasetBuilder,
        config: &RegressionHarnessConfig,
    ) -> AnyhowResult<RegressionReport> {
        if !(config.train_ratio > 0.0 && config.train_ratio < 1.0) {
            bail!("train_ratio must be strictly between 0 and 1");
        }
        if config.feature_columns.is_empty() {
            bail!("at least one feature column is required");
        }

        let target = builder
            .get_column(&config.target_column)
            .ok_or_else(|| anyhow!("target column '{}' not found", config.target_column))?;

        let mut features: Vec<Vec<String>> = Vec::new();
        for name in &config.feature_columns {
            let column = builder
                .get_column(name)
                .ok_or_else(|| anyhow!("feature column '{}' not found", name))?;
            features.push(column);
        }

        // Keep only rows that are fully numeric across the target and every feature.
        let mut xs: Vec<Vec<f64>> = Vec::new();
        let mut ys: Vec<f64> = Vec::new();
        for (row_idx, cell) in target.iter().enumerate() {
            let y = match cell.parse::<f64>() {
                Ok(value) => value,
                Err(_) => continue,
            };
            let row: Option<Vec<f64>> = features
                .iter()
                .map(|column| column[row_idx].parse::<f64>().ok())
                .collect();
            if let Some(row) = row {
                xs.push(row);
                ys.push(y);
            }
        }

        if xs.len() < 4 {
            bail!(
                "insufficient training data: only {} usable rows, need at least 4",
                xs.len()
            );
        }

        let mut indices: Vec<usize> = (0..xs.len()).collect();
        indices.shuffle(&mut thread_rng());

        let train_len = ((xs.len() as f64) * config.train_ratio).round() as usize;
        let train_len = train_len.clamp(1, xs.len() - 1);
        let (train_idx, test_idx) = indices.split_at(train_len);

        let train_rows: Vec<Vec<f64>> = train_idx.iter().map(|&i| xs[i].clone()).collect();
        let train_refs: Vec<&[f64]> = train_rows.iter().map(|r| r.as_slice()).collect();
        let train_targets: Vec<f64> = train_idx.iter().map(|&i| ys[i]).collect();

        let test_rows: Vec<Vec<f64>> = test_idx.iter().map(|&i| xs[i].clone()).collect();
        let test_refs: Vec<&[f64]> = test_rows.iter().map(|r| r.as_slice()).collect();
        let test_targets: Vec<f64> = test_idx.iter().map(|&i| ys[i]).collect();

        let train_matrix = DenseMatrix::from_2d_array(&train_refs);
        let test_matrix = DenseMatrix::from_2d_array(&test_refs);

        let model = LinearRegression::fit(
            &train_matrix,
            &train_targets,
            LinearRegressionParameters::default().with_solver(LinearRegressionSolverName::QR),
        )
        .map_err(|e| anyhow!("failed to fit linear regression: {}", e))?;

        let predictions = model
            .predict(&test_matrix)
            .map_err(|e| anyhow!("failed to predict on the held-out rows: {}", e))?;

        let mean = test_targets.iter().sum::<f64>() / test_targets.len() as f64;
        let ss_residual: f64 = test_targets
            .iter()
            .zip(predictions.iter())
            .map(|(actual, predicted)| (actual - predicted).powi(2))
            .sum();
        let ss_total: f64 = test_targets.iter().map(|y| (y - mean).powi(2)).sum();

        let r_squared = if ss_total > 0.0 {
            1.0 - ss_residual / ss_total
        } else {
            0.0
        };
        let rmse = (ss_residual / test_targets.len() as f64).sqrt();

        Ok(RegressionReport {
            train_rows: train_targets.len(),
            test_rows: test_targets.len(),
            r_squared,
            rmse,
        })
    }
}
