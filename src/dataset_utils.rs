// dataset_utils.rs
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The semantic type of a column, used to pick the fill rule during cleaning
/// and the statistics shown in EDA summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Categorical,
    Numeric,
}

/// Represents a DatasetBuilder object. This struct allows you to specify headers, corresponding
/// rows of cell data, and (optionally) a declared semantic type per column. A missing cell is
/// represented by the empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetBuilder {
    headers: Vec<String>,
    data: Vec<Vec<String>>,
    declared_types: Vec<Option<ColumnKind>>,
}

impl Default for DatasetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetBuilder {
    /// Creates a new, empty `DatasetBuilder`.
    ///
    /// ```
    /// use datadocs::dataset_utils::DatasetBuilder;
    ///
    /// let builder = DatasetBuilder::new();
    ///
    /// // Initially, there are no headers or data
    /// assert!(builder.get_headers().is_none());
    /// assert!(builder.get_data().is_none());
    /// ```
    pub fn new() -> Self {
        DatasetBuilder {
            headers: Vec::new(),
            data: Vec::new(),
            declared_types: Vec::new(),
        }
    }

    /// Creates a `DatasetBuilder` directly from headers and rows, the shape the ingestion layer
    /// hands over after parsing an upload.
    ///
    /// ```
    /// use datadocs::dataset_utils::DatasetBuilder;
    ///
    /// let builder = DatasetBuilder::from_raw_data(
    ///     vec!["city".to_string(), "temperature".to_string()],
    ///     vec![
    ///         vec!["Mumbai".to_string(), "23.5".to_string()],
    ///         vec!["Delhi".to_string(), "24.1".to_string()],
    ///     ],
    /// );
    ///
    /// assert_eq!(builder.get_headers().unwrap(), &["city", "temperature"]);
    /// assert_eq!(builder.get_data().unwrap().len(), 2);
    /// ```
    pub fn from_raw_data(headers: Vec<String>, data: Vec<Vec<String>>) -> Self {
        let declared_types = vec![None; headers.len()];
        DatasetBuilder {
            headers,
            data,
            declared_types,
        }
    }

    /// Creates a deep copy of the `DatasetBuilder`, including declared column types. Operations
    /// that return a new dataset start from this, so the original is never touched.
    ///
    /// ```
    /// use datadocs::dataset_utils::DatasetBuilder;
    ///
    /// let original = DatasetBuilder::from_raw_data(
    ///     vec!["city".to_string()],
    ///     vec![vec!["Mumbai".to_string()]],
    /// );
    ///
    /// let copy = original.from_copy();
    /// assert_eq!(copy, original);
    /// ```
    pub fn from_copy(&self) -> Self {
        DatasetBuilder {
            headers: self.headers.clone(),
            data: self.data.clone(),
            declared_types: self.declared_types.clone(),
        }
    }

    /// Sets the headers, resetting any previously declared column types.
    pub fn set_header(&mut self, header: Vec<&str>) -> &mut Self {
        self.headers = header.iter().map(|&h| h.to_string()).collect();
        self.declared_types = vec![None; self.headers.len()];
        self
    }

    /// Adds a row of cells. An empty string marks a missing cell.
    ///
    /// ```
    /// use datadocs::dataset_utils::DatasetBuilder;
    ///
    /// let mut builder = DatasetBuilder::new();
    /// builder
    ///     .set_header(vec!["city", "temperature"])
    ///     .add_row(vec!["Mumbai", "23.5"])
    ///     .add_row(vec!["Delhi", ""]);
    ///
    /// assert_eq!(builder.get_data().unwrap().len(), 2);
    /// ```
    pub fn add_row(&mut self, row: Vec<&str>) -> &mut Self {
        self.data.push(row.iter().map(|&cell| cell.to_string()).collect());
        self
    }

    /// Adds multiple rows at once.
    pub fn add_rows(&mut self, rows: Vec<Vec<&str>>) -> &mut Self {
        for row in rows {
            self.add_row(row);
        }
        self
    }

    /// Declares the semantic type of a column. When set, the cleaner trusts the declaration
    /// instead of inferring the kind from cell contents. Unknown column names are ignored.
    ///
    /// ```
    /// use datadocs::dataset_utils::{ColumnKind, DatasetBuilder};
    ///
    /// let mut builder = DatasetBuilder::new();
    /// builder
    ///     .set_header(vec!["score"])
    ///     .declare_column_type("score", ColumnKind::Numeric);
    ///
    /// assert_eq!(builder.declared_type("score"), Some(ColumnKind::Numeric));
    /// assert_eq!(builder.declared_type("missing_column"), None);
    /// ```
    pub fn declare_column_type(&mut self, column_name: &str, kind: ColumnKind) -> &mut Self {
        if let Some(idx) = self.column_index(column_name) {
            self.declared_types[idx] = Some(kind);
        }
        self
    }

    /// Returns the declared type of a column, if one was set.
    pub fn declared_type(&self, column_name: &str) -> Option<ColumnKind> {
        let idx = self.column_index(column_name)?;
        self.declared_types.get(idx).copied().flatten()
    }

    /// Checks if the builder contains headers.
    pub fn has_headers(&self) -> bool {
        !self.headers.is_empty()
    }

    /// Checks if the builder contains any headers or rows.
    pub fn has_data(&self) -> bool {
        !self.headers.is_empty() || !self.data.is_empty()
    }

    /// Retrieves a reference to the headers, if any headers exist.
    ///
    /// ```
    /// use datadocs::dataset_utils::DatasetBuilder;
    ///
    /// let builder = DatasetBuilder::from_raw_data(
    ///     vec!["date".to_string(), "temperature".to_string()],
    ///     vec![],
    /// );
    ///
    /// assert_eq!(builder.get_headers().unwrap(), &["date", "temperature"]);
    /// ```
    pub fn get_headers(&self) -> Option<&[String]> {
        if self.has_headers() {
            Some(&self.headers)
        } else {
            None
        }
    }

    /// Retrieves a reference to the rows, if any rows exist.
    pub fn get_data(&self) -> Option<&Vec<Vec<String>>> {
        if !self.data.is_empty() {
            Some(&self.data)
        } else {
            None
        }
    }

    /// Returns the cells of a column top to bottom. Short rows yield the missing marker.
    ///
    /// ```
    /// use datadocs::dataset_utils::DatasetBuilder;
    ///
    /// let mut builder = DatasetBuilder::new();
    /// builder
    ///     .set_header(vec!["city", "temperature"])
    ///     .add_row(vec!["Mumbai", "23.5"])
    ///     .add_row(vec!["Delhi", ""]);
    ///
    /// assert_eq!(builder.get_column("temperature").unwrap(), vec!["23.5", ""]);
    /// assert!(builder.get_column("humidity").is_none());
    /// ```
    pub fn get_column(&self, column_name: &str) -> Option<Vec<String>> {
        let idx = self.column_index(column_name)?;
        Some(
            self.data
                .iter()
                .map(|row| row.get(idx).cloned().unwrap_or_default())
                .collect(),
        )
    }

    /// Returns the distinct values of a column in first-seen order.
    pub fn get_unique(&self, column_name: &str) -> Vec<String> {
        let mut seen = Vec::new();
        if let Some(values) = self.get_column(column_name) {
            for value in values {
                if !seen.contains(&value) {
                    seen.push(value);
                }
            }
        }
        seen
    }

    /// Replaces every empty-string cell of a column with the given replacement. Rows too short
    /// to reach the column are extended first, so the column reads back the same way
    /// `get_column` models it. Unknown column names are ignored.
    ///
    /// ```
    /// use datadocs::dataset_utils::DatasetBuilder;
    ///
    /// let mut builder = DatasetBuilder::new();
    /// builder
    ///     .set_header(vec!["city"])
    ///     .add_row(vec!["Mumbai"])
    ///     .add_row(vec![""]);
    ///
    /// builder.replace_empty_cells_with("city", "Unknown");
    /// assert_eq!(builder.get_column("city").unwrap(), vec!["Mumbai", "Unknown"]);
    ///
    /// // A row that never reached the column gets the replacement too
    /// let mut builder = DatasetBuilder::new();
    /// builder
    ///     .set_header(vec!["a", "b"])
    ///     .add_row(vec!["x"]);
    ///
    /// builder.replace_empty_cells_with("b", "?");
    /// assert_eq!(builder.get_column("b").unwrap(), vec!["?"]);
    /// ```
    pub fn replace_empty_cells_with(&mut self, column_name: &str, replacement: &str) -> &mut Self {
        if let Some(idx) = self.column_index(column_name) {
            for row in &mut self.data {
                if row.len() <= idx {
                    row.resize(idx + 1, String::new());
                }
                if let Some(item) = row.get_mut(idx) {
                    if item.is_empty() {
                        *item = replacement.to_string();
                    }
                }
            }
        }
        self
    }

    /// Returns the minimum numeric value in a column. Cells that do not parse as numbers are
    /// skipped.
    ///
    /// ```
    /// use datadocs::dataset_utils::DatasetBuilder;
    ///
    /// let builder = DatasetBuilder::from_raw_data(
    ///     vec!["temperature".to_string()],
    ///     vec![
    ///         vec!["23.5".to_string()],
    ///         vec!["24.1".to_string()],
    ///         vec!["19.0".to_string()],
    ///     ],
    /// );
    ///
    /// assert_eq!(builder.get_numeric_min("temperature").unwrap(), 19.0);
    /// ```
    pub fn get_numeric_min(&self, column_name: &str) -> Option<f64> {
        let mut values = self.numeric_values(column_name)?;
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        values.first().cloned()
    }

    /// Returns the maximum numeric value in a column.
    pub fn get_numeric_max(&self, column_name: &str) -> Option<f64> {
        let mut values = self.numeric_values(column_name)?;
        values.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        values.first().cloned()
    }

    /// Returns the mean (average) of all numeric values in a column.
    ///
    /// ```
    /// use datadocs::dataset_utils::DatasetBuilder;
    ///
    /// let builder = DatasetBuilder::from_raw_data(
    ///     vec!["temperature".to_string()],
    ///     vec![
    ///         vec!["23.5".to_string()],
    ///         vec!["24.1".to_string()],
    ///         vec!["19.0".to_string()],
    ///     ],
    /// );
    ///
    /// let mean = builder.get_mean("temperature").unwrap();
    /// assert!((mean - 22.2).abs() < 1e-9);
    /// ```
    pub fn get_mean(&self, column_name: &str) -> Option<f64> {
        let values = self.numeric_values(column_name)?;
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Returns the median of all numeric values in a column: the middle value after sorting
    /// ascending, or the average of the two middle values for even counts.
    ///
    /// ```
    /// use datadocs::dataset_utils::DatasetBuilder;
    ///
    /// let builder = DatasetBuilder::from_raw_data(
    ///     vec!["temperature".to_string()],
    ///     vec![
    ///         vec!["23.5".to_string()],
    ///         vec!["24.1".to_string()],
    ///         vec!["19.0".to_string()],
    ///     ],
    /// );
    ///
    /// assert_eq!(builder.get_median("temperature").unwrap(), 23.5);
    ///
    /// // Even counts average the two middle values
    /// let builder = DatasetBuilder::from_raw_data(
    ///     vec!["temperature".to_string()],
    ///     vec![
    ///         vec!["1".to_string()],
    ///         vec!["2".to_string()],
    ///         vec!["3".to_string()],
    ///         vec!["4".to_string()],
    ///     ],
    /// );
    ///
    /// assert_eq!(builder.get_median("temperature").unwrap(), 2.5);
    /// ```
    pub fn get_median(&self, column_name: &str) -> Option<f64> {
        let mut values = self.numeric_values(column_name)?;
        if values.is_empty() {
            return None;
        }

        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mid = values.len() / 2;

        if values.len() % 2 == 0 {
            Some((values[mid - 1] + values[mid]) / 2.0)
        } else {
            Some(values[mid])
        }
    }

    /// Returns the mode (most frequent non-missing value) in a column. When several values are
    /// equally frequent, the lexicographically smallest of the tied candidates wins, so repeated
    /// calls over the same data always agree.
    ///
    /// ```
    /// use datadocs::dataset_utils::DatasetBuilder;
    ///
    /// let builder = DatasetBuilder::from_raw_data(
    ///     vec!["city".to_string()],
    ///     vec![
    ///         vec!["Mumbai".to_string()],
    ///         vec!["Delhi".to_string()],
    ///         vec!["Mumbai".to_string()],
    ///         vec!["".to_string()],
    ///     ],
    /// );
    ///
    /// assert_eq!(builder.get_mode("city").unwrap(), "Mumbai");
    ///
    /// // Ties resolve to the lexicographically smallest candidate
    /// let builder = DatasetBuilder::from_raw_data(
    ///     vec!["city".to_string()],
    ///     vec![
    ///         vec!["Delhi".to_string()],
    ///         vec!["Chennai".to_string()],
    ///     ],
    /// );
    ///
    /// assert_eq!(builder.get_mode("city").unwrap(), "Chennai");
    ///
    /// // All cells missing: no mode
    /// let builder = DatasetBuilder::from_raw_data(
    ///     vec!["city".to_string()],
    ///     vec![vec!["".to_string()], vec!["".to_string()]],
    /// );
    ///
    /// assert!(builder.get_mode("city").is_none());
    /// ```
    pub fn get_mode(&self, column_name: &str) -> Option<String> {
        let values = self.get_column(column_name)?;
        let mut frequency_map: HashMap<String, usize> = HashMap::new();

        for value in values {
            if !value.is_empty() {
                *frequency_map.entry(value).or_insert(0) += 1;
            }
        }

        frequency_map
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
            .map(|(value, _)| value)
    }

    /// Returns the population variance of all numeric values in a column.
    pub fn get_variance(&self, column_name: &str) -> Option<f64> {
        let values = self.numeric_values(column_name)?;
        if values.is_empty() {
            return None;
        }

        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let variance =
            values.iter().map(|&val| (val - mean).powi(2)).sum::<f64>() / values.len() as f64;
        Some(variance)
    }

    /// Returns the population standard deviation of all numeric values in a column.
    ///
    /// ```
    /// use datadocs::dataset_utils::DatasetBuilder;
    ///
    /// let builder = DatasetBuilder::from_raw_data(
    ///     vec!["temperature".to_string()],
    ///     vec![
    ///         vec!["23.5".to_string()],
    ///         vec!["24.1".to_string()],
    ///         vec!["19.0".to_string()],
    ///     ],
    /// );
    ///
    /// let expected = 2.28;
    /// let actual = builder.get_standard_deviation("temperature").unwrap();
    /// assert!((actual - expected).abs() < 0.01);
    /// ```
    pub fn get_standard_deviation(&self, column_name: &str) -> Option<f64> {
        let variance = self.get_variance(column_name)?;
        Some(variance.sqrt())
    }

    /// Prints the column names.
    pub fn print_columns(&self) -> &Self {
        println!("Columns: {:?}", self.headers);
        self
    }

    /// Prints the row count.
    pub fn print_row_count(&self) -> &Self {
        println!("Row count: {}", self.data.len());
        self
    }

    fn column_index(&self, column_name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column_name)
    }

    fn numeric_values(&self, column_name: &str) -> Option<Vec<f64>> {
        let idx = self.column_index(column_name)?;
        Some(
            self.data
                .iter()
                .filter_map(|row| row.get(idx).and_then(|val| val.parse::<f64>().ok()))
                .collect(),
        )
    }
}
