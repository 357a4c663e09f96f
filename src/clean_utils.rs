// clean_utils.rs
use crate::dataset_utils::{ColumnKind, DatasetBuilder};
use thiserror::Error;

/// Fill value for a categorical column whose cells are all missing.
const UNKNOWN_FILL: &str = "Unknown";

/// Fraction of parseable non-missing cells above which an undeclared mixed column is considered
/// a corrupt numeric column rather than a text column with numeric labels.
const NUMERIC_AMBIGUITY_THRESHOLD: f64 = 0.9;

/// Errors surfaced by the dataset cleaner. Both indicate malformed input, not transient failure;
/// callers keep the original, unmodified dataset and should show the message to the end user.
#[derive(Debug, PartialEq, Error)]
pub enum CleanError {
    #[error("column '{column}' mixes numeric and text values ({numeric_cells} of {non_missing_cells} non-missing cells parse as numbers)")]
    TypeMismatch {
        column: String,
        numeric_cells: usize,
        non_missing_cells: usize,
    },
    #[error("cannot compute the {statistic} of column '{column}': it has no non-missing values")]
    Computation { column: String, statistic: String },
}

/// Classifies a column as categorical or numeric from its cell values and an optional declared
/// kind. Missing cells (empty strings) are ignored.
///
/// The rule, in order:
/// - A declared kind wins. A column declared `Numeric` that holds any unparseable non-missing
///   cell is a `TypeMismatch`.
/// - No non-missing cells at all: `Categorical`.
/// - Every non-missing cell parses as `f64`: `Numeric`.
/// - No non-missing cell parses: `Categorical`.
/// - At least 90% parse but not all: `TypeMismatch`. This is almost certainly a numeric column
///   with corrupt cells, and filling a median around them would hide the corruption.
/// - Below 90%: `Categorical`, treating the stray numbers as labels in a text column.
///
/// ```
/// use datadocs::clean_utils::{classify_values, CleanError};
/// use datadocs::dataset_utils::ColumnKind;
///
/// let numeric: Vec<String> = vec!["1".into(), "2.5".into(), "".into()];
/// assert_eq!(classify_values("v", &numeric, None).unwrap(), ColumnKind::Numeric);
///
/// let text: Vec<String> = vec!["red".into(), "blue".into()];
/// assert_eq!(classify_values("v", &text, None).unwrap(), ColumnKind::Categorical);
///
/// // Mostly numeric with a stray text cell is ambiguous
/// let mut corrupt: Vec<String> = (0..9).map(|n| n.to_string()).collect();
/// corrupt.push("oops".into());
/// assert!(matches!(
///     classify_values("v", &corrupt, None),
///     Err(CleanError::TypeMismatch { .. })
/// ));
///
/// // A few numeric labels inside a text column stay categorical
/// let labelled: Vec<String> = vec!["red".into(), "blue".into(), "7".into()];
/// assert_eq!(classify_values("v", &labelled, None).unwrap(), ColumnKind::Categorical);
///
/// // A declaration overrides inference, and is checked against the cells
/// let declared: Vec<String> = vec!["1".into(), "2".into()];
/// assert_eq!(
///     classify_values("v", &declared, Some(ColumnKind::Categorical)).unwrap(),
///     ColumnKind::Categorical
/// );
/// assert!(matches!(
///     classify_values("v", &text, Some(ColumnKind::Numeric)),
///     Err(CleanError::TypeMismatch { .. })
/// ));
/// ```
pub fn classify_values(
    column_name: &str,
    values: &[String],
    declared: Option<ColumnKind>,
) -> Result<ColumnKind, CleanError> {
    let non_missing: Vec<&String> = values.iter().filter(|v| !v.is_empty()).collect();
    let numeric_cells = non_missing
        .iter()
        .filter(|v| v.parse::<f64>().is_ok())
        .count();

    match declared {
        Some(ColumnKind::Categorical) => Ok(ColumnKind::Categorical),
        Some(ColumnKind::Numeric) => {
            if numeric_cells == non_missing.len() {
                Ok(ColumnKind::Numeric)
            } else {
                Err(CleanError::TypeMismatch {
                    column: column_name.to_string(),
                    numeric_cells,
                    non_missing_cells: non_missing.len(),
                })
            }
        }
        None => {
            if non_missing.is_empty() {
                Ok(ColumnKind::Categorical)
            } else if numeric_cells == non_missing.len() {
                Ok(ColumnKind::Numeric)
            } else if numeric_cells == 0 {
                Ok(ColumnKind::Categorical)
            } else if numeric_cells as f64 / non_missing.len() as f64
                >= NUMERIC_AMBIGUITY_THRESHOLD
            {
                Err(CleanError::TypeMismatch {
                    column: column_name.to_string(),
                    numeric_cells,
                    non_missing_cells: non_missing.len(),
                })
            } else {
                Ok(ColumnKind::Categorical)
            }
        }
    }
}

/// Fills missing cells of a dataset with a per-column statistic, without touching the input.
pub struct DatasetCleaner;

impl DatasetCleaner {
    /// Returns a cleaned copy of `source` in which every missing cell has been filled using the
    /// rule for its column's kind: the mode for categorical columns (`"Unknown"` when the whole
    /// column is missing), the median for numeric columns. Columns with no missing cells are
    /// left untouched and never classified, so a fully-populated dataset always round-trips
    /// unchanged. The call either fills every column or fails without producing output.
    ///
    /// Numeric fill values use the shortest `f64` rendering, so a median of `3.0` is written
    /// back as `"3"`.
    ///
    /// ## Filling a numeric column with its median
    ///
    /// ```
    /// use datadocs::clean_utils::DatasetCleaner;
    /// use datadocs::dataset_utils::DatasetBuilder;
    ///
    /// let mut builder = DatasetBuilder::new();
    /// builder.set_header(vec!["reading"]).add_rows(vec![
    ///     vec!["1"],
    ///     vec![""],
    ///     vec!["3"],
    ///     vec![""],
    ///     vec!["5"],
    /// ]);
    ///
    /// let cleaned = DatasetCleaner::clean(&builder).unwrap();
    /// assert_eq!(
    ///     cleaned.get_column("reading").unwrap(),
    ///     vec!["1", "3", "3", "3", "5"]
    /// );
    ///
    /// // The input is never mutated
    /// assert_eq!(builder.get_column("reading").unwrap()[1], "");
    /// ```
    ///
    /// ## Filling a categorical column with its mode
    ///
    /// ```
    /// use datadocs::clean_utils::DatasetCleaner;
    /// use datadocs::dataset_utils::DatasetBuilder;
    ///
    /// let mut builder = DatasetBuilder::new();
    /// builder.set_header(vec!["city"]).add_rows(vec![
    ///     vec!["Mumbai"],
    ///     vec!["Delhi"],
    ///     vec!["Mumbai"],
    ///     vec![""],
    /// ]);
    ///
    /// let cleaned = DatasetCleaner::clean(&builder).unwrap();
    /// assert_eq!(
    ///     cleaned.get_column("city").unwrap(),
    ///     vec!["Mumbai", "Delhi", "Mumbai", "Mumbai"]
    /// );
    /// ```
    ///
    /// ## An all-missing categorical column becomes "Unknown"
    ///
    /// ```
    /// use datadocs::clean_utils::DatasetCleaner;
    /// use datadocs::dataset_utils::DatasetBuilder;
    ///
    /// let mut builder = DatasetBuilder::new();
    /// builder.set_header(vec!["city"]).add_rows(vec![vec![""], vec![""]]);
    ///
    /// let cleaned = DatasetCleaner::clean(&builder).unwrap();
    /// assert_eq!(cleaned.get_column("city").unwrap(), vec!["Unknown", "Unknown"]);
    /// ```
    ///
    /// ## An all-missing numeric column is an error
    ///
    /// A column with every cell missing can only be known to be numeric through a declaration
    /// from the ingestion layer; its median is undefined, and the cleaner refuses to invent one.
    ///
    /// ```
    /// use datadocs::clean_utils::{CleanError, DatasetCleaner};
    /// use datadocs::dataset_utils::{ColumnKind, DatasetBuilder};
    ///
    /// let mut builder = DatasetBuilder::new();
    /// builder
    ///     .set_header(vec!["reading"])
    ///     .add_rows(vec![vec![""], vec![""]])
    ///     .declare_column_type("reading", ColumnKind::Numeric);
    ///
    /// assert!(matches!(
    ///     DatasetCleaner::clean(&builder),
    ///     Err(CleanError::Computation { .. })
    /// ));
    /// ```
    ///
    /// ## Short rows count as missing and are filled
    ///
    /// A row that never reached a column reads as missing there, and the cleaned copy fills
    /// that position like any other gap.
    ///
    /// ```
    /// use datadocs::clean_utils::DatasetCleaner;
    /// use datadocs::dataset_utils::DatasetBuilder;
    ///
    /// let mut builder = DatasetBuilder::new();
    /// builder.set_header(vec!["a", "b"]).add_rows(vec![
    ///     vec!["x"],
    ///     vec!["y", "z"],
    ///     vec!["y", ""],
    /// ]);
    ///
    /// let cleaned = DatasetCleaner::clean(&builder).unwrap();
    /// assert_eq!(cleaned.get_column("b").unwrap(), vec!["z", "z", "z"]);
    /// assert!(cleaned.get_column("b").unwrap().iter().all(|v| !v.is_empty()));
    ///
    /// // The source keeps its ragged shape
    /// assert_eq!(builder.get_data().unwrap()[0].len(), 1);
    /// ```
    ///
    /// ## A mixed-type column fails without touching the input
    ///
    /// ```
    /// use datadocs::clean_utils::{CleanError, DatasetCleaner};
    /// use datadocs::dataset_utils::DatasetBuilder;
    ///
    /// let mut builder = DatasetBuilder::new();
    /// builder.set_header(vec!["reading"]);
    /// for i in 0..9 {
    ///     let cell = i.to_string();
    ///     builder.add_row(vec![cell.as_str()]);
    /// }
    /// builder.add_row(vec!["oops"]).add_row(vec![""]);
    ///
    /// let before = builder.from_copy();
    /// assert!(matches!(
    ///     DatasetCleaner::clean(&builder),
    ///     Err(CleanError::TypeMismatch { .. })
    /// ));
    /// assert_eq!(builder, before);
    /// ```
    ///
    /// ## Datasets without missing cells, and empty datasets, round-trip unchanged
    ///
    /// ```
    /// use datadocs::clean_utils::DatasetCleaner;
    /// use datadocs::dataset_utils::DatasetBuilder;
    ///
    /// let mut builder = DatasetBuilder::new();
    /// builder
    ///     .set_header(vec!["city", "reading"])
    ///     .add_row(vec!["Mumbai", "1"])
    ///     .add_row(vec!["Delhi", "2"]);
    ///
    /// let cleaned = DatasetCleaner::clean(&builder).unwrap();
    /// assert_eq!(cleaned, builder);
    ///
    /// // Cleaning is idempotent: a second pass has nothing left to fill
    /// builder.add_row(vec!["", ""]);
    /// let once = DatasetCleaner::clean(&builder).unwrap();
    /// let twice = DatasetCleaner::clean(&once).unwrap();
    /// assert_eq!(twice, once);
    ///
    /// // Zero rows is valid input
    /// let mut empty = DatasetBuilder::new();
    /// empty.set_header(vec!["x", "y"]);
    /// assert_eq!(DatasetCleaner::clean(&empty).unwrap(), empty);
    ///
    /// // So is a dataset with no columns at all
    /// let blank = DatasetBuilder::new();
    /// assert_eq!(DatasetCleaner::clean(&blank).unwrap(), blank);
    /// ```
    pub fn clean(source: &DatasetBuilder) -> Result<DatasetBuilder, CleanError> {
        let headers: Vec<String> = source
            .get_headers()
            .map(|h| h.to_vec())
            .unwrap_or_default();

        // Decide every fill value before writing any cell, so an error in a later column never
        // leaks a partially-cleaned dataset.
        let mut fills: Vec<(String, String)> = Vec::new();

        for name in &headers {
            let values = source.get_column(name).unwrap_or_default();
            let missing = values.iter().filter(|v| v.is_empty()).count();
            if missing == 0 {
                continue;
            }

            let kind = classify_values(name, &values, source.declared_type(name))?;

            let fill = match kind {
                ColumnKind::Categorical => source
                    .get_mode(name)
                    .unwrap_or_else(|| UNKNOWN_FILL.to_string()),
                ColumnKind::Numeric => match source.get_median(name) {
                    Some(median) => median.to_string(),
                    None => {
                        return Err(CleanError::Computation {
                            column: name.clone(),
                            statistic: "median".to_string(),
                        })
                    }
                },
            };

            fills.push((name.clone(), fill));
        }

        let mut cleaned = source.from_copy();
        for (name, fill) in fills {
            cleaned.replace_empty_cells_with(&name, &fill);
        }

        Ok(cleaned)
    }
}
