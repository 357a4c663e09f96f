// lib.rs
//! # DATADOCS
//!
//! The in-process data layer of a data-upload-and-report pipeline: clean uploaded tabular
//! datasets, profile them for the dashboard, and score quick baseline models with graceful,
//! chainable syntax. 🚀
//!
//! The surrounding web application (routing, auth, upload parsing, chart rendering, PDF export)
//! hands a parsed table in and takes cleaned data and JSON-ready summaries out; this crate does
//! no I/O of its own.
//!
//! ## `dataset_utils`
//!
//! - **Purpose**: The `DatasetBuilder` tabular value type shared by every other module.
//! - **Features**:
//!   - Build a dataset from raw headers and rows, or cell by cell with chainable methods.
//!   - Missing cells are empty strings; column types may be declared up front or inferred.
//!   - Per-column statistics: min, max, mean, median, mode, variance, standard deviation.
//!
//! ## `clean_utils`
//!
//! - **Purpose**: Missing-value auto-imputation.
//! - **Features**:
//!   - `DatasetCleaner::clean` returns a filled copy without mutating the input: mode fill for
//!     categorical columns (`"Unknown"` when fully missing), median fill for numeric columns.
//!   - An explicit, testable column classification rule, and named errors (`CleanError`) for
//!     mixed-type columns and undefined statistics.
//!
//! ## `eda_utils`
//!
//! - **Purpose**: Exploratory-data-analysis summaries for the report screens.
//! - **Features**:
//!   - Shape, per-column kind, missing and unique counts, numeric summary statistics.
//!   - Pairwise Pearson correlations over numeric columns, computed in parallel.
//!   - JSON-safe serialization (non-finite values flattened) and a console renderer.
//!
//! ## `automl_utils`
//!
//! - **Purpose**: The dashboard's minimal train/test harness.
//! - **Features**:
//!   - Shuffled train/test split, smartcore linear regression, held-out R² and RMSE.
//!
//! ## License
//!
//! This project is licensed under the MIT License.

pub mod automl_utils;
pub mod clean_utils;
pub mod dataset_utils;
pub mod eda_utils;
