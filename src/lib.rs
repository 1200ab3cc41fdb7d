//! This crate implements an external merge sort for CSV files that do not fit
//! into memory.
//!
//! A delimited text file with a header line can be sorted by any named column
//! without loading the whole file into memory. The input is streamed into
//! bounded size sorted chunk files, the chunks are pairwise merged until a
//! single sorted file remains, and that file is moved to the output path.
//! Comparison is lexicographic on the raw string value of the key column.
//!
//! The accepted format is deliberately narrow: a bare comma delimiter with no
//! quoting or escaping, column names restricted to `[-A-Za-z0-9_ ]`, and no
//! commas or line breaks within field values. Richer CSV dialects are out of
//! scope.
//!
//! # Examples
//! ```
//! use std::path::PathBuf;
//! use csv_file_sort::sort::Sort;
//!
//! fn sort_by_score(input: PathBuf, output: PathBuf) -> Result<(), anyhow::Error> {
//!     let mut csv_sort = Sort::new(input, output, "score");
//!
//!     // set the number of records held in memory during the split phase.
//!     // The default is 50 which suits tests; use a much larger value for
//!     // real workloads.
//!     csv_sort.with_chunk_capacity(100_000);
//!
//!     csv_sort.sort()
//! }
//! ```

pub(crate) mod chunk_file;
pub(crate) mod config;

pub mod error;
pub mod record;
pub mod schema;
pub mod sort;
