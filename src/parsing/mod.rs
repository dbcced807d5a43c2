//! Readers that turn files into candidate and query lists.
//!
//! This module provides parsers for:
//!
//! - **Plain text**: One string per line
//! - **TSV/CSV files**: One string per row, taken from a selected column
//! - **Gzip**: Any of the above with a `.gz` suffix
//!
//! ## Example
//!
//! ```rust,no_run
//! use fuzzy_rank::parsing::candidates::{read_candidates, ReadOptions};
//! use std::path::Path;
//!
//! let options = ReadOptions { column: 1, header: true, ..ReadOptions::default() };
//! let candidates = read_candidates(Path::new("products.csv"), &options).unwrap();
//! ```

pub mod candidates;
