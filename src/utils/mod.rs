//! Validation helpers and benchmark timing shared by the library and the CLI.

pub mod timing;
pub mod validation;
