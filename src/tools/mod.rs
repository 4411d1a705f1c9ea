/// Human readable formatting of peptide matches
pub mod display;
/// Useful macros
#[macro_use]
pub mod macros;
