/// Module for modification descriptors and their registry
pub mod modification;
/// Module for peptide candidates produced by the tag matching
pub mod peptide;
/// Module for proteins
pub mod protein;
/// Module for de novo sequence tags
pub mod tag;
