/// Module for mass conversion. Conversion is necessary as all masses are handled as integer
/// to keep mass sums and tolerance comparisons exact and reproducible.
#[macro_use]
pub mod convert;
