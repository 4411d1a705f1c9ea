/// Constant factor for float conversion to integer.
pub const MASS_CONVERT_FACTOR: f64 = 1000000000.0;

/// Converts a mass (Dalton) into the internal integer representation.
///
/// # Arguments
///
/// * `mass` - Mass in Dalton
///
pub fn to_int(mass: f64) -> i64 {
    (mass * MASS_CONVERT_FACTOR) as i64
}

/// Macro for mass to integer conversion. The `to_int`-method is intentionally not used,
/// so the macro can be used in assignments of constants.
///
#[allow(unused_macros)]
macro_rules! mass_to_int {
    ($mass:expr) => {{
        ($mass as f64 * crate::mass::convert::MASS_CONVERT_FACTOR) as i64
    }};
}

/// Converts a mass from the internal integer representation back to float (Dalton).
///
/// # Arguments
///
/// * `mass` - Mass in internal integer representation
///
pub fn to_float(mass: i64) -> f64 {
    mass as f64 / MASS_CONVERT_FACTOR
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mass_int_float_conversion() {
        const DALTON_FLOAT: f64 = 114.04292747369;
        // The conversion keeps nine decimal places
        const EXPECTED_DALTON_INT_CONVERSION: i64 = 114042927473;
        const EXPECTED_DALTON_FLOAT_CONVERSION: f64 = 114.042927473;

        let dalton_int: i64 = to_int(DALTON_FLOAT);
        assert_eq!(dalton_int, EXPECTED_DALTON_INT_CONVERSION);
        let dalton_float: f64 = to_float(dalton_int);
        assert_eq!(dalton_float, EXPECTED_DALTON_FLOAT_CONVERSION);
    }

    #[test]
    /// Macros are imported in crate root. So we have to test them here.
    fn test_mass_to_int_macro() {
        const DALTON_FLOAT: f64 = 114.04292747369;
        const EXPECTED_DALTON_INT_CONVERSION: i64 = 114042927473;
        assert_eq!(mass_to_int!(DALTON_FLOAT), EXPECTED_DALTON_INT_CONVERSION)
    }

    #[test]
    fn test_summing_is_exact() {
        // Summing many converted masses does not accumulate float errors
        let glycine = to_int(57.021463735);
        let sum = (0..1000).map(|_| glycine).sum::<i64>();
        assert_eq!(sum, glycine * 1000);
    }
}
