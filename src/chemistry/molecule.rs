/// Module containing small molecules needed for peptide mass calculation

/// A molecule with monoisotopic and average mass in the internal integer representation.
///
pub struct Molecule {
    name: &'static str,
    mono_mass: i64,
    average_mass: i64,
}

impl Molecule {
    /// Returns the name
    pub fn get_name(&self) -> &'static str {
        self.name
    }

    /// Returns the monoisotopic mass
    pub fn get_mono_mass(&self) -> i64 {
        self.mono_mass
    }

    /// Returns the average mass
    pub fn get_average_mass(&self) -> i64 {
        self.average_mass
    }
}

/// Water, released on peptide bond formation and added back for the peptide mass.
pub const WATER: Molecule = Molecule {
    name: "Water",
    mono_mass: mass_to_int!(18.010564684_f64),
    average_mass: mass_to_int!(18.015_f64),
};

#[cfg(test)]
mod test {
    // internal imports
    use super::*;
    use crate::mass::convert::to_int as mass_to_int;

    #[test]
    fn test_water_mass() {
        assert_eq!(WATER.get_mono_mass(), mass_to_int(18.010564684));
        assert_eq!(WATER.get_name(), "Water");
    }
}
