/// Module containing amino acid information

// std imports
use std::collections::HashMap;

// 3rd party imports
use anyhow::{bail, Result};

// internal imports
use crate::chemistry::molecule::WATER;

/// An amino acid with its one and three letter codes and masses.
/// Masses are kept in the internal integer representation, see `crate::mass::convert`.
///
pub struct AminoAcid {
    name: &'static str,
    one_letter_code: char,
    three_letter_code: &'static str,
    mono_mass: i64,
    average_mass: i64,
}

impl AminoAcid {
    /// Returns the amino acid for the given one letter code
    ///
    /// # Arguments
    /// * `one_letter_code` - One letter code of the amino acid
    ///
    pub fn get_by_one_letter_code(one_letter_code: char) -> Result<&'static Self> {
        match one_letter_code.to_ascii_uppercase() {
            'A' => Ok(&ALANINE),
            'B' => Ok(&ASPARAGINE_OR_ASPARTIC_ACID),
            'C' => Ok(&CYSTEINE),
            'D' => Ok(&ASPARTIC_ACID),
            'E' => Ok(&GLUTAMIC_ACID),
            'F' => Ok(&PHENYLALANINE),
            'G' => Ok(&GLYCINE),
            'H' => Ok(&HISTIDINE),
            'I' => Ok(&ISOLEUCINE),
            'J' => Ok(&ISOLEUCINE_OR_LEUCINE),
            'K' => Ok(&LYSINE),
            'L' => Ok(&LEUCINE),
            'M' => Ok(&METHIONINE),
            'N' => Ok(&ASPARAGINE),
            'O' => Ok(&PYRROLYSINE),
            'P' => Ok(&PROLINE),
            'Q' => Ok(&GLUTAMINE),
            'R' => Ok(&ARGININE),
            'S' => Ok(&SERINE),
            'T' => Ok(&THREONINE),
            'U' => Ok(&SELENOCYSTEINE),
            'V' => Ok(&VALINE),
            'W' => Ok(&TRYPTOPHAN),
            'Y' => Ok(&TYROSINE),
            'Z' => Ok(&GLUTAMINE_OR_GLUTAMIC_ACID),
            'X' => Ok(&UNKNOWN),
            _ => bail!("Unknown one letter code: {}", one_letter_code),
        }
    }

    /// Returns all known amino acids, including the ambiguous ones
    pub fn get_all() -> &'static [&'static AminoAcid; 26] {
        &ALL
    }

    /// Returns the name
    pub fn get_name(&self) -> &'static str {
        self.name
    }

    /// Returns the one letter code
    pub fn get_one_letter_code(&self) -> char {
        self.one_letter_code
    }

    /// Returns the three letter code
    pub fn get_three_letter_code(&self) -> &'static str {
        self.three_letter_code
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

// Standard amino acids: https://proteomicsresource.washington.edu/protocols06/masses.php
pub const ALANINE:                  AminoAcid = AminoAcid{name: "Alanine",              one_letter_code: 'A',   three_letter_code: "Ala",   mono_mass: mass_to_int!(71.037113805_f64),      average_mass: mass_to_int!(71.0788_f64)};
pub const CYSTEINE:                 AminoAcid = AminoAcid{name: "Cysteine",             one_letter_code: 'C',   three_letter_code: "Cys",   mono_mass: mass_to_int!(103.009184505_f64),     average_mass: mass_to_int!(103.1388_f64)};
pub const ASPARTIC_ACID:            AminoAcid = AminoAcid{name: "Aspartic acid",        one_letter_code: 'D',   three_letter_code: "Asp",   mono_mass: mass_to_int!(115.026943065_f64),     average_mass: mass_to_int!(115.0886_f64)};
pub const GLUTAMIC_ACID:            AminoAcid = AminoAcid{name: "Glutamic acid",        one_letter_code: 'E',   three_letter_code: "Glu",   mono_mass: mass_to_int!(129.042593135_f64),     average_mass: mass_to_int!(129.1155_f64)};
pub const PHENYLALANINE:            AminoAcid = AminoAcid{name: "Phenylalanine",        one_letter_code: 'F',   three_letter_code: "Phe",   mono_mass: mass_to_int!(147.068413945_f64),     average_mass: mass_to_int!(147.1766_f64)};
pub const GLYCINE:                  AminoAcid = AminoAcid{name: "Glycine",              one_letter_code: 'G',   three_letter_code: "Gly",   mono_mass: mass_to_int!(57.021463735_f64),      average_mass: mass_to_int!(57.0519_f64)};
pub const HISTIDINE:                AminoAcid = AminoAcid{name: "Histidine",            one_letter_code: 'H',   three_letter_code: "His",   mono_mass: mass_to_int!(137.058911875_f64),     average_mass: mass_to_int!(137.1411_f64)};
pub const ISOLEUCINE:               AminoAcid = AminoAcid{name: "Isoleucine",           one_letter_code: 'I',   three_letter_code: "Ile",   mono_mass: mass_to_int!(113.084064015_f64),     average_mass: mass_to_int!(113.1594_f64)};
pub const LYSINE:                   AminoAcid = AminoAcid{name: "Lysine",               one_letter_code: 'K',   three_letter_code: "Lys",   mono_mass: mass_to_int!(128.094963050_f64),     average_mass: mass_to_int!(128.1741_f64)};
pub const LEUCINE:                  AminoAcid = AminoAcid{name: "Leucine",              one_letter_code: 'L',   three_letter_code: "Leu",   mono_mass: mass_to_int!(113.084064015_f64),     average_mass: mass_to_int!(113.1594_f64)};
pub const METHIONINE:               AminoAcid = AminoAcid{name: "Methionine",           one_letter_code: 'M',   three_letter_code: "Met",   mono_mass: mass_to_int!(131.040484645_f64),     average_mass: mass_to_int!(131.1926_f64)};
pub const ASPARAGINE:               AminoAcid = AminoAcid{name: "Asparagine",           one_letter_code: 'N',   three_letter_code: "Asn",   mono_mass: mass_to_int!(114.042927470_f64),     average_mass: mass_to_int!(114.1038_f64)};
pub const PYRROLYSINE:              AminoAcid = AminoAcid{name: "Pyrrolysine",          one_letter_code: 'O',   three_letter_code: "Pyl",   mono_mass: mass_to_int!(237.147726925_f64),     average_mass: mass_to_int!(237.29816_f64)};
pub const PROLINE:                  AminoAcid = AminoAcid{name: "Proline",              one_letter_code: 'P',   three_letter_code: "Pro",   mono_mass: mass_to_int!(97.052763875_f64),      average_mass: mass_to_int!(97.1167_f64)};
pub const GLUTAMINE:                AminoAcid = AminoAcid{name: "Glutamine",            one_letter_code: 'Q',   three_letter_code: "Gln",   mono_mass: mass_to_int!(128.05857754_f64),      average_mass: mass_to_int!(128.1307_f64)};
pub const ARGININE:                 AminoAcid = AminoAcid{name: "Arginine",             one_letter_code: 'R',   three_letter_code: "Arg",   mono_mass: mass_to_int!(156.101111050_f64),     average_mass: mass_to_int!(156.1875_f64)};
pub const SERINE:                   AminoAcid = AminoAcid{name: "Serine",               one_letter_code: 'S',   three_letter_code: "Ser",   mono_mass: mass_to_int!(87.032028435_f64),      average_mass: mass_to_int!(87.0782_f64)};
pub const THREONINE:                AminoAcid = AminoAcid{name: "Threonine",            one_letter_code: 'T',   three_letter_code: "Thr",   mono_mass: mass_to_int!(101.047678505_f64),     average_mass: mass_to_int!(101.1051_f64)};
pub const SELENOCYSTEINE:           AminoAcid = AminoAcid{name: "Selenocysteine",       one_letter_code: 'U',   three_letter_code: "SeC",   mono_mass: mass_to_int!(150.953633405_f64),     average_mass: mass_to_int!(150.0379_f64)};
pub const VALINE:                   AminoAcid = AminoAcid{name: "Valine",               one_letter_code: 'V',   three_letter_code: "Val",   mono_mass: mass_to_int!(99.068413945_f64),      average_mass: mass_to_int!(99.1326_f64)};
pub const TRYPTOPHAN:               AminoAcid = AminoAcid{name: "Tryptophan",           one_letter_code: 'W',   three_letter_code: "Trp",   mono_mass: mass_to_int!(186.079312980_f64),     average_mass: mass_to_int!(186.2132_f64)};
pub const TYROSINE:                 AminoAcid = AminoAcid{name: "Tyrosine",             one_letter_code: 'Y',   three_letter_code: "Tyr",   mono_mass: mass_to_int!(163.063328575_f64),     average_mass: mass_to_int!(163.1760_f64)};
// Ambiguous amino acids
pub const ASPARAGINE_OR_ASPARTIC_ACID: AminoAcid = AminoAcid{name: "Asparagine or aspartic acid",  one_letter_code: 'B',   three_letter_code: "Asx", mono_mass: mass_to_int!(114.5349352675_f64),  average_mass: mass_to_int!(114.59502_f64)};
pub const ISOLEUCINE_OR_LEUCINE:      AminoAcid = AminoAcid{name: "Isoleucine or Leucine",        one_letter_code: 'J',   three_letter_code: "Xle", mono_mass: mass_to_int!(113.084064015_f64),   average_mass: mass_to_int!(113.1594_f64)};
pub const GLUTAMINE_OR_GLUTAMIC_ACID:  AminoAcid = AminoAcid{name: "Glutamine or glutamic acid",   one_letter_code: 'Z',   three_letter_code: "Glx", mono_mass: mass_to_int!(128.5505853375_f64),  average_mass: mass_to_int!(128.6216_f64)};
// Special amino acids
//// Some search engines and databases use the X amino acid for unknown amino acids
pub const UNKNOWN:                  AminoAcid = AminoAcid{name: "Unknown Amino Acid",    one_letter_code: 'X',   three_letter_code: "Xaa",   mono_mass: 0,                                   average_mass: 0};

const ALL: [&'static AminoAcid; 26] = [
    &ALANINE,
    &CYSTEINE,
    &ASPARTIC_ACID,
    &GLUTAMIC_ACID,
    &PHENYLALANINE,
    &GLYCINE,
    &HISTIDINE,
    &ISOLEUCINE,
    &LYSINE,
    &LEUCINE,
    &METHIONINE,
    &ASPARAGINE,
    &PYRROLYSINE,
    &PROLINE,
    &GLUTAMINE,
    &ARGININE,
    &SERINE,
    &THREONINE,
    &SELENOCYSTEINE,
    &VALINE,
    &TRYPTOPHAN,
    &TYROSINE,
    &ASPARAGINE_OR_ASPARTIC_ACID,
    &ISOLEUCINE_OR_LEUCINE,
    &GLUTAMINE_OR_GLUTAMIC_ACID,
    &UNKNOWN
];

lazy_static! {
    /// Actual amino acids encoded by an ambiguous one letter code.
    pub static ref AMBIGUOUS_AMINO_ACID_LOOKUP: HashMap<char, [&'static AminoAcid; 2]> = collection! {
        'B' => [&ASPARTIC_ACID, &ASPARAGINE],
        'J' => [&ISOLEUCINE, &LEUCINE],
        'Z' => [&GLUTAMIC_ACID, &GLUTAMINE]
    };
}

/// Calculates the mass of a peptide sequence, including water.
///
/// # Arguments
/// * `sequence` - Peptide sequence
///
pub fn calc_sequence_mass(sequence: &str) -> Result<i64> {
    Ok(WATER.get_mono_mass() + calc_residue_mass_sum(sequence)?)
}

/// Calculates the summed residue mass of a sequence stretch, without water.
///
/// # Arguments
/// * `sequence` - Sequence stretch
///
pub fn calc_residue_mass_sum(sequence: &str) -> Result<i64> {
    let mut mass: i64 = 0;
    for one_letter_code in sequence.chars() {
        mass += AminoAcid::get_by_one_letter_code(one_letter_code)?.get_mono_mass();
    }
    Ok(mass)
}

#[cfg(test)]
mod test {
    // internal imports
    use super::*;
    use crate::mass::convert::to_int as mass_to_int;

    #[test]
    fn test_get_by_one_letter_code() {
        let asparagine = AminoAcid::get_by_one_letter_code('N').unwrap();
        assert_eq!(asparagine.get_name(), "Asparagine");
        assert_eq!(asparagine.get_three_letter_code(), "Asn");
        assert_eq!(asparagine.get_mono_mass(), mass_to_int(114.042927470));
        // Lower case codes are accepted
        assert_eq!(
            AminoAcid::get_by_one_letter_code('n')
                .unwrap()
                .get_one_letter_code(),
            'N'
        );
        assert!(AminoAcid::get_by_one_letter_code('1').is_err());
    }

    #[test]
    fn test_all_codes_resolve() {
        for amino_acid in AminoAcid::get_all() {
            let resolved = AminoAcid::get_by_one_letter_code(amino_acid.get_one_letter_code()).unwrap();
            assert_eq!(resolved.get_name(), amino_acid.get_name());
            assert_eq!(resolved.get_mono_mass(), amino_acid.get_mono_mass());
            assert_eq!(resolved.get_average_mass(), amino_acid.get_average_mass());
        }
    }

    #[test]
    fn test_isoleucine_and_leucine_have_equal_mass() {
        assert_eq!(ISOLEUCINE.get_mono_mass(), LEUCINE.get_mono_mass());
        assert_eq!(ISOLEUCINE_OR_LEUCINE.get_mono_mass(), LEUCINE.get_mono_mass());
    }

    #[test]
    fn test_calc_sequence_mass() {
        // G + G + water
        let expected = mass_to_int(57.021463735) * 2 + WATER.get_mono_mass();
        assert_eq!(calc_sequence_mass("GG").unwrap(), expected);
        assert_eq!(calc_residue_mass_sum("GG").unwrap(), mass_to_int(57.021463735) * 2);
        assert!(calc_sequence_mass("G1G").is_err());
    }

    #[test]
    fn test_ambiguous_lookup() {
        assert_eq!(
            AMBIGUOUS_AMINO_ACID_LOOKUP
                .get(&'B')
                .unwrap()
                .iter()
                .map(|amino_acid| amino_acid.get_one_letter_code())
                .collect::<Vec<char>>(),
            vec!['D', 'N']
        );
        assert!(!AMBIGUOUS_AMINO_ACID_LOOKUP.contains_key(&'A'));
    }
}
