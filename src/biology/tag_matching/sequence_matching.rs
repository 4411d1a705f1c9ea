// std imports
use std::fmt::Display;
use std::str::FromStr;

// 3rd party imports
use anyhow::bail;

// internal imports
use crate::chemistry::amino_acid::AMBIGUOUS_AMINO_ACID_LOOKUP;

/// How residues of a tag stretch are compared against protein residues.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchingType {
    /// Residues must be identical
    Strict,
    /// Ambiguous codes (B, J, Z) match the residues they encode
    AmbiguityAware,
    /// Like `AmbiguityAware`, additionally treating I and L as equal
    IndistinguishableAminoAcids,
}

impl FromStr for MatchingType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "ambiguity" | "ambiguity_aware" => Ok(Self::AmbiguityAware),
            "indistinguishable" => Ok(Self::IndistinguishableAminoAcids),
            _ => bail!("Unknown matching type: {}", s),
        }
    }
}

impl Display for MatchingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::AmbiguityAware => write!(f, "ambiguity_aware"),
            Self::IndistinguishableAminoAcids => write!(f, "indistinguishable"),
        }
    }
}

/// Policy for comparing a tag stretch against a protein stretch.
///
#[derive(Clone, Debug)]
pub struct SequenceMatchingParameters {
    matching_type: MatchingType,
    /// Highest tolerated share of X residues per compared stretch
    max_x_share: f64,
}

impl SequenceMatchingParameters {
    /// Creates new matching parameters
    ///
    /// # Arguments
    /// * `matching_type` - How residues are compared
    /// * `max_x_share` - Highest tolerated share of X residues per compared stretch
    ///
    pub fn new(matching_type: MatchingType, max_x_share: f64) -> Self {
        Self {
            matching_type,
            max_x_share,
        }
    }

    /// Returns the matching type
    pub fn get_matching_type(&self) -> MatchingType {
        self.matching_type
    }

    /// Returns the highest tolerated share of X residues
    pub fn get_max_x_share(&self) -> f64 {
        self.max_x_share
    }

    /// Checks whether the pattern matches the target stretch.
    /// Both stretches must have the same length.
    ///
    /// # Arguments
    /// * `pattern` - Residues of the tag stretch
    /// * `target` - Residues of the protein stretch
    ///
    pub fn matches(&self, pattern: &str, target: &str) -> bool {
        if pattern.len() != target.len() {
            return false;
        }
        if pattern.is_empty() {
            return false;
        }
        let max_x = (self.max_x_share * pattern.len() as f64).floor() as usize;
        if pattern.chars().filter(|residue| *residue == 'X').count() > max_x
            || target.chars().filter(|residue| *residue == 'X').count() > max_x
        {
            return false;
        }
        pattern
            .chars()
            .zip(target.chars())
            .all(|(pattern_residue, target_residue)| {
                self.residues_match(pattern_residue, target_residue)
            })
    }

    /// Checks whether two single residues match under the policy.
    ///
    fn residues_match(&self, pattern_residue: char, target_residue: char) -> bool {
        if pattern_residue == target_residue {
            return true;
        }
        if pattern_residue == 'X' || target_residue == 'X' {
            return true;
        }
        match self.matching_type {
            MatchingType::Strict => false,
            MatchingType::AmbiguityAware => {
                Self::ambiguity_match(pattern_residue, target_residue)
                    || Self::ambiguity_match(target_residue, pattern_residue)
            }
            MatchingType::IndistinguishableAminoAcids => {
                if (pattern_residue == 'I' || pattern_residue == 'L')
                    && (target_residue == 'I' || target_residue == 'L')
                {
                    return true;
                }
                Self::ambiguity_match(pattern_residue, target_residue)
                    || Self::ambiguity_match(target_residue, pattern_residue)
            }
        }
    }

    /// Checks whether an ambiguous code encodes the given residue.
    ///
    fn ambiguity_match(ambiguous_residue: char, target_residue: char) -> bool {
        match AMBIGUOUS_AMINO_ACID_LOOKUP.get(&ambiguous_residue) {
            Some(encoded) => encoded
                .iter()
                .any(|amino_acid| amino_acid.get_one_letter_code() == target_residue),
            None => false,
        }
    }
}

impl Default for SequenceMatchingParameters {
    /// Indistinguishable amino acid matching with up to 25 % X residues,
    /// the usual setting for tag searches.
    ///
    fn default() -> Self {
        Self::new(MatchingType::IndistinguishableAminoAcids, 0.25)
    }
}

#[cfg(test)]
mod test {
    // internal imports
    use super::*;

    #[test]
    fn test_strict_matching() {
        let parameters = SequenceMatchingParameters::new(MatchingType::Strict, 0.25);
        assert!(parameters.matches("TEK", "TEK"));
        assert!(!parameters.matches("TEK", "TEI"));
        assert!(!parameters.matches("TEK", "TE"));
        assert!(!parameters.matches("LEK", "IEK"));
    }

    #[test]
    fn test_ambiguity_aware_matching() {
        let parameters = SequenceMatchingParameters::new(MatchingType::AmbiguityAware, 0.25);
        // B encodes D and N, in both directions
        assert!(parameters.matches("BEK", "DEK"));
        assert!(parameters.matches("NEK", "BEK"));
        assert!(parameters.matches("ZEK", "QEK"));
        assert!(parameters.matches("JEK", "LEK"));
        assert!(!parameters.matches("BEK", "EEK"));
        // I and L stay distinguishable
        assert!(!parameters.matches("LEK", "IEK"));
    }

    #[test]
    fn test_indistinguishable_matching() {
        let parameters = SequenceMatchingParameters::default();
        assert!(parameters.matches("LEK", "IEK"));
        assert!(parameters.matches("IEK", "LEK"));
        assert!(parameters.matches("BEK", "NEK"));
        assert!(!parameters.matches("MEK", "TEK"));
    }

    #[test]
    fn test_x_share_limit() {
        let parameters = SequenceMatchingParameters::new(MatchingType::Strict, 0.25);
        // One X in four residues is within the share and matches anything
        assert!(parameters.matches("TXEK", "TAEK"));
        assert!(parameters.matches("TAEK", "TXEK"));
        // One X in three residues exceeds a share of 0.25
        assert!(!parameters.matches("TXK", "TAK"));
        // Zero tolerance rejects any X
        let no_x = SequenceMatchingParameters::new(MatchingType::Strict, 0.0);
        assert!(!no_x.matches("TXEK", "TAEK"));
    }
}
