/// Contains formatting functions for displaying data in a (human-)readable format.
///

// 3rd party imports
use itertools::Itertools;

// internal imports
use crate::entities::peptide::Peptide;

/// Formats a peptide match into a single human-readable line.
/// E.g. accession `P04406`, start index 2 and a peptide `NTEK` with an
/// acetylated N-terminus -> `P04406 3..6 NTEK Acetyl@1(variable)`
/// Positions are reported 1-based.
///
/// # Arguments
/// * `accession` - Accession of the matched protein
/// * `start_index` - 0-based index of the first peptide residue within the protein
/// * `peptide` - The matched peptide
///
pub fn peptide_match_to_string(accession: &str, start_index: usize, peptide: &Peptide) -> String {
    let end_position = start_index + peptide.get_sequence().len();
    if peptide.get_modifications().is_empty() {
        return format!(
            "{} {}..{} {}",
            accession,
            start_index + 1,
            end_position,
            peptide.get_sequence()
        );
    }
    let modifications = peptide
        .get_modifications()
        .iter()
        .map(|modification| {
            format!(
                "{}@{}({})",
                modification.get_name(),
                modification.get_position(),
                if modification.is_variable() {
                    "variable"
                } else {
                    "fixed"
                }
            )
        })
        .join(",");
    format!(
        "{} {}..{} {} {}",
        accession,
        start_index + 1,
        end_position,
        peptide.get_sequence(),
        modifications
    )
}

#[cfg(test)]
mod test {
    // internal imports
    use super::*;
    use crate::entities::modification::ModificationMatch;

    #[test]
    fn test_peptide_match_to_string() {
        let unmodified = Peptide::new("NTEK".to_string(), Vec::new());
        assert_eq!(
            peptide_match_to_string("P04406", 2, &unmodified),
            "P04406 3..6 NTEK"
        );

        let modified = Peptide::new(
            "NTEK".to_string(),
            vec![
                ModificationMatch::new("Acetyl".to_string(), true, 1),
                ModificationMatch::new("Carbamidomethyl".to_string(), false, 3),
            ],
        );
        assert_eq!(
            peptide_match_to_string("P04406", 2, &modified),
            "P04406 3..6 NTEK Acetyl@1(variable),Carbamidomethyl@3(fixed)"
        );
    }
}
