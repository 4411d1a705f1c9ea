// 3rd party imports
use serde::Serialize;

// internal imports
use crate::entities::modification::ModificationMatch;

/// A peptide candidate explaining a tag on a protein, with its
/// modification placements (1-based positions).
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Peptide {
    sequence: String,
    modifications: Vec<ModificationMatch>,
}

impl Peptide {
    /// Creates a new peptide
    ///
    /// # Arguments
    /// * `sequence` - The sequence
    /// * `modifications` - Modification placements, positions 1-based
    ///
    pub fn new(sequence: String, modifications: Vec<ModificationMatch>) -> Self {
        Self {
            sequence,
            modifications,
        }
    }

    /// Returns the sequence
    pub fn get_sequence(&self) -> &String {
        &self.sequence
    }

    /// Returns the modification placements
    pub fn get_modifications(&self) -> &Vec<ModificationMatch> {
        &self.modifications
    }
}
