/// A protein with its accession and sequence.
///
#[derive(Clone, Debug)]
pub struct Protein {
    accession: String,
    sequence: String,
}

impl Protein {
    /// Creates a new protein
    ///
    /// # Arguments
    /// * `accession` - The accession
    /// * `sequence` - The amino acid sequence
    ///
    pub fn new(accession: String, sequence: String) -> Self {
        Self {
            accession,
            sequence,
        }
    }

    /// Returns the accession
    pub fn get_accession(&self) -> &String {
        &self.accession
    }

    /// Returns the sequence
    pub fn get_sequence(&self) -> &String {
        &self.sequence
    }
}
