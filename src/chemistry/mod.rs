/// Information about amino acids and sequence mass calculation
pub mod amino_acid;
/// Information about additional molecules, e.g. water
pub mod molecule;
