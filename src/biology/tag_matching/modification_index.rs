// 3rd party imports
use thiserror::Error;

// internal imports
use crate::biology::tag_matching::Terminus;
use crate::entities::modification::{ModificationRegistry, ModificationScope};

#[derive(Error, Debug)]
pub enum ModificationIndexError {
    #[error("unknown modification: {0}")]
    UnknownModification(String),
    #[error("fixed modification `{0}` targets {1} residues, exactly one is required")]
    FixedModificationOnResiduePattern(String, usize),
    #[error("modification `{0}` targets `{1}` which is not an amino acid one letter code")]
    InvalidTargetResidue(String, char),
}

/// Number of residue slots, one per letter A-Z.
const RESIDUE_SLOTS: usize = 26;

/// Returns the residue slot for an one letter code,
/// `None` for anything outside A-Z.
///
pub fn residue_index(one_letter_code: char) -> Option<usize> {
    if one_letter_code.is_ascii_uppercase() {
        Some(one_letter_code as usize - 'A' as usize)
    } else {
        None
    }
}

/// Modifications applicable at one terminus kind (protein or peptide,
/// one direction), split into fixed and variable, residue agnostic and
/// residue bound.
///
#[derive(Debug, Default)]
struct TerminalBucket {
    fixed_mass: i64,
    fixed_names: Vec<String>,
    fixed_residue_masses: [i64; RESIDUE_SLOTS],
    fixed_residue_names: [Vec<String>; RESIDUE_SLOTS],
    variable_mods: Vec<(String, i64)>,
    variable_residue_mods: [Vec<(String, i64)>; RESIDUE_SLOTS],
}

impl TerminalBucket {
    fn add_fixed(&mut self, name: &str, mass: i64) {
        self.fixed_mass += mass;
        self.fixed_names.push(name.to_string());
    }

    fn add_fixed_residue(&mut self, residue: usize, name: &str, mass: i64) {
        self.fixed_residue_masses[residue] += mass;
        self.fixed_residue_names[residue].push(name.to_string());
    }

    fn add_variable(&mut self, name: &str, mass: i64) {
        self.variable_mods.push((name.to_string(), mass));
    }

    fn add_variable_residue(&mut self, residue: usize, name: &str, mass: i64) {
        self.variable_residue_mods[residue].push((name.to_string(), mass));
    }
}

/// Scope-partitioned lookup of a modification configuration. Fixed
/// residue bound masses are accumulated per residue slot, variable
/// modifications keep their configuration order. The index also tracks
/// the extreme variable peptide-terminal masses per direction, used as
/// pruning margins during gap resolution.
///
#[derive(Debug, Default)]
pub struct ModificationIndex {
    fixed_amino_acid_masses: [i64; RESIDUE_SLOTS],
    fixed_amino_acid_names: [Vec<String>; RESIDUE_SLOTS],
    variable_amino_acid_mods: [Vec<(String, i64)>; RESIDUE_SLOTS],
    protein_n_terminal: TerminalBucket,
    protein_c_terminal: TerminalBucket,
    peptide_n_terminal: TerminalBucket,
    peptide_c_terminal: TerminalBucket,
    min_n_terminal_margin: i64,
    max_n_terminal_margin: i64,
    min_c_terminal_margin: i64,
    max_c_terminal_margin: i64,
}

impl ModificationIndex {
    /// Builds the index from modification names and a registry
    ///
    /// # Arguments
    /// * `fixed_names` - Names of the fixed modifications
    /// * `variable_names` - Names of the variable modifications
    /// * `registry` - Registry resolving the names
    ///
    pub fn new(
        fixed_names: &[String],
        variable_names: &[String],
        registry: &ModificationRegistry,
    ) -> Result<Self, ModificationIndexError> {
        let mut index = Self::default();
        for name in fixed_names {
            index.add_fixed(name, registry)?;
        }
        for name in variable_names {
            index.add_variable(name, registry)?;
        }
        Ok(index)
    }

    fn add_fixed(
        &mut self,
        name: &str,
        registry: &ModificationRegistry,
    ) -> Result<(), ModificationIndexError> {
        let modification = registry
            .get(name)
            .ok_or_else(|| ModificationIndexError::UnknownModification(name.to_string()))?;
        let mass = modification.get_mass_delta();
        match modification.get_scope() {
            ModificationScope::AminoAcid(residues) => {
                let residue = Self::single_fixed_residue(name, residues)?;
                self.fixed_amino_acid_masses[residue] += mass;
                self.fixed_amino_acid_names[residue].push(name.to_string());
            }
            ModificationScope::ProteinNTerminus => self.protein_n_terminal.add_fixed(name, mass),
            ModificationScope::ProteinCTerminus => self.protein_c_terminal.add_fixed(name, mass),
            ModificationScope::PeptideNTerminus => self.peptide_n_terminal.add_fixed(name, mass),
            ModificationScope::PeptideCTerminus => self.peptide_c_terminal.add_fixed(name, mass),
            ModificationScope::ProteinNTerminusOfAminoAcid(residues) => {
                let residue = Self::single_fixed_residue(name, residues)?;
                self.protein_n_terminal.add_fixed_residue(residue, name, mass);
            }
            ModificationScope::ProteinCTerminusOfAminoAcid(residues) => {
                let residue = Self::single_fixed_residue(name, residues)?;
                self.protein_c_terminal.add_fixed_residue(residue, name, mass);
            }
            ModificationScope::PeptideNTerminusOfAminoAcid(residues) => {
                let residue = Self::single_fixed_residue(name, residues)?;
                self.peptide_n_terminal.add_fixed_residue(residue, name, mass);
            }
            ModificationScope::PeptideCTerminusOfAminoAcid(residues) => {
                let residue = Self::single_fixed_residue(name, residues)?;
                self.peptide_c_terminal.add_fixed_residue(residue, name, mass);
            }
        }
        Ok(())
    }

    fn add_variable(
        &mut self,
        name: &str,
        registry: &ModificationRegistry,
    ) -> Result<(), ModificationIndexError> {
        let modification = registry
            .get(name)
            .ok_or_else(|| ModificationIndexError::UnknownModification(name.to_string()))?;
        let mass = modification.get_mass_delta();
        match modification.get_scope() {
            ModificationScope::AminoAcid(residues) => {
                for residue in Self::residue_indices(name, residues)? {
                    self.variable_amino_acid_mods[residue].push((name.to_string(), mass));
                }
            }
            ModificationScope::ProteinNTerminus => self.protein_n_terminal.add_variable(name, mass),
            ModificationScope::ProteinCTerminus => self.protein_c_terminal.add_variable(name, mass),
            ModificationScope::PeptideNTerminus => {
                self.peptide_n_terminal.add_variable(name, mass);
                self.track_margin(Terminus::N, mass);
            }
            ModificationScope::PeptideCTerminus => {
                self.peptide_c_terminal.add_variable(name, mass);
                self.track_margin(Terminus::C, mass);
            }
            ModificationScope::ProteinNTerminusOfAminoAcid(residues) => {
                for residue in Self::residue_indices(name, residues)? {
                    self.protein_n_terminal.add_variable_residue(residue, name, mass);
                }
            }
            ModificationScope::ProteinCTerminusOfAminoAcid(residues) => {
                for residue in Self::residue_indices(name, residues)? {
                    self.protein_c_terminal.add_variable_residue(residue, name, mass);
                }
            }
            ModificationScope::PeptideNTerminusOfAminoAcid(residues) => {
                for residue in Self::residue_indices(name, residues)? {
                    self.peptide_n_terminal.add_variable_residue(residue, name, mass);
                }
                self.track_margin(Terminus::N, mass);
            }
            ModificationScope::PeptideCTerminusOfAminoAcid(residues) => {
                for residue in Self::residue_indices(name, residues)? {
                    self.peptide_c_terminal.add_variable_residue(residue, name, mass);
                }
                self.track_margin(Terminus::C, mass);
            }
        }
        Ok(())
    }

    /// Widens the pruning margins by a variable peptide-terminal mass.
    ///
    fn track_margin(&mut self, terminus: Terminus, mass: i64) {
        match terminus {
            Terminus::N => {
                self.min_n_terminal_margin = self.min_n_terminal_margin.min(mass);
                self.max_n_terminal_margin = self.max_n_terminal_margin.max(mass);
            }
            Terminus::C => {
                self.min_c_terminal_margin = self.min_c_terminal_margin.min(mass);
                self.max_c_terminal_margin = self.max_c_terminal_margin.max(mass);
            }
        }
    }

    /// Resolves the target residues of a fixed residue bound
    /// modification, which must name exactly one residue.
    ///
    fn single_fixed_residue(
        name: &str,
        residues: &[char],
    ) -> Result<usize, ModificationIndexError> {
        if residues.len() != 1 {
            return Err(ModificationIndexError::FixedModificationOnResiduePattern(
                name.to_string(),
                residues.len(),
            ));
        }
        residue_index(residues[0])
            .ok_or(ModificationIndexError::InvalidTargetResidue(name.to_string(), residues[0]))
    }

    /// Resolves all target residues of a residue bound modification.
    ///
    fn residue_indices(
        name: &str,
        residues: &[char],
    ) -> Result<Vec<usize>, ModificationIndexError> {
        residues
            .iter()
            .map(|residue| {
                residue_index(*residue).ok_or(ModificationIndexError::InvalidTargetResidue(
                    name.to_string(),
                    *residue,
                ))
            })
            .collect()
    }

    fn protein_terminal(&self, terminus: Terminus) -> &TerminalBucket {
        match terminus {
            Terminus::N => &self.protein_n_terminal,
            Terminus::C => &self.protein_c_terminal,
        }
    }

    fn peptide_terminal(&self, terminus: Terminus) -> &TerminalBucket {
        match terminus {
            Terminus::N => &self.peptide_n_terminal,
            Terminus::C => &self.peptide_c_terminal,
        }
    }

    /// Returns the accumulated fixed mass on a free residue
    pub fn get_fixed_amino_acid_mass(&self, residue: usize) -> i64 {
        self.fixed_amino_acid_masses[residue]
    }

    /// Returns the fixed modification names on a free residue
    pub fn get_fixed_amino_acid_names(&self, residue: usize) -> &[String] {
        &self.fixed_amino_acid_names[residue]
    }

    /// Returns the variable modifications on a free residue
    pub fn get_variable_amino_acid_mods(&self, residue: usize) -> &[(String, i64)] {
        &self.variable_amino_acid_mods[residue]
    }

    /// Returns the residue agnostic fixed mass at a protein terminus
    pub fn get_fixed_protein_terminal_mass(&self, terminus: Terminus) -> i64 {
        self.protein_terminal(terminus).fixed_mass
    }

    /// Returns the residue agnostic fixed names at a protein terminus
    pub fn get_fixed_protein_terminal_names(&self, terminus: Terminus) -> &[String] {
        &self.protein_terminal(terminus).fixed_names
    }

    /// Returns the residue bound fixed mass at a protein terminus
    pub fn get_fixed_protein_terminal_residue_mass(
        &self,
        terminus: Terminus,
        residue: usize,
    ) -> i64 {
        self.protein_terminal(terminus).fixed_residue_masses[residue]
    }

    /// Returns the residue bound fixed names at a protein terminus
    pub fn get_fixed_protein_terminal_residue_names(
        &self,
        terminus: Terminus,
        residue: usize,
    ) -> &[String] {
        &self.protein_terminal(terminus).fixed_residue_names[residue]
    }

    /// Returns the residue agnostic variable modifications at a protein terminus
    pub fn get_variable_protein_terminal_mods(&self, terminus: Terminus) -> &[(String, i64)] {
        &self.protein_terminal(terminus).variable_mods
    }

    /// Returns the residue bound variable modifications at a protein terminus
    pub fn get_variable_protein_terminal_residue_mods(
        &self,
        terminus: Terminus,
        residue: usize,
    ) -> &[(String, i64)] {
        &self.protein_terminal(terminus).variable_residue_mods[residue]
    }

    /// Returns the residue agnostic fixed mass at a peptide terminus
    pub fn get_fixed_peptide_terminal_mass(&self, terminus: Terminus) -> i64 {
        self.peptide_terminal(terminus).fixed_mass
    }

    /// Returns the residue agnostic fixed names at a peptide terminus
    pub fn get_fixed_peptide_terminal_names(&self, terminus: Terminus) -> &[String] {
        &self.peptide_terminal(terminus).fixed_names
    }

    /// Returns the residue bound fixed mass at a peptide terminus
    pub fn get_fixed_peptide_terminal_residue_mass(
        &self,
        terminus: Terminus,
        residue: usize,
    ) -> i64 {
        self.peptide_terminal(terminus).fixed_residue_masses[residue]
    }

    /// Returns the residue bound fixed names at a peptide terminus
    pub fn get_fixed_peptide_terminal_residue_names(
        &self,
        terminus: Terminus,
        residue: usize,
    ) -> &[String] {
        &self.peptide_terminal(terminus).fixed_residue_names[residue]
    }

    /// Returns the residue agnostic variable modifications at a peptide terminus
    pub fn get_variable_peptide_terminal_mods(&self, terminus: Terminus) -> &[(String, i64)] {
        &self.peptide_terminal(terminus).variable_mods
    }

    /// Returns the residue bound variable modifications at a peptide terminus
    pub fn get_variable_peptide_terminal_residue_mods(
        &self,
        terminus: Terminus,
        residue: usize,
    ) -> &[(String, i64)] {
        &self.peptide_terminal(terminus).variable_residue_mods[residue]
    }

    /// Returns the smallest variable peptide-terminal mass for the
    /// direction, at most zero
    pub fn get_min_terminal_margin(&self, terminus: Terminus) -> i64 {
        match terminus {
            Terminus::N => self.min_n_terminal_margin,
            Terminus::C => self.min_c_terminal_margin,
        }
    }

    /// Returns the largest variable peptide-terminal mass for the
    /// direction, at least zero
    pub fn get_max_terminal_margin(&self, terminus: Terminus) -> i64 {
        match terminus {
            Terminus::N => self.max_n_terminal_margin,
            Terminus::C => self.max_c_terminal_margin,
        }
    }
}

#[cfg(test)]
mod test {
    // internal imports
    use super::*;
    use crate::entities::modification::Modification;

    fn build_registry() -> ModificationRegistry {
        let mut registry = ModificationRegistry::new();
        registry.register(Modification::new(
            "Carbamidomethyl of C".to_string(),
            mass_to_int!(57.021464_f64),
            ModificationScope::AminoAcid(vec!['C']),
        ));
        registry.register(Modification::new(
            "Oxidation of M".to_string(),
            mass_to_int!(15.994915_f64),
            ModificationScope::AminoAcid(vec!['M']),
        ));
        registry.register(Modification::new(
            "Phospho of STY".to_string(),
            mass_to_int!(79.966331_f64),
            ModificationScope::AminoAcid(vec!['S', 'T', 'Y']),
        ));
        registry.register(Modification::new(
            "Acetyl of peptide N-term".to_string(),
            mass_to_int!(42.010565_f64),
            ModificationScope::PeptideNTerminus,
        ));
        registry.register(Modification::new(
            "Pyro-glu of peptide N-term Q".to_string(),
            mass_to_int!(-17.026549_f64),
            ModificationScope::PeptideNTerminusOfAminoAcid(vec!['Q']),
        ));
        registry.register(Modification::new(
            "Amidation of protein C-term".to_string(),
            mass_to_int!(-0.984016_f64),
            ModificationScope::ProteinCTerminus,
        ));
        registry
    }

    #[test]
    fn test_fixed_amino_acid_bucket() {
        let registry = build_registry();
        let index = ModificationIndex::new(
            &["Carbamidomethyl of C".to_string()],
            &[],
            &registry,
        )
        .unwrap();
        let cysteine = residue_index('C').unwrap();
        assert_eq!(
            index.get_fixed_amino_acid_mass(cysteine),
            mass_to_int!(57.021464_f64)
        );
        assert_eq!(
            index.get_fixed_amino_acid_names(cysteine),
            &["Carbamidomethyl of C".to_string()]
        );
        assert_eq!(index.get_fixed_amino_acid_mass(residue_index('A').unwrap()), 0);
    }

    #[test]
    fn test_fixed_modification_must_target_single_residue() {
        let registry = build_registry();
        let result = ModificationIndex::new(&["Phospho of STY".to_string()], &[], &registry);
        assert!(matches!(
            result,
            Err(ModificationIndexError::FixedModificationOnResiduePattern(_, 3))
        ));
        // The same modification is fine as variable
        let index =
            ModificationIndex::new(&[], &["Phospho of STY".to_string()], &registry).unwrap();
        assert_eq!(
            index
                .get_variable_amino_acid_mods(residue_index('S').unwrap())
                .len(),
            1
        );
        assert_eq!(
            index
                .get_variable_amino_acid_mods(residue_index('T').unwrap())
                .len(),
            1
        );
        assert_eq!(
            index
                .get_variable_amino_acid_mods(residue_index('Y').unwrap())
                .len(),
            1
        );
    }

    #[test]
    fn test_unknown_modification() {
        let registry = build_registry();
        assert!(matches!(
            ModificationIndex::new(&["Greetings of G".to_string()], &[], &registry),
            Err(ModificationIndexError::UnknownModification(_))
        ));
    }

    #[test]
    fn test_terminal_margins() {
        let registry = build_registry();
        let index = ModificationIndex::new(
            &[],
            &[
                "Acetyl of peptide N-term".to_string(),
                "Pyro-glu of peptide N-term Q".to_string(),
                "Amidation of protein C-term".to_string(),
            ],
            &registry,
        )
        .unwrap();
        // Both peptide N-terminal pools widen the N margins
        assert_eq!(
            index.get_min_terminal_margin(Terminus::N),
            mass_to_int!(-17.026549_f64)
        );
        assert_eq!(
            index.get_max_terminal_margin(Terminus::N),
            mass_to_int!(42.010565_f64)
        );
        // Protein terminal modifications do not contribute to the margins
        assert_eq!(index.get_min_terminal_margin(Terminus::C), 0);
        assert_eq!(index.get_max_terminal_margin(Terminus::C), 0);
        assert_eq!(index.get_variable_peptide_terminal_mods(Terminus::N).len(), 1);
        assert_eq!(
            index
                .get_variable_peptide_terminal_residue_mods(
                    Terminus::N,
                    residue_index('Q').unwrap()
                )
                .len(),
            1
        );
        assert_eq!(
            index.get_variable_protein_terminal_mods(Terminus::C).len(),
            1
        );
    }
}
