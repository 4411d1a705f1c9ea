// std imports
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

// 3rd party imports
use anyhow::bail;
use serde::Serialize;

/// Whether a modification is always applied or optional.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModificationType {
    Fixed,
    Variable,
}

impl FromStr for ModificationType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" | "static" => Ok(Self::Fixed),
            "variable" => Ok(Self::Variable),
            _ => bail!("Unknown modification type: {}", s),
        }
    }
}

impl Display for ModificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::Variable => write!(f, "variable"),
        }
    }
}

/// Placement scope of a modification. Residue carrying variants hold the
/// one letter codes of the targetable amino acids.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModificationScope {
    /// A free amino acid, anywhere in the peptide
    AminoAcid(Vec<char>),
    /// The N-terminus of the protein, regardless of the residue
    ProteinNTerminus,
    /// The N-terminus of the protein when it carries one of the given residues
    ProteinNTerminusOfAminoAcid(Vec<char>),
    /// The C-terminus of the protein, regardless of the residue
    ProteinCTerminus,
    /// The C-terminus of the protein when it carries one of the given residues
    ProteinCTerminusOfAminoAcid(Vec<char>),
    /// The N-terminus of the peptide, regardless of the residue
    PeptideNTerminus,
    /// The N-terminus of the peptide when it carries one of the given residues
    PeptideNTerminusOfAminoAcid(Vec<char>),
    /// The C-terminus of the peptide, regardless of the residue
    PeptideCTerminus,
    /// The C-terminus of the peptide when it carries one of the given residues
    PeptideCTerminusOfAminoAcid(Vec<char>),
}

impl ModificationScope {
    /// Returns the target residues for residue scoped variants,
    /// `None` for the residue agnostic terminal variants.
    ///
    pub fn get_target_residues(&self) -> Option<&Vec<char>> {
        match self {
            Self::AminoAcid(residues)
            | Self::ProteinNTerminusOfAminoAcid(residues)
            | Self::ProteinCTerminusOfAminoAcid(residues)
            | Self::PeptideNTerminusOfAminoAcid(residues)
            | Self::PeptideCTerminusOfAminoAcid(residues) => Some(residues),
            Self::ProteinNTerminus
            | Self::ProteinCTerminus
            | Self::PeptideNTerminus
            | Self::PeptideCTerminus => None,
        }
    }
}

/// Immutable modification descriptor.
/// The mass delta is kept in the internal integer representation.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Modification {
    name: String,
    mass_delta: i64,
    scope: ModificationScope,
}

impl Modification {
    /// Creates a new modification descriptor
    ///
    /// # Arguments
    /// * `name` - Unique name
    /// * `mass_delta` - Mass shift in internal integer representation
    /// * `scope` - Placement scope
    ///
    pub fn new(name: String, mass_delta: i64, scope: ModificationScope) -> Self {
        Self {
            name,
            mass_delta,
            scope,
        }
    }

    /// Returns the name
    pub fn get_name(&self) -> &String {
        &self.name
    }

    /// Returns the mass delta
    pub fn get_mass_delta(&self) -> i64 {
        self.mass_delta
    }

    /// Returns the placement scope
    pub fn get_scope(&self) -> &ModificationScope {
        &self.scope
    }
}

/// A modification placed on a concrete peptide position (1-based).
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModificationMatch {
    name: String,
    variable: bool,
    position: usize,
}

impl ModificationMatch {
    /// Creates a new modification match
    ///
    /// # Arguments
    /// * `name` - Name of the modification
    /// * `variable` - False when the modification is fixed
    /// * `position` - 1-based position within the peptide
    ///
    pub fn new(name: String, variable: bool, position: usize) -> Self {
        Self {
            name,
            variable,
            position,
        }
    }

    /// Returns the modification name
    pub fn get_name(&self) -> &String {
        &self.name
    }

    /// Returns false when the modification is fixed
    pub fn is_variable(&self) -> bool {
        self.variable
    }

    /// Returns the 1-based position within the peptide
    pub fn get_position(&self) -> usize {
        self.position
    }

    /// Returns a copy of self with the position replaced
    ///
    /// # Arguments
    /// * `position` - New 1-based position
    ///
    pub fn at_position(&self, position: usize) -> Self {
        Self {
            name: self.name.clone(),
            variable: self.variable,
            position,
        }
    }
}

/// Registry of known modifications by name.
///
#[derive(Clone, Debug, Default)]
pub struct ModificationRegistry {
    modifications: HashMap<String, Modification>,
}

impl ModificationRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            modifications: HashMap::new(),
        }
    }

    /// Adds a modification, replacing any previous one with the same name
    ///
    /// # Arguments
    /// * `modification` - The modification
    ///
    pub fn register(&mut self, modification: Modification) {
        self.modifications
            .insert(modification.get_name().clone(), modification);
    }

    /// Returns the modification with the given name
    ///
    /// # Arguments
    /// * `name` - Name of the modification
    ///
    pub fn get(&self, name: &str) -> Option<&Modification> {
        self.modifications.get(name)
    }

    /// Returns the number of registered modifications
    pub fn len(&self) -> usize {
        self.modifications.len()
    }

    /// Returns true if no modification is registered
    pub fn is_empty(&self) -> bool {
        self.modifications.is_empty()
    }
}

#[cfg(test)]
mod test {
    // internal imports
    use super::*;

    #[test]
    fn test_modification_type_from_str() {
        assert_eq!(
            ModificationType::from_str("fixed").unwrap(),
            ModificationType::Fixed
        );
        assert_eq!(
            ModificationType::from_str("Variable").unwrap(),
            ModificationType::Variable
        );
        assert!(ModificationType::from_str("sometimes").is_err());
    }

    #[test]
    fn test_scope_target_residues() {
        let scope = ModificationScope::AminoAcid(vec!['C']);
        assert_eq!(scope.get_target_residues(), Some(&vec!['C']));
        assert_eq!(
            ModificationScope::PeptideNTerminus.get_target_residues(),
            None
        );
    }

    #[test]
    fn test_registry() {
        let mut registry = ModificationRegistry::new();
        assert!(registry.is_empty());
        registry.register(Modification::new(
            "Carbamidomethyl of C".to_string(),
            mass_to_int!(57.021464_f64),
            ModificationScope::AminoAcid(vec!['C']),
        ));
        assert_eq!(registry.len(), 1);
        let modification = registry.get("Carbamidomethyl of C").unwrap();
        assert_eq!(modification.get_mass_delta(), mass_to_int!(57.021464_f64));
        assert!(registry.get("Oxidation of M").is_none());
    }
}
