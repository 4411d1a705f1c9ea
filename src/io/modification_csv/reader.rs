// std imports
use std::path::Path;
use std::str::FromStr;

// 3rd party imports
use anyhow::{bail, Result};
use serde::Deserialize;

// internal imports
use crate::biology::tag_matching::modification_index::residue_index;
use crate::entities::modification::{Modification, ModificationScope, ModificationType};
use crate::mass::convert::to_int;

#[derive(Debug, Deserialize)]
struct ModificationCsvRecord {
    name: String,
    amino_acids: String,
    mass_delta: f64,
    mod_type: String,
    position: String,
}

pub struct Reader {}

impl Reader {
    /// Reads a modification CSV file. Expected columns are
    /// `name`, `amino_acids`, `mass_delta` (Dalton), `mod_type`
    /// (`fixed`/`variable`) and `position` (`anywhere`,
    /// `peptide_n_terminus`, `peptide_c_terminus`,
    /// `protein_n_terminus` or `protein_c_terminus`). A non-empty
    /// `amino_acids` column restricts the modification to the listed
    /// residues.
    ///
    /// # Arguments
    /// * `path` - Path to the CSV file
    ///
    pub fn read(path: &Path) -> Result<Vec<(Modification, ModificationType)>> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut modifications: Vec<(Modification, ModificationType)> = Vec::new();
        for record_result in reader.deserialize() {
            let record: ModificationCsvRecord = record_result?;
            let mut residues: Vec<char> = Vec::new();
            for residue in record.amino_acids.chars() {
                let residue = residue.to_ascii_uppercase();
                if residue_index(residue).is_none() {
                    bail!(
                        "modification `{}` targets `{}` which is not an amino acid one letter code",
                        record.name,
                        residue
                    );
                }
                residues.push(residue);
            }
            let scope = Self::scope_from_parts(&record.name, &record.position, residues)?;
            modifications.push((
                Modification::new(record.name, to_int(record.mass_delta), scope),
                ModificationType::from_str(&record.mod_type)?,
            ));
        }
        Ok(modifications)
    }

    /// Combines the position column and the target residues into a
    /// placement scope.
    ///
    fn scope_from_parts(
        name: &str,
        position: &str,
        residues: Vec<char>,
    ) -> Result<ModificationScope> {
        let residue_bound = !residues.is_empty();
        Ok(match (position.to_lowercase().as_str(), residue_bound) {
            ("anywhere", true) => ModificationScope::AminoAcid(residues),
            ("anywhere", false) => {
                bail!(
                    "modification `{}` is placed anywhere but names no amino acids",
                    name
                )
            }
            ("protein_n_terminus", true) => {
                ModificationScope::ProteinNTerminusOfAminoAcid(residues)
            }
            ("protein_n_terminus", false) => ModificationScope::ProteinNTerminus,
            ("protein_c_terminus", true) => {
                ModificationScope::ProteinCTerminusOfAminoAcid(residues)
            }
            ("protein_c_terminus", false) => ModificationScope::ProteinCTerminus,
            ("peptide_n_terminus", true) => {
                ModificationScope::PeptideNTerminusOfAminoAcid(residues)
            }
            ("peptide_n_terminus", false) => ModificationScope::PeptideNTerminus,
            ("peptide_c_terminus", true) => {
                ModificationScope::PeptideCTerminusOfAminoAcid(residues)
            }
            ("peptide_c_terminus", false) => ModificationScope::PeptideCTerminus,
            (unknown, _) => bail!("modification `{}` has an unknown position `{}`", name, unknown),
        })
    }
}

#[cfg(test)]
mod test {
    // internal imports
    use super::*;

    #[test]
    fn test_read() {
        let mod_csv = Path::new("test_files/mods.csv");
        let modifications = Reader::read(mod_csv).unwrap();

        assert_eq!(modifications.len(), 3);

        let (carbamidomethyl, mod_type) = &modifications[0];
        assert_eq!(carbamidomethyl.get_name(), "Carbamidomethyl");
        assert_eq!(*mod_type, ModificationType::Fixed);
        assert_eq!(
            carbamidomethyl.get_mass_delta(),
            to_int(57.021464)
        );
        assert_eq!(
            carbamidomethyl.get_scope(),
            &ModificationScope::AminoAcid(vec!['C'])
        );

        let (oxidation, mod_type) = &modifications[1];
        assert_eq!(oxidation.get_name(), "Oxidation");
        assert_eq!(*mod_type, ModificationType::Variable);

        let (acetyl, mod_type) = &modifications[2];
        assert_eq!(acetyl.get_name(), "Acetyl");
        assert_eq!(*mod_type, ModificationType::Variable);
        assert_eq!(acetyl.get_scope(), &ModificationScope::PeptideNTerminus);
    }

    #[test]
    fn test_scope_from_parts() {
        assert_eq!(
            Reader::scope_from_parts("Pyro-glu", "peptide_n_terminus", vec!['Q']).unwrap(),
            ModificationScope::PeptideNTerminusOfAminoAcid(vec!['Q'])
        );
        assert_eq!(
            Reader::scope_from_parts("Amidation", "protein_c_terminus", Vec::new()).unwrap(),
            ModificationScope::ProteinCTerminus
        );
        assert!(Reader::scope_from_parts("Oxidation", "anywhere", Vec::new()).is_err());
        assert!(Reader::scope_from_parts("Oxidation", "somewhere", vec!['M']).is_err());
    }
}
