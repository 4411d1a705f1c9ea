// std imports
use std::fmt::Display;
use std::str::FromStr;

// 3rd party imports
use thiserror::Error;

// internal imports
use crate::chemistry::amino_acid::AminoAcid;
use crate::entities::modification::ModificationMatch;
use crate::mass::convert::{to_float, to_int};

#[derive(Error, Debug)]
pub enum TagParseError {
    #[error("tag is empty")]
    EmptyTag,
    #[error("unterminated mass gap, missing `]`")]
    UnterminatedMassGap,
    #[error("`{0}` is not a valid mass gap")]
    InvalidMassGap(String),
    #[error("`{0}` is not a valid amino acid")]
    InvalidResidue(char),
}

/// Sequenced stretch of a tag. Modification positions are 1-based
/// within the stretch.
///
#[derive(Clone, Debug, PartialEq)]
pub struct TagSequence {
    residues: String,
    modifications: Vec<ModificationMatch>,
}

impl TagSequence {
    /// Creates a new tag sequence
    ///
    /// # Arguments
    /// * `residues` - The sequenced residues
    /// * `modifications` - Modifications reported on the stretch, positions 1-based
    ///
    pub fn new(residues: String, modifications: Vec<ModificationMatch>) -> Self {
        Self {
            residues,
            modifications,
        }
    }

    /// Returns the residues
    pub fn get_residues(&self) -> &String {
        &self.residues
    }

    /// Returns the modifications on the stretch
    pub fn get_modifications(&self) -> &Vec<ModificationMatch> {
        &self.modifications
    }

    /// Returns the number of residues
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    /// Returns true when the stretch holds no residue
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

/// One element of a tag, either a sequenced stretch or a mass gap
/// (internal integer representation).
///
#[derive(Clone, Debug, PartialEq)]
pub enum TagComponent {
    Sequence(TagSequence),
    MassGap(i64),
}

/// A de novo sequence tag, an ordered list of sequenced stretches and
/// mass gaps.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Tag {
    components: Vec<TagComponent>,
}

impl Tag {
    /// Creates a new tag
    ///
    /// # Arguments
    /// * `components` - The components in N- to C-terminal order
    ///
    pub fn new(components: Vec<TagComponent>) -> Self {
        Self { components }
    }

    /// Returns the components
    pub fn get_components(&self) -> &Vec<TagComponent> {
        &self.components
    }

    /// Returns the index of the longest sequence component,
    /// `None` when the tag holds mass gaps only.
    ///
    pub fn longest_sequence_component(&self) -> Option<usize> {
        let mut longest: Option<(usize, usize)> = None;
        for (index, component) in self.components.iter().enumerate() {
            if let TagComponent::Sequence(sequence) = component {
                match longest {
                    Some((_, len)) if len >= sequence.len() => {}
                    _ => longest = Some((index, sequence.len())),
                }
            }
        }
        longest.map(|(index, _)| index)
    }
}

impl FromStr for Tag {
    type Err = TagParseError;

    /// Parses the plain text form of a tag, e.g. `[114.042927]TEK` or
    /// `EVK[114.042927]TSR`. Residue runs become sequence components,
    /// bracketed masses (Dalton) become mass gaps.
    ///
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(TagParseError::EmptyTag);
        }
        let mut components: Vec<TagComponent> = Vec::new();
        let mut residues = String::new();
        let mut chars = s.chars();
        while let Some(next_char) = chars.next() {
            if next_char == '[' {
                if !residues.is_empty() {
                    components.push(TagComponent::Sequence(TagSequence::new(
                        std::mem::take(&mut residues),
                        Vec::new(),
                    )));
                }
                let mut gap = String::new();
                loop {
                    match chars.next() {
                        Some(']') => break,
                        Some(gap_char) => gap.push(gap_char),
                        None => return Err(TagParseError::UnterminatedMassGap),
                    }
                }
                let mass: f64 = gap
                    .parse()
                    .map_err(|_| TagParseError::InvalidMassGap(gap.clone()))?;
                if !mass.is_finite() || mass <= 0.0 {
                    return Err(TagParseError::InvalidMassGap(gap));
                }
                components.push(TagComponent::MassGap(to_int(mass)));
            } else {
                let residue = next_char.to_ascii_uppercase();
                if AminoAcid::get_by_one_letter_code(residue).is_err() {
                    return Err(TagParseError::InvalidResidue(next_char));
                }
                residues.push(residue);
            }
        }
        if !residues.is_empty() {
            components.push(TagComponent::Sequence(TagSequence::new(
                residues,
                Vec::new(),
            )));
        }
        if components.is_empty() {
            return Err(TagParseError::EmptyTag);
        }
        Ok(Self::new(components))
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for component in &self.components {
            match component {
                TagComponent::Sequence(sequence) => write!(f, "{}", sequence.get_residues())?,
                TagComponent::MassGap(mass) => write!(f, "[{}]", to_float(*mass))?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    // internal imports
    use super::*;

    #[test]
    fn test_parse_gap_then_sequence() {
        let tag = Tag::from_str("[114.042927]TEK").unwrap();
        assert_eq!(tag.get_components().len(), 2);
        assert_eq!(
            tag.get_components()[0],
            TagComponent::MassGap(to_int(114.042927))
        );
        assert_eq!(
            tag.get_components()[1],
            TagComponent::Sequence(TagSequence::new("TEK".to_string(), Vec::new()))
        );
        assert_eq!(tag.longest_sequence_component(), Some(1));
    }

    #[test]
    fn test_parse_sequence_gap_sequence() {
        let tag = Tag::from_str("EVK[114.042927]TSRE").unwrap();
        assert_eq!(tag.get_components().len(), 3);
        assert_eq!(tag.longest_sequence_component(), Some(2));
        assert_eq!(tag.to_string(), "EVK[114.042927]TSRE");
    }

    #[test]
    fn test_parse_lower_case_residues() {
        let tag = Tag::from_str("tek").unwrap();
        assert_eq!(
            tag.get_components()[0],
            TagComponent::Sequence(TagSequence::new("TEK".to_string(), Vec::new()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Tag::from_str(""), Err(TagParseError::EmptyTag)));
        assert!(matches!(
            Tag::from_str("TEK[114.042927"),
            Err(TagParseError::UnterminatedMassGap)
        ));
        assert!(matches!(
            Tag::from_str("TEK[abc]"),
            Err(TagParseError::InvalidMassGap(_))
        ));
        assert!(matches!(
            Tag::from_str("TEK[-10.0]R"),
            Err(TagParseError::InvalidMassGap(_))
        ));
        assert!(matches!(
            Tag::from_str("TE2K"),
            Err(TagParseError::InvalidResidue('2'))
        ));
    }

    #[test]
    fn test_gaps_only_tag_has_no_sequence_component() {
        let tag = Tag::from_str("[114.042927][57.021464]").unwrap();
        assert_eq!(tag.longest_sequence_component(), None);
    }
}
