// std imports
use std::collections::BTreeMap;

// 3rd party imports
use thiserror::Error;

// internal imports
use crate::biology::tag_matching::modification_index::{
    residue_index, ModificationIndex, ModificationIndexError,
};
use crate::biology::tag_matching::sequence_matching::SequenceMatchingParameters;
use crate::biology::tag_matching::sequence_segment::SequenceSegment;
use crate::biology::tag_matching::Terminus;
use crate::chemistry::amino_acid::AminoAcid;
use crate::entities::modification::{ModificationMatch, ModificationRegistry};
use crate::entities::peptide::Peptide;
use crate::entities::tag::{Tag, TagComponent, TagSequence};
use crate::mass::convert::to_int;

#[derive(Error, Debug)]
pub enum TagMatcherError {
    #[error(transparent)]
    ModificationIndex(#[from] ModificationIndexError),
    #[error("component index {0} is out of bounds for a tag with {1} components")]
    ComponentIndexOutOfBounds(usize, usize),
    #[error("the anchor component is a mass gap, only sequenced stretches can anchor a match")]
    MassGapAnchor,
    #[error("the anchor component holds no residues")]
    EmptyAnchorComponent,
    #[error("anchor stretch {0}..{1} is out of bounds for a sequence of length {2}")]
    AnchorOutOfBounds(usize, usize, usize),
    #[error("`{0}` is not an amino acid one letter code")]
    UnknownAminoAcid(char),
}

/// Enumerates the peptides of a protein which are consistent with a de
/// novo sequence tag, a mass tolerance and a modification
/// configuration. The matcher is immutable after construction, calls
/// keep all search state on the stack so it can be shared across
/// threads.
///
pub struct TagMatcher {
    modification_index: ModificationIndex,
}

impl TagMatcher {
    /// Creates a new matcher for a modification configuration
    ///
    /// # Arguments
    /// * `fixed_modifications` - Names of the fixed modifications
    /// * `variable_modifications` - Names of the variable modifications
    /// * `registry` - Registry resolving the names
    ///
    pub fn new(
        fixed_modifications: &[String],
        variable_modifications: &[String],
        registry: &ModificationRegistry,
    ) -> Result<Self, TagMatcherError> {
        Ok(Self {
            modification_index: ModificationIndex::new(
                fixed_modifications,
                variable_modifications,
                registry,
            )?,
        })
    }

    /// Enumerates the peptides consistent with the tag when its anchor
    /// component sits at the given protein index. Returns the peptides
    /// grouped by the 0-based protein index of their first residue, in
    /// index order. An anchor that does not fit the protein is an
    /// error, a search without consistent peptides an empty map.
    ///
    /// # Arguments
    /// * `tag` - The tag
    /// * `sequence` - The protein sequence
    /// * `tag_index` - Protein index of the first anchor residue
    /// * `component_index` - Index of the anchor component within the tag
    /// * `sequence_matching` - Policy for comparing sequenced stretches
    /// * `mass_tolerance` - Mass tolerance in Dalton
    /// * `report_fixed_modifications` - Report applied fixed modifications as matches
    ///
    pub fn get_peptide_matches(
        &self,
        tag: &Tag,
        sequence: &str,
        tag_index: usize,
        component_index: usize,
        sequence_matching: &SequenceMatchingParameters,
        mass_tolerance: f64,
        report_fixed_modifications: bool,
    ) -> Result<BTreeMap<usize, Vec<Peptide>>, TagMatcherError> {
        let components = tag.get_components();
        if component_index >= components.len() {
            return Err(TagMatcherError::ComponentIndexOutOfBounds(
                component_index,
                components.len(),
            ));
        }
        let seed = match &components[component_index] {
            TagComponent::Sequence(seed) => seed,
            TagComponent::MassGap(_) => return Err(TagMatcherError::MassGapAnchor),
        };
        if seed.is_empty() {
            return Err(TagMatcherError::EmptyAnchorComponent);
        }
        let seed_length = seed.len();
        if tag_index + seed_length > sequence.len() {
            return Err(TagMatcherError::AnchorOutOfBounds(
                tag_index,
                tag_index + seed_length,
                sequence.len(),
            ));
        }
        let tolerance = to_int(mass_tolerance);

        let mut n_segments = vec![SequenceSegment::new(tag_index, Terminus::N)];
        for component in components[..component_index].iter().rev() {
            n_segments = self.map_tag_component(
                component,
                &n_segments,
                sequence,
                Terminus::N,
                sequence_matching,
                tolerance,
                report_fixed_modifications,
            )?;
            if n_segments.is_empty() {
                return Ok(BTreeMap::new());
            }
        }

        let mut c_segments = vec![SequenceSegment::new(
            tag_index + seed_length - 1,
            Terminus::C,
        )];
        for component in components[component_index + 1..].iter() {
            c_segments = self.map_tag_component(
                component,
                &c_segments,
                sequence,
                Terminus::C,
                sequence_matching,
                tolerance,
                report_fixed_modifications,
            )?;
            if c_segments.is_empty() {
                return Ok(BTreeMap::new());
            }
        }

        Ok(Self::build_peptides(
            &n_segments,
            &c_segments,
            seed,
            sequence,
            tag_index,
        ))
    }

    /// Maps one tag component onto the protein, continuing every
    /// surviving segment of the previous component.
    ///
    fn map_tag_component(
        &self,
        component: &TagComponent,
        previous: &[SequenceSegment],
        sequence: &str,
        terminus: Terminus,
        sequence_matching: &SequenceMatchingParameters,
        tolerance: i64,
        report_fixed_modifications: bool,
    ) -> Result<Vec<SequenceSegment>, TagMatcherError> {
        match component {
            TagComponent::Sequence(tag_sequence) => Self::map_sequence_component(
                tag_sequence,
                previous,
                sequence,
                terminus,
                sequence_matching,
            ),
            TagComponent::MassGap(gap) => self.map_mass_gap(
                *gap,
                previous,
                sequence,
                terminus,
                tolerance,
                report_fixed_modifications,
            ),
        }
    }

    /// Continues segments over a sequenced stretch. The stretch must
    /// match the adjacent protein residues under the matching policy,
    /// segments without a match are dropped.
    ///
    fn map_sequence_component(
        tag_sequence: &TagSequence,
        previous: &[SequenceSegment],
        sequence: &str,
        terminus: Terminus,
        sequence_matching: &SequenceMatchingParameters,
    ) -> Result<Vec<SequenceSegment>, TagMatcherError> {
        let stretch = tag_sequence.get_residues();
        let stretch_length = stretch.len();
        let mut results: Vec<SequenceSegment> = Vec::new();
        for segment in previous {
            let adjacent_index = match segment.next_index(sequence.len()) {
                Some(index) => index,
                None => continue,
            };
            // Leftmost protein index covered by the stretch
            let start = match terminus {
                Terminus::N => {
                    if adjacent_index + 1 < stretch_length {
                        continue;
                    }
                    adjacent_index + 1 - stretch_length
                }
                Terminus::C => {
                    if adjacent_index + stretch_length > sequence.len() {
                        continue;
                    }
                    adjacent_index
                }
            };
            let outermost_index = match terminus {
                Terminus::N => start,
                Terminus::C => start + stretch_length - 1,
            };
            let target = &sequence[start..start + stretch_length];
            if !sequence_matching.matches(stretch, target) {
                continue;
            }
            let mut block_mass: i64 = 0;
            for residue in target.chars() {
                block_mass += Self::residue_mass(residue)?;
            }
            let mut extended = segment.clone();
            let inner_length = extended.get_length();
            extended.append_block(outermost_index, stretch_length, block_mass);
            for modification in tag_sequence.get_modifications() {
                // 1-based position within the stretch to distance from the anchor
                let distance = match terminus {
                    Terminus::N => inner_length + stretch_length + 1 - modification.get_position(),
                    Terminus::C => inner_length + modification.get_position(),
                };
                extended.push_modification(
                    distance,
                    modification.get_name().clone(),
                    modification.is_variable(),
                );
            }
            results.push(extended);
        }
        Ok(results)
    }

    /// Resolves a mass gap by walking residue by residue away from
    /// every surviving segment, branching on variable modifications.
    /// Candidates within tolerance of the gap are collected, candidates
    /// overshooting it beyond recovery are pruned.
    ///
    fn map_mass_gap(
        &self,
        gap: i64,
        previous: &[SequenceSegment],
        sequence: &str,
        terminus: Terminus,
        tolerance: i64,
        report_fixed_modifications: bool,
    ) -> Result<Vec<SequenceSegment>, TagMatcherError> {
        let mut results: Vec<SequenceSegment> = Vec::new();
        for segment in previous {
            let mut valid: Vec<SequenceSegment> = Vec::new();
            let mut candidates = vec![SequenceSegment::new(segment.get_terminal_index(), terminus)];
            loop {
                // Candidates grow in lockstep, they differ in mass and
                // modifications only
                let aa_index = match candidates[0].next_index(sequence.len()) {
                    Some(index) => index,
                    None => break,
                };
                let residue = (sequence.as_bytes()[aa_index] as char).to_ascii_uppercase();
                candidates = self.extend_candidates(
                    candidates,
                    aa_index,
                    residue,
                    sequence.len(),
                    terminus,
                    report_fixed_modifications,
                )?;
                candidates = self.validate_candidates(
                    candidates,
                    residue,
                    gap,
                    tolerance,
                    terminus,
                    report_fixed_modifications,
                    &mut valid,
                )?;
                if candidates.is_empty() {
                    break;
                }
            }
            results.extend(
                valid
                    .iter()
                    .map(|closed| SequenceSegment::join(closed, segment)),
            );
        }
        Ok(results)
    }

    /// Extends every candidate by the residue at `aa_index`, applying
    /// fixed modifications in scope and opening one branch per
    /// applicable variable modification.
    ///
    #[allow(clippy::too_many_arguments)]
    fn extend_candidates(
        &self,
        candidates: Vec<SequenceSegment>,
        aa_index: usize,
        residue: char,
        sequence_length: usize,
        terminus: Terminus,
        report_fixed_modifications: bool,
    ) -> Result<Vec<SequenceSegment>, TagMatcherError> {
        let index = &self.modification_index;
        let residue_slot =
            residue_index(residue).ok_or(TagMatcherError::UnknownAminoAcid(residue))?;
        let at_protein_terminus = match terminus {
            Terminus::N => aa_index == 0,
            Terminus::C => aa_index + 1 == sequence_length,
        };
        let mut residue_mass = Self::residue_mass(residue)? + index.get_fixed_amino_acid_mass(residue_slot);
        if at_protein_terminus {
            residue_mass += index.get_fixed_protein_terminal_mass(terminus)
                + index.get_fixed_protein_terminal_residue_mass(terminus, residue_slot);
        }

        let mut extended: Vec<SequenceSegment> = Vec::with_capacity(candidates.len());
        for mut candidate in candidates {
            candidate.append_residue(aa_index, residue_mass);
            if report_fixed_modifications {
                for name in index.get_fixed_amino_acid_names(residue_slot) {
                    candidate.add_terminal_modification(name.clone(), false);
                }
                if at_protein_terminus {
                    for name in index.get_fixed_protein_terminal_names(terminus) {
                        candidate.add_terminal_modification(name.clone(), false);
                    }
                    for name in
                        index.get_fixed_protein_terminal_residue_names(terminus, residue_slot)
                    {
                        candidate.add_terminal_modification(name.clone(), false);
                    }
                }
            }
            // One branch per applicable variable modification, the
            // unmodified candidate stays in front
            let mut branches: Vec<SequenceSegment> = Vec::new();
            for (name, mass) in index.get_variable_amino_acid_mods(residue_slot) {
                let mut branch = candidate.clone();
                branch.add_mass(*mass);
                branch.add_terminal_modification(name.clone(), true);
                branches.push(branch);
            }
            if at_protein_terminus {
                for (name, mass) in index
                    .get_variable_protein_terminal_mods(terminus)
                    .iter()
                    .chain(index.get_variable_protein_terminal_residue_mods(terminus, residue_slot))
                {
                    let mut branch = candidate.clone();
                    branch.add_mass(*mass);
                    branch.add_terminal_modification(name.clone(), true);
                    branches.push(branch);
                }
            }
            extended.push(candidate);
            extended.append(&mut branches);
        }
        Ok(extended)
    }

    /// Compares every candidate against the gap, including the fixed
    /// peptide-terminal mass of its outermost residue. Candidates
    /// within tolerance move to `valid`, candidates which cannot close
    /// the gap anymore are pruned, everything else keeps growing. A
    /// candidate short of the gap may additionally be closed by any
    /// variable peptide-terminal modification bridging the difference,
    /// each one yielding its own valid segment.
    ///
    #[allow(clippy::too_many_arguments)]
    fn validate_candidates(
        &self,
        candidates: Vec<SequenceSegment>,
        residue: char,
        gap: i64,
        tolerance: i64,
        terminus: Terminus,
        report_fixed_modifications: bool,
        valid: &mut Vec<SequenceSegment>,
    ) -> Result<Vec<SequenceSegment>, TagMatcherError> {
        let index = &self.modification_index;
        let residue_slot =
            residue_index(residue).ok_or(TagMatcherError::UnknownAminoAcid(residue))?;
        let fixed_terminal_mass = index.get_fixed_peptide_terminal_mass(terminus)
            + index.get_fixed_peptide_terminal_residue_mass(terminus, residue_slot);
        let min_margin = index.get_min_terminal_margin(terminus);
        let max_margin = index.get_max_terminal_margin(terminus);

        let mut survivors: Vec<SequenceSegment> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let sequence_mass = candidate.get_mass() + fixed_terminal_mass;
            if sequence_mass + min_margin > gap + tolerance {
                // Out of reach even with the most negative variable
                // terminal modification
                continue;
            }
            if sequence_mass + max_margin >= gap - tolerance {
                if (sequence_mass - gap).abs() <= tolerance {
                    let mut closed = candidate;
                    closed.add_mass(fixed_terminal_mass);
                    if report_fixed_modifications {
                        Self::report_fixed_terminal(index, &mut closed, terminus, residue_slot);
                    }
                    valid.push(closed);
                    continue;
                }
                for (name, mass) in index
                    .get_variable_peptide_terminal_mods(terminus)
                    .iter()
                    .chain(index.get_variable_peptide_terminal_residue_mods(terminus, residue_slot))
                {
                    if (sequence_mass + mass - gap).abs() <= tolerance {
                        let mut closed = candidate.clone();
                        closed.add_mass(fixed_terminal_mass + mass);
                        if report_fixed_modifications {
                            Self::report_fixed_terminal(index, &mut closed, terminus, residue_slot);
                        }
                        closed.add_terminal_modification(name.clone(), true);
                        valid.push(closed);
                    }
                }
            }
            survivors.push(candidate);
        }
        Ok(survivors)
    }

    /// Records the fixed peptide-terminal modifications of a closed
    /// segment on its outermost residue.
    ///
    fn report_fixed_terminal(
        index: &ModificationIndex,
        segment: &mut SequenceSegment,
        terminus: Terminus,
        residue_slot: usize,
    ) {
        for name in index.get_fixed_peptide_terminal_names(terminus) {
            segment.add_terminal_modification(name.clone(), false);
        }
        for name in index.get_fixed_peptide_terminal_residue_names(terminus, residue_slot) {
            segment.add_terminal_modification(name.clone(), false);
        }
    }

    /// Combines every N-terminal segment with every C-terminal segment
    /// around the anchor stretch, re-indexing all modifications against
    /// the final peptide.
    ///
    fn build_peptides(
        n_segments: &[SequenceSegment],
        c_segments: &[SequenceSegment],
        seed: &TagSequence,
        sequence: &str,
        tag_index: usize,
    ) -> BTreeMap<usize, Vec<Peptide>> {
        let seed_length = seed.len();
        let seed_sequence = &sequence[tag_index..tag_index + seed_length];
        let mut results: BTreeMap<usize, Vec<Peptide>> = BTreeMap::new();
        for n_segment in n_segments {
            let n_length = n_segment.get_length();
            let start_index = n_segment.get_start_index();
            for c_segment in c_segments {
                let mut peptide_sequence =
                    String::with_capacity(n_length + seed_length + c_segment.get_length());
                peptide_sequence.push_str(n_segment.get_segment_sequence(sequence));
                peptide_sequence.push_str(seed_sequence);
                peptide_sequence.push_str(c_segment.get_segment_sequence(sequence));

                let mut modifications: Vec<ModificationMatch> = Vec::new();
                for modification in n_segment.get_modifications() {
                    modifications.push(ModificationMatch::new(
                        modification.get_name().clone(),
                        modification.is_variable(),
                        n_length + 1 - modification.get_distance(),
                    ));
                }
                for modification in seed.get_modifications() {
                    modifications
                        .push(modification.at_position(n_length + modification.get_position()));
                }
                for modification in c_segment.get_modifications() {
                    modifications.push(ModificationMatch::new(
                        modification.get_name().clone(),
                        modification.is_variable(),
                        n_length + seed_length + modification.get_distance(),
                    ));
                }
                results
                    .entry(start_index)
                    .or_default()
                    .push(Peptide::new(peptide_sequence, modifications));
            }
        }
        results
    }

    /// Returns the monoisotopic mass of a residue
    ///
    fn residue_mass(residue: char) -> Result<i64, TagMatcherError> {
        Ok(AminoAcid::get_by_one_letter_code(residue)
            .map_err(|_| TagMatcherError::UnknownAminoAcid(residue))?
            .get_mono_mass())
    }
}
