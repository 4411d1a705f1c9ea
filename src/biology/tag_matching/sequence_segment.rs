// internal imports
use crate::biology::tag_matching::Terminus;

/// A modification carried by a segment. The distance is 1-based,
/// counted from the anchor boundary towards the segment terminus.
///
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentModification {
    distance: usize,
    name: String,
    variable: bool,
}

impl SegmentModification {
    pub fn new(distance: usize, name: String, variable: bool) -> Self {
        Self {
            distance,
            name,
            variable,
        }
    }

    /// Returns the 1-based distance from the anchor boundary
    pub fn get_distance(&self) -> usize {
        self.distance
    }

    /// Returns the modification name
    pub fn get_name(&self) -> &String {
        &self.name
    }

    /// Returns false when the modification is fixed
    pub fn is_variable(&self) -> bool {
        self.variable
    }
}

/// A candidate protein stretch growing away from the anchor component.
/// Segments are plain values, branching clones them.
///
/// `terminal_index` is the protein index of the outermost included
/// residue. An empty segment carries the anchor boundary instead: the
/// anchor start index when growing N-terminally, the last anchor index
/// when growing C-terminally.
///
#[derive(Clone, Debug)]
pub struct SequenceSegment {
    terminus: Terminus,
    terminal_index: usize,
    length: usize,
    mass: i64,
    modifications: Vec<SegmentModification>,
}

impl SequenceSegment {
    /// Creates an empty segment at the anchor boundary
    ///
    /// # Arguments
    /// * `anchor_boundary` - Anchor start index (N) or last anchor index (C)
    /// * `terminus` - Growth direction
    ///
    pub fn new(anchor_boundary: usize, terminus: Terminus) -> Self {
        Self {
            terminus,
            terminal_index: anchor_boundary,
            length: 0,
            mass: 0,
            modifications: Vec::new(),
        }
    }

    /// Returns the growth direction
    pub fn get_terminus(&self) -> Terminus {
        self.terminus
    }

    /// Returns the protein index of the outermost included residue,
    /// or the anchor boundary for an empty segment
    pub fn get_terminal_index(&self) -> usize {
        self.terminal_index
    }

    /// Returns the number of included residues
    pub fn get_length(&self) -> usize {
        self.length
    }

    /// Returns the cumulative mass
    pub fn get_mass(&self) -> i64 {
        self.mass
    }

    /// Returns the carried modifications
    pub fn get_modifications(&self) -> &Vec<SegmentModification> {
        &self.modifications
    }

    /// Returns true when no residue is included yet
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the protein index of the next residue in growth
    /// direction, `None` at the physical end of the sequence.
    ///
    /// # Arguments
    /// * `sequence_length` - Length of the protein sequence
    ///
    pub fn next_index(&self, sequence_length: usize) -> Option<usize> {
        match self.terminus {
            Terminus::N => self.terminal_index.checked_sub(1),
            Terminus::C => {
                let next = self.terminal_index + 1;
                if next < sequence_length {
                    Some(next)
                } else {
                    None
                }
            }
        }
    }

    /// Includes a single residue at the growing end
    ///
    /// # Arguments
    /// * `aa_index` - Protein index of the residue
    /// * `mass` - Mass contribution of the residue
    ///
    pub fn append_residue(&mut self, aa_index: usize, mass: i64) {
        self.terminal_index = aa_index;
        self.length += 1;
        self.mass += mass;
    }

    /// Includes a whole residue block at the growing end
    ///
    /// # Arguments
    /// * `outermost_index` - Protein index of the outermost residue of the block
    /// * `block_length` - Number of residues in the block
    /// * `mass` - Mass contribution of the block
    ///
    pub fn append_block(&mut self, outermost_index: usize, block_length: usize, mass: i64) {
        self.terminal_index = outermost_index;
        self.length += block_length;
        self.mass += mass;
    }

    /// Adds mass without including a residue
    pub fn add_mass(&mut self, mass: i64) {
        self.mass += mass;
    }

    /// Records a modification on the outermost residue
    ///
    /// # Arguments
    /// * `name` - Modification name
    /// * `variable` - False when the modification is fixed
    ///
    pub fn add_terminal_modification(&mut self, name: String, variable: bool) {
        self.modifications
            .push(SegmentModification::new(self.length, name, variable));
    }

    /// Records a modification at an explicit distance from the anchor
    ///
    /// # Arguments
    /// * `distance` - 1-based distance from the anchor boundary
    /// * `name` - Modification name
    /// * `variable` - False when the modification is fixed
    ///
    pub fn push_modification(&mut self, distance: usize, name: String, variable: bool) {
        self.modifications
            .push(SegmentModification::new(distance, name, variable));
    }

    /// Joins an outer segment onto an inner one growing in the same
    /// direction. Outer modification distances shift by the inner
    /// length so they stay anchored at the shared boundary.
    ///
    /// # Arguments
    /// * `outer` - Segment farther away from the anchor
    /// * `inner` - Segment adjacent to the anchor
    ///
    pub fn join(outer: &Self, inner: &Self) -> Self {
        let terminal_index = if outer.is_empty() {
            inner.terminal_index
        } else {
            outer.terminal_index
        };
        let mut modifications = inner.modifications.clone();
        modifications.extend(outer.modifications.iter().map(|modification| {
            SegmentModification::new(
                modification.get_distance() + inner.length,
                modification.get_name().clone(),
                modification.is_variable(),
            )
        }));
        Self {
            terminus: inner.terminus,
            terminal_index,
            length: inner.length + outer.length,
            mass: inner.mass + outer.mass,
            modifications,
        }
    }

    /// Returns the included protein stretch, in protein order
    ///
    /// # Arguments
    /// * `sequence` - The protein sequence
    ///
    pub fn get_segment_sequence<'a>(&self, sequence: &'a str) -> &'a str {
        match self.terminus {
            Terminus::N => &sequence[self.terminal_index..self.terminal_index + self.length],
            Terminus::C => &sequence[self.terminal_index + 1 - self.length..self.terminal_index + 1],
        }
    }

    /// Returns the protein index of the first (leftmost) included
    /// residue, or the anchor boundary for an empty N-terminal segment
    ///
    pub fn get_start_index(&self) -> usize {
        match self.terminus {
            Terminus::N => self.terminal_index,
            Terminus::C => self.terminal_index + 1 - self.length,
        }
    }
}

#[cfg(test)]
mod test {
    // internal imports
    use super::*;

    #[test]
    fn test_growth_towards_n_terminus() {
        // Anchor starts at index 2 of "GGTEK"
        let mut segment = SequenceSegment::new(2, Terminus::N);
        assert!(segment.is_empty());
        assert_eq!(segment.next_index(5), Some(1));
        segment.append_residue(1, 10);
        assert_eq!(segment.get_terminal_index(), 1);
        assert_eq!(segment.next_index(5), Some(0));
        segment.append_residue(0, 20);
        assert_eq!(segment.next_index(5), None);
        assert_eq!(segment.get_length(), 2);
        assert_eq!(segment.get_mass(), 30);
        assert_eq!(segment.get_segment_sequence("GGTEK"), "GG");
        assert_eq!(segment.get_start_index(), 0);
    }

    #[test]
    fn test_growth_towards_c_terminus() {
        // Anchor covers indices 2..=3 of "GGTEKR"
        let mut segment = SequenceSegment::new(3, Terminus::C);
        assert_eq!(segment.next_index(6), Some(4));
        segment.append_residue(4, 10);
        segment.append_residue(5, 20);
        assert_eq!(segment.next_index(6), None);
        assert_eq!(segment.get_segment_sequence("GGTEKR"), "KR");
        assert_eq!(segment.get_start_index(), 4);
    }

    #[test]
    fn test_terminal_modification_distance() {
        let mut segment = SequenceSegment::new(2, Terminus::N);
        segment.append_residue(1, 10);
        segment.add_terminal_modification("Oxidation".to_string(), true);
        segment.append_residue(0, 20);
        segment.add_terminal_modification("Acetyl".to_string(), true);
        assert_eq!(
            segment.get_modifications(),
            &vec![
                SegmentModification::new(1, "Oxidation".to_string(), true),
                SegmentModification::new(2, "Acetyl".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_join_shifts_outer_distances() {
        // Inner covers index 1, outer covers index 0, of "NMTEK"
        let mut inner = SequenceSegment::new(2, Terminus::N);
        inner.append_residue(1, 10);
        inner.add_terminal_modification("Oxidation".to_string(), true);
        let mut outer = SequenceSegment::new(1, Terminus::N);
        outer.append_residue(0, 20);
        outer.add_terminal_modification("Acetyl".to_string(), true);

        let joined = SequenceSegment::join(&outer, &inner);
        assert_eq!(joined.get_length(), 2);
        assert_eq!(joined.get_mass(), 30);
        assert_eq!(joined.get_terminal_index(), 0);
        assert_eq!(joined.get_segment_sequence("NMTEK"), "NM");
        assert_eq!(
            joined.get_modifications(),
            &vec![
                SegmentModification::new(1, "Oxidation".to_string(), true),
                SegmentModification::new(2, "Acetyl".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_join_with_empty_outer_keeps_inner_boundary() {
        let mut inner = SequenceSegment::new(3, Terminus::C);
        inner.append_residue(4, 10);
        let outer = SequenceSegment::new(4, Terminus::C);
        let joined = SequenceSegment::join(&outer, &inner);
        assert_eq!(joined.get_terminal_index(), 4);
        assert_eq!(joined.get_length(), 1);
    }
}
