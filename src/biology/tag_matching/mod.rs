/// Per-scope lookup of fixed and variable modifications
pub mod modification_index;
/// Matching policies for comparing sequence stretches
pub mod sequence_matching;
/// Candidate sequence stretches growing away from the anchor
pub mod sequence_segment;
/// The tag matcher itself
pub mod tag_matcher;

/// Direction in which a segment grows away from the anchor component.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Terminus {
    /// Towards the protein start (decreasing indices)
    N,
    /// Towards the protein end (increasing indices)
    C,
}
