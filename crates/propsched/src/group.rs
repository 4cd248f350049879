//! Node identifiers and update groups.

use smallvec::SmallVec;
use std::fmt;

/// Identifies one step of a propagation path: a cell or the thread
/// that recomputes it.
///
/// The scheduler never interprets the value; it only compares and
/// counts identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for NodeId {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

/// Inline storage for a path. Paths of up to four steps (the common
/// `source → propagator → target` shape plus one) never touch the heap.
type Steps = SmallVec<[NodeId; 4]>;

/// One unit of scheduled propagation work: an ordered path of node
/// identifiers.
///
/// The last element is the *active* identifier, the node that runs when
/// the group fires. A group is immutable once built; the scheduler takes
/// it by value on insertion and hands it back by value on removal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct UpdateGroup {
    steps: Steps,
}

impl UpdateGroup {
    /// Build a group from a path of identifiers.
    pub fn new(steps: impl IntoIterator<Item = NodeId>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    /// The identifier that executes when this group fires, or `None` for
    /// an empty group.
    pub fn active(&self) -> Option<NodeId> {
        self.steps.last().copied()
    }

    /// The full path, first step first.
    pub fn steps(&self) -> &[NodeId] {
        &self.steps
    }

    /// Number of steps in the path.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the path has no steps (and therefore no active identifier).
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Unwrap into the raw identifier values.
    pub fn to_raw(&self) -> Vec<usize> {
        self.steps.iter().map(|id| id.0).collect()
    }
}

impl FromIterator<NodeId> for UpdateGroup {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<Vec<usize>> for UpdateGroup {
    fn from(raw: Vec<usize>) -> Self {
        raw.into_iter().map(NodeId).collect()
    }
}

impl From<&[usize]> for UpdateGroup {
    fn from(raw: &[usize]) -> Self {
        raw.iter().copied().map(NodeId).collect()
    }
}

impl<const N: usize> From<[usize; N]> for UpdateGroup {
    fn from(raw: [usize; N]) -> Self {
        raw.into_iter().map(NodeId).collect()
    }
}
