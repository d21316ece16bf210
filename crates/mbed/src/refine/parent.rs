use std::ops::Range;

use super::RefineError;

/// Refined edge index → input edge index, aligned with the refined edge order.
///
/// Maps produced by [`super::refine`] are non-decreasing, so the children of an
/// input edge form one contiguous range.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParentMap(Vec<usize>);

impl ParentMap {
    #[inline]
    pub fn from_vec(parents: Vec<usize>) -> Self {
        Self(parents)
    }

    /// Map of a pass that changed nothing: `i ↦ i`.
    pub fn identity(len: usize) -> Self {
        Self((0..len).collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }

    #[inline]
    pub fn get(&self, edge: usize) -> Option<usize> {
        self.0.get(edge).copied()
    }

    /// Refined edges descending from `parent` (empty if none).
    pub fn children(&self, parent: usize) -> Range<usize> {
        let start = self.0.partition_point(|&p| p < parent);
        let end = self.0.partition_point(|&p| p <= parent);
        start..end
    }

    /// Trace through an earlier pass: if `self` maps mesh C → B and `earlier`
    /// maps B → A, the result maps C → A.
    pub fn compose(&self, earlier: &ParentMap) -> Result<ParentMap, RefineError> {
        self.0
            .iter()
            .enumerate()
            .map(|(edge, &p)| {
                earlier.get(p).ok_or(RefineError::ParentIndex {
                    edge,
                    parent: p,
                    len: earlier.len(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(ParentMap)
    }
}

impl std::ops::Index<usize> for ParentMap {
    type Output = usize;
    #[inline]
    fn index(&self, edge: usize) -> &usize {
        &self.0[edge]
    }
}

impl From<ParentMap> for Vec<usize> {
    fn from(map: ParentMap) -> Self {
        map.0
    }
}
