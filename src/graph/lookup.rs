//! Symmetric edge-weight lookup.

use super::instance::WeightedEdge;
use super::{normalize_edge, TreeEdge};
use std::collections::HashMap;

/// Read-only map from an unordered vertex pair to its edge weight.
///
/// Built once from the instance edges. When the instance lists the same
/// pair more than once, the lightest weight wins (it is the one any
/// shortest path would use).
#[derive(Debug, Clone, Default)]
pub struct WeightLookup {
    map: HashMap<TreeEdge, f64>,
}

impl WeightLookup {
    pub fn from_edges(edges: &[WeightedEdge]) -> Self {
        let mut map: HashMap<TreeEdge, f64> = HashMap::with_capacity(edges.len());
        for e in edges {
            map.entry(normalize_edge(e.u, e.v))
                .and_modify(|w| *w = w.min(e.weight))
                .or_insert(e.weight);
        }
        Self { map }
    }

    /// Weight of the edge `{u, v}` in either orientation.
    #[inline]
    pub fn get(&self, u: usize, v: usize) -> Option<f64> {
        self.map.get(&normalize_edge(u, v)).copied()
    }

    #[inline]
    pub fn contains(&self, u: usize, v: usize) -> bool {
        self.map.contains_key(&normalize_edge(u, v))
    }

    /// Sum of the weights of `edges`, or the first edge that has no weight.
    pub fn total(&self, edges: &[TreeEdge]) -> Result<f64, TreeEdge> {
        edges.iter().try_fold(0.0, |acc, &(u, v)| {
            self.get(u, v).map(|w| acc + w).ok_or((u, v))
        })
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_symmetric() {
        let lookup = WeightLookup::from_edges(&[WeightedEdge::new(4, 1, 2.5)]);
        assert_eq!(lookup.get(1, 4), Some(2.5));
        assert_eq!(lookup.get(4, 1), Some(2.5));
        assert!(lookup.contains(1, 4));
        assert_eq!(lookup.get(1, 2), None);
    }

    #[test]
    fn test_duplicate_pair_keeps_lightest() {
        let lookup = WeightLookup::from_edges(&[
            WeightedEdge::new(0, 1, 3.0),
            WeightedEdge::new(1, 0, 1.5),
        ]);
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.get(0, 1), Some(1.5));
    }

    #[test]
    fn test_total() {
        let lookup = WeightLookup::from_edges(&[
            WeightedEdge::new(0, 1, 1.0),
            WeightedEdge::new(1, 2, 2.0),
        ]);
        assert_eq!(lookup.total(&[(0, 1), (2, 1)]), Ok(3.0));
        assert_eq!(lookup.total(&[(0, 1), (0, 2)]), Err((0, 2)));
        assert_eq!(lookup.total(&[]), Ok(0.0));
    }
}
