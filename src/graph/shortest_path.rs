//! Multi-source Dijkstra over the instance graph.

use super::instance::Instance;
use super::{normalize_edge, TreeEdge};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Heap entry ordered so that `BinaryHeap` pops the smallest distance
/// first, lower vertex id on ties.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    dist: f64,
    vertex: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest-path tree rooted at a set of sources.
///
/// Every source has distance zero and no parent; following parent
/// pointers from any reachable vertex ends at the nearest source.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    dist: Vec<f64>,
    parent: Vec<Option<usize>>,
}

impl ShortestPaths {
    /// Runs Dijkstra seeded from every vertex in `sources` at once.
    ///
    /// Weights are strictly positive (guaranteed by [`Instance::new`]).
    pub fn multi_source(instance: &Instance, sources: &[usize]) -> Self {
        let n = instance.num_vertices();
        let mut dist = vec![f64::INFINITY; n];
        let mut parent: Vec<Option<usize>> = vec![None; n];
        let mut heap = BinaryHeap::with_capacity(sources.len());

        for &s in sources {
            if dist[s] > 0.0 {
                dist[s] = 0.0;
                heap.push(Frontier {
                    dist: 0.0,
                    vertex: s,
                });
            }
        }

        while let Some(Frontier { dist: d, vertex: u }) = heap.pop() {
            if d > dist[u] {
                continue;
            }
            for &(v, w) in instance.neighbors(u) {
                let nd = d + w;
                if nd < dist[v] {
                    dist[v] = nd;
                    parent[v] = Some(u);
                    heap.push(Frontier {
                        dist: nd,
                        vertex: v,
                    });
                }
            }
        }

        Self { dist, parent }
    }

    /// Distance from the nearest source, `f64::INFINITY` when unreachable.
    #[inline]
    pub fn distance(&self, v: usize) -> f64 {
        self.dist[v]
    }

    #[inline]
    pub fn is_reachable(&self, v: usize) -> bool {
        self.dist[v].is_finite()
    }

    #[inline]
    pub fn parent(&self, v: usize) -> Option<usize> {
        self.parent[v]
    }

    /// Normalized edges of the path from the nearest source to `target`,
    /// ordered source first. Empty when `target` is a source or unreachable.
    pub fn path_edges(&self, target: usize) -> Vec<TreeEdge> {
        let mut edges = Vec::new();
        let mut cur = target;
        while let Some(p) = self.parent[cur] {
            edges.push(normalize_edge(p, cur));
            cur = p;
        }
        edges.reverse();
        edges
    }
}
