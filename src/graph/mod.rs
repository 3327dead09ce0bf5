//! Graph primitives for the clustered Steiner tree problem.
//!
//! The [`Instance`] is validated once at construction and is read-only
//! afterwards. It owns the derived lookup structures every operator needs
//! (adjacency lists, the symmetric weight map, the `cluster_of` table), so
//! nothing is cached lazily on the side.

mod instance;
mod lookup;
mod mst;
mod shortest_path;

pub use instance::{Instance, InstanceError, WeightedEdge};
pub use lookup::WeightLookup;
pub use mst::prim_dense;
pub use shortest_path::ShortestPaths;

/// An undirected edge between two vertex ids.
///
/// Normalized edges (see [`normalize_edge`]) keep the smaller id first so
/// that set membership does not depend on orientation.
pub type TreeEdge = (usize, usize);

/// Orders the endpoints so the smaller id comes first.
#[inline]
pub fn normalize_edge(u: usize, v: usize) -> TreeEdge {
    if u <= v {
        (u, v)
    } else {
        (v, u)
    }
}
