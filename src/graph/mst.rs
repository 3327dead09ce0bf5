//! Prim's algorithm on a dense weight matrix.

/// Minimum spanning tree of the complete graph described by `weights`.
///
/// `weights[i][j]` is the cost of joining `i` and `j`; `f64::INFINITY`
/// marks an unusable pair. Runs in O(C²). Returns the tree edges as
/// `(parent, child)` pairs in the order vertices join the tree, or `None`
/// if some vertex cannot be reached.
pub fn prim_dense(weights: &[Vec<f64>]) -> Option<Vec<(usize, usize)>> {
    let c = weights.len();
    if c <= 1 {
        return Some(Vec::new());
    }

    let mut in_tree = vec![false; c];
    let mut key = vec![f64::INFINITY; c];
    let mut parent: Vec<Option<usize>> = vec![None; c];
    let mut edges = Vec::with_capacity(c - 1);
    key[0] = 0.0;

    for _ in 0..c {
        let mut u = None;
        let mut best = f64::INFINITY;
        for i in 0..c {
            if !in_tree[i] && key[i] < best {
                best = key[i];
                u = Some(i);
            }
        }
        let u = u?;
        in_tree[u] = true;
        if let Some(p) = parent[u] {
            edges.push((p, u));
        }

        for v in 0..c {
            if !in_tree[v] && v != u && weights[u][v] < key[v] {
                key[v] = weights[u][v];
                parent[v] = Some(u);
            }
        }
    }

    Some(edges)
}
