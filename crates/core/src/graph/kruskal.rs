//! Kruskal spanning tree over a triangulation's edges.

use serde::{Deserialize, Serialize};

use super::delaunay::{Edge, Triangulation};
use super::union_find::UnionFind;
use crate::geometry::Pos;

/// Vertex pair selected for a corridor, in triangulation vertex indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgePair {
    pub from: usize,
    pub to: usize,
}

impl EdgePair {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    pub fn joins(&self, a: usize, b: usize) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

impl From<&Edge> for EdgePair {
    fn from(edge: &Edge) -> Self {
        Self::new(edge.s, edge.t)
    }
}

/// Indices into `edges` of a minimum spanning forest, in acceptance order. Weights are
/// squared distances and ties keep the input order.
pub fn spanning_edges(points: &[Pos], edges: &[Edge]) -> Vec<usize> {
    let mut order: Vec<(i64, usize)> = edges
        .iter()
        .enumerate()
        .map(|(index, edge)| (points[edge.s].distance_sq(points[edge.t]), index))
        .collect();
    order.sort_by_key(|&(weight, _)| weight);

    let mut forest = UnionFind::new(points.len());
    let mut accepted = Vec::with_capacity(points.len().saturating_sub(1));
    for (_, index) in order {
        if forest.count() <= 1 {
            break;
        }
        let edge = &edges[index];
        if forest.union(edge.s, edge.t) {
            accepted.push(index);
        }
    }
    accepted
}

/// Moves the spanning edges out of `triangulation`, leaving only the edges that would
/// close a cycle.
pub fn extract_spanning_tree(triangulation: &mut Triangulation) -> Vec<EdgePair> {
    let accepted = spanning_edges(triangulation.points(), triangulation.edges());
    let pairs = accepted.iter().map(|&index| EdgePair::from(&triangulation.edges()[index])).collect();

    let mut taken = vec![false; triangulation.edges().len()];
    for index in accepted {
        taken[index] = true;
    }
    triangulation.retain_edges(|index, _| !taken[index]);
    pairs
}
