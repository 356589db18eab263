//! Connecting room centers: triangulation, spanning tree, and extra loop edges.

use crate::geometry::Pos;
use crate::graph::{EdgePair, Triangulation, TriangulationError, extract_spanning_tree, triangulate};

use super::info::MapInfo;
use super::model::RoomId;
use super::seed::random_index;

/// A triangulation over room centers together with the room behind each vertex.
///
/// Vertex `i` of the triangulation is the center of `rooms[i]` at the time the graph
/// was built.
#[derive(Clone, Debug)]
pub struct RoomGraph {
    rooms: Vec<RoomId>,
    triangulation: Triangulation,
}

impl RoomGraph {
    pub fn rooms(&self) -> &[RoomId] {
        &self.rooms
    }

    pub fn room(&self, vertex: usize) -> Option<RoomId> {
        self.rooms.get(vertex).copied()
    }

    pub fn triangulation(&self) -> &Triangulation {
        &self.triangulation
    }

    pub fn vertex_count(&self) -> usize {
        self.rooms.len()
    }

    /// Edges still in the pool: the whole triangulation before `calc_min_span`, only the
    /// cycle-closing edges after it.
    pub fn remaining_edges(&self) -> usize {
        self.triangulation.edges().len()
    }
}

impl MapInfo {
    /// Triangulates the current room centers.
    pub fn perform_delaunay_triangulation(&self) -> Result<RoomGraph, TriangulationError> {
        let (rooms, points): (Vec<RoomId>, Vec<Pos>) = self.room_centers().into_iter().unzip();
        let triangulation = triangulate(points)?;
        Ok(RoomGraph { rooms, triangulation })
    }

    /// Moves a minimum spanning tree out of the graph's edge pool and returns it.
    pub fn calc_min_span(&mut self, graph: &mut RoomGraph) -> Vec<EdgePair> {
        let pairs = extract_spanning_tree(&mut graph.triangulation);
        self.min_connected_corridors = pairs.len();
        pairs
    }

    /// Draws up to `extra` random edges from the pool left after `calc_min_span` and
    /// appends them to `pairs`. Returns how many were added.
    pub fn add_random_edges(
        &mut self,
        graph: &mut RoomGraph,
        pairs: &mut Vec<EdgePair>,
        extra: usize,
    ) -> usize {
        let mut added = 0;
        while added < extra && !graph.triangulation.edges().is_empty() {
            let index = random_index(&mut self.rng, graph.triangulation.edges().len());
            let edge = graph.triangulation.take_edge(index);
            pairs.push(EdgePair::from(&edge));
            added += 1;
        }
        added
    }

    /// [`MapInfo::add_random_edges`] with the configured `max_random_corridors`.
    pub fn add_configured_random_edges(
        &mut self,
        graph: &mut RoomGraph,
        pairs: &mut Vec<EdgePair>,
    ) -> usize {
        let extra = self.limits.max_random_corridors;
        self.add_random_edges(graph, pairs, extra)
    }
}
