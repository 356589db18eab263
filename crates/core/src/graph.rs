//! Room connectivity graphs: triangulation, spanning tree and the disjoint-set forest
//! backing it.

pub mod delaunay;
pub mod kruskal;
pub mod union_find;

pub use delaunay::{
    Edge, Face, FaceId, MAX_COORDINATE, Triangulation, TriangulationError, triangulate,
};
pub use kruskal::{EdgePair, extract_spanning_tree, spanning_edges};
pub use union_find::UnionFind;
