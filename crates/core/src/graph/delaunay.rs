//! Quadratic Delaunay triangulation built face by face from the closest vertex pair.
//!
//! Every edge keeps the face on each side. Completing an open side searches all
//! vertices to its left for the one whose circumcircle with the edge holds no other
//! left-side vertex, registers the triangle as a new face, and opens or closes the two
//! edges it shares with that vertex. Sides with no vertex to their left border the
//! unbounded `Universe` face.
//!
//! Vertices are integer points and both predicates are exact. Cocircular ties are
//! broken by a symbolic lift of each vertex that shrinks with its index, so every open
//! edge on the same circle agrees on one triangulation of it.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

use crate::geometry::Pos;

/// Largest coordinate magnitude the exact predicates accept without overflow.
pub const MAX_COORDINATE: i32 = 1 << 29;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FaceId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    Undefined,
    Universe,
    Inner(FaceId),
}

/// Undirected edge stored with `s < t`; `l` is the face on the left of `s → t`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub s: usize,
    pub t: usize,
    pub l: Face,
    pub r: Face,
}

impl Edge {
    pub fn is_complete(&self) -> bool {
        self.l != Face::Undefined && self.r != Face::Undefined
    }

    pub fn connects(&self, a: usize, b: usize) -> bool {
        (self.s == a && self.t == b) || (self.s == b && self.t == a)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TriangulationError {
    /// More edges than a planar graph on `points` vertices can hold.
    EdgeCapacityExceeded { capacity: usize, points: usize },
    /// A vertex lies outside `±MAX_COORDINATE` on some axis.
    CoordinateOutOfRange { vertex: usize, point: Pos },
}

impl fmt::Display for TriangulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EdgeCapacityExceeded { capacity, points } => {
                write!(f, "triangulation of {points} points exceeded its {capacity}-edge capacity")
            }
            Self::CoordinateOutOfRange { vertex, point } => {
                write!(f, "vertex {vertex} at ({}, {}) is out of range", point.x, point.y)
            }
        }
    }
}

impl Error for TriangulationError {}

#[derive(Clone, Debug)]
pub struct Triangulation {
    points: Vec<Pos>,
    edges: Vec<Edge>,
    lookup: BTreeMap<(usize, usize), usize>,
    max_edges: usize,
    faces: u32,
}

impl Triangulation {
    pub fn new(points: Vec<Pos>) -> Self {
        let max_edges = max_edges_for(points.len());
        Self { points, edges: Vec::new(), lookup: BTreeMap::new(), max_edges, faces: 0 }
    }

    pub fn points(&self) -> &[Pos] {
        &self.points
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn max_edges(&self) -> usize {
        self.max_edges
    }

    /// Number of interior faces registered so far.
    pub fn face_count(&self) -> usize {
        self.faces as usize
    }

    /// True when every edge has both of its faces resolved.
    pub fn is_complete(&self) -> bool {
        self.edges.iter().all(Edge::is_complete)
    }

    pub fn find_edge(&self, a: usize, b: usize) -> Option<usize> {
        self.lookup.get(&ordered(a, b)).copied()
    }

    /// Adds the edge `a → b` with faces given relative to that direction. Returns `None`
    /// when the pair is already connected.
    pub fn add_edge(
        &mut self,
        a: usize,
        b: usize,
        left: Face,
        right: Face,
    ) -> Result<Option<usize>, TriangulationError> {
        if self.find_edge(a, b).is_some() {
            return Ok(None);
        }
        if self.edges.len() >= self.max_edges {
            return Err(TriangulationError::EdgeCapacityExceeded {
                capacity: self.max_edges,
                points: self.points.len(),
            });
        }

        let edge = if a < b {
            Edge { s: a, t: b, l: left, r: right }
        } else {
            Edge { s: b, t: a, l: right, r: left }
        };
        let index = self.edges.len();
        self.edges.push(edge);
        self.lookup.insert((edge.s, edge.t), index);
        Ok(Some(index))
    }

    pub fn add_triangle(&mut self, a: usize, b: usize, c: usize) -> Result<(), TriangulationError> {
        self.add_edge(a, b, Face::Undefined, Face::Undefined)?;
        self.add_edge(b, c, Face::Undefined, Face::Undefined)?;
        self.add_edge(c, a, Face::Undefined, Face::Undefined)?;
        Ok(())
    }

    /// Sets the face on the left of `a → b` for edge `index` if that side is still
    /// open. A side that is already resolved is left untouched and `false` returned.
    pub fn update_left_face(&mut self, index: usize, a: usize, b: usize, face: Face) -> bool {
        let edge = &mut self.edges[index];
        debug_assert!(edge.connects(a, b), "edge {index} does not join {a} and {b}");
        if edge.s == a && edge.l == Face::Undefined {
            edge.l = face;
            true
        } else if edge.t == a && edge.r == Face::Undefined {
            edge.r = face;
            true
        } else {
            false
        }
    }

    /// Removes edge `index` by swapping the last edge into its slot.
    pub fn take_edge(&mut self, index: usize) -> Edge {
        let edge = self.edges.swap_remove(index);
        self.lookup.remove(&(edge.s, edge.t));
        if let Some(moved) = self.edges.get(index) {
            self.lookup.insert((moved.s, moved.t), index);
        }
        edge
    }

    /// Keeps only the edges for which `keep` returns true, preserving their order.
    pub fn retain_edges(&mut self, mut keep: impl FnMut(usize, &Edge) -> bool) {
        let mut index = 0;
        self.edges.retain(|edge| {
            let kept = keep(index, edge);
            index += 1;
            kept
        });
        self.lookup =
            self.edges.iter().enumerate().map(|(index, edge)| ((edge.s, edge.t), index)).collect();
    }

    fn register_face(&mut self) -> Face {
        let face = Face::Inner(FaceId(self.faces));
        self.faces += 1;
        face
    }

    /// Gives `face` to the side of `a → b` on its left, creating the edge if needed.
    fn attach_face(&mut self, a: usize, b: usize, face: Face) -> Result<(), TriangulationError> {
        match self.find_edge(a, b) {
            Some(index) => {
                self.update_left_face(index, a, b, face);
            }
            None => {
                self.add_edge(a, b, face, Face::Undefined)?;
            }
        }
        Ok(())
    }
}

/// Triangulates `points`. Exactly collinear triples never form a face, so fully
/// collinear input leaves all but the seed edge's endpoints unconnected.
pub fn triangulate(points: Vec<Pos>) -> Result<Triangulation, TriangulationError> {
    if let Some((vertex, &point)) = points
        .iter()
        .enumerate()
        .find(|(_, point)| {
            point.x.unsigned_abs() > MAX_COORDINATE.unsigned_abs()
                || point.y.unsigned_abs() > MAX_COORDINATE.unsigned_abs()
        })
    {
        return Err(TriangulationError::CoordinateOutOfRange { vertex, point });
    }

    let mut triangulation = Triangulation::new(points);
    let Some((s, t)) = closest_pair(&triangulation.points) else {
        return Ok(triangulation);
    };
    triangulation.add_edge(s, t, Face::Undefined, Face::Undefined)?;

    let mut current = 0;
    while current < triangulation.edges.len() {
        if triangulation.edges[current].l == Face::Undefined {
            complete_facet(&mut triangulation, current)?;
        }
        if triangulation.edges[current].r == Face::Undefined {
            complete_facet(&mut triangulation, current)?;
        }
        current += 1;
    }

    Ok(triangulation)
}

fn complete_facet(
    triangulation: &mut Triangulation,
    index: usize,
) -> Result<(), TriangulationError> {
    let edge = triangulation.edges[index];
    let (s, t) = if edge.l == Face::Undefined {
        (edge.s, edge.t)
    } else if edge.r == Face::Undefined {
        (edge.t, edge.s)
    } else {
        return Ok(());
    };

    let Some(apex) = best_apex(&triangulation.points, s, t) else {
        triangulation.update_left_face(index, s, t, Face::Universe);
        return Ok(());
    };

    let face = triangulation.register_face();
    triangulation.update_left_face(index, s, t, face);
    triangulation.attach_face(apex, s, face)?;
    triangulation.attach_face(t, apex, face)
}

/// The vertex left of `s → t` whose circumcircle with the edge is empty of every other
/// left-side vertex, or `None` when nothing lies strictly to the left.
fn best_apex(points: &[Pos], s: usize, t: usize) -> Option<usize> {
    let mut best: Option<usize> = None;
    for candidate in 0..points.len() {
        if candidate == s || candidate == t {
            continue;
        }
        if orient(points[s], points[t], points[candidate]) <= 0 {
            continue;
        }
        match best {
            Some(apex) if !in_circle(points, [s, t, apex], candidate) => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// Twice the signed area of `a b c`; positive when `c` lies left of `a → b`.
fn orient(a: Pos, b: Pos, c: Pos) -> i128 {
    let (ux, uy) = (i128::from(b.x) - i128::from(a.x), i128::from(b.y) - i128::from(a.y));
    let (vx, vy) = (i128::from(c.x) - i128::from(a.x), i128::from(c.y) - i128::from(a.y));
    ux * vy - uy * vx
}

/// Whether `vertex` lies strictly inside the circle through `triangle`, whose corners
/// are counter-clockwise. Exact ties fall back to the lift perturbation: the lowest
/// vertex index whose opposite triple is not collinear decides.
fn in_circle(points: &[Pos], triangle: [usize; 3], vertex: usize) -> bool {
    let d = points[vertex];
    let rows = triangle.map(|corner| {
        let dx = i128::from(points[corner].x) - i128::from(d.x);
        let dy = i128::from(points[corner].y) - i128::from(d.y);
        [dx, dy, dx * dx + dy * dy]
    });
    let determinant = rows[0][0] * (rows[1][1] * rows[2][2] - rows[1][2] * rows[2][1])
        - rows[0][1] * (rows[1][0] * rows[2][2] - rows[1][2] * rows[2][0])
        + rows[0][2] * (rows[1][0] * rows[2][1] - rows[1][1] * rows[2][0]);
    if determinant != 0 {
        return determinant > 0;
    }

    let quad = [triangle[0], triangle[1], triangle[2], vertex];
    let mut order = [0, 1, 2, 3];
    order.sort_by_key(|&row| quad[row]);
    for row in order {
        let others: Vec<Pos> =
            (0..4).filter(|&other| other != row).map(|other| points[quad[other]]).collect();
        let minor = orient(others[0], others[1], others[2]);
        if minor != 0 {
            // Cofactor sign of the lift column for this row.
            return if row % 2 == 0 { minor > 0 } else { minor < 0 };
        }
    }
    false
}

/// First pair (in index order) with the smallest squared distance.
fn closest_pair(points: &[Pos]) -> Option<(usize, usize)> {
    let mut best: Option<(i64, usize, usize)> = None;
    for (i, &a) in points.iter().enumerate() {
        for (j, &b) in points.iter().enumerate().skip(i + 1) {
            let distance_sq = a.distance_sq(b);
            if best.is_none_or(|(best_distance, _, _)| distance_sq < best_distance) {
                best = Some((distance_sq, i, j));
            }
        }
    }
    best.map(|(_, i, j)| (i, j))
}

fn max_edges_for(points: usize) -> usize {
    if points >= 3 { 3 * points - 6 } else { points.saturating_sub(1) }
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}
