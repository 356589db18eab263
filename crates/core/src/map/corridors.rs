//! Corridor routing between connected rooms and linking of corridor features.

use std::f64::consts::FRAC_PI_2;

use crate::geometry::{Pos, Rect};
use crate::graph::EdgePair;

use super::connectivity::RoomGraph;
use super::info::MapInfo;
use super::model::{Corridor, CorridorId, Room};

impl MapInfo {
    /// Creates one corridor per pair, running wall to wall along the line between the
    /// two room centers, and records it on both rooms. Pairs whose rooms have been
    /// removed since `graph` was built are skipped.
    pub fn generate_corridors(&mut self, graph: &RoomGraph, pairs: &[EdgePair]) -> Vec<CorridorId> {
        let mut created = Vec::with_capacity(pairs.len());
        for pair in pairs {
            let (Some(from), Some(to)) = (graph.room(pair.from), graph.room(pair.to)) else {
                continue;
            };
            let (Some(room_a), Some(room_b)) = (self.rooms.get(from), self.rooms.get(to)) else {
                continue;
            };

            let center_a = room_a.bounds.center();
            let center_b = room_b.bounds.center();
            let start = wall_point(room_a, angle_between(center_a, center_b));
            let end = wall_point(room_b, angle_between(center_b, center_a));

            let id = self.corridors.insert(Corridor { start, end, rooms: (from, to) });
            for room in [from, to] {
                if let Some(room) = self.rooms.get_mut(room) {
                    room.corridors.push(id);
                }
            }
            created.push(id);
        }
        created
    }

    /// Points every corridor feature at the first corridor crossing its bounds, or at
    /// nothing when none does. Returns how many features ended up linked.
    pub fn link_corridor_features(&mut self) -> usize {
        let corridors = &self.corridors;
        let mut linked = 0;
        for feature in self.corridor_features.values_mut() {
            feature.linked_corridor = corridors
                .iter()
                .find(|(_, corridor)| segment_crosses(feature.bounds, corridor.start, corridor.end))
                .map(|(id, _)| id);
            linked += usize::from(feature.linked_corridor.is_some());
        }
        linked
    }
}

/// Screen-space angle (Y down) of the direction from `from` to `to`.
fn angle_between(from: Pos, to: Pos) -> f64 {
    f64::from(to.y - from.y).atan2(f64::from(to.x - from.x))
}

/// Where a ray leaving the room center at `angle` meets the room's walls.
fn wall_point(room: &Room, angle: f64) -> Pos {
    let bounds = room.bounds;
    let corners = room.corners;
    let cx = f64::from(bounds.center_x());
    let cy = f64::from(bounds.center_y());
    let hw = f64::from(bounds.half_width());
    let hh = f64::from(bounds.half_height());

    if corners.ru <= angle && angle <= corners.rd {
        Pos::new(bounds.right(), (cy + hw * angle.tan()).round() as i32)
    } else if angle >= corners.ld || angle <= corners.lu {
        Pos::new(bounds.left(), (cy - hw * angle.tan()).round() as i32)
    } else if angle < corners.ru {
        Pos::new((cx + hh * (angle + FRAC_PI_2).tan()).round() as i32, bounds.top())
    } else {
        Pos::new((cx - hh * (angle + FRAC_PI_2).tan()).round() as i32, bounds.bottom())
    }
}

/// Liang-Barsky clip of the segment against `bounds`, edges included.
fn segment_crosses(bounds: Rect, start: Pos, end: Pos) -> bool {
    let (x0, y0) = (f64::from(start.x), f64::from(start.y));
    let dx = f64::from(end.x) - x0;
    let dy = f64::from(end.y) - y0;
    let boundaries = [
        (-dx, x0 - f64::from(bounds.left())),
        (dx, f64::from(bounds.right()) - x0),
        (-dy, y0 - f64::from(bounds.top())),
        (dy, f64::from(bounds.bottom()) - y0),
    ];

    let (mut enter, mut exit) = (0.0_f64, 1.0_f64);
    for (p, q) in boundaries {
        if p == 0.0 {
            if q < 0.0 {
                return false;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > exit {
                return false;
            }
            enter = enter.max(t);
        } else {
            if t < enter {
                return false;
            }
            exit = exit.min(t);
        }
    }
    true
}
