//! Inclusion and exclusion zones applied to candidate rooms.

use serde::{Deserialize, Serialize};

use crate::geometry::{Pos, Rect};

use super::model::Room;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum FilterShape {
    /// Matches rooms whose bounds lie entirely inside the box.
    Box { area: Rect },
    /// Matches rooms whose center is strictly closer than `radius`.
    Circle { center: Pos, radius: i32 },
    /// Matches rooms whose center lies strictly between the two radii.
    Halo { center: Pos, inner_radius: i32, outer_radius: i32 },
}

/// A zone that marks every matching room as kept (`inclusive`) or dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomFilter {
    #[serde(flatten)]
    pub shape: FilterShape,
    #[serde(default = "default_inclusive")]
    pub inclusive: bool,
}

fn default_inclusive() -> bool {
    true
}

impl RoomFilter {
    pub fn include(shape: FilterShape) -> Self {
        Self { shape, inclusive: true }
    }

    pub fn exclude(shape: FilterShape) -> Self {
        Self { shape, inclusive: false }
    }

    pub fn matches(&self, room: &Room) -> bool {
        let bounds = room.bounds;
        match self.shape {
            FilterShape::Box { area } => area.contains_rect(&bounds),
            FilterShape::Circle { center, radius } => {
                center.distance_sq(bounds.center()) < squared(radius)
            }
            FilterShape::Halo { center, inner_radius, outer_radius } => {
                let distance_sq = center.distance_sq(bounds.center());
                distance_sq > squared(inner_radius) && distance_sq < squared(outer_radius)
            }
        }
    }

    /// Overwrites the room's filter flag only when the room matches.
    pub fn apply(&self, room: &mut Room) {
        if self.matches(room) {
            room.filter = self.inclusive;
        }
    }
}

fn squared(radius: i32) -> i64 {
    i64::from(radius) * i64::from(radius)
}
