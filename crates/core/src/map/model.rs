//! Rooms, corridors, and corridor features owned by a [`MapInfo`](super::MapInfo).

use slotmap::new_key_type;

use crate::geometry::{Pos, Rect};

new_key_type! {
    pub struct RoomId;
    pub struct CorridorId;
    pub struct FeatureId;
}

/// Angles from a room's center to its four corners, in screen space (Y grows
/// downwards), as returned by `atan2(dy, dx)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerAngles {
    pub lu: f64,
    pub ru: f64,
    pub rd: f64,
    pub ld: f64,
}

impl CornerAngles {
    pub fn for_bounds(bounds: Rect) -> Self {
        let hw = f64::from(bounds.half_width());
        let hh = f64::from(bounds.half_height());
        Self {
            lu: (-hh).atan2(-hw),
            ru: (-hh).atan2(hw),
            rd: hh.atan2(hw),
            ld: hh.atan2(-hw),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Room {
    pub bounds: Rect,
    pub enabled: bool,
    /// Set by room filters; rooms still `false` are dropped by `remove_filtered`.
    pub filter: bool,
    pub corners: CornerAngles,
    pub corridors: Vec<CorridorId>,
}

impl Room {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            enabled: true,
            filter: false,
            corners: CornerAngles::for_bounds(bounds),
            corridors: Vec::new(),
        }
    }

    /// Aspect ratio in `[0, 1]`: the shorter side over the longer one.
    pub fn ratio(&self) -> f32 {
        let short = self.bounds.width.min(self.bounds.height);
        let long = self.bounds.width.max(self.bounds.height);
        if long <= 0 {
            return 0.0;
        }
        short as f32 / long as f32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Corridor {
    pub start: Pos,
    pub end: Pos,
    pub rooms: (RoomId, RoomId),
}

/// A room too small to stand alone, kept as a widening along the corridor network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CorridorFeature {
    pub bounds: Rect,
    pub linked_corridor: Option<CorridorId>,
}

impl CorridorFeature {
    pub fn from_room(room: &Room) -> Self {
        Self { bounds: room.bounds, linked_corridor: None }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_4, PI};

    use super::*;

    #[test]
    fn square_room_corners_sit_on_the_diagonals() {
        let corners = CornerAngles::for_bounds(Rect::new(0, 0, 10, 10));
        assert!((corners.ru + FRAC_PI_4).abs() < 1e-12);
        assert!((corners.rd - FRAC_PI_4).abs() < 1e-12);
        assert!((corners.ld - 3.0 * FRAC_PI_4).abs() < 1e-12);
        assert!((corners.lu + 3.0 * FRAC_PI_4).abs() < 1e-12);
        assert!(corners.lu > -PI && corners.ld < PI);
    }

    #[test]
    fn ratio_uses_shorter_over_longer_side() {
        assert_eq!(Room::new(Rect::new(0, 0, 4, 12)).ratio(), 4.0 / 12.0);
        assert_eq!(Room::new(Rect::new(0, 0, 12, 4)).ratio(), 4.0 / 12.0);
        assert_eq!(Room::new(Rect::new(0, 0, 0, 0)).ratio(), 0.0);
    }

    #[test]
    fn new_rooms_start_enabled_and_unfiltered() {
        let room = Room::new(Rect::new(3, 4, 5, 6));
        assert!(room.enabled);
        assert!(!room.filter);
        assert!(room.corridors.is_empty());
    }
}
