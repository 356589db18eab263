//! Random room placement and the overlap-separation relaxation pass.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::geometry::{Pos, Rect};

use super::info::MapInfo;
use super::model::{Room, RoomId};
use super::seed::{
    STREAM_ROOM_DIMENSION, STREAM_ROOM_X, STREAM_ROOM_Y, random_in_range, split_stream,
};

/// Where and how large a batch of candidate rooms may be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomPlacement {
    pub count: usize,
    pub min_len: i32,
    pub max_len: i32,
    pub origin: Pos,
    pub margin_width: i32,
    pub margin_height: i32,
}

impl RoomPlacement {
    /// Applies the length fallbacks: a non-positive minimum becomes 2, a maximum not
    /// above the minimum becomes `min + 10`, and the maximum never undercuts the
    /// configured largest room extents.
    fn normalised_lengths(&self, max_room_width: i32, max_room_height: i32) -> (i32, i32) {
        let min_len = if self.min_len <= 0 { 2 } else { self.min_len };
        let mut max_len = if self.max_len <= min_len { min_len + 10 } else { self.max_len };
        max_len = max_len.max(max_room_width).max(max_room_height);
        (min_len, max_len)
    }
}

impl MapInfo {
    /// Adds `placement.count` random rooms. Every batch restarts the random stream from
    /// the map seed, so the same seed always yields the same rooms. Does nothing on an
    /// uninitialised map.
    pub fn make_rooms(&mut self, placement: &RoomPlacement) -> Vec<RoomId> {
        if !self.initialised {
            return Vec::new();
        }

        let (min_len, max_len) =
            placement.normalised_lengths(self.room_size.max_width, self.room_size.max_height);
        let (min_x, max_x) = ordered_span(placement.origin.x, placement.margin_width);
        let (min_y, max_y) = ordered_span(placement.origin.y, placement.margin_height);

        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut x_stream = split_stream(&mut self.rng, STREAM_ROOM_X);
        let mut y_stream = split_stream(&mut self.rng, STREAM_ROOM_Y);
        let mut dimension_stream = split_stream(&mut self.rng, STREAM_ROOM_DIMENSION);

        (0..placement.count)
            .map(|_| {
                let x = random_in_range(&mut x_stream, min_x, max_x);
                let y = random_in_range(&mut y_stream, min_y, max_y);
                let width = random_in_range(&mut dimension_stream, min_len, max_len);
                let height = random_in_range(&mut dimension_stream, min_len, max_len);
                self.rooms.insert(Room::new(Rect::new(x, y, width, height)))
            })
            .collect()
    }

    /// Runs one relaxation pass and reports whether it was already at rest.
    ///
    /// Each room collects the largest X and the largest Y penetration against every
    /// room it overlaps, then steps along whichever of the two is smaller in magnitude.
    /// Rooms move in place, so later rooms in the pass see earlier moves. Callers loop
    /// until this returns `true` and must cap the number of passes themselves.
    pub fn separate_rooms(&mut self) -> bool {
        let ids: Vec<RoomId> = self.rooms.keys().collect();
        let mut interactions = 0_usize;

        for &current_id in &ids {
            let current = self.rooms[current_id].bounds;
            let mut force = Pos::default();

            for &other_id in &ids {
                if other_id == current_id {
                    continue;
                }
                let other = self.rooms[other_id].bounds;
                if !current.intersects(&other) {
                    continue;
                }
                let depth = current.penetration(&other);
                if depth.x.abs() > force.x.abs() {
                    force.x = depth.x;
                }
                if depth.y.abs() > force.y.abs() {
                    force.y = depth.y;
                }
            }

            if force.x != 0 && force.y != 0 {
                interactions += 1;
                let bounds = &mut self.rooms[current_id].bounds;
                if force.x.abs() < force.y.abs() {
                    bounds.pos.x += force.x;
                } else {
                    bounds.pos.y += force.y;
                }
            }
        }

        interactions == 0
    }
}

fn ordered_span(origin: i32, margin: i32) -> (i32, i32) {
    let a = origin - margin;
    let b = origin + margin;
    (a.min(b), a.max(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::info::RoomSizeLimits;

    fn initialised_map(seed: u64) -> MapInfo {
        let mut map = MapInfo::new();
        map.init(400, 400);
        map.set_room_size_limits(RoomSizeLimits {
            min_width: 5,
            max_width: 15,
            min_height: 5,
            max_height: 15,
        });
        map.set_seed(seed);
        map
    }

    fn placement() -> RoomPlacement {
        RoomPlacement {
            count: 40,
            min_len: 3,
            max_len: 20,
            origin: Pos::new(200, 200),
            margin_width: 30,
            margin_height: 20,
        }
    }

    fn bounds_of(map: &MapInfo) -> Vec<Rect> {
        map.rooms().values().map(|room| room.bounds).collect()
    }

    #[test]
    fn rooms_fall_inside_the_requested_window() {
        let mut map = initialised_map(7);
        let created = map.make_rooms(&placement());
        assert_eq!(created.len(), 40);

        for room in map.rooms().values() {
            assert!((170..=230).contains(&room.bounds.pos.x));
            assert!((180..=220).contains(&room.bounds.pos.y));
            assert!((3..=20).contains(&room.bounds.width));
            assert!((3..=20).contains(&room.bounds.height));
        }
    }

    #[test]
    fn same_seed_reproduces_identical_rooms() {
        let mut first = initialised_map(1234);
        let mut second = initialised_map(1234);
        first.make_rooms(&placement());
        second.make_rooms(&placement());
        assert_eq!(bounds_of(&first), bounds_of(&second));

        let mut third = initialised_map(4321);
        third.make_rooms(&placement());
        assert_ne!(bounds_of(&first), bounds_of(&third));
    }

    #[test]
    fn uninitialised_map_creates_nothing() {
        let mut map = MapInfo::new();
        map.set_seed(5);
        assert!(map.make_rooms(&placement()).is_empty());
        assert_eq!(map.room_count(), 0);
    }

    #[test]
    fn length_fallbacks_widen_to_configured_maximum() {
        let lengths = RoomPlacement { min_len: 0, max_len: 0, ..placement() };
        assert_eq!(lengths.normalised_lengths(5, 5), (2, 12));
        assert_eq!(lengths.normalised_lengths(25, 18), (2, 25));

        let explicit = RoomPlacement { min_len: 4, max_len: 9, ..placement() };
        assert_eq!(explicit.normalised_lengths(5, 15), (4, 15));
    }

    #[test]
    fn separated_rooms_stop_reporting_interactions() {
        let mut map = initialised_map(0);
        let layout = [(0, 0), (3, 2), (5, 5), (2, 7), (8, 1), (4, 4)];
        for (x, y) in layout {
            map.insert_room(Room::new(Rect::new(x, y, 10, 10)));
        }

        let mut converged = false;
        for _ in 0..1_000 {
            if map.separate_rooms() {
                converged = true;
                break;
            }
        }
        assert!(converged, "dense cluster should settle within the pass cap");

        let bounds = bounds_of(&map);
        for (index, left) in bounds.iter().enumerate() {
            for right in &bounds[index + 1..] {
                assert!(!left.intersects(right), "{left:?} still overlaps {right:?}");
            }
        }
    }

    #[test]
    fn separation_pushes_along_the_shallower_axis() {
        let mut map = initialised_map(0);
        let moving = map.insert_room(Room::new(Rect::new(0, 0, 10, 10)));
        map.insert_room(Room::new(Rect::new(8, 3, 10, 10)));

        assert!(!map.separate_rooms());
        assert_eq!(map.rooms()[moving].bounds.pos, Pos::new(-2, 0));
        assert!(map.separate_rooms());
    }

    #[test]
    fn disjoint_rooms_are_already_at_rest() {
        let mut map = initialised_map(0);
        map.insert_room(Room::new(Rect::new(0, 0, 10, 10)));
        map.insert_room(Room::new(Rect::new(10, 0, 10, 10)));
        assert!(map.separate_rooms());
    }
}
