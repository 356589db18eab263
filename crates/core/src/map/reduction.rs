//! Stages that shrink the settled room set: ratio culling, zone filtering, random
//! reduction, and demotion of undersized rooms to corridor features.
//!
//! Removal hands the removed rooms back to the caller, disabled, so nothing outside the
//! arena can keep a dangling id into it.

use super::filter::RoomFilter;
use super::info::MapInfo;
use super::model::{CorridorFeature, FeatureId, Room, RoomId};
use super::seed::random_index;

impl MapInfo {
    /// Removes every room whose short-to-long side ratio is at or below `ratio`.
    pub fn remove_rooms_below_ratio(&mut self, ratio: f32) -> Vec<Room> {
        self.remove_rooms_where(|room| room.ratio() <= ratio)
    }

    pub fn filter_rooms(&mut self, filter: &RoomFilter) {
        for room in self.rooms.values_mut() {
            filter.apply(room);
        }
    }

    /// Removes every room no filter has marked as kept. Running it again without a new
    /// filter pass removes nothing.
    pub fn remove_filtered(&mut self) -> Vec<Room> {
        self.remove_rooms_where(|room| !room.filter)
    }

    /// Evicts random rooms until at most `max_rooms` remain.
    ///
    /// Candidates are tracked in a list that mirrors swap-and-pop removal: the index is
    /// drawn modulo `len - 1`, so the room currently last in the list is never picked
    /// while others remain, and it then takes the evicted room's slot.
    pub fn reduce_rooms(&mut self) -> Vec<Room> {
        let mut candidates: Vec<RoomId> = self.rooms.keys().collect();
        let mut removed = Vec::new();

        while candidates.len() > self.limits.max_rooms {
            let index = if candidates.len() > 1 {
                random_index(&mut self.rng, candidates.len() - 1)
            } else {
                0
            };
            let id = candidates.swap_remove(index);
            if let Some(room) = self.rooms.remove(id) {
                removed.push(disabled(room));
            }
        }

        removed
    }

    /// Demotes rooms narrower than the minimum room width or shorter than the minimum
    /// room height to corridor features with the same bounds.
    pub fn separate_corridor_features(&mut self) -> Vec<FeatureId> {
        let min_width = self.room_size.min_width;
        let min_height = self.room_size.min_height;
        self.remove_rooms_where(|room| {
            room.bounds.width < min_width || room.bounds.height < min_height
        })
        .iter()
        .map(|room| self.corridor_features.insert(CorridorFeature::from_room(room)))
        .collect()
    }

    fn remove_rooms_where(&mut self, mut predicate: impl FnMut(&Room) -> bool) -> Vec<Room> {
        let doomed: Vec<RoomId> =
            self.rooms.iter().filter(|(_, room)| predicate(room)).map(|(id, _)| id).collect();
        doomed.into_iter().filter_map(|id| self.rooms.remove(id)).map(disabled).collect()
    }
}

fn disabled(mut room: Room) -> Room {
    room.enabled = false;
    room
}
