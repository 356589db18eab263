//! The aggregate root that owns every room, corridor, and corridor feature of one map.

use std::fmt;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use xxhash_rust::xxh3::xxh3_64;

use crate::geometry::Pos;

use super::model::{Corridor, CorridorFeature, CorridorId, FeatureId, Room, RoomId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSizeLimits {
    pub min_width: i32,
    pub max_width: i32,
    pub min_height: i32,
    pub max_height: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationLimits {
    pub max_rooms: usize,
    pub max_random_corridors: usize,
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self { max_rooms: 10, max_random_corridors: 10 }
    }
}

/// Map dimensions, generation limits, the seeded random stream, and owning arenas for
/// rooms, corridors, and corridor features.
///
/// A fresh `MapInfo` is not initialised: call [`MapInfo::init`] with non-zero dimensions
/// before running any stage, and [`MapInfo::clear`] to release everything it owns.
pub struct MapInfo {
    pub(super) width: u32,
    pub(super) height: u32,
    pub(super) seed: u64,
    pub(super) rng: ChaCha8Rng,
    pub(super) room_size: RoomSizeLimits,
    pub(super) limits: GenerationLimits,
    pub(super) min_connected_corridors: usize,
    pub(super) rooms: SlotMap<RoomId, Room>,
    pub(super) corridors: SlotMap<CorridorId, Corridor>,
    pub(super) corridor_features: SlotMap<FeatureId, CorridorFeature>,
    pub(super) initialised: bool,
}

impl Default for MapInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl MapInfo {
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            seed: 0,
            rng: ChaCha8Rng::seed_from_u64(0),
            room_size: RoomSizeLimits::default(),
            limits: GenerationLimits::default(),
            min_connected_corridors: 0,
            rooms: SlotMap::with_key(),
            corridors: SlotMap::with_key(),
            corridor_features: SlotMap::with_key(),
            initialised: false,
        }
    }

    /// Zero-sized maps are rejected silently; check [`MapInfo::is_initialised`].
    /// Re-initialising clears any previous contents first.
    pub fn init(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if self.initialised {
            self.clear();
        }
        self.width = width;
        self.height = height;
        self.initialised = true;
    }

    /// Drops every room and corridor. Fresh arenas keep iteration order equal to
    /// insertion order after a re-init.
    pub fn clear(&mut self) {
        self.rooms = SlotMap::with_key();
        self.corridors = SlotMap::with_key();
        self.corridor_features = SlotMap::with_key();
        self.min_connected_corridors = 0;
        self.initialised = false;
    }

    /// Restarts the random stream; every later draw depends only on `seed` and the
    /// sequence of stage calls.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    pub fn set_room_size_limits(&mut self, limits: RoomSizeLimits) {
        self.room_size = limits;
    }

    pub fn set_generation_limits(&mut self, limits: GenerationLimits) {
        self.limits = limits;
    }

    pub fn is_initialised(&self) -> bool {
        self.initialised
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn room_size_limits(&self) -> RoomSizeLimits {
        self.room_size
    }

    pub fn generation_limits(&self) -> GenerationLimits {
        self.limits
    }

    /// Number of spanning-tree corridors found by the last `calc_min_span`.
    pub fn min_connected_corridors(&self) -> usize {
        self.min_connected_corridors
    }

    pub fn rooms(&self) -> &SlotMap<RoomId, Room> {
        &self.rooms
    }

    pub fn corridors(&self) -> &SlotMap<CorridorId, Corridor> {
        &self.corridors
    }

    pub fn corridor_features(&self) -> &SlotMap<FeatureId, CorridorFeature> {
        &self.corridor_features
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Room ids paired with their centers, in arena iteration order.
    pub fn room_centers(&self) -> Vec<(RoomId, Pos)> {
        self.rooms.iter().map(|(id, room)| (id, room.bounds.center())).collect()
    }

    /// Adds a room directly, bypassing random placement.
    pub fn insert_room(&mut self, room: Room) -> RoomId {
        self.rooms.insert(room)
    }

    /// Little-endian dump of every room, corridor, and feature in arena order; stable
    /// input for fingerprinting a generated map.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.width.to_le_bytes());
        bytes.extend(self.height.to_le_bytes());
        bytes.extend(self.seed.to_le_bytes());

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in self.rooms.values() {
            bytes.extend(room.bounds.pos.x.to_le_bytes());
            bytes.extend(room.bounds.pos.y.to_le_bytes());
            bytes.extend(room.bounds.width.to_le_bytes());
            bytes.extend(room.bounds.height.to_le_bytes());
        }

        bytes.extend((self.corridors.len() as u32).to_le_bytes());
        for corridor in self.corridors.values() {
            bytes.extend(corridor.start.x.to_le_bytes());
            bytes.extend(corridor.start.y.to_le_bytes());
            bytes.extend(corridor.end.x.to_le_bytes());
            bytes.extend(corridor.end.y.to_le_bytes());
        }

        bytes.extend((self.corridor_features.len() as u32).to_le_bytes());
        for feature in self.corridor_features.values() {
            bytes.extend(feature.bounds.pos.x.to_le_bytes());
            bytes.extend(feature.bounds.pos.y.to_le_bytes());
            bytes.extend(feature.bounds.width.to_le_bytes());
            bytes.extend(feature.bounds.height.to_le_bytes());
            bytes.push(u8::from(feature.linked_corridor.is_some()));
        }

        bytes
    }

    /// `xxh3_64` of [`MapInfo::canonical_bytes`].
    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

impl fmt::Display for MapInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MapInfo:")?;
        writeln!(f, "  seed: {}", self.seed)?;
        writeln!(f, "  size: {}x{}", self.width, self.height)?;
        writeln!(
            f,
            "  room width: {}..={}  room height: {}..={}",
            self.room_size.min_width,
            self.room_size.max_width,
            self.room_size.min_height,
            self.room_size.max_height
        )?;
        writeln!(f, "  max rooms: {}", self.limits.max_rooms)?;
        writeln!(f, "  max random corridors: {}", self.limits.max_random_corridors)?;
        write!(f, "  initialised: {}", self.initialised)
    }
}
