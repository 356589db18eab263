//! Every knob of a batch map generation run, loadable from TOML by the tools.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Pos;
use crate::graph::MAX_COORDINATE;
use crate::map::{GenerationLimits, RoomFilter, RoomPlacement, RoomSizeLimits};

/// Settings for [`MapBuilder`](crate::pipeline::MapBuilder). Missing TOML keys fall
/// back to the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub width: u32,
    pub height: u32,
    /// Rooms scattered before separation and culling.
    pub candidate_rooms: usize,
    pub min_room_len: i32,
    pub max_room_len: i32,
    pub margin_width: i32,
    pub margin_height: i32,
    /// Rooms with a short-to-long side ratio at or below this are dropped.
    pub ratio_threshold: f32,
    pub max_separation_passes: usize,
    /// Scatter origin; the map center when absent.
    pub origin: Option<Pos>,
    pub room_size: RoomSizeLimits,
    pub limits: GenerationLimits,
    /// Applied in order; when non-empty, rooms no filter keeps are removed.
    pub filters: Vec<RoomFilter>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            candidate_rooms: 100,
            min_room_len: 3,
            max_room_len: 40,
            margin_width: 30,
            margin_height: 30,
            ratio_threshold: 1.0 / 3.0,
            max_separation_passes: 10_000,
            origin: None,
            room_size: RoomSizeLimits { min_width: 5, max_width: 15, min_height: 5, max_height: 15 },
            limits: GenerationLimits { max_rooms: 20, max_random_corridors: 5 },
            filters: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ZeroDimension { width: u32, height: u32 },
    /// Room centers on a map this large could leave the triangulation's exact range.
    DimensionTooLarge { width: u32, height: u32, max: u32 },
    InvertedRoomWidth { min: i32, max: i32 },
    InvertedRoomHeight { min: i32, max: i32 },
    RatioOutOfRange(f32),
    NoSeparationPasses,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimension { width, height } => {
                write!(f, "map dimensions must be non-zero, got {width}x{height}")
            }
            Self::DimensionTooLarge { width, height, max } => {
                write!(f, "map dimensions {width}x{height} exceed {max} on a side")
            }
            Self::InvertedRoomWidth { min, max } => {
                write!(f, "minimum room width {min} exceeds maximum {max}")
            }
            Self::InvertedRoomHeight { min, max } => {
                write!(f, "minimum room height {min} exceeds maximum {max}")
            }
            Self::RatioOutOfRange(ratio) => {
                write!(f, "ratio threshold {ratio} is outside [0, 1]")
            }
            Self::NoSeparationPasses => write!(f, "max_separation_passes must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

impl GenerationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension { width: self.width, height: self.height });
        }
        let max = MAX_COORDINATE.unsigned_abs();
        if self.width > max || self.height > max {
            return Err(ConfigError::DimensionTooLarge {
                width: self.width,
                height: self.height,
                max,
            });
        }
        let size = self.room_size;
        if size.min_width > size.max_width {
            return Err(ConfigError::InvertedRoomWidth { min: size.min_width, max: size.max_width });
        }
        if size.min_height > size.max_height {
            return Err(ConfigError::InvertedRoomHeight {
                min: size.min_height,
                max: size.max_height,
            });
        }
        if !(0.0..=1.0).contains(&self.ratio_threshold) {
            return Err(ConfigError::RatioOutOfRange(self.ratio_threshold));
        }
        if self.max_separation_passes == 0 {
            return Err(ConfigError::NoSeparationPasses);
        }
        Ok(())
    }

    pub fn placement(&self) -> RoomPlacement {
        let origin = self.origin.unwrap_or_else(|| Pos::new(half(self.width), half(self.height)));
        RoomPlacement {
            count: self.candidate_rooms,
            min_len: self.min_room_len,
            max_len: self.max_room_len,
            origin,
            margin_width: self.margin_width,
            margin_height: self.margin_height,
        }
    }
}

fn half(len: u32) -> i32 {
    i32::try_from(len / 2).unwrap_or(i32::MAX)
}
