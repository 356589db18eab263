//! Dungeon map generation on a [`MapInfo`]: placement, separation, reduction,
//! connectivity, and corridor routing.

pub mod filter;
pub mod info;
pub mod model;

mod connectivity;
mod corridors;
mod placement;
mod reduction;
mod seed;

pub use connectivity::RoomGraph;
pub use filter::{FilterShape, RoomFilter};
pub use info::{GenerationLimits, MapInfo, RoomSizeLimits};
pub use model::{CornerAngles, Corridor, CorridorFeature, CorridorId, FeatureId, Room, RoomId};
pub use placement::RoomPlacement;
