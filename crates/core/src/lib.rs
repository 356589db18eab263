pub mod config;
pub mod geometry;
pub mod graph;
pub mod map;
pub mod pipeline;

pub use config::{ConfigError, GenerationConfig};
pub use geometry::{Point, Pos, Rect};
pub use graph::{EdgePair, Triangulation, TriangulationError};
pub use map::{MapInfo, RoomGraph};
pub use pipeline::{GeneratedMap, GenerationReport, MapBuilder, PipelineError};
