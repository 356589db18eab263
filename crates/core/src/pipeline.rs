//! One-call batch generation: every stage from scattering rooms to routing corridors.

use std::error::Error;
use std::fmt;

use crate::config::{ConfigError, GenerationConfig};
use crate::graph::TriangulationError;
use crate::map::MapInfo;

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    Config(ConfigError),
    /// The map refused the configured dimensions.
    NotInitialised,
    SeparationDidNotConverge { passes: usize },
    Triangulation(TriangulationError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid generation config: {e}"),
            Self::NotInitialised => write!(f, "map was not initialised"),
            Self::SeparationDidNotConverge { passes } => {
                write!(f, "rooms still overlap after {passes} separation passes")
            }
            Self::Triangulation(e) => write!(f, "room triangulation failed: {e}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Triangulation(e) => Some(e),
            Self::NotInitialised | Self::SeparationDidNotConverge { .. } => None,
        }
    }
}

impl From<ConfigError> for PipelineError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error)
    }
}

impl From<TriangulationError> for PipelineError {
    fn from(error: TriangulationError) -> Self {
        Self::Triangulation(error)
    }
}

/// Room and corridor counts after each stage of one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub seed: u64,
    pub placed_rooms: usize,
    pub after_ratio: usize,
    pub separation_passes: usize,
    pub after_filters: usize,
    pub corridor_features: usize,
    pub after_corridor_features: usize,
    pub after_reduction: usize,
    pub triangulation_edges: usize,
    pub spanning_corridors: usize,
    pub random_corridors: usize,
    pub corridors: usize,
    pub linked_features: usize,
    pub fingerprint: u64,
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "seed={}", self.seed)?;
        writeln!(f, "After placement #rooms={}", self.placed_rooms)?;
        writeln!(f, "After ratio reduction #rooms={}", self.after_ratio)?;
        writeln!(f, "After separation #passes={}", self.separation_passes)?;
        writeln!(f, "After filtering #rooms={}", self.after_filters)?;
        writeln!(
            f,
            "After separating corridor features #rooms={} #corridorFeatures={}",
            self.after_corridor_features, self.corridor_features
        )?;
        writeln!(f, "After room reduction #rooms={}", self.after_reduction)?;
        writeln!(f, "After triangulation #totalEdges={}", self.triangulation_edges)?;
        writeln!(f, "After Kruskal #minEdges={}", self.spanning_corridors)?;
        writeln!(f, "After random insertion #extraEdges={}", self.random_corridors)?;
        writeln!(
            f,
            "After corridor routing #corridors={} #linkedFeatures={}",
            self.corridors, self.linked_features
        )?;
        write!(f, "fingerprint={:016x}", self.fingerprint)
    }
}

pub struct GeneratedMap {
    pub map: MapInfo,
    pub report: GenerationReport,
}

/// Runs the full generation pipeline for a validated [`GenerationConfig`].
#[derive(Clone, Debug)]
pub struct MapBuilder {
    config: GenerationConfig,
}

impl MapBuilder {
    pub fn new(config: GenerationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generates one map. The same seed always produces the same map.
    pub fn generate(&self, seed: u64) -> Result<GeneratedMap, PipelineError> {
        let config = &self.config;
        let mut map = MapInfo::new();
        map.init(config.width, config.height);
        if !map.is_initialised() {
            return Err(PipelineError::NotInitialised);
        }
        map.set_seed(seed);
        map.set_room_size_limits(config.room_size);
        map.set_generation_limits(config.limits);

        let mut report = GenerationReport { seed, ..GenerationReport::default() };

        map.make_rooms(&config.placement());
        report.placed_rooms = map.room_count();

        map.remove_rooms_below_ratio(config.ratio_threshold);
        report.after_ratio = map.room_count();

        report.separation_passes = separate_until_settled(&mut map, config.max_separation_passes)?;

        if !config.filters.is_empty() {
            for filter in &config.filters {
                map.filter_rooms(filter);
            }
            map.remove_filtered();
        }
        report.after_filters = map.room_count();

        report.corridor_features = map.separate_corridor_features().len();
        report.after_corridor_features = map.room_count();

        map.reduce_rooms();
        report.after_reduction = map.room_count();

        let mut graph = map.perform_delaunay_triangulation()?;
        report.triangulation_edges = graph.remaining_edges();

        let mut pairs = map.calc_min_span(&mut graph);
        report.spanning_corridors = pairs.len();
        report.random_corridors = map.add_configured_random_edges(&mut graph, &mut pairs);

        report.corridors = map.generate_corridors(&graph, &pairs).len();
        report.linked_features = map.link_corridor_features();
        report.fingerprint = map.fingerprint();

        Ok(GeneratedMap { map, report })
    }
}

/// Repeats separation passes until one moves nothing. Returns the number of passes run.
fn separate_until_settled(map: &mut MapInfo, max_passes: usize) -> Result<usize, PipelineError> {
    for pass in 1..=max_passes {
        if map.separate_rooms() {
            return Ok(pass);
        }
    }
    Err(PipelineError::SeparationDidNotConverge { passes: max_passes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Pos, Rect};
    use crate::map::{FilterShape, RoomFilter};

    fn small_config() -> GenerationConfig {
        GenerationConfig { candidate_rooms: 40, ..GenerationConfig::default() }
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let config = GenerationConfig { height: 0, ..GenerationConfig::default() };
        assert_eq!(
            MapBuilder::new(config).err(),
            Some(ConfigError::ZeroDimension { width: 800, height: 0 })
        );
    }

    #[test]
    fn generated_rooms_are_disjoint_and_capped() {
        let builder = MapBuilder::new(small_config()).expect("valid config");
        let generated = builder.generate(2024).expect("generation succeeds");
        let rooms: Vec<Rect> = generated.map.rooms().values().map(|room| room.bounds).collect();

        assert!(rooms.len() <= builder.config().limits.max_rooms);
        for (i, a) in rooms.iter().enumerate() {
            for b in &rooms[i + 1..] {
                assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
            }
        }
        let report = generated.report;
        assert_eq!(report.after_reduction, rooms.len());
        assert_eq!(generated.map.min_connected_corridors(), report.spanning_corridors);
        assert_eq!(report.corridors, report.spanning_corridors + report.random_corridors);
        assert_eq!(report.fingerprint, generated.map.fingerprint());
    }

    #[test]
    fn spanning_corridors_connect_every_room() {
        let builder = MapBuilder::new(small_config()).expect("valid config");
        let generated = builder.generate(7).expect("generation succeeds");
        let rooms = generated.map.room_count();
        if rooms >= 3 {
            assert_eq!(generated.report.spanning_corridors, rooms - 1);
        }
        for room in generated.map.rooms().values() {
            if rooms > 1 {
                assert!(!room.corridors.is_empty());
            }
        }
    }

    #[test]
    fn exclusion_everywhere_empties_the_map() {
        let config = GenerationConfig {
            filters: vec![RoomFilter::exclude(FilterShape::Circle {
                center: Pos::new(400, 400),
                radius: 1000,
            })],
            ..small_config()
        };
        let generated = MapBuilder::new(config).expect("valid config").generate(3).expect("runs");
        assert_eq!(generated.report.after_filters, 0);
        assert_eq!(generated.map.room_count(), 0);
        assert!(generated.map.corridors().is_empty());
    }

    #[test]
    fn tight_pass_cap_reports_non_convergence() {
        let config = GenerationConfig { max_separation_passes: 1, ..GenerationConfig::default() };
        let result = MapBuilder::new(config).expect("valid config").generate(11);
        assert_eq!(result.err(), Some(PipelineError::SeparationDidNotConverge { passes: 1 }));
    }

    #[test]
    fn report_lists_every_stage() {
        let generated = MapBuilder::new(small_config())
            .expect("valid config")
            .generate(5)
            .expect("generation succeeds");
        let text = generated.report.to_string();
        assert!(text.starts_with("seed=5"));
        assert!(text.contains("After Kruskal #minEdges="));
        assert!(text.contains("fingerprint="));
    }
}
