use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use mapbuilder::GenerationConfig;

/// Reads a TOML generation config, or the defaults when no path is given. Keys left out
/// of the file keep their default values.
pub fn load_config(path: Option<&Path>) -> Result<GenerationConfig> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str::<GenerationConfig>(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        }
        None => GenerationConfig::default(),
    };
    config.validate().context("Config failed validation")?;
    Ok(config)
}

pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&GenerationConfig::default())
        .context("Failed to serialise default config")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use mapbuilder::map::{FilterShape, RoomFilter};
    use mapbuilder::{ConfigError, Pos};
    use tempfile::NamedTempFile;

    use super::*;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn missing_path_yields_defaults() {
        let config = load_config(None).expect("defaults load");
        assert_eq!(config, GenerationConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let file = write_config(
            r#"
width = 400
candidate_rooms = 50

[limits]
max_rooms = 12
max_random_corridors = 2

[[filters]]
shape = "circle"
center = { x = 200, y = 200 }
radius = 150
"#,
        );

        let config = load_config(Some(file.path())).expect("config loads");

        assert_eq!(config.width, 400);
        assert_eq!(config.height, 800);
        assert_eq!(config.candidate_rooms, 50);
        assert_eq!(config.limits.max_rooms, 12);
        assert_eq!(
            config.filters,
            vec![RoomFilter::include(FilterShape::Circle { center: Pos::new(200, 200), radius: 150 })]
        );
    }

    #[test]
    fn invalid_values_fail_validation() {
        let file = write_config("ratio_threshold = 2.0\n");
        let error = load_config(Some(file.path())).expect_err("ratio above one is rejected");
        assert_eq!(
            error.downcast_ref::<ConfigError>(),
            Some(&ConfigError::RatioOutOfRange(2.0))
        );
    }

    #[test]
    fn unreadable_path_names_the_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("absent.toml");
        let error = load_config(Some(&missing)).expect_err("missing file is an error");
        assert!(error.to_string().contains("absent.toml"));
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let text = default_config_toml().expect("serialises");
        let parsed: GenerationConfig = toml::from_str(&text).expect("parses back");
        assert_eq!(parsed, GenerationConfig::default());
    }
}
