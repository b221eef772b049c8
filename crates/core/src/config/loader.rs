use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment variable prefix for overrides, e.g. `YT2MP3_FETCHER__YTDLP_PATH`.
pub const ENV_PREFIX: &str = "YT2MP3_";

/// Load configuration: defaults, then an optional TOML file, then environment overrides.
///
/// A file that was explicitly requested but does not exist is an error.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        figment = figment.merge(Toml::file(path));
    }

    let config: Config = figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ArtifactSelection;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_empty_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.fetcher.ytdlp_path, PathBuf::from("yt-dlp"));
        assert_eq!(config.tagger.album, "YouTube");
        assert!(config.placer.overwrite);
        assert_eq!(config.pipeline.artifact_selection, ArtifactSelection::Strict);
    }

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[fetcher]
ytdlp_path = "/opt/bin/yt-dlp"
audio_quality = "2"

[pipeline]
artifact_selection = "first"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.fetcher.ytdlp_path, PathBuf::from("/opt/bin/yt-dlp"));
        assert_eq!(config.fetcher.audio_quality, "2");
        assert_eq!(config.fetcher.audio_format, "mp3");
        assert_eq!(config.pipeline.artifact_selection, ArtifactSelection::First);
    }

    #[test]
    fn test_load_config_from_str_bad_type() {
        let toml = r#"
[placer]
overwrite = "sometimes"
"#;
        let result = load_config_from_str(toml);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Some(Path::new("/nonexistent/yt2mp3.toml")));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_without_file() {
        let config = load_config(None).unwrap();
        assert_eq!(config.tagger.comment_lang, "eng");
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[tagger]
album = "Archive"

[placer]
overwrite = false
"#
        )
        .unwrap();

        let config = load_config(Some(temp_file.path())).unwrap();
        assert_eq!(config.tagger.album, "Archive");
        assert!(!config.placer.overwrite);
        assert_eq!(config.tagger.comment_description, "YouTube URL");
    }
}
