use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Downloader path and audio format are not empty
/// - Output template carries the title placeholder and stays inside the staging dir
/// - Comment language is a three letter code, album label is not empty
/// - Copy buffer is not zero sized
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let fetcher = &config.fetcher;
    if fetcher.ytdlp_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "fetcher.ytdlp_path cannot be empty".to_string(),
        ));
    }
    if fetcher.audio_format.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "fetcher.audio_format cannot be empty".to_string(),
        ));
    }
    if !fetcher.output_template.contains("%(title)s") {
        return Err(ConfigError::ValidationError(
            "fetcher.output_template must contain %(title)s".to_string(),
        ));
    }
    if fetcher.output_template.contains(['/', '\\']) {
        return Err(ConfigError::ValidationError(
            "fetcher.output_template cannot contain path separators".to_string(),
        ));
    }

    let tagger = &config.tagger;
    if tagger.comment_lang.len() != 3
        || !tagger.comment_lang.chars().all(|c| c.is_ascii_alphabetic())
    {
        return Err(ConfigError::ValidationError(format!(
            "tagger.comment_lang must be a three letter code, got {:?}",
            tagger.comment_lang
        )));
    }
    if tagger.album.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "tagger.album cannot be empty".to_string(),
        ));
    }

    if config.placer.buffer_size == 0 {
        return Err(ConfigError::ValidationError(
            "placer.buffer_size cannot be 0".to_string(),
        ));
    }

    Ok(())
}
