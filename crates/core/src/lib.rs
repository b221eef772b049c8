pub mod config;
pub mod fetcher;
pub mod header;
pub mod pipeline;
pub mod placer;
pub mod sanitize;
pub mod staging;
pub mod tagger;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, ENV_PREFIX,
};
pub use fetcher::{FetchError, Fetcher, YtDlpFetcher};
pub use header::{normalize, HeaderError, HeaderOutcome};
pub use pipeline::{
    Pipeline, PipelineError, PipelineProgress, PipelineRequest, PipelineState, PublishedArtifact,
};
pub use placer::{FsPlacer, OutputGuard, PlacerError};
pub use sanitize::sanitize;
pub use staging::{StagingArea, StagingError};
pub use tagger::{Id3Tagger, TagError, Tagger};
