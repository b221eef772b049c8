use serde::{Deserialize, Serialize};

use crate::fetcher::FetcherConfig;
use crate::pipeline::PipelineConfig;
use crate::placer::PlacerConfig;
use crate::tagger::TaggerConfig;

/// Root configuration
///
/// Every section is optional; a missing section falls back to its defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub tagger: TaggerConfig,
    #[serde(default)]
    pub placer: PlacerConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}
