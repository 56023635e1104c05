use std::sync::Arc;

use crate::config::Config;
use crate::ocr::OcrProvider;
use crate::source::RemoteFetcher;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ocr: OcrProvider,
    pub fetcher: RemoteFetcher,
}

impl AppState {
    pub fn new(config: Config, ocr: OcrProvider, fetcher: RemoteFetcher) -> Self {
        Self {
            config: Arc::new(config),
            ocr,
            fetcher,
        }
    }
}
