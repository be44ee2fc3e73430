use std::sync::Arc;

use crate::core::config::Settings;
use crate::services::ai_engine::GenerationBackend;
use crate::services::text_extract::TextExtractor;
use crate::store::Store;

#[derive(Clone)]
pub(crate) struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    settings: Settings,
    store: Store,
    generation: Arc<dyn GenerationBackend>,
    extractor: Arc<dyn TextExtractor>,
}

impl AppState {
    pub(crate) fn new(
        settings: Settings,
        store: Store,
        generation: Arc<dyn GenerationBackend>,
        extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        Self { inner: Arc::new(InnerState { settings, store, generation, extractor }) }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub(crate) fn store(&self) -> &Store {
        &self.inner.store
    }

    pub(crate) fn generation(&self) -> &Arc<dyn GenerationBackend> {
        &self.inner.generation
    }

    pub(crate) fn extractor(&self) -> &Arc<dyn TextExtractor> {
        &self.inner.extractor
    }
}
