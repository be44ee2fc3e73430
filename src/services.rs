pub(crate) mod ai_engine;
pub(crate) mod batch;
pub(crate) mod reports;
pub(crate) mod text_extract;
