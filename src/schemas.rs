use std::collections::HashMap;

use serde::Serialize;

pub(crate) mod admin;
pub(crate) mod analytics;
pub(crate) mod analyzer;
pub(crate) mod explanations;
pub(crate) mod export;
pub(crate) mod generator;
pub(crate) mod mapper;

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) service: String,
    pub(crate) status: String,
    pub(crate) components: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RootResponse {
    pub(crate) message: String,
    pub(crate) version: String,
    pub(crate) docs_url: String,
}

/// Envelope for a panel's full record list.
#[derive(Debug, Serialize)]
pub(crate) struct CollectionResponse<T> {
    pub(crate) items: Vec<T>,
    pub(crate) total_count: usize,
}

impl<T> CollectionResponse<T> {
    pub(crate) fn new(items: Vec<T>) -> Self {
        let total_count = items.len();
        Self { items, total_count }
    }
}

/// Returned when a batch has been accepted and spawned.
#[derive(Debug, Serialize)]
pub(crate) struct BatchAccepted {
    pub(crate) batch_id: String,
    pub(crate) panel: &'static str,
    pub(crate) total_items: u32,
}
