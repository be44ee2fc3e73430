use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ExportFormat {
    Pdf,
    Mindmap,
    Text,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct ExportRequest {
    pub(crate) format: ExportFormat,
    #[serde(alias = "itemIds")]
    #[validate(length(min = 1, message = "at least one item must be selected"))]
    pub(crate) item_ids: Vec<String>,
}

/// One entry in the export center's content picker.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ExportableItem {
    pub(crate) id: String,
    pub(crate) kind: String,
    pub(crate) title: String,
    pub(crate) generated_at: String,
    pub(crate) size: String,
}
