use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub(crate) struct PaperUpload {
    #[validate(length(min = 1, message = "filename must not be empty"))]
    pub(crate) filename: String,
    #[serde(alias = "contentBase64")]
    #[validate(length(min = 1, message = "file content must not be empty"))]
    pub(crate) content_base64: String,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct AnalyzeBatchRequest {
    #[serde(alias = "examType")]
    #[validate(length(min = 1, message = "exam_type must not be empty"))]
    pub(crate) exam_type: String,
    #[validate(length(min = 1, message = "year must not be empty"))]
    pub(crate) year: String,
    #[validate(length(min = 1, message = "subject must not be empty"))]
    pub(crate) subject: String,
    #[validate(length(min = 1, message = "at least one paper file is required"), nested)]
    pub(crate) files: Vec<PaperUpload>,
}
