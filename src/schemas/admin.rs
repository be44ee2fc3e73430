use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::store::types::{AiModelInfo, ExamDataset, UserAccount};

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct DatasetCreate {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub(crate) name: String,
    #[validate(range(min = 1, message = "papers must be positive"))]
    pub(crate) papers: u32,
    #[validate(range(min = 1, message = "questions must be positive"))]
    pub(crate) questions: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct DatasetListResponse {
    pub(crate) items: Vec<ExamDataset>,
    pub(crate) total_count: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct UserListResponse {
    pub(crate) items: Vec<UserAccount>,
    pub(crate) total_count: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct ModelListResponse {
    pub(crate) items: Vec<AiModelInfo>,
    pub(crate) total_count: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct SystemStatusResponse {
    pub(crate) components: HashMap<String, String>,
}
