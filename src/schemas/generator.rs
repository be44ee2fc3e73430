use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct GenerateBatchRequest {
    #[serde(alias = "classLevel")]
    #[validate(length(min = 1, message = "class_level must not be empty"))]
    pub(crate) class_level: String,
    #[serde(default)]
    pub(crate) board: Option<String>,
    #[validate(length(min = 1, message = "subject must not be empty"))]
    pub(crate) subject: String,
    #[serde(alias = "targetExam")]
    #[validate(length(min = 1, message = "target_exam must not be empty"))]
    pub(crate) target_exam: String,
    #[serde(default = "default_question_type")]
    #[serde(alias = "questionType")]
    pub(crate) question_type: String,
    #[serde(default)]
    pub(crate) topic: Option<String>,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, message = "quantity must be positive"))]
    pub(crate) quantity: u32,
    #[serde(default = "default_difficulty_percent")]
    #[serde(alias = "difficultyPercent")]
    #[validate(range(max = 100, message = "difficulty_percent must be at most 100"))]
    pub(crate) difficulty_percent: u32,
    #[serde(default = "default_time_limit")]
    #[serde(alias = "timeLimit")]
    #[validate(range(min = 1, message = "time_limit_minutes must be positive"))]
    pub(crate) time_limit_minutes: u32,
}

fn default_question_type() -> String {
    "mcq".to_string()
}

fn default_quantity() -> u32 {
    10
}

fn default_difficulty_percent() -> u32 {
    50
}

fn default_time_limit() -> u32 {
    30
}
