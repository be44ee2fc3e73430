use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct ExplainRequest {
    #[validate(length(min = 1, message = "question must not be empty"))]
    pub(crate) question: String,
    #[serde(default = "default_class_level")]
    #[serde(alias = "classLevel")]
    pub(crate) class_level: String,
    #[serde(default = "default_target_exam")]
    #[serde(alias = "targetExam")]
    pub(crate) target_exam: String,
}

fn default_class_level() -> String {
    "11".to_string()
}

fn default_target_exam() -> String {
    "jee-main".to_string()
}
