use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct MapSyllabusRequest {
    #[serde(alias = "classLevel")]
    #[validate(length(min = 1, message = "class_level must not be empty"))]
    pub(crate) class_level: String,
    #[validate(length(min = 1, message = "board must not be empty"))]
    pub(crate) board: String,
    #[validate(length(min = 1, message = "subject must not be empty"))]
    pub(crate) subject: String,
    #[serde(alias = "targetExam")]
    #[validate(length(min = 1, message = "target_exam must not be empty"))]
    pub(crate) target_exam: String,
}
