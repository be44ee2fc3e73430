use std::path::Path;

use crate::api::errors::ApiError;
use crate::core::config::Settings;
use crate::store::catalog;

pub(crate) fn validate_exam_type(value: &str) -> Result<(), ApiError> {
    if catalog::is_known(catalog::EXAM_TYPES, value) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("Unknown exam type '{value}'")))
    }
}

pub(crate) fn validate_target_exam(value: &str) -> Result<(), ApiError> {
    if catalog::is_known(catalog::TARGET_EXAMS, value) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("Unknown target exam '{value}'")))
    }
}

pub(crate) fn validate_subject(value: &str) -> Result<(), ApiError> {
    if catalog::is_known(catalog::SUBJECTS, value) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("Unknown subject '{value}'")))
    }
}

pub(crate) fn validate_board(value: &str) -> Result<(), ApiError> {
    if catalog::is_known(catalog::BOARDS, value) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("Unknown board '{value}'")))
    }
}

pub(crate) fn validate_class_level(value: &str) -> Result<(), ApiError> {
    if catalog::is_known(catalog::CLASS_LEVELS, value) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("Unknown class level '{value}'")))
    }
}

pub(crate) fn validate_question_type(value: &str) -> Result<(), ApiError> {
    if catalog::is_known(catalog::QUESTION_TYPES, value) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("Unknown question type '{value}'")))
    }
}

pub(crate) fn validate_year(value: &str) -> Result<(), ApiError> {
    let valid = value.len() == 4 && value.chars().all(|c| c.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(ApiError::BadRequest("Year must be a four-digit value".to_string()))
    }
}

pub(crate) fn validate_paper_filename(
    filename: &str,
    settings: &Settings,
) -> Result<(), ApiError> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .ok_or_else(|| ApiError::BadRequest("File must have an extension".to_string()))?;

    let allowed = &settings.upload().allowed_paper_extensions;
    if allowed.iter().any(|entry| entry == &extension) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("File extension '{extension}' is not allowed")))
    }
}

pub(crate) fn validate_paper_size(
    filename: &str,
    byte_len: usize,
    settings: &Settings,
) -> Result<(), ApiError> {
    if byte_len == 0 {
        return Err(ApiError::BadRequest(format!("File '{filename}' is empty")));
    }

    let limit = settings.upload().max_upload_size_mb as usize * 1024 * 1024;
    if byte_len > limit {
        return Err(ApiError::BadRequest(format!(
            "File '{filename}' exceeds the {} MB upload limit",
            settings.upload().max_upload_size_mb
        )));
    }

    Ok(())
}
