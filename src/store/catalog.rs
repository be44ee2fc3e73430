use crate::store::types::DifficultyLevel;

pub(crate) const EXAM_TYPES: &[&str] =
    &["jee-main", "jee-advanced", "neet", "sat", "lsat", "cbse"];

pub(crate) const TARGET_EXAMS: &[&str] = &["jee-main", "jee-advanced", "neet", "sat", "boards"];

pub(crate) const SUBJECTS: &[&str] = &["mathematics", "physics", "chemistry", "biology", "english"];

pub(crate) const BOARDS: &[&str] = &["cbse", "icse", "state", "ib"];

pub(crate) const CLASS_LEVELS: &[&str] = &["6", "7", "8", "9", "10", "11", "12"];

pub(crate) const QUESTION_TYPES: &[&str] = &["mcq", "numerical", "subjective", "mixed"];

pub(crate) fn is_known(catalog: &[&str], value: &str) -> bool {
    catalog.iter().any(|entry| entry.eq_ignore_ascii_case(value))
}

pub(crate) fn exam_display_name(slug: &str) -> String {
    match slug.to_ascii_lowercase().as_str() {
        "jee-main" => "JEE Main".to_string(),
        "jee-advanced" => "JEE Advanced".to_string(),
        "neet" => "NEET".to_string(),
        "sat" => "SAT".to_string(),
        "lsat" => "LSAT".to_string(),
        "cbse" => "CBSE Board".to_string(),
        "boards" => "Board Exams".to_string(),
        other => capitalize(other),
    }
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub(crate) fn marking_scheme(exam_type: &str) -> &'static str {
    if exam_type.eq_ignore_ascii_case("jee-main") {
        "+4 for correct, -1 for incorrect"
    } else {
        "+3 for correct, -1 for incorrect"
    }
}

pub(crate) fn default_question_count(exam_type: &str) -> u32 {
    if exam_type.eq_ignore_ascii_case("jee-main") {
        90
    } else {
        54
    }
}

pub(crate) fn difficulty_from_percent(percent: u32) -> DifficultyLevel {
    match percent {
        0..=33 => DifficultyLevel::Easy,
        34..=66 => DifficultyLevel::Medium,
        _ => DifficultyLevel::Hard,
    }
}
