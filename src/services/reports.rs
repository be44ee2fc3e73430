//! Plain-text report assembly and the "save as file" response helper used
//! by the analyzer, generator, mapper and export panels.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::store::catalog;
use crate::store::types::{AnalysisRecord, ItemStatus, MappingRecord, QuestionRecord};

/// A downloadable text resource: content, suggested filename and MIME type.
#[derive(Debug, Clone)]
pub(crate) struct FileDownload {
    pub(crate) content: String,
    pub(crate) filename: String,
    pub(crate) mime: &'static str,
}

impl FileDownload {
    pub(crate) fn new(content: String, filename: String, mime: &'static str) -> Self {
        Self { content, filename, mime }
    }

    pub(crate) fn byte_len(&self) -> usize {
        self.content.len()
    }
}

impl IntoResponse for FileDownload {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.filename);
        let mut response = (StatusCode::OK, self.content).into_response();
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(self.mime));
        response.headers_mut().insert(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_str(&disposition)
                .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
        );
        response
    }
}

/// Lowercase filename slug: anything outside [a-z0-9] collapses to a dash.
pub(crate) fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut last_dash = true;
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}

pub(crate) fn option_letter(index: usize) -> char {
    (b'A' + (index as u8 % 26)) as char
}

pub(crate) fn analysis_report(record: &AnalysisRecord, generated_at: &str) -> FileDownload {
    let analysis = &record.result;
    let mut content = String::new();
    content.push_str("ExamPrep AI - Paper Analysis Report\n");
    content.push_str(&format!("Generated: {generated_at}\n\n"));
    content.push_str("PAPER DETAILS:\n");
    content.push_str(&format!("Name: {}\n", analysis.paper_name));
    content.push_str(&format!("Questions: {}\n", analysis.total_questions));
    content.push_str(&format!(
        "Status: {}\n\n",
        match record.status {
            ItemStatus::Completed => "completed",
            ItemStatus::Failed => "fallback",
            ItemStatus::Pending => "pending",
        }
    ));

    content.push_str("TOPIC DISTRIBUTION:\n");
    for topic in &analysis.topics {
        content.push_str(&format!(
            "• {} — {} questions ({}%)\n",
            topic.name, topic.count, topic.percentage
        ));
    }

    content.push_str("\nDIFFICULTY DISTRIBUTION:\n");
    content.push_str(&format!(
        "Easy: {}% | Medium: {}% | Hard: {}%\n",
        analysis.difficulty.easy, analysis.difficulty.medium, analysis.difficulty.hard
    ));
    content.push_str(&format!("\nMarking scheme: {}\n", analysis.marking_scheme));

    if !analysis.insights.is_empty() {
        content.push_str("\nINSIGHTS:\n");
        for insight in &analysis.insights {
            content.push_str(&format!("• {insight}\n"));
        }
    }

    let filename = format!("analysis-{}.txt", slugify(&analysis.paper_name));
    FileDownload::new(content, filename, "text/plain")
}

pub(crate) fn question_paper(records: &[QuestionRecord], generated_at: &str) -> FileDownload {
    let mut content = String::new();
    content.push_str("ExamPrep AI - Generated Questions\n");

    if let Some(first) = records.first() {
        let params = &first.params;
        content.push_str(&format!(
            "Class: {} | Board: {} | Subject: {}\n",
            params.class_level,
            params.board.as_deref().unwrap_or("-"),
            catalog::capitalize(&params.subject)
        ));
        content.push_str(&format!(
            "Target Exam: {} | Generated: {generated_at}\n",
            catalog::exam_display_name(&params.exam_type)
        ));
    }

    for (index, record) in records.iter().enumerate() {
        let question = &record.result;
        content.push_str(&format!("\nQuestion {}: {}\n", index + 1, question.question));
        content.push_str(&format!(
            "Topic: {} | Difficulty: {:?}\n\nOptions:\n",
            question.topic, question.difficulty
        ));
        for (option_index, option) in question.options.iter().enumerate() {
            content.push_str(&format!("{}. {}\n", option_letter(option_index), option));
        }
        if let Some(correct) = question.options.get(question.correct) {
            content.push_str(&format!(
                "\nCorrect Answer: {}. {}\n",
                option_letter(question.correct),
                correct
            ));
        }
        content.push_str("\n---\n");
    }

    let filename = match records.first() {
        Some(first) => format!(
            "questions-{}-{}.txt",
            slugify(&first.params.subject),
            slugify(&first.params.class_level)
        ),
        None => "questions.txt".to_string(),
    };
    FileDownload::new(content, filename, "text/plain")
}

pub(crate) fn mapping_report(record: &MappingRecord, generated_at: &str) -> FileDownload {
    let mapping = &record.result;
    let mut content = String::new();
    content.push_str("Syllabus Mapping Report\n");
    content.push_str(&format!("Generated: {generated_at}\n\n"));
    content.push_str(&format!("School Curriculum: {}\n", mapping.school_curriculum));
    content.push_str(&format!("Target Exam: {}\n", mapping.target_exam));
    content.push_str(&format!("Overall Overlap: {}%\n", mapping.insights.overlap_percentage));

    content.push_str("\nOVERLAPPING TOPICS:\n");
    for topic in &mapping.insights.overlapping_topics {
        content.push_str(&format!(
            "• {} → {}\n  Overlap: {}% | Status: {:?}\n",
            topic.school_topic, topic.exam_topic, topic.overlap, topic.status
        ));
    }

    content.push_str("\nKNOWLEDGE GAPS:\n");
    for gap in &mapping.insights.gaps {
        content.push_str(&format!(
            "• {}\n  Importance: {} | Exam Weightage: {}\n",
            gap.topic, gap.importance, gap.exam_weightage
        ));
    }

    content.push_str("\nRECOMMENDATIONS:\n");
    for (index, recommendation) in mapping.insights.recommendations.iter().enumerate() {
        content.push_str(&format!("{}. {recommendation}\n", index + 1));
    }

    let filename = format!("syllabus-mapping-{}.txt", slugify(&record.params.subject));
    FileDownload::new(content, filename, "text/plain")
}
