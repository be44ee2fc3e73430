//! Export center panel: lists exportable content from the live panel lists
//! plus a seeded catalog, and assembles the selection into a downloadable
//! report. Purely local; no generation calls are involved.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use validator::Validate;

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::core::time::{date_today, rfc3339_minutes_ago};
use crate::schemas::export::{ExportFormat, ExportRequest, ExportableItem};
use crate::schemas::CollectionResponse;
use crate::services::reports::FileDownload;
use crate::store::catalog;
use crate::store::UsageCounters;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", post(run_export)).route("/content", get(list_content))
}

async fn list_content(State(state): State<AppState>) -> Json<CollectionResponse<ExportableItem>> {
    Json(CollectionResponse::new(exportable_items(&state)))
}

async fn run_export(
    State(state): State<AppState>,
    Json(payload): Json<ExportRequest>,
) -> Result<FileDownload, ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let available = exportable_items(&state);
    let selected: Vec<&ExportableItem> = payload
        .item_ids
        .iter()
        .filter_map(|id| available.iter().find(|item| &item.id == id))
        .collect();

    if selected.is_empty() {
        return Err(ApiError::NotFound("No matching content for the selected items".to_string()));
    }

    let download = match payload.format {
        ExportFormat::Pdf => render_pdf_report(&selected),
        ExportFormat::Mindmap => render_mindmap(&selected),
        ExportFormat::Text => render_text(&selected),
    };

    UsageCounters::bump(&state.store().counters().exports_completed, 1);
    state.store().push_activity(
        "Content Exported".to_string(),
        format!("{} item(s) exported as {:?}", selected.len(), payload.format),
    );

    Ok(download)
}

/// Everything the picker offers: the seeded demo entries plus one entry per
/// live analysis, question batch, explanation and mapping.
fn exportable_items(state: &AppState) -> Vec<ExportableItem> {
    let mut items = seeded_catalog();

    for record in state.store().analyses().records() {
        items.push(ExportableItem {
            id: record.id.clone(),
            kind: "paper".to_string(),
            title: format!("{} Analysis Report", record.result.paper_name),
            generated_at: record.created_at.clone(),
            size: approximate_size(&record.result),
        });
    }

    // One exportable entry per generation batch, not per question.
    let mut batches: BTreeMap<String, (usize, String, String)> = BTreeMap::new();
    for record in state.store().questions().records() {
        let entry = batches.entry(record.batch_id.clone()).or_insert_with(|| {
            (
                0,
                format!(
                    "{} {}",
                    catalog::exam_display_name(&record.params.exam_type),
                    catalog::capitalize(&record.params.subject)
                ),
                record.created_at.clone(),
            )
        });
        entry.0 += 1;
    }
    for (batch_id, (count, label, created_at)) in batches {
        items.push(ExportableItem {
            id: batch_id,
            kind: "questions".to_string(),
            title: format!("{label} - {count} Questions"),
            generated_at: created_at,
            size: format!("{} KB", (count * 2).max(1)),
        });
    }

    for record in state.store().explanations().records() {
        items.push(ExportableItem {
            id: record.id.clone(),
            kind: "explanations".to_string(),
            title: format!("Explanations (3 Types): {}", truncate(&record.result.question, 40)),
            generated_at: record.created_at.clone(),
            size: approximate_size(&record.result),
        });
    }

    for record in state.store().mappings().records() {
        items.push(ExportableItem {
            id: record.id.clone(),
            kind: "mapping".to_string(),
            title: format!(
                "{} → {} Syllabus Map",
                record.result.school_curriculum, record.result.target_exam
            ),
            generated_at: record.created_at.clone(),
            size: approximate_size(&record.result),
        });
    }

    items
}

fn seeded_catalog() -> Vec<ExportableItem> {
    vec![
        ExportableItem {
            id: "seed-1".to_string(),
            kind: "questions".to_string(),
            title: "JEE Main Mathematics - 20 Questions".to_string(),
            generated_at: rfc3339_minutes_ago(120),
            size: "15 KB".to_string(),
        },
        ExportableItem {
            id: "seed-2".to_string(),
            kind: "paper".to_string(),
            title: "NEET Biology Analysis Report".to_string(),
            generated_at: rfc3339_minutes_ago(60 * 24),
            size: "45 KB".to_string(),
        },
        ExportableItem {
            id: "seed-3".to_string(),
            kind: "mapping".to_string(),
            title: "Class 11 CBSE → JEE Syllabus Map".to_string(),
            generated_at: rfc3339_minutes_ago(60 * 48),
            size: "12 KB".to_string(),
        },
        ExportableItem {
            id: "seed-4".to_string(),
            kind: "questions".to_string(),
            title: "SAT Math Practice Set - 50 Questions".to_string(),
            generated_at: rfc3339_minutes_ago(60 * 72),
            size: "28 KB".to_string(),
        },
        ExportableItem {
            id: "seed-5".to_string(),
            kind: "explanations".to_string(),
            title: "Calculus Explanations (3 Types)".to_string(),
            generated_at: rfc3339_minutes_ago(60 * 24 * 7),
            size: "22 KB".to_string(),
        },
    ]
}

fn render_pdf_report(items: &[&ExportableItem]) -> FileDownload {
    let mut content = String::new();
    content.push_str("ExamPrep AI - Export Report\n");
    content.push_str(&format!("Generated: {}\n\nEXPORTED CONTENT:\n", date_today()));
    for item in items {
        content.push_str(&format!(
            "\n• {}\n  Type: {}\n  Generated: {}\n  Size: {}\n",
            item.title, item.kind, item.generated_at, item.size
        ));
    }

    FileDownload::new(content, "export-report.pdf".to_string(), "application/pdf")
}

fn render_mindmap(items: &[&ExportableItem]) -> FileDownload {
    let mut content = String::new();
    content.push_str("ExamPrep AI - Mindmap Export\n");
    content.push_str(&format!("Generated: {}\n\nMINDMAP STRUCTURE:\n", date_today()));
    for item in items {
        content.push_str(&format!(
            "\n{}\n├── Type: {}\n├── Generated: {}\n└── Size: {}\n",
            item.title, item.kind, item.generated_at, item.size
        ));
    }

    FileDownload::new(content, "mindmap-export.html".to_string(), "text/html")
}

fn render_text(items: &[&ExportableItem]) -> FileDownload {
    let mut content = String::new();
    content.push_str("ExamPrep AI - Text Export\n");
    content.push_str(&format!("Generated: {}\n\nEXPORTED CONTENT:\n", date_today()));
    for item in items {
        content.push_str(&format!(
            "\n=== {} ===\nType: {}\nGenerated: {}\nSize: {}\n",
            item.title, item.kind, item.generated_at, item.size
        ));
    }

    FileDownload::new(content, "export-content.txt".to_string(), "text/plain")
}

fn approximate_size<T: serde::Serialize>(value: &T) -> String {
    let bytes = serde_json::to_string(value).map(|raw| raw.len()).unwrap_or(0);
    format!("{} KB", (bytes / 1024).max(1))
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        value.to_string()
    } else {
        let prefix: String = value.chars().take(max_chars).collect();
        format!("{prefix}…")
    }
}
