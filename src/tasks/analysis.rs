//! Background driver for one paper-analysis batch: per file, extract the
//! text and ask the generation backend for a structured analysis, then
//! merge the aggregated records into the analyzer panel's list.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::core::state::AppState;
use crate::core::time::rfc3339_now;
use crate::services::ai_engine::GenerationBackend;
use crate::services::batch::{self, BatchProgress, ItemOutcome};
use crate::services::text_extract::TextExtractor;
use crate::store::catalog;
use crate::store::types::{
    AnalysisParams, AnalysisRecord, BatchState, DifficultySplit, PaperAnalysis, SourceInput,
    TopicShare,
};
use crate::store::UsageCounters;

pub(crate) const PANEL: &str = "analyzer";

#[derive(Debug, Clone)]
pub(crate) struct PaperWorkItem {
    pub(crate) filename: String,
    pub(crate) bytes: Vec<u8>,
}

pub(crate) async fn run_analysis_batch(
    state: AppState,
    progress: Arc<BatchProgress>,
    params: AnalysisParams,
    files: Vec<PaperWorkItem>,
) {
    let timer = Instant::now();

    let outcomes = batch::process_items(
        files.len(),
        &progress,
        |index| analyze_paper(&state, &params, &files[index]),
        |index| fallback_analysis(&params, &files[index]),
    )
    .await;

    let records = build_records(progress.id(), &params, &files, outcomes);
    let merged = state.store().analyses().merge_batch(progress.id(), records);

    match merged {
        Ok(()) => {
            UsageCounters::bump(&state.store().counters().papers_analyzed, files.len() as u64);
            state.store().push_activity(
                format!(
                    "{} {} {} Paper Analyzed",
                    catalog::exam_display_name(&params.exam_type),
                    params.year,
                    catalog::capitalize(&params.subject)
                ),
                format!("{} file(s) processed", files.len()),
            );
            progress.finish(BatchState::Completed);
            metrics::histogram!("batch_duration_seconds", "panel" => PANEL)
                .record(timer.elapsed().as_secs_f64());
            tracing::info!(
                batch_id = %progress.id(),
                files = files.len(),
                "Paper analysis batch completed"
            );
        }
        Err(err) => {
            progress.finish(BatchState::Failed);
            tracing::error!(
                batch_id = %progress.id(),
                error = %err,
                "Failed to merge paper analysis batch"
            );
        }
    }

    state.store().analyses().finish_batch(progress.id());
}

async fn analyze_paper(
    state: &AppState,
    params: &AnalysisParams,
    file: &PaperWorkItem,
) -> Result<PaperAnalysis> {
    let text = state
        .extractor()
        .extract_text(&file.filename, &file.bytes)
        .await
        .context("Failed to extract text from paper")?;

    let prompt = analysis_prompt(params, &file.filename, &text);
    let value = state.generation().generate_structured(&prompt, &analysis_schema()).await?;
    let mut analysis: PaperAnalysis = serde_json::from_value(value)
        .context("Analysis payload did not match the expected shape")?;

    if analysis.paper_name.trim().is_empty() {
        analysis.paper_name = default_paper_name(params);
    }
    if analysis.marking_scheme.trim().is_empty() {
        analysis.marking_scheme = catalog::marking_scheme(&params.exam_type).to_string();
    }

    Ok(analysis)
}

fn fallback_analysis(params: &AnalysisParams, file: &PaperWorkItem) -> PaperAnalysis {
    let total_questions = catalog::default_question_count(&params.exam_type);
    PaperAnalysis {
        paper_name: default_paper_name(params),
        total_questions,
        topics: vec![TopicShare {
            name: "General".to_string(),
            count: total_questions,
            percentage: 100,
        }],
        difficulty: DifficultySplit { easy: 33, medium: 34, hard: 33 },
        marking_scheme: catalog::marking_scheme(&params.exam_type).to_string(),
        insights: vec![
            format!("Automatic analysis was unavailable for {}", file.filename),
            "Placeholder distribution shown; re-run the analysis to replace it".to_string(),
        ],
    }
}

fn default_paper_name(params: &AnalysisParams) -> String {
    format!(
        "{} {} - {}",
        params.exam_type.to_uppercase(),
        params.year,
        catalog::capitalize(&params.subject)
    )
}

fn build_records(
    batch_id: &str,
    params: &AnalysisParams,
    files: &[PaperWorkItem],
    outcomes: Vec<ItemOutcome<PaperAnalysis>>,
) -> Vec<AnalysisRecord> {
    files
        .iter()
        .zip(outcomes)
        .map(|(file, outcome)| {
            let (result, status, failure_reason) = outcome.into_parts();
            AnalysisRecord {
                id: Uuid::new_v4().to_string(),
                batch_id: batch_id.to_string(),
                source: SourceInput::File { filename: file.filename.clone() },
                params: params.clone(),
                status,
                result,
                failure_reason,
                created_at: rfc3339_now(),
            }
        })
        .collect()
}

fn analysis_prompt(params: &AnalysisParams, filename: &str, text: &str) -> String {
    format!(
        "Analyze this past exam paper for {exam} ({year}), subject {subject}. \
The paper was uploaded as '{filename}'. Identify the topic distribution with question \
counts and percentages, the difficulty split (easy/medium/hard percentages summing to \
100), the marking scheme, and 3-5 short insights useful for exam preparation.\n\n\
Paper text:\n{text}",
        exam = catalog::exam_display_name(&params.exam_type),
        year = params.year,
        subject = catalog::capitalize(&params.subject),
    )
}

fn analysis_schema() -> Value {
    json!({
        "title": "paper_analysis",
        "type": "object",
        "required": ["paper_name", "total_questions", "topics", "difficulty"],
        "properties": {
            "paper_name": {"type": "string"},
            "total_questions": {"type": "integer"},
            "topics": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["name", "count", "percentage"],
                    "properties": {
                        "name": {"type": "string"},
                        "count": {"type": "integer"},
                        "percentage": {"type": "integer"}
                    }
                }
            },
            "difficulty": {
                "type": "object",
                "required": ["easy", "medium", "hard"],
                "properties": {
                    "easy": {"type": "integer"},
                    "medium": {"type": "integer"},
                    "hard": {"type": "integer"}
                }
            },
            "marking_scheme": {"type": "string"},
            "insights": {"type": "array", "items": {"type": "string"}}
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> AnalysisParams {
        AnalysisParams {
            exam_type: "jee-main".to_string(),
            year: "2024".to_string(),
            subject: "physics".to_string(),
        }
    }

    #[test]
    fn fallback_is_a_single_catch_all_topic_with_neutral_split() {
        let file = PaperWorkItem { filename: "paper.pdf".to_string(), bytes: vec![1] };
        let fallback = fallback_analysis(&params(), &file);

        assert_eq!(fallback.topics.len(), 1);
        assert_eq!(fallback.topics[0].percentage, 100);
        assert_eq!(
            fallback.difficulty.easy + fallback.difficulty.medium + fallback.difficulty.hard,
            100
        );
        assert!(fallback.insights.iter().any(|line| line.contains("paper.pdf")));
    }

    #[test]
    fn default_paper_name_reads_like_the_panel_header() {
        assert_eq!(default_paper_name(&params()), "JEE-MAIN 2024 - Physics");
    }

    #[test]
    fn schema_is_tagged_for_the_backend() {
        assert_eq!(analysis_schema()["title"], "paper_analysis");
    }
}
