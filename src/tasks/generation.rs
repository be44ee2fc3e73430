//! Background driver for one question-generation batch: one structured
//! generation call per requested question slot.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::core::state::AppState;
use crate::core::time::rfc3339_now;
use crate::services::ai_engine::GenerationBackend;
use crate::services::batch::{self, BatchProgress, ItemOutcome};
use crate::store::catalog;
use crate::store::types::{
    BatchState, GeneratedQuestion, GenerationParams, QuestionRecord, SourceInput,
};
use crate::store::UsageCounters;

pub(crate) const PANEL: &str = "generator";

const OPTIONS_PER_QUESTION: usize = 4;

pub(crate) async fn run_generation_batch(
    state: AppState,
    progress: Arc<BatchProgress>,
    params: GenerationParams,
    quantity: u32,
) {
    let timer = Instant::now();

    let outcomes = batch::process_items(
        quantity as usize,
        &progress,
        |index| generate_question(&state, &params, index as u32, quantity),
        |index| fallback_question(&params, index as u32),
    )
    .await;

    let records = build_records(progress.id(), &params, outcomes);
    let merged = state.store().questions().merge_batch(progress.id(), records);

    match merged {
        Ok(()) => {
            UsageCounters::bump(&state.store().counters().questions_generated, quantity as u64);
            state.store().push_activity(
                format!(
                    "{} {} Questions Generated",
                    catalog::exam_display_name(&params.exam_type),
                    catalog::capitalize(&params.subject)
                ),
                format!("{quantity} adaptive questions created for Class {}", params.class_level),
            );
            progress.finish(BatchState::Completed);
            metrics::histogram!("batch_duration_seconds", "panel" => PANEL)
                .record(timer.elapsed().as_secs_f64());
            tracing::info!(
                batch_id = %progress.id(),
                quantity,
                "Question generation batch completed"
            );
        }
        Err(err) => {
            progress.finish(BatchState::Failed);
            tracing::error!(
                batch_id = %progress.id(),
                error = %err,
                "Failed to merge question generation batch"
            );
        }
    }

    state.store().questions().finish_batch(progress.id());
}

async fn generate_question(
    state: &AppState,
    params: &GenerationParams,
    slot: u32,
    quantity: u32,
) -> Result<GeneratedQuestion> {
    let prompt = question_prompt(params, slot, quantity);
    let value = state.generation().generate_structured(&prompt, &question_schema()).await?;
    let question: GeneratedQuestion = serde_json::from_value(value)
        .context("Question payload did not match the expected shape")?;

    if question.options.len() != OPTIONS_PER_QUESTION {
        anyhow::bail!("Question carried {} options instead of 4", question.options.len());
    }
    if question.correct >= question.options.len() {
        anyhow::bail!("Correct-answer index {} is out of range", question.correct);
    }

    Ok(question)
}

fn fallback_question(params: &GenerationParams, slot: u32) -> GeneratedQuestion {
    let topic = params
        .topic
        .clone()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| catalog::capitalize(&params.subject));

    GeneratedQuestion {
        question: format!(
            "Practice question {} on {topic} could not be generated automatically. \
Review the core concepts of {topic} and retry.",
            slot + 1
        ),
        options: vec![
            "Revisit the chapter summary".to_string(),
            "Work one solved example".to_string(),
            "Attempt a past-paper question".to_string(),
            "Discuss the topic with a mentor".to_string(),
        ],
        correct: 0,
        topic,
        difficulty: catalog::difficulty_from_percent(params.difficulty_percent),
    }
}

fn build_records(
    batch_id: &str,
    params: &GenerationParams,
    outcomes: Vec<ItemOutcome<GeneratedQuestion>>,
) -> Vec<QuestionRecord> {
    outcomes
        .into_iter()
        .enumerate()
        .map(|(index, outcome)| {
            let (result, status, failure_reason) = outcome.into_parts();
            QuestionRecord {
                id: Uuid::new_v4().to_string(),
                batch_id: batch_id.to_string(),
                source: SourceInput::Slot { index: index as u32 },
                params: params.clone(),
                status,
                result,
                failure_reason,
                created_at: rfc3339_now(),
            }
        })
        .collect()
}

fn question_prompt(params: &GenerationParams, slot: u32, quantity: u32) -> String {
    let difficulty = catalog::difficulty_from_percent(params.difficulty_percent);
    let topic_clause = match params.topic.as_deref().filter(|value| !value.trim().is_empty()) {
        Some(topic) => format!(" on the topic '{topic}'"),
        None => String::new(),
    };
    let board_clause = match params.board.as_deref() {
        Some(board) => format!(", board {}", board.to_uppercase()),
        None => String::new(),
    };

    format!(
        "Generate question {number} of {quantity} for a Class {class} student{board_clause} \
preparing for {exam}. Subject: {subject}{topic_clause}. Question type: {question_type}. \
Target difficulty: {difficulty:?}. Produce a single multiple-choice question with exactly \
4 options, the zero-based index of the correct option, the topic it covers, and its \
difficulty (easy, medium or hard). Vary the question from the others in this set.",
        number = slot + 1,
        class = params.class_level,
        exam = catalog::exam_display_name(&params.exam_type),
        subject = catalog::capitalize(&params.subject),
        question_type = params.question_type,
    )
}

fn question_schema() -> Value {
    json!({
        "title": "generated_question",
        "type": "object",
        "required": ["question", "options", "correct", "topic", "difficulty"],
        "properties": {
            "question": {"type": "string"},
            "options": {
                "type": "array",
                "items": {"type": "string"},
                "minItems": OPTIONS_PER_QUESTION,
                "maxItems": OPTIONS_PER_QUESTION
            },
            "correct": {"type": "integer", "minimum": 0, "maximum": 3},
            "topic": {"type": "string"},
            "difficulty": {"type": "string", "enum": ["easy", "medium", "hard"]}
        }
    })
}
