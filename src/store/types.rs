use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ItemStatus {
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum BatchState {
    Running,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
}

/// The input that produced a processed record: an uploaded paper or a
/// requested question slot.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub(crate) enum SourceInput {
    File { filename: String },
    Slot { index: u32 },
}

/// One processed work item in a panel's append-only list.
///
/// `result` is always a full payload: when `status` is `failed` it holds the
/// deterministic fallback for the panel, never a hole.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ProcessedItem<P, T> {
    pub(crate) id: String,
    pub(crate) batch_id: String,
    pub(crate) source: SourceInput,
    pub(crate) params: P,
    pub(crate) status: ItemStatus,
    pub(crate) result: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) failure_reason: Option<String>,
    pub(crate) created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AnalysisParams {
    pub(crate) exam_type: String,
    pub(crate) year: String,
    pub(crate) subject: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TopicShare {
    pub(crate) name: String,
    pub(crate) count: u32,
    pub(crate) percentage: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct DifficultySplit {
    pub(crate) easy: u32,
    pub(crate) medium: u32,
    pub(crate) hard: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PaperAnalysis {
    #[serde(default)]
    pub(crate) paper_name: String,
    pub(crate) total_questions: u32,
    pub(crate) topics: Vec<TopicShare>,
    pub(crate) difficulty: DifficultySplit,
    #[serde(default)]
    pub(crate) marking_scheme: String,
    #[serde(default)]
    pub(crate) insights: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct GenerationParams {
    pub(crate) class_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) board: Option<String>,
    pub(crate) subject: String,
    pub(crate) exam_type: String,
    pub(crate) question_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) topic: Option<String>,
    pub(crate) difficulty_percent: u32,
    pub(crate) time_limit_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct GeneratedQuestion {
    pub(crate) question: String,
    pub(crate) options: Vec<String>,
    pub(crate) correct: usize,
    #[serde(default)]
    pub(crate) topic: String,
    pub(crate) difficulty: DifficultyLevel,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ExplanationParams {
    pub(crate) class_level: String,
    pub(crate) exam_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ExplanationSet {
    pub(crate) question: String,
    pub(crate) kid_friendly: String,
    pub(crate) conceptual: String,
    pub(crate) advanced: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct MappingParams {
    pub(crate) class_level: String,
    pub(crate) board: String,
    pub(crate) subject: String,
    pub(crate) exam_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OverlapStatus {
    Complete,
    Partial,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TopicOverlap {
    pub(crate) school_topic: String,
    pub(crate) exam_topic: String,
    pub(crate) overlap: u32,
    pub(crate) status: OverlapStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SyllabusGap {
    pub(crate) topic: String,
    pub(crate) importance: String,
    pub(crate) exam_weightage: String,
}

/// The analytical portion of a syllabus mapping, as returned by the
/// generation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct MappingInsights {
    pub(crate) overlap_percentage: u32,
    pub(crate) overlapping_topics: Vec<TopicOverlap>,
    pub(crate) gaps: Vec<SyllabusGap>,
    #[serde(default)]
    pub(crate) recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SyllabusMapping {
    pub(crate) school_curriculum: String,
    pub(crate) target_exam: String,
    #[serde(flatten)]
    pub(crate) insights: MappingInsights,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum DatasetStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ExamDataset {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) papers: u32,
    pub(crate) questions: u32,
    pub(crate) status: DatasetStatus,
    pub(crate) last_updated: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ActivityEntry {
    pub(crate) action: String,
    pub(crate) details: String,
    pub(crate) at: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct UserAccount {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) role: String,
    pub(crate) status: String,
    pub(crate) last_login: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AiModelInfo {
    pub(crate) name: String,
    pub(crate) version: String,
    pub(crate) status: String,
    pub(crate) accuracy: String,
    pub(crate) last_trained: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SubjectPerformance {
    pub(crate) subject: String,
    pub(crate) questions: u64,
    pub(crate) accuracy: u32,
    pub(crate) trend: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ExamShare {
    pub(crate) exam: String,
    pub(crate) percentage: u32,
    pub(crate) questions: u64,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct DifficultyShare {
    pub(crate) level: DifficultyLevel,
    pub(crate) count: u64,
    pub(crate) percentage: u32,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct TopTopic {
    pub(crate) topic: String,
    pub(crate) questions: u64,
    pub(crate) difficulty: DifficultyLevel,
    pub(crate) popularity: u32,
}

pub(crate) type AnalysisRecord = ProcessedItem<AnalysisParams, PaperAnalysis>;
pub(crate) type QuestionRecord = ProcessedItem<GenerationParams, GeneratedQuestion>;
pub(crate) type ExplanationRecord = ProcessedItem<ExplanationParams, ExplanationSet>;
pub(crate) type MappingRecord = ProcessedItem<MappingParams, SyllabusMapping>;
