use serde::Serialize;

use crate::store::types::{
    ActivityEntry, DifficultyShare, ExamShare, SubjectPerformance, TopTopic,
};

#[derive(Debug, Serialize)]
pub(crate) struct OverallStats {
    pub(crate) papers_analyzed: u64,
    pub(crate) questions_generated: u64,
    pub(crate) explanations_created: u64,
    pub(crate) syllabus_mappings: u64,
    pub(crate) exports_completed: u64,
    pub(crate) average_processing_time: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnalyticsOverviewResponse {
    pub(crate) range: String,
    pub(crate) overall: OverallStats,
    pub(crate) subject_performance: Vec<SubjectPerformance>,
    pub(crate) exam_type_distribution: Vec<ExamShare>,
    pub(crate) difficulty_analysis: Vec<DifficultyShare>,
    pub(crate) top_topics: Vec<TopTopic>,
    pub(crate) recent_activity: Vec<ActivityEntry>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DashboardOverviewResponse {
    pub(crate) stats: OverallStats,
    pub(crate) recent_activity: Vec<ActivityEntry>,
}
