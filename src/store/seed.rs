//! Seeded demo collections shown by the admin, analytics and dashboard
//! panels before (and alongside) any live activity.

use crate::core::time::rfc3339_minutes_ago;
use crate::store::types::{
    ActivityEntry, AiModelInfo, DatasetStatus, DifficultyLevel, DifficultyShare, ExamDataset,
    ExamShare, SubjectPerformance, TopTopic, UserAccount,
};

pub(crate) const BASELINE_PAPERS_ANALYZED: u64 = 1_247;
pub(crate) const BASELINE_QUESTIONS_GENERATED: u64 = 15_832;
pub(crate) const BASELINE_EXPLANATIONS_CREATED: u64 = 47_496;
pub(crate) const BASELINE_SYLLABUS_MAPPINGS: u64 = 312;
pub(crate) const BASELINE_EXPORTS_COMPLETED: u64 = 189;

pub(crate) const AVERAGE_PROCESSING_TIME: &str = "2.3s";

pub(crate) fn exam_datasets() -> Vec<ExamDataset> {
    vec![
        ExamDataset {
            id: "ds-jee-main-2024".to_string(),
            name: "JEE Main 2024".to_string(),
            papers: 24,
            questions: 2_160,
            status: DatasetStatus::Active,
            last_updated: rfc3339_minutes_ago(60 * 48),
        },
        ExamDataset {
            id: "ds-neet-2023-2024".to_string(),
            name: "NEET 2023-2024".to_string(),
            papers: 18,
            questions: 1_620,
            status: DatasetStatus::Active,
            last_updated: rfc3339_minutes_ago(60 * 24 * 7),
        },
        ExamDataset {
            id: "ds-sat-math-2024".to_string(),
            name: "SAT Math 2024".to_string(),
            papers: 12,
            questions: 696,
            status: DatasetStatus::Active,
            last_updated: rfc3339_minutes_ago(60 * 24 * 3),
        },
        ExamDataset {
            id: "ds-jee-advanced-2023".to_string(),
            name: "JEE Advanced 2023".to_string(),
            papers: 8,
            questions: 432,
            status: DatasetStatus::Inactive,
            last_updated: rfc3339_minutes_ago(60 * 24 * 14),
        },
    ]
}

pub(crate) fn system_users() -> Vec<UserAccount> {
    vec![
        UserAccount {
            id: "u-1".to_string(),
            name: "Dr. Sarah Johnson".to_string(),
            email: "sarah@university.edu".to_string(),
            role: "admin".to_string(),
            status: "active".to_string(),
            last_login: rfc3339_minutes_ago(120),
        },
        UserAccount {
            id: "u-2".to_string(),
            name: "Prof. Michael Chen".to_string(),
            email: "mchen@institute.org".to_string(),
            role: "moderator".to_string(),
            status: "active".to_string(),
            last_login: rfc3339_minutes_ago(60 * 24),
        },
        UserAccount {
            id: "u-3".to_string(),
            name: "Alex Rodriguez".to_string(),
            email: "alex@school.edu".to_string(),
            role: "teacher".to_string(),
            status: "active".to_string(),
            last_login: rfc3339_minutes_ago(180),
        },
        UserAccount {
            id: "u-4".to_string(),
            name: "Emma Wilson".to_string(),
            email: "emma@college.edu".to_string(),
            role: "teacher".to_string(),
            status: "inactive".to_string(),
            last_login: rfc3339_minutes_ago(60 * 24 * 7),
        },
    ]
}

pub(crate) fn ai_models() -> Vec<AiModelInfo> {
    vec![
        AiModelInfo {
            name: "Question Generator".to_string(),
            version: "v2.1.0".to_string(),
            status: "active".to_string(),
            accuracy: "94%".to_string(),
            last_trained: rfc3339_minutes_ago(60 * 24 * 7),
        },
        AiModelInfo {
            name: "Paper Analyzer".to_string(),
            version: "v1.8.3".to_string(),
            status: "active".to_string(),
            accuracy: "96%".to_string(),
            last_trained: rfc3339_minutes_ago(60 * 24 * 3),
        },
        AiModelInfo {
            name: "Explanation Engine".to_string(),
            version: "v1.5.2".to_string(),
            status: "active".to_string(),
            accuracy: "92%".to_string(),
            last_trained: rfc3339_minutes_ago(60 * 24 * 5),
        },
        AiModelInfo {
            name: "Syllabus Mapper".to_string(),
            version: "v1.2.1".to_string(),
            status: "maintenance".to_string(),
            accuracy: "89%".to_string(),
            last_trained: rfc3339_minutes_ago(60 * 24 * 14),
        },
    ]
}

pub(crate) fn recent_activity() -> Vec<ActivityEntry> {
    vec![
        ActivityEntry {
            action: "JEE Main 2024 Paper Analyzed".to_string(),
            details: "450 questions processed, 23 topics identified".to_string(),
            at: rfc3339_minutes_ago(12),
        },
        ActivityEntry {
            action: "NEET Biology Questions Generated".to_string(),
            details: "100 adaptive questions created for Class 11".to_string(),
            at: rfc3339_minutes_ago(34),
        },
        ActivityEntry {
            action: "SAT Math Explanations".to_string(),
            details: "Kid-friendly explanations generated for practice set".to_string(),
            at: rfc3339_minutes_ago(55),
        },
        ActivityEntry {
            action: "CBSE Syllabus Mapping".to_string(),
            details: "Physics Class 12 mapped to JEE Advanced".to_string(),
            at: rfc3339_minutes_ago(90),
        },
    ]
}

pub(crate) fn subject_performance() -> Vec<SubjectPerformance> {
    vec![
        SubjectPerformance {
            subject: "Mathematics".to_string(),
            questions: 5_847,
            accuracy: 78,
            trend: "+5%".to_string(),
        },
        SubjectPerformance {
            subject: "Physics".to_string(),
            questions: 4_231,
            accuracy: 72,
            trend: "+3%".to_string(),
        },
        SubjectPerformance {
            subject: "Chemistry".to_string(),
            questions: 3_456,
            accuracy: 81,
            trend: "+7%".to_string(),
        },
        SubjectPerformance {
            subject: "Biology".to_string(),
            questions: 2_313,
            accuracy: 85,
            trend: "+2%".to_string(),
        },
    ]
}

pub(crate) fn exam_type_distribution() -> Vec<ExamShare> {
    vec![
        ExamShare { exam: "JEE Main".to_string(), percentage: 35, questions: 5_546 },
        ExamShare { exam: "NEET".to_string(), percentage: 28, questions: 4_437 },
        ExamShare { exam: "JEE Advanced".to_string(), percentage: 20, questions: 3_169 },
        ExamShare { exam: "SAT".to_string(), percentage: 12, questions: 1_902 },
        ExamShare { exam: "Others".to_string(), percentage: 5, questions: 793 },
    ]
}

pub(crate) fn difficulty_analysis() -> Vec<DifficultyShare> {
    vec![
        DifficultyShare { level: DifficultyLevel::Easy, count: 6_234, percentage: 39 },
        DifficultyShare { level: DifficultyLevel::Medium, count: 7_123, percentage: 45 },
        DifficultyShare { level: DifficultyLevel::Hard, count: 2_490, percentage: 16 },
    ]
}

pub(crate) fn top_topics() -> Vec<TopTopic> {
    vec![
        TopTopic {
            topic: "Calculus".to_string(),
            questions: 1_247,
            difficulty: DifficultyLevel::Medium,
            popularity: 92,
        },
        TopTopic {
            topic: "Organic Chemistry".to_string(),
            questions: 1_156,
            difficulty: DifficultyLevel::Hard,
            popularity: 88,
        },
        TopTopic {
            topic: "Mechanics".to_string(),
            questions: 1_089,
            difficulty: DifficultyLevel::Medium,
            popularity: 85,
        },
        TopTopic {
            topic: "Algebra".to_string(),
            questions: 987,
            difficulty: DifficultyLevel::Easy,
            popularity: 82,
        },
        TopTopic {
            topic: "Thermodynamics".to_string(),
            questions: 876,
            difficulty: DifficultyLevel::Hard,
            popularity: 79,
        },
    ]
}
