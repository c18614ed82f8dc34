use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle of an instructor-submitted course. Approval duplicates the
/// record into the approved catalog, it never moves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

/// Submission payload for a new instructor course; starts out pending.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct NewInstructorCourse {
    pub name: String,
    pub price: f64,
    pub seats: i64,
    pub email: String,
    #[serde(default)]
    pub status: CourseStatus,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// PUT /instructorCourses/:id - instructor edits to an existing submission.
/// Exactly these fields are patched.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CourseEdit {
    pub name: String,
    pub seats: i64,
    pub price: f64,
}

/// PUT /updateCoursesStatus/:id - approve flow.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct StatusUpdate {
    pub status: CourseStatus,
}

/// PUT /denyCoursesStatus/:id - deny flow carries reviewer feedback.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct StatusWithFeedback {
    pub status: CourseStatus,
    pub feedback: String,
}

/// POST /approvedCourses payload, and the exact field set patched by
/// PUT /approvedCourses/:id.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ApprovedCourse {
    pub name: String,
    pub price: f64,
    pub seats: i64,
    pub status: CourseStatus,
    pub email: String,
    pub instructor: String,
    pub image: String,
}
