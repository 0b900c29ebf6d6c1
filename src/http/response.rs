//! Response envelope types
//!
//! Wire shapes match what the form renderer consumes: a `success` flag on
//! every envelope, camelCase keys, and pagination echoes alongside the
//! submissions page.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::store::{Submission, SubmissionPage};
use crate::validate::ErrorMap;

/// 201 body for an accepted submission
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: Uuid,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl CreatedResponse {
    pub fn new(submission: &Submission) -> Self {
        Self {
            success: true,
            id: submission.id,
            created_at: submission.created_at,
        }
    }
}

/// 400 body for a rejected submission: field-keyed messages
#[derive(Debug, Serialize)]
pub struct ValidationFailureResponse {
    pub success: bool,
    pub errors: ErrorMap,
}

impl ValidationFailureResponse {
    pub fn new(errors: ErrorMap) -> Self {
        Self {
            success: false,
            errors,
        }
    }
}

/// 200 body for the listing endpoint
#[derive(Debug, Serialize)]
pub struct SubmissionListResponse {
    pub success: bool,
    pub submissions: Vec<Submission>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    #[serde(rename = "sortBy")]
    pub sort_by: &'static str,
    #[serde(rename = "sortOrder")]
    pub sort_order: &'static str,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
}

impl SubmissionListResponse {
    pub fn new(page: SubmissionPage, sort_by: &'static str, sort_order: &'static str) -> Self {
        Self {
            success: true,
            submissions: page.submissions,
            total: page.total,
            page: page.page,
            limit: page.limit,
            sort_by,
            sort_order,
            total_pages: page.total_pages,
        }
    }
}

/// 200 body for a single submission
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub submission: Submission,
}

impl SubmissionResponse {
    pub fn new(submission: Submission) -> Self {
        Self {
            success: true,
            submission,
        }
    }
}

/// Health check body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}
