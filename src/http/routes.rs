//! API routes
//!
//! The validation executor gates `POST /api/submissions`: only a payload
//! that validates cleanly reaches the store, and a rejected payload comes
//! back as a field-keyed error map with a 400. Everything else here is
//! plain CRUD plumbing.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use uuid::Uuid;

use crate::observability::Logger;
use crate::schema::FormSchema;
use crate::store::SubmissionStore;
use crate::validate::CompiledForm;

use super::errors::{ApiError, ApiResult};
use super::pagination::{ListQuery, SORT_BY_CREATED_AT};
use super::response::{
    CreatedResponse, HealthResponse, SubmissionListResponse, SubmissionResponse,
    ValidationFailureResponse,
};

/// State shared across handlers
///
/// The compiled form is immutable, so one instance serves all concurrent
/// requests.
pub struct AppState {
    pub schema: Arc<FormSchema>,
    pub form: Arc<CompiledForm>,
    pub store: Arc<dyn SubmissionStore>,
}

impl AppState {
    pub fn new(
        schema: FormSchema,
        form: CompiledForm,
        store: Arc<dyn SubmissionStore>,
    ) -> Self {
        Self {
            schema: Arc::new(schema),
            form: Arc::new(form),
            store,
        }
    }
}

/// Builds the API router.
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/form-schema", get(get_form_schema))
        .route("/api/submissions", post(create_submission))
        .route("/api/submissions", get(list_submissions))
        .route("/api/submissions/{id}", get(get_submission))
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

async fn get_form_schema(State(state): State<Arc<AppState>>) -> Json<FormSchema> {
    Json(state.schema.as_ref().clone())
}

async fn create_submission(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> ApiResult<Response> {
    match state.form.validate(&payload) {
        Ok(normalized) => {
            let submission = state.store.insert(Value::Object(normalized))?;
            Logger::info(
                "submission.accepted",
                &[("id", &submission.id.to_string())],
            );
            Ok((StatusCode::CREATED, Json(CreatedResponse::new(&submission))).into_response())
        }
        Err(errors) => {
            Logger::info(
                "submission.rejected",
                &[("fields", &errors.len().to_string())],
            );
            Ok((
                StatusCode::BAD_REQUEST,
                Json(ValidationFailureResponse::new(errors)),
            )
                .into_response())
        }
    }
}

async fn list_submissions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<SubmissionListResponse>> {
    let params = query.resolve();
    let page = state
        .store
        .list(params.page, params.limit, params.sort_order)?;

    Ok(Json(SubmissionListResponse::new(
        page,
        SORT_BY_CREATED_AT,
        params.sort_order.as_str(),
    )))
}

async fn get_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<SubmissionResponse>> {
    let id: Uuid = id
        .parse()
        .map_err(|_| ApiError::InvalidQueryParam(format!("invalid submission id '{id}'")))?;

    let submission = state.store.get(id)?;
    Ok(Json(SubmissionResponse::new(submission)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::parse_schema;
    use crate::store::InMemoryStore;
    use crate::validate::compile;

    fn test_state() -> Arc<AppState> {
        let schema = parse_schema(
            r#"{
                "title": "Contact",
                "fields": [
                    { "name": "name", "label": "Name", "type": "text", "required": true }
                ]
            }"#,
            "inline",
        )
        .unwrap();
        let form = compile(&schema).unwrap();
        Arc::new(AppState::new(schema, form, Arc::new(InMemoryStore::new())))
    }

    #[test]
    fn test_router_builds() {
        let _router = api_routes(test_state());
    }
}
