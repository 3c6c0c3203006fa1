//! HTTP handlers and response envelopes for the administration API.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use surrealdb::Connection;
use tracing::error;

use fieldset_admin::FieldSubmission;
use fieldset_core::error::FieldsetError;
use fieldset_core::models::custom_field::CustomField;
use fieldset_core::repository::ScopeFilter;

use crate::AppState;

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            success: false,
            error: message.into(),
        }),
    )
        .into_response()
}

/// Map a workflow error onto the wire. Validation and quota failures
/// are client errors carrying their message verbatim, missing records
/// are 404, everything else is a server-side failure that gets logged.
fn map_error(err: FieldsetError) -> Response {
    match err {
        FieldsetError::Validation { message } | FieldsetError::QuotaExceeded { message } => {
            error_response(StatusCode::BAD_REQUEST, message)
        }
        FieldsetError::NotFound { .. } => {
            error_response(StatusCode::NOT_FOUND, "Custom field not found")
        }
        FieldsetError::Database(message) | FieldsetError::Internal(message) => {
            error!(error = %message, "custom field request failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
    }
}

pub(crate) async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "Server is running", "status": "OK" }))
}

#[derive(Debug, Serialize)]
struct UpsertBody {
    success: bool,
    id: i64,
    status: &'static str,
    message: &'static str,
}

pub(crate) async fn process_custom_field<C: Connection>(
    State(state): State<AppState<C>>,
    Json(submission): Json<FieldSubmission>,
) -> Response {
    match state.service.upsert(submission).await {
        Ok(outcome) => Json(UpsertBody {
            success: true,
            id: outcome.id,
            status: "SUCCESS",
            message: outcome.message(),
        })
        .into_response(),
        Err(err) => map_error(err),
    }
}

#[derive(Debug, Serialize)]
struct ListBody {
    success: bool,
    data: Vec<CustomField>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScopeParams {
    #[serde(rename = "excludeDisabled")]
    exclude_disabled: Option<bool>,
    #[serde(rename = "excludeDisabledAtServer")]
    exclude_disabled_at_server: Option<bool>,
}

pub(crate) async fn fields_by_scope<C: Connection>(
    State(state): State<AppState<C>>,
    Path((org_id, scope)): Path<(i64, String)>,
    Query(params): Query<ScopeParams>,
) -> Response {
    let filter = ScopeFilter {
        exclude_disabled: params.exclude_disabled.unwrap_or(false),
        exclude_disabled_at_server: params.exclude_disabled_at_server.unwrap_or(true),
    };

    match state.service.list_by_scope(org_id, &scope, filter).await {
        Ok(data) => Json(ListBody {
            success: true,
            data,
        })
        .into_response(),
        Err(err) => map_error(err),
    }
}

pub(crate) async fn list_custom_fields<C: Connection>(
    State(state): State<AppState<C>>,
) -> Response {
    match state.service.list().await {
        Ok(data) => Json(ListBody {
            success: true,
            data,
        })
        .into_response(),
        Err(err) => map_error(err),
    }
}

#[derive(Debug, Serialize)]
struct FieldBody {
    success: bool,
    data: CustomField,
}

pub(crate) async fn get_custom_field<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<i64>,
) -> Response {
    match state.service.get(id).await {
        Ok(data) => Json(FieldBody {
            success: true,
            data,
        })
        .into_response(),
        Err(err) => map_error(err),
    }
}

#[derive(Debug, Serialize)]
struct DeletedBody {
    success: bool,
    message: &'static str,
}

pub(crate) async fn delete_custom_field<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<i64>,
) -> Response {
    match state.service.delete(id).await {
        Ok(()) => Json(DeletedBody {
            success: true,
            message: "Custom field deleted",
        })
        .into_response(),
        Err(err) => map_error(err),
    }
}
