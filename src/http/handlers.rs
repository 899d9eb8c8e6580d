use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::{ApiError, AppState};
use crate::clients::{ClientFields, NewClient};
use crate::error::QueueError;
use crate::model::ModelStore;
use crate::washes::{QueueFilter, QueueQuery, ServiceRequest, WashStatus};

pub(super) const HEALTH_TEXT: &str = "Car wash queue API is running";

type AppStateRef<S> = State<Arc<AppState<S>>>;

#[derive(Debug, Default, Deserialize)]
pub(super) struct SearchQuery {
    #[serde(default)]
    q: String,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct StatusBody {
    #[serde(default)]
    status: Option<String>,
}

/// `GET /`
pub(super) async fn health() -> &'static str {
    HEALTH_TEXT
}

/// `POST /clients`
pub(super) async fn create_client<S: ModelStore + Clone + 'static>(
    State(state): AppStateRef<S>,
    body: Result<Json<NewClient>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = body?;
    let client = state.clients.create(input)?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// `GET /clients`
pub(super) async fn list_clients<S: ModelStore + Clone + 'static>(
    State(state): AppStateRef<S>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.clients.list()?))
}

/// `GET /clients/search?q=`
pub(super) async fn search_clients<S: ModelStore + Clone + 'static>(
    State(state): AppStateRef<S>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.clients.search(&query.q)?))
}

/// `PUT /clients/:id`
pub(super) async fn update_client<S: ModelStore + Clone + 'static>(
    State(state): AppStateRef<S>,
    Path(id): Path<String>,
    body: Result<Json<ClientFields>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(fields) = body?;
    Ok(Json(state.clients.update_by_id(&id, fields)?))
}

/// `POST /services`
pub(super) async fn register_service<S: ModelStore + Clone + 'static>(
    State(state): AppStateRef<S>,
    body: Result<Json<ServiceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let registration = state.queue.register_service(request)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "client": registration.client,
            "wash": registration.wash,
        })),
    ))
}

/// `GET /services?status=&date=`
pub(super) async fn list_services<S: ModelStore + Clone + 'static>(
    State(state): AppStateRef<S>,
    Query(query): Query<QueueQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = QueueFilter::from_query(&query)?;
    Ok(Json(state.queue.list_queue(&filter)?))
}

/// `PATCH /services/:id/status`
pub(super) async fn update_status<S: ModelStore + Clone + 'static>(
    State(state): AppStateRef<S>,
    Path(id): Path<String>,
    body: Result<Json<StatusBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let status: WashStatus = body
        .status
        .as_deref()
        .ok_or_else(|| QueueError::validation("status", "is required"))?
        .parse()?;
    Ok(Json(state.queue.update_status(&id, status)?))
}
