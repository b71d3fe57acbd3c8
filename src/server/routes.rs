use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use crate::server::{AppState, BASE_PATH};
use crate::search::QuoteFilter;
use crate::storage::QuoteRepository;
use crate::{Error, Quote, Result};
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: String,
    pub quote: Quote,
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::Conflict(_)
            | Error::Storage(_)
            | Error::Serialization(_)
            | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

pub async fn list_quotes(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Quote>>> {
    let quotes = state.repo.list()?;
    Ok(Json(quotes))
}

pub async fn get_quote(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Quote>> {
    state.repo.get_by_id(id)?.map(Json).ok_or(Error::NotFound(id))
}

/// The `{id}` path segment is accepted but unused; the store assigns ids.
pub async fn create_quote(
    State(state): State<Arc<AppState>>,
    Json(quote): Json<Quote>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<CreatedResponse>)> {
    let created = state.repo.insert(&quote)?;
    tracing::info!("Created quote {} by {:?}", created.id, created.author);

    let location = format!("{}/GetQuotesbyId/{}", BASE_PATH, created.id);
    let message = format!("Author details for {} added successfully.", created.author_name());

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CreatedResponse { message, quote: created }),
    ))
}

pub async fn update_quote(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(quote): Json<Quote>,
) -> Result<Json<MessageResponse>> {
    if id != quote.id {
        return Err(Error::InvalidRequest(format!(
            "path id {} does not match body id {}",
            id, quote.id
        )));
    }

    state.repo.replace(&quote)?;

    // Re-read so the message reflects what was stored
    let updated = state.repo.get_by_id(id)?.ok_or(Error::NotFound(id))?;
    tracing::info!("Updated quote {}", id);

    Ok(Json(MessageResponse {
        message: format!("Author {} updated successfully.", updated.author_name()),
    }))
}

pub async fn delete_quote(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    let quote = state.repo.get_by_id(id)?.ok_or(Error::NotFound(id))?;

    if !state.repo.delete(id)? {
        return Err(Error::NotFound(id));
    }
    tracing::info!("Deleted quote {}", id);

    Ok(Json(MessageResponse {
        message: format!("Author {} deleted successfully.", quote.author_name()),
    }))
}

/// `GET /SearchQuotes?author=&tags=&tags=&quote=`; repeated keys accumulate.
pub async fn search_quotes(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Quote>>> {
    let filter = QuoteFilter::from_pairs(pairs);
    tracing::debug!("Searching quotes with {:?}", filter);
    let quotes = state.repo.search(&filter)?;
    Ok(Json(quotes))
}
