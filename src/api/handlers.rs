//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Form, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, Json},
};
use tracing::{error, warn};

use crate::state::{AppState, Command, CommandStatus};
use super::{
    auth::{presented_token, TokenParams},
    page::remote_page,
    responses::HealthResponse,
};

/// Reject the request unless it presents the configured token
fn authorize(
    state: &AppState,
    headers: &HeaderMap,
    query: &TokenParams,
    form: Option<&TokenParams>,
) -> Result<(), StatusCode> {
    if state.token_accepted(presented_token(headers, query, form)) {
        Ok(())
    } else {
        warn!("Rejected request with missing or invalid token");
        Err(StatusCode::FORBIDDEN)
    }
}

/// Store `command` and answer with the remote page
fn submit(
    state: &AppState,
    command: Command,
    headers: &HeaderMap,
    query: &TokenParams,
    form: Option<&TokenParams>,
) -> Result<Html<String>, StatusCode> {
    authorize(state, headers, query, form)?;

    match state.submit(command) {
        Ok(()) => Ok(Html(remote_page(state.auth_token.as_deref()))),
        Err(e) => {
            error!("Failed to store {} command: {}", command, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET / - Serve the remote control page
pub async fn index_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TokenParams>,
) -> Html<String> {
    // Only a caller who already knows the token gets it baked into the forms.
    let token = state
        .auth_token
        .as_deref()
        .filter(|expected| query.token.as_deref() == Some(*expected));
    Html(remote_page(token))
}

/// Handle GET|POST /toggle - Queue a start/pause for the overlay
pub async fn toggle_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<TokenParams>,
    form: Option<Form<TokenParams>>,
) -> Result<Html<String>, StatusCode> {
    let form = form.as_ref().map(|Form(params)| params);
    submit(&state, Command::Toggle, &headers, &query, form)
}

/// Handle GET|POST /reset - Queue a reset for the overlay
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<TokenParams>,
    form: Option<Form<TokenParams>>,
) -> Result<Html<String>, StatusCode> {
    let form = form.as_ref().map(|Form(params)| params);
    submit(&state, Command::Reset, &headers, &query, form)
}

/// Handle GET /status - Deliver and clear the pending command
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<TokenParams>,
) -> Result<Json<CommandStatus>, StatusCode> {
    authorize(&state, &headers, &query, None)?;

    match state.take_pending() {
        Ok(command) => Ok(Json(CommandStatus::new(command))),
        Err(e) => {
            error!("Failed to read pending command: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(&state))
}
