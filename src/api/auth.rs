//! Shared-secret check for the command endpoints

use axum::http::HeaderMap;
use serde::Deserialize;

/// Header carrying the shared secret
pub const AUTH_HEADER: &str = "x-auth-token";

/// `token` as a query parameter or form field
#[derive(Debug, Default, Deserialize)]
pub struct TokenParams {
    pub token: Option<String>,
}

/// The token a request presents, looked up in header, query, then form body
pub fn presented_token<'a>(
    headers: &'a HeaderMap,
    query: &'a TokenParams,
    form: Option<&'a TokenParams>,
) -> Option<&'a str> {
    headers
        .get(AUTH_HEADER)
        .and_then(|value| value.to_str().ok())
        .or(query.token.as_deref())
        .or_else(|| form.and_then(|form| form.token.as_deref()))
}
