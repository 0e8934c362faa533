use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::{
    management::ConfigError,
    types::{AccessToken, TokenResponse},
};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Failed to fetch access token: {status}, {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("token endpoint answered without an access_token: {body}")]
    MalformedResponse { body: String },

    #[error("token request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("cannot store the new access token: {0}")]
    Persist(#[from] ConfigError),
}

/// Checks whether `token` is still accepted by the Web API.
///
/// Sends `GET {api_url}/me` with the token as bearer. Only HTTP 200 counts as
/// valid; any other status and any transport failure count as invalid, with
/// no distinction between transient and permanent problems.
pub async fn probe_token(client: &Client, api_url: &str, token: &str) -> bool {
    let url = format!("{uri}/me", uri = api_url);

    match client.get(&url).bearer_auth(token).send().await {
        Ok(response) => response.status() == StatusCode::OK,
        Err(_) => false,
    }
}

/// Exchanges the client id and secret for a new access token.
///
/// Uses the OAuth 2.0 client-credentials grant: a form-encoded `POST` to the
/// token endpoint. Anything but HTTP 200 is returned as
/// [`AuthError::Rejected`] carrying the status and response body.
///
/// # Example
///
/// ```
/// let token = request_client_token(&client, &token_url, "id", "secret").await?;
/// ```
pub async fn request_client_token(
    client: &Client,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<AccessToken, AuthError> {
    let response = client
        .post(token_url)
        .form(&[
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("client_secret", client_secret),
        ])
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if status != StatusCode::OK {
        return Err(AuthError::Rejected { status, body });
    }

    let json: TokenResponse =
        serde_json::from_str(&body).map_err(|_| AuthError::MalformedResponse {
            body: body.clone(),
        })?;

    match json.access_token {
        Some(token) if !token.is_empty() => Ok(AccessToken::new(token)),
        _ => Err(AuthError::MalformedResponse { body }),
    }
}
