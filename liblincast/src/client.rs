//! Shared HTTP plumbing for the LinkedIn REST API
//!
//! Both the identity resolver and the post publisher go through this
//! client: it owns the credential, the base URL, and the headers every
//! call carries. Transport failures surface as `ApiError::Transport`;
//! interpreting status codes is left to the callers.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ApiError;
use crate::types::{Credential, PostBody};

/// Version string sent in the `LinkedIn-Version` header
pub const API_VERSION: &str = "202506";

/// Production API base URL
pub const BASE_URL: &str = "https://api.linkedin.com/v2";

const LINKEDIN_VERSION_HEADER: &str = "LinkedIn-Version";

/// Response of the user-info endpoint, as far as this crate cares:
/// the status and the subject id, if a well-formed body carried one.
#[derive(Debug)]
pub(crate) struct UserInfoResponse {
    pub status: u16,
    pub sub: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserInfoBody {
    #[serde(default)]
    sub: String,
}

/// HTTP client for the versioned LinkedIn REST API
pub struct LinkedInClient {
    http: reqwest::Client,
    base_url: String,
    credential: Credential,
}

impl LinkedInClient {
    /// Create a client against the production API
    pub fn new(credential: Credential) -> Result<Self, ApiError> {
        Self::with_base_url(credential, BASE_URL)
    }

    /// Create a client against a custom base URL (tests, proxies)
    pub fn with_base_url(
        credential: Credential,
        base_url: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to build HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http,
            base_url,
            credential,
        })
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.credential.expose())
    }

    /// `GET /userinfo` with the bearer and version headers.
    ///
    /// Only a 200 response is parsed for a subject id; any parse failure
    /// leaves `sub` empty, which callers treat as a malformed profile.
    pub(crate) async fn get_user_info(&self) -> Result<UserInfoResponse, ApiError> {
        let url = format!("{}/userinfo", self.base_url);
        tracing::debug!("requesting user info");

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, self.bearer())
            .header(LINKEDIN_VERSION_HEADER, API_VERSION)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let sub = if status == 200 {
            response
                .json::<UserInfoBody>()
                .await
                .ok()
                .map(|body| body.sub)
        } else {
            None
        };

        tracing::debug!(status, has_sub = sub.is_some(), "user info response");
        Ok(UserInfoResponse { status, sub })
    }

    /// `POST /posts` with the JSON payload. Returns the raw status; the
    /// publisher decides what counts as success.
    pub(crate) async fn submit_post(&self, body: &PostBody) -> Result<u16, ApiError> {
        let url = format!("{}/posts", self.base_url);
        tracing::debug!(
            commentary_chars = body.commentary.chars().count(),
            "submitting post"
        );

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, self.bearer())
            .header(LINKEDIN_VERSION_HEADER, API_VERSION)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        tracing::debug!(status, "post submission response");
        Ok(status)
    }
}
