//! Post publishing
//!
//! Builds the provider payload for a resolved identity and submits it.
//! One attempt per call; the posts endpoint is not idempotent, so two
//! calls with identical arguments create two distinct posts.

use crate::client::LinkedInClient;
use crate::error::{ApiError, Result};
use crate::types::{Identity, PostBody, PublishReceipt};

/// Hard limit on commentary length, in Unicode scalar values
pub const COMMENTARY_CHAR_LIMIT: usize = 3000;

/// Submits posts for a resolved identity through a `LinkedInClient`
pub struct PostPublisher<'a> {
    client: &'a LinkedInClient,
}

impl<'a> PostPublisher<'a> {
    pub fn new(client: &'a LinkedInClient) -> Self {
        Self { client }
    }

    /// Check commentary against the content invariants.
    ///
    /// Usable by UI layers for pre-flight feedback; `publish` applies the
    /// same checks before any network I/O.
    pub fn validate_commentary(text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(ApiError::EmptyContent.into());
        }

        let length = text.chars().count();
        if length > COMMENTARY_CHAR_LIMIT {
            return Err(ApiError::ContentTooLong {
                length,
                limit: COMMENTARY_CHAR_LIMIT,
            }
            .into());
        }

        Ok(())
    }

    /// Publish `text` as a public main-feed post authored by `author`.
    ///
    /// Preconditions, checked in order and all before any network call:
    /// the identity must be resolved (`IdentityMissing` otherwise; the
    /// resolve-then-publish ordering makes this unreachable for callers
    /// that follow it), and the text must satisfy `validate_commentary`.
    ///
    /// A 201 from the posts endpoint is the only success; any other
    /// status is `PublishFailed` with the status attached, and a request
    /// that never completed is `Transport`.
    pub async fn publish(&self, author: Option<&Identity>, text: &str) -> Result<PublishReceipt> {
        let author = author.ok_or(ApiError::IdentityMissing)?;
        Self::validate_commentary(text)?;

        let body = PostBody::new(author, text);
        let status = self.client.submit_post(&body).await?;

        if status != 201 {
            return Err(ApiError::PublishFailed { status }.into());
        }

        tracing::info!(author = author.urn(), "post published");
        Ok(PublishReceipt::new(status))
    }
}
