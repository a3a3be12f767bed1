//! Compose service: the full resolve-then-publish flow
//!
//! This is the component boundary of the publish interaction: every
//! failure below it comes back as a typed result for the caller to
//! render, and progress is mirrored onto the event bus for UI layers.

use std::sync::Arc;

use crate::client::LinkedInClient;
use crate::config::Config;
use crate::error::Result;
use crate::identity::{IdentityCache, IdentityResolver};
use crate::publisher::PostPublisher;
use crate::types::{Credential, PublishReceipt};

use super::events::{Event, EventBus};

/// Drives one user-initiated publish action end to end
#[derive(Clone)]
pub struct ComposeService {
    config: Arc<Config>,
    cache: Arc<IdentityCache>,
    event_bus: EventBus,
}

impl ComposeService {
    /// Create a new compose service.
    ///
    /// The identity cache is owned by the caller side of the flow: the
    /// service reads it before resolving and writes it back after a
    /// fresh resolution, but never re-checks a hit.
    pub fn new(config: Arc<Config>, cache: IdentityCache, event_bus: EventBus) -> Self {
        Self {
            config,
            cache: Arc::new(cache),
            event_bus,
        }
    }

    /// Publish `text` to the authenticated member's feed.
    ///
    /// Preconditions (missing credential, empty or over-long content)
    /// fail before the attempt starts and emit no events; the flow
    /// never leaves its retryable state. Everything after
    /// `SubmitStarted` ends in exactly one of `SubmitSucceeded` or
    /// `SubmitFailed`.
    pub async fn publish(&self, text: &str) -> Result<PublishReceipt> {
        let credential = self.config.read_access_token()?;
        PostPublisher::validate_commentary(text)?;

        let client = self.build_client(credential.clone())?;
        let attempt_id = uuid::Uuid::new_v4().to_string();

        self.event_bus.emit(Event::SubmitStarted {
            attempt_id: attempt_id.clone(),
        });

        match self.run_attempt(&client, &credential, &attempt_id, text).await {
            Ok(receipt) => {
                self.event_bus.emit(Event::SubmitSucceeded {
                    attempt_id: attempt_id.clone(),
                });
                Ok(receipt)
            }
            Err(e) => {
                self.event_bus.emit(Event::SubmitFailed {
                    attempt_id: attempt_id.clone(),
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Validate the configured credential and persist the resolved
    /// identity, without publishing anything.
    pub async fn validate_credential(&self) -> Result<crate::types::Identity> {
        let credential = self.config.read_access_token()?;
        let client = self.build_client(credential.clone())?;

        let identity = IdentityResolver::new(&client).validate().await?;
        if let Err(e) = self.cache.store(&credential, &identity) {
            tracing::warn!("failed to persist resolved identity: {}", e);
        }
        Ok(identity)
    }

    fn build_client(&self, credential: Credential) -> Result<LinkedInClient> {
        let client = match &self.config.linkedin.api_base {
            Some(base) => LinkedInClient::with_base_url(credential, base)?,
            None => LinkedInClient::new(credential)?,
        };
        Ok(client)
    }

    async fn run_attempt(
        &self,
        client: &LinkedInClient,
        credential: &Credential,
        attempt_id: &str,
        text: &str,
    ) -> Result<PublishReceipt> {
        let cached = self.cache.load(credential);
        let from_cache = cached.is_some();

        let resolver = IdentityResolver::new(client);
        let identity = resolver.resolve(cached).await?;

        self.event_bus.emit(Event::IdentityResolved {
            attempt_id: attempt_id.to_string(),
            person_urn: identity.urn().to_string(),
            from_cache,
        });

        if !from_cache {
            // A failed cache write costs a validation call next time, not
            // this publish.
            if let Err(e) = self.cache.store(credential, &identity) {
                tracing::warn!("failed to persist resolved identity: {}", e);
            }
        }

        let publisher = PostPublisher::new(client);
        publisher.publish(Some(&identity), text).await
    }
}
