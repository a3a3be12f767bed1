//! Identity resolution and caching
//!
//! Maps a bearer credential to the authenticated member's person URN.
//! A resolution costs one call to the user-info endpoint; callers that
//! persist the result through `IdentityCache` skip that call on later
//! publishes. The cache pairs the URN with a fingerprint of the token
//! that produced it, so a replaced token invalidates the cache on load
//! instead of authoring posts as the wrong member.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::client::LinkedInClient;
use crate::config::resolve_data_path;
use crate::error::{ApiError, ConfigError, Result};
use crate::types::{Credential, Identity};

/// Resolves the credential held by a `LinkedInClient` to an `Identity`
pub struct IdentityResolver<'a> {
    client: &'a LinkedInClient,
}

impl<'a> IdentityResolver<'a> {
    pub fn new(client: &'a LinkedInClient) -> Self {
        Self { client }
    }

    /// Validate the credential against the user-info endpoint.
    ///
    /// Succeeds only on HTTP 200 with a usable subject id, which is
    /// returned already formatted as a person URN. A non-200 response
    /// or a 200 without a subject is `ValidationFailed`; a request that
    /// never completed is `Transport`.
    pub async fn validate(&self) -> Result<Identity> {
        let response = self.client.get_user_info().await?;

        if response.status != 200 {
            return Err(ApiError::ValidationFailed(format!(
                "userinfo returned status {}",
                response.status
            ))
            .into());
        }

        let sub = response.sub.unwrap_or_default();
        let identity = Identity::from_sub(&sub).ok_or_else(|| {
            ApiError::ValidationFailed("userinfo response missing a subject id".to_string())
        })?;

        tracing::debug!(urn = identity.urn(), "token validated");
        Ok(identity)
    }

    /// Resolve to an identity, preferring the caller-supplied cache.
    ///
    /// A cached identity is returned unconditionally without a network
    /// call; there is no expiry or re-validation. Without one, the
    /// credential goes through `validate` and the caller is expected to
    /// persist the result.
    pub async fn resolve(&self, cached: Option<Identity>) -> Result<Identity> {
        if let Some(identity) = cached {
            tracing::debug!(urn = identity.urn(), "using cached identity");
            return Ok(identity);
        }

        self.validate().await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    person_urn: String,
    token_fingerprint: String,
}

/// On-disk cache of a resolved identity, owned by the caller of the
/// resolver. One TOML file, one entry.
pub struct IdentityCache {
    path: PathBuf,
}

impl IdentityCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Cache file in the XDG data directory
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(resolve_data_path()?.join("identity.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cached identity, if it is still valid for `credential`.
    ///
    /// A missing or unreadable file, a parse failure, a URN that no
    /// longer parses, or a fingerprint minted by a different token all
    /// come back as `None`, and the flow falls back to a full validation.
    pub fn load(&self, credential: &Credential) -> Option<Identity> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        let cache: CacheFile = match toml::from_str(&content) {
            Ok(cache) => cache,
            Err(e) => {
                tracing::warn!("discarding unreadable identity cache: {}", e);
                return None;
            }
        };

        if cache.token_fingerprint != credential.fingerprint() {
            tracing::debug!("identity cache was minted by a different token, discarding");
            return None;
        }

        Identity::from_urn(&cache.person_urn)
    }

    /// Persist a freshly resolved identity for `credential`
    pub fn store(&self, credential: &Credential, identity: &Identity) -> Result<()> {
        let cache = CacheFile {
            person_urn: identity.urn().to_string(),
            token_fingerprint: credential.fingerprint(),
        };
        let content = toml::to_string_pretty(&cache).map_err(ConfigError::SerializeError)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::WriteError)?;
        }
        std::fs::write(&self.path, content).map_err(ConfigError::WriteError)?;

        tracing::debug!(path = %self.path.display(), "identity cached");
        Ok(())
    }

    /// Remove the cache file. Removing a cache that does not exist is fine.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ConfigError::WriteError(e).into()),
        }
    }
}
