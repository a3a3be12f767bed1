//! Core types for Lincast

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// URN prefix for member identities
pub const PERSON_URN_PREFIX: &str = "urn:li:person:";

/// Bearer token authorizing API calls on the member's behalf.
///
/// The token is held behind a secret wrapper so it is zeroed on drop and
/// redacted from Debug output. Replacing the token invalidates any cached
/// identity; `fingerprint` exists so callers can detect that replacement
/// without storing the token itself.
pub struct Credential(SecretString);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Borrow the raw token for header construction
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }

    /// Stable fingerprint of the token (SHA-256, base64url).
    ///
    /// Stored next to a cached identity; a mismatch on load means the
    /// token changed and the cache must be discarded.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.expose_secret().as_bytes());
        URL_SAFE_NO_PAD.encode(digest)
    }
}

impl Clone for Credential {
    fn clone(&self) -> Self {
        Self::new(self.0.expose_secret().to_owned())
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// Resolved member identity: the raw subject id from the user-info
/// endpoint and its URN form, which the posts endpoint requires as the
/// author field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    sub: String,
    urn: String,
}

impl Identity {
    /// Build an identity from a user-info subject id.
    ///
    /// Returns `None` for an empty or malformed subject (whitespace or
    /// colons would corrupt the URN), which callers treat as a resolution
    /// failure even on an otherwise successful response.
    pub fn from_sub(sub: &str) -> Option<Self> {
        let sub = sub.trim();
        if sub.is_empty() || sub.chars().any(|c| c.is_whitespace() || c == ':') {
            return None;
        }
        Some(Self {
            sub: sub.to_string(),
            urn: format!("{}{}", PERSON_URN_PREFIX, sub),
        })
    }

    /// Rebuild an identity from a previously persisted URN
    pub fn from_urn(urn: &str) -> Option<Self> {
        let sub = urn.trim().strip_prefix(PERSON_URN_PREFIX)?;
        Self::from_sub(sub)
    }

    pub fn sub(&self) -> &str {
        &self.sub
    }

    pub fn urn(&self) -> &str {
        &self.urn
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.urn)
    }
}

/// Audience of a post. The publish flow always posts publicly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Visibility {
    #[serde(rename = "PUBLIC")]
    Public,
    #[serde(rename = "CONNECTIONS")]
    Connections,
    #[serde(rename = "LOGGED_IN")]
    LoggedIn,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LifecycleState {
    #[serde(rename = "PUBLISHED")]
    Published,
    #[serde(rename = "DRAFT")]
    Draft,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FeedDistribution {
    #[serde(rename = "MAIN_FEED")]
    MainFeed,
    #[serde(rename = "NONE")]
    None,
}

/// Distribution block of the post payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distribution {
    pub feed_distribution: FeedDistribution,
    pub target_entities: Vec<String>,
    pub third_party_distribution_channels: Vec<String>,
}

/// Wire payload for `POST /v2/posts`.
///
/// Built fresh per publish attempt and never persisted. The field names
/// serialize to the exact JSON keys the posts endpoint expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostBody {
    pub author: String,
    pub lifecycle_state: LifecycleState,
    pub visibility: Visibility,
    pub commentary: String,
    pub distribution: Distribution,
}

impl PostBody {
    /// Build the fixed-shape payload for a main-feed public post
    pub fn new(author: &Identity, commentary: impl Into<String>) -> Self {
        Self {
            author: author.urn().to_string(),
            lifecycle_state: LifecycleState::Published,
            visibility: Visibility::Public,
            commentary: commentary.into(),
            distribution: Distribution {
                feed_distribution: FeedDistribution::MainFeed,
                target_entities: Vec::new(),
                third_party_distribution_channels: Vec::new(),
            },
        }
    }
}

/// Outcome of a successful publish attempt. Consumed immediately by the
/// caller for user feedback; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct PublishReceipt {
    /// HTTP status the posts endpoint answered with (201)
    pub status: u16,
    /// When the post was accepted (Unix timestamp)
    pub posted_at: i64,
}

impl PublishReceipt {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            posted_at: chrono::Utc::now().timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_from_sub() {
        let identity = Identity::from_sub("123").expect("valid sub");
        assert_eq!(identity.sub(), "123");
        assert_eq!(identity.urn(), "urn:li:person:123");
    }

    #[test]
    fn test_identity_from_sub_trims_whitespace() {
        let identity = Identity::from_sub("  abc9  ").expect("valid sub");
        assert_eq!(identity.sub(), "abc9");
        assert_eq!(identity.urn(), "urn:li:person:abc9");
    }

    #[test]
    fn test_identity_from_sub_rejects_empty() {
        assert!(Identity::from_sub("").is_none());
        assert!(Identity::from_sub("   ").is_none());
    }

    #[test]
    fn test_identity_from_sub_rejects_malformed() {
        assert!(Identity::from_sub("ab cd").is_none());
        assert!(Identity::from_sub("urn:li:person:123").is_none());
    }

    #[test]
    fn test_identity_from_urn_round_trip() {
        let identity = Identity::from_sub("999").unwrap();
        let restored = Identity::from_urn(identity.urn()).expect("valid urn");
        assert_eq!(restored, identity);
    }

    #[test]
    fn test_identity_from_urn_rejects_bare_sub() {
        assert!(Identity::from_urn("999").is_none());
        assert!(Identity::from_urn("urn:li:organization:999").is_none());
    }

    #[test]
    fn test_identity_display_is_urn() {
        let identity = Identity::from_sub("42").unwrap();
        assert_eq!(identity.to_string(), "urn:li:person:42");
    }

    #[test]
    fn test_credential_fingerprint_is_stable() {
        let a = Credential::new("tok1");
        let b = Credential::new("tok1");
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_credential_fingerprint_changes_with_token() {
        let a = Credential::new("tok1");
        let b = Credential::new("tok2");
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_credential_debug_redacts_token() {
        let credential = Credential::new("super-secret-token");
        let debug = format!("{:?}", credential);
        assert!(!debug.contains("super-secret-token"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_credential_is_empty() {
        assert!(Credential::new("").is_empty());
        assert!(!Credential::new("tok").is_empty());
    }

    #[test]
    fn test_post_body_wire_shape() {
        let identity = Identity::from_sub("999").unwrap();
        let body = PostBody::new(&identity, "Hello world");

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "author": "urn:li:person:999",
                "lifecycleState": "PUBLISHED",
                "visibility": "PUBLIC",
                "commentary": "Hello world",
                "distribution": {
                    "feedDistribution": "MAIN_FEED",
                    "targetEntities": [],
                    "thirdPartyDistributionChannels": []
                }
            })
        );
    }

    #[test]
    fn test_post_body_preserves_commentary_verbatim() {
        let identity = Identity::from_sub("1").unwrap();
        let body = PostBody::new(&identity, "  spaced out  ");
        assert_eq!(body.commentary, "  spaced out  ");
    }

    #[test]
    fn test_visibility_serialization() {
        assert_eq!(
            serde_json::to_string(&Visibility::Public).unwrap(),
            r#""PUBLIC""#
        );
        assert_eq!(
            serde_json::to_string(&Visibility::Connections).unwrap(),
            r#""CONNECTIONS""#
        );
        assert_eq!(
            serde_json::to_string(&Visibility::LoggedIn).unwrap(),
            r#""LOGGED_IN""#
        );
    }

    #[test]
    fn test_lifecycle_state_serialization() {
        assert_eq!(
            serde_json::to_string(&LifecycleState::Published).unwrap(),
            r#""PUBLISHED""#
        );
        assert_eq!(
            serde_json::to_string(&LifecycleState::Draft).unwrap(),
            r#""DRAFT""#
        );
    }

    #[test]
    fn test_feed_distribution_serialization() {
        assert_eq!(
            serde_json::to_string(&FeedDistribution::MainFeed).unwrap(),
            r#""MAIN_FEED""#
        );
        assert_eq!(
            serde_json::to_string(&FeedDistribution::None).unwrap(),
            r#""NONE""#
        );
    }

    #[test]
    fn test_publish_receipt_timestamp() {
        let before = chrono::Utc::now().timestamp();
        let receipt = PublishReceipt::new(201);
        let after = chrono::Utc::now().timestamp();

        assert_eq!(receipt.status, 201);
        assert!(receipt.posted_at >= before);
        assert!(receipt.posted_at <= after);
    }
}
