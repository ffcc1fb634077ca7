//! Third-party identity login verification.
//!
//! Google OpenID Connect glue: resolves endpoint URLs from the provider's
//! discovery document and verifies a completed login's ID token before a
//! local session may be created. Documented at
//! <https://developers.google.com/identity/protocols/OpenIDConnect>.
//!
//! Independent of the provisioning workflow; shares only the HTTP stack.

use serde::Deserialize;

/// URL endpoint to fetch the Google OpenID Connect discovery document from.
pub const DISCOVERY_DOCUMENT_ENDPOINT: &str =
    "https://accounts.google.com/.well-known/openid-configuration";

/// URL to verify Google OpenID Connect tokens against during verification.
pub const TOKENINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v3/tokeninfo";

const DEFAULT_ACCESS_TOKEN_URL: &str = "https://accounts.google.com/o/oauth2/token";
const DEFAULT_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/auth";
const DEFAULT_PROFILE_URL: &str = "https://www.googleapis.com/oauth2/v1/userinfo";

/// Errors from the login verification flow.
///
/// The denial variants each carry a distinct human-readable reason and
/// abort the login immediately; no partial session is ever created.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("identity provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("identity provider returned {status} for {url}")]
    Rejected { url: String, status: u16 },

    #[error("something went wrong during the login")]
    MissingResponse,

    #[error("no ID token received from the provider")]
    MissingIdToken,

    #[error("invalid client ID received")]
    AudienceMismatch,

    #[error("access restricted to users of the domain {0}")]
    HostedDomainMismatch(String),
}

impl IdentityError {
    /// Whether this error denies access (as opposed to an upstream failure).
    pub fn is_access_denied(&self) -> bool {
        matches!(
            self,
            Self::MissingResponse
                | Self::MissingIdToken
                | Self::AudienceMismatch
                | Self::HostedDomainMismatch(_)
        )
    }
}

/// The provider's OpenID Connect discovery document (relevant fields only).
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryDocument {
    pub token_endpoint: Option<String>,
    pub authorization_endpoint: Option<String>,
    pub userinfo_endpoint: Option<String>,
}

/// Claims returned by the tokeninfo endpoint (relevant fields only).
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    /// Audience: the client ID the token was issued for.
    pub aud: Option<String>,
    /// Hosted domain, present for organizational accounts.
    pub hd: Option<String>,
    pub email: Option<String>,
    pub sub: Option<String>,
}

/// A verified external-provider login.
#[derive(Debug, Clone)]
pub struct VerifiedIdentity {
    /// The verified ID token.
    pub token: String,
    /// The audience (registered client ID) the token was checked against.
    pub audience: String,
    /// The organizational domain restriction, when configured.
    pub hosted_domain: Option<String>,
}

/// Check the token claims against the registered client and the optional
/// hosted-domain restriction.
pub fn verify_claims(
    client_id: &str,
    hosted_domain: Option<&str>,
    claims: &TokenClaims,
) -> Result<(), IdentityError> {
    if claims.aud.as_deref() != Some(client_id) {
        return Err(IdentityError::AudienceMismatch);
    }
    if let Some(domain) = hosted_domain {
        if claims.hd.as_deref() != Some(domain) {
            return Err(IdentityError::HostedDomainMismatch(domain.to_string()));
        }
    }
    Ok(())
}

/// Google OpenID Connect verifier for one registered client.
#[derive(Debug, Clone)]
pub struct OidcVerifier {
    http: reqwest::blocking::Client,
    client_id: String,
    hosted_domain: Option<String>,
    discovery_url: String,
    tokeninfo_url: String,
}

impl OidcVerifier {
    pub fn new(client_id: impl Into<String>, hosted_domain: Option<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            client_id: client_id.into(),
            hosted_domain,
            discovery_url: DISCOVERY_DOCUMENT_ENDPOINT.to_string(),
            tokeninfo_url: TOKENINFO_ENDPOINT.to_string(),
        }
    }

    /// Fetch the discovery document from the provider.
    pub fn discovery_document(&self) -> Result<DiscoveryDocument, IdentityError> {
        let response = self.http.get(&self.discovery_url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(IdentityError::Rejected {
                url: self.discovery_url.clone(),
                status: status.as_u16(),
            });
        }
        Ok(response.json()?)
    }

    /// The access token URL from the discovery document, with a fallback.
    pub fn access_token_url(&self) -> Result<String, IdentityError> {
        Ok(self
            .discovery_document()?
            .token_endpoint
            .unwrap_or_else(|| DEFAULT_ACCESS_TOKEN_URL.to_string()))
    }

    /// The authorization endpoint URL from the discovery document, with a fallback.
    pub fn authorize_url(&self) -> Result<String, IdentityError> {
        Ok(self
            .discovery_document()?
            .authorization_endpoint
            .unwrap_or_else(|| DEFAULT_AUTHORIZE_URL.to_string()))
    }

    /// The user profile URL from the discovery document, with a fallback.
    pub fn profile_url(&self) -> Result<String, IdentityError> {
        Ok(self
            .discovery_document()?
            .userinfo_endpoint
            .unwrap_or_else(|| DEFAULT_PROFILE_URL.to_string()))
    }

    /// Verify a completed login.
    ///
    /// `completion` is the payload returned by the access-token exchange.
    /// Each failure (missing payload, missing ID token, audience mismatch,
    /// hosted-domain mismatch) aborts immediately with a distinct reason.
    pub fn complete_login(
        &self,
        completion: Option<&serde_json::Value>,
    ) -> Result<VerifiedIdentity, IdentityError> {
        let completion = completion.ok_or(IdentityError::MissingResponse)?;
        let id_token = completion
            .get("id_token")
            .and_then(|v| v.as_str())
            .ok_or(IdentityError::MissingIdToken)?;

        let claims = self.verify_id_token(id_token)?;
        verify_claims(&self.client_id, self.hosted_domain.as_deref(), &claims)?;

        Ok(VerifiedIdentity {
            token: id_token.to_string(),
            audience: self.client_id.clone(),
            hosted_domain: self.hosted_domain.clone(),
        })
    }

    /// Verify the ID token against the provider's tokeninfo endpoint.
    fn verify_id_token(&self, id_token: &str) -> Result<TokenClaims, IdentityError> {
        let response = self
            .http
            .post(&self.tokeninfo_url)
            .form(&[("id_token", id_token)])
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(IdentityError::Rejected {
                url: self.tokeninfo_url.clone(),
                status: status.as_u16(),
            });
        }
        Ok(response.json()?)
    }
}
