//! JWT session token service
//!
//! Issues and verifies the HS256 tokens carried in the session cookie.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::Rng;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use shared::models::Role;
use thiserror::Error;

use crate::core::ConfigError;

/// Minimum accepted secret length
pub const MIN_SECRET_LEN: usize = 32;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Signing secret (at least 32 bytes)
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
    pub issuer: String,
    pub audience: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_minutes", &self.expiration_minutes)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

impl JwtConfig {
    /// Build the JWT configuration for `environment`.
    ///
    /// Outside development a missing `JWT_SECRET` is a hard error. In
    /// development a random per-process secret is generated, so sessions do
    /// not survive a restart.
    pub fn from_lookup<F>(lookup: &F, environment: &str) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) if secret.len() < MIN_SECRET_LEN => {
                return Err(ConfigError::WeakSecret {
                    len: secret.len(),
                    min: MIN_SECRET_LEN,
                });
            }
            Some(secret) => secret,
            None if environment == "development" => {
                tracing::warn!(
                    "JWT_SECRET not set, generating an ephemeral secret for development"
                );
                generate_ephemeral_secret()
            }
            None => return Err(ConfigError::MissingSecret(environment.to_string())),
        };

        Ok(Self {
            secret,
            expiration_minutes: crate::core::config::parse_or(
                lookup,
                "JWT_EXPIRATION_MINUTES",
                24 * 60,
            )?,
            issuer: lookup("JWT_ISSUER").unwrap_or_else(|| "staffdesk".to_string()),
            audience: lookup("JWT_AUDIENCE").unwrap_or_else(|| "staffdesk-web".to_string()),
        })
    }
}

/// 64 random alphanumeric characters from the OS RNG
pub fn generate_ephemeral_secret() -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// Claims stored in the session token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub sub: String,
    pub email: String,
    pub role: Role,
    /// Profile id, absent for accounts without a profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

/// JWT errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token expired")]
    ExpiredToken,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("token generation failed: {0}")]
    GenerationFailed(String),
}

impl JwtError {
    pub fn is_expired(&self) -> bool {
        matches!(self, JwtError::ExpiredToken)
    }
}

/// Identity written into a new token
#[derive(Debug, Clone, Copy)]
pub struct TokenSubject<'a> {
    pub account_id: &'a str,
    pub email: &'a str,
    pub role: Role,
    pub employee_id: Option<&'a str>,
}

/// JWT token service
#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a token for `subject`, valid from now
    pub fn generate_token(&self, subject: TokenSubject<'_>) -> Result<String, JwtError> {
        self.generate_token_at(subject, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn generate_token_at(
        &self,
        subject: TokenSubject<'_>,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: subject.account_id.to_string(),
            email: subject.email.to_string(),
            role: subject.role,
            employee_id: subject.employee_id.map(str::to_string),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Verify signature, issuer, audience and expiry
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_token_at(token, Utc::now())
    }

    /// Verify a token against the clock value `now`.
    ///
    /// A token is expired once `now >= exp`; there is no leeway.
    pub fn validate_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);
        validation.leeway = 0;
        // Expiry is checked below against the supplied clock
        validation.validate_exp = false;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            })?;

        if now.timestamp() >= token_data.claims.exp {
            return Err(JwtError::ExpiredToken);
        }

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Authenticated identity, injected into request extensions by the session gate
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    /// Account id
    pub id: String,
    pub email: String,
    pub role: Role,
    pub employee_id: Option<String>,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
            employee_id: claims.employee_id,
        }
    }
}

impl CurrentUser {
    /// Check a capability against the role table (claims only, see [`crate::auth::authorize_fresh`])
    pub fn has_permission(&self, permission: crate::auth::Permission) -> bool {
        crate::auth::permissions::role_has_permission(self.role, permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::with_config(JwtConfig {
            secret: generate_ephemeral_secret(),
            expiration_minutes: 24 * 60,
            issuer: "staffdesk".into(),
            audience: "staffdesk-web".into(),
        })
    }

    fn subject() -> TokenSubject<'static> {
        TokenSubject {
            account_id: "acc-1",
            email: "jane@x.com",
            role: Role::Employee,
            employee_id: Some("emp-1"),
        }
    }

    #[test]
    fn test_generate_and_validate() {
        let service = service();
        let token = service.generate_token(subject()).unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, "acc-1");
        assert_eq!(claims.email, "jane@x.com");
        assert_eq!(claims.role, Role::Employee);
        assert_eq!(claims.employee_id.as_deref(), Some("emp-1"));
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_expired_after_boundary() {
        let service = service();
        let issued = Utc::now();
        let token = service.generate_token_at(subject(), issued).unwrap();

        let just_before = issued + Duration::hours(24) - Duration::seconds(1);
        assert!(service.validate_token_at(&token, just_before).is_ok());

        let at_boundary = issued + Duration::hours(24);
        assert!(matches!(
            service.validate_token_at(&token, at_boundary),
            Err(JwtError::ExpiredToken)
        ));
    }

    #[test]
    fn test_token_issued_in_the_past_is_expired() {
        let service = service();
        let token = service
            .generate_token_at(subject(), Utc::now() - Duration::hours(25))
            .unwrap();
        let err = service.validate_token(&token).unwrap_err();
        assert!(err.is_expired());
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let service = service();
        let token = service.generate_token(subject()).unwrap();

        let (head, signature) = token.rsplit_once('.').unwrap();
        let first = signature.chars().next().unwrap();
        let replacement = if first == 'A' { 'B' } else { 'A' };
        let tampered = format!("{head}.{replacement}{}", &signature[1..]);

        let err = service.validate_token(&tampered).unwrap_err();
        assert!(matches!(err, JwtError::InvalidSignature));
        assert!(!err.is_expired());
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let service = service();
        let admin = service
            .generate_token(TokenSubject {
                role: Role::Admin,
                ..subject()
            })
            .unwrap();
        let employee = service.generate_token(subject()).unwrap();

        // Splice the admin payload onto the employee signature
        let admin_parts: Vec<&str> = admin.split('.').collect();
        let employee_parts: Vec<&str> = employee.split('.').collect();
        let forged = format!(
            "{}.{}.{}",
            employee_parts[0], admin_parts[1], employee_parts[2]
        );
        assert!(service.validate_token(&forged).is_err());
    }

    #[test]
    fn test_malformed_token_rejected() {
        let service = service();
        assert!(matches!(
            service.validate_token("not-a-jwt"),
            Err(JwtError::InvalidToken(_))
        ));
        assert!(matches!(
            service.validate_token(""),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_other_secret_rejected() {
        let token = service().generate_token(subject()).unwrap();
        assert!(service().validate_token(&token).is_err());
    }

    #[test]
    fn test_algorithm_mismatch_rejected() {
        let service = service();
        let claims = Claims {
            sub: "acc-1".into(),
            email: "jane@x.com".into(),
            role: Role::Admin,
            employee_id: None,
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
            iss: "staffdesk".into(),
            aud: "staffdesk-web".into(),
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(service.config.secret.as_bytes()),
        )
        .unwrap();
        assert!(matches!(
            service.validate_token(&token),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let issuer = service();
        let mut other = issuer.config.clone();
        other.audience = "someone-else".into();
        let verifier = JwtService::with_config(other);

        let token = issuer.generate_token(subject()).unwrap();
        assert!(verifier.validate_token(&token).is_err());
    }

    #[test]
    fn test_current_user_from_claims() {
        let service = service();
        let token = service
            .generate_token(TokenSubject {
                role: Role::Admin,
                employee_id: None,
                ..subject()
            })
            .unwrap();
        let user = CurrentUser::from(service.validate_token(&token).unwrap());
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.id, "acc-1");
        assert_eq!(user.employee_id, None);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let service = service();
        let rendered = format!("{:?}", service);
        assert!(!rendered.contains(&service.config.secret));
    }
}
