use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::config::JwtConfig;

/// Public part of the token: who the bearer is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUserPayload {
    pub sub: i64,
    pub username: String,
}

/// Full claim set as signed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl Claims {
    /// The `{sub, username}` part exposed by the profile endpoint.
    pub fn payload(&self) -> TokenUserPayload {
        TokenUserPayload {
            sub: self.sub,
            username: self.username.clone(),
        }
    }
}

/// Signs and verifies HS256 tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expires_in_secs: i64,
}

impl TokenService {
    /// Builds HS256 keys from the shared secret.
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            expires_in_secs: i64::try_from(config.expires_in.as_secs()).unwrap_or(i64::MAX),
        }
    }

    /// Signs `payload` with fresh `iat`, `exp` and `jti` claims.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use mediamine_auth::{JwtConfig, TokenService, TokenUserPayload};
    ///
    /// let tokens = TokenService::new(&JwtConfig {
    ///     secret: "change-me".into(),
    ///     expires_in: Duration::from_secs(60),
    /// });
    /// let token = tokens
    ///     .sign(&TokenUserPayload { sub: 7, username: "jdoe".into() })
    ///     .unwrap();
    ///
    /// let claims = tokens.verify(&token).unwrap();
    /// assert_eq!(claims.username, "jdoe");
    /// assert_eq!(claims.exp - claims.iat, 60);
    /// ```
    pub fn sign(&self, payload: &TokenUserPayload) -> Result<String, jsonwebtoken::errors::Error> {
        let iat = OffsetDateTime::now_utc().unix_timestamp();
        let claims = Claims {
            sub: payload.sub,
            username: payload.username.clone(),
            iat,
            exp: iat.saturating_add(self.expires_in_secs),
            jti: Uuid::new_v4().to_string(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    /// Checks signature and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let validation = Validation::new(Algorithm::HS256);
        Ok(decode::<Claims>(token, &self.decoding, &validation)?.claims)
    }

    /// Checks the signature only. Used to read back a token this service just
    /// issued.
    pub fn decode(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        Ok(decode::<Claims>(token, &self.decoding, &validation)?.claims)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("expires_in_secs", &self.expires_in_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn service(secret: &str, expires_in: Duration) -> TokenService {
        TokenService::new(&JwtConfig {
            secret: secret.to_string(),
            expires_in,
        })
    }

    fn payload() -> TokenUserPayload {
        TokenUserPayload {
            sub: 42,
            username: "jdoe".to_string(),
        }
    }

    #[test]
    fn signed_token_carries_payload_and_expiry() {
        let tokens = service("test-secret", Duration::from_secs(600));
        let token = tokens.sign(&payload()).unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.payload(), payload());
        assert_eq!(claims.exp - claims.iat, 600);
        assert!(Uuid::parse_str(&claims.jti).is_ok());
    }

    #[test]
    fn every_token_gets_its_own_id() {
        let tokens = service("test-secret", Duration::from_secs(600));
        let a = tokens.decode(&tokens.sign(&payload()).unwrap()).unwrap();
        let b = tokens.decode(&tokens.sign(&payload()).unwrap()).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn other_secret_is_rejected() {
        let token = service("one", Duration::from_secs(600)).sign(&payload()).unwrap();
        let other = service("two", Duration::from_secs(600));
        assert!(other.verify(&token).is_err());
        assert!(other.decode(&token).is_err());
    }

    #[test]
    fn expired_token_fails_verify_but_still_decodes() {
        let tokens = service("test-secret", Duration::ZERO);
        let claims = Claims {
            exp: OffsetDateTime::now_utc().unix_timestamp() - 3600,
            ..tokens.decode(&tokens.sign(&payload()).unwrap()).unwrap()
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &tokens.encoding).unwrap();

        assert!(tokens.verify(&token).is_err());
        assert_eq!(tokens.decode(&token).unwrap().exp, claims.exp);
    }

    #[test]
    fn garbage_is_rejected() {
        let tokens = service("test-secret", Duration::from_secs(600));
        assert!(tokens.verify("invalid.token.here").is_err());
    }
}
