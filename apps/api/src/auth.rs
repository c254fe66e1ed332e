use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use venue_core::{AppError, AppResult};

/// Verifies HS256 bearer tokens issued by the identity service.
pub struct BearerTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

#[derive(Deserialize)]
struct TokenClaims {
    sub: Option<String>,
    user_id: Option<String>,
}

impl BearerTokenVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Returns the caller id carried by a valid token.
    pub fn verify(&self, token: &str) -> AppResult<String> {
        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|error| AppError::Unauthorized(format!("invalid bearer token: {error}")))?;

        let TokenClaims { sub, user_id } = token_data.claims;
        sub.or(user_id)
            .filter(|caller_id| !caller_id.trim().is_empty())
            .ok_or_else(|| AppError::Unauthorized("bearer token has no subject".to_owned()))
    }
}
