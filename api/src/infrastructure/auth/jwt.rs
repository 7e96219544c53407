use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::token_codec::{TokenCodec, TokenDecodeError};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub viewer_id: String,
    pub exp: usize,
}

/// HS256 tokens carrying a `viewer_id` claim.
pub struct JwtTokenCodec {
    secret: String,
    expires_secs: i64,
}

impl JwtTokenCodec {
    pub fn new(secret: impl Into<String>, expires_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            expires_secs,
        }
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, viewer_id: Uuid) -> anyhow::Result<String> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            viewer_id: viewer_id.to_string(),
            exp: (now + self.expires_secs).max(0) as usize,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;
        Ok(token)
    }

    fn decode(&self, token: &str) -> Result<Uuid, TokenDecodeError> {
        let data = jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| TokenDecodeError::Invalid(e.into()))?;
        Uuid::parse_str(&data.claims.viewer_id).map_err(|_| TokenDecodeError::BadClaim)
    }
}
