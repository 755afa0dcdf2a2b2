use crate::{abstract_trait::JwtServiceTrait, errors::ServiceError};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN: &str = "access";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub exp: usize,
    pub iat: usize,
    pub token_type: String,
}

impl Claims {
    pub fn new(user_id: i64, exp: usize, iat: usize, token_type: String) -> Self {
        Claims {
            user_id,
            exp,
            iat,
            token_type,
        }
    }
}

/// Signs the session cookie handed out on login.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub jwt_secret: String,
    pub access_ttl: Duration,
}

impl JwtConfig {
    pub fn new(jwt_secret: &str, access_ttl: Duration) -> Self {
        JwtConfig {
            jwt_secret: jwt_secret.to_string(),
            access_ttl,
        }
    }
}

impl JwtServiceTrait for JwtConfig {
    fn generate_token(&self, user_id: i64, token_type: &str) -> Result<String, ServiceError> {
        let now = Utc::now();
        let iat = now.timestamp() as usize;
        let exp = match token_type {
            ACCESS_TOKEN => (now + self.access_ttl).timestamp() as usize,
            _ => return Err(ServiceError::InvalidTokenType),
        };

        let claims = Claims::new(user_id, exp, iat, token_type.to_string());

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .map_err(ServiceError::Jwt)
    }

    fn verify_token(&self, token: &str, expected_type: &str) -> Result<i64, ServiceError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_ref());
        let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
            .map_err(ServiceError::Jwt)?;

        let current_time = Utc::now().timestamp() as usize;

        if token_data.claims.exp < current_time {
            return Err(ServiceError::TokenExpired);
        }

        if token_data.claims.token_type != expected_type {
            return Err(ServiceError::InvalidTokenType);
        }

        Ok(token_data.claims.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_round_trip() {
        let jwt = JwtConfig::new("test-secret", Duration::minutes(5));

        let token = jwt.generate_token(42, ACCESS_TOKEN).unwrap();
        assert_eq!(jwt.verify_token(&token, ACCESS_TOKEN).unwrap(), 42);
    }

    #[test]
    fn test_rejects_foreign_secret_and_unknown_type() {
        let jwt = JwtConfig::new("test-secret", Duration::minutes(5));
        let other = JwtConfig::new("other-secret", Duration::minutes(5));

        let token = other.generate_token(7, ACCESS_TOKEN).unwrap();
        assert!(matches!(
            jwt.verify_token(&token, ACCESS_TOKEN),
            Err(ServiceError::Jwt(_))
        ));
        assert!(matches!(
            jwt.generate_token(7, "refresh"),
            Err(ServiceError::InvalidTokenType)
        ));
    }
}
