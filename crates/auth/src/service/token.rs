use crate::{abstract_trait::auth::ActivationTokenTrait, model::user::User};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared::errors::ServiceError;
use tracing::warn;

pub const ACTIVATION_TOKEN: &str = "activation";

#[derive(Debug, Serialize, Deserialize)]
struct ActivationClaims {
    user_id: i64,
    state: String,
    token_type: String,
    iat: usize,
    exp: usize,
}

/// Issues signed activation tokens bound to the user's current state.
///
/// The `state` claim is a digest of the fields that change once the account
/// is activated (or its password replaced), so a token stops validating as
/// soon as it has been used. Nothing is persisted.
#[derive(Debug, Clone)]
pub struct ActivationTokenGenerator {
    secret: String,
    ttl: Duration,
}

impl ActivationTokenGenerator {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            secret: secret.to_string(),
            ttl,
        }
    }

    fn state_fingerprint(user: &User) -> String {
        let state = format!(
            "{}:{}:{}",
            user.user_id, user.password, user.is_email_verified
        );

        format!("{:x}", Sha256::digest(state.as_bytes()))
    }
}

impl ActivationTokenTrait for ActivationTokenGenerator {
    fn make_token(&self, user: &User) -> Result<String, ServiceError> {
        let now = Utc::now();

        let claims = ActivationClaims {
            user_id: user.user_id as i64,
            state: Self::state_fingerprint(user),
            token_type: ACTIVATION_TOKEN.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + self.ttl).timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(ServiceError::Jwt)
    }

    fn check_token(&self, user: &User, token: &str) -> bool {
        let decoding_key = DecodingKey::from_secret(self.secret.as_ref());

        let claims = match decode::<ActivationClaims>(token, &decoding_key, &Validation::default())
        {
            Ok(data) => data.claims,
            Err(e) => {
                warn!("⚠️ Rejected activation token: {e}");
                return false;
            }
        };

        claims.token_type == ACTIVATION_TOKEN
            && claims.user_id == user.user_id as i64
            && claims.state == Self::state_fingerprint(user)
    }
}

/// URL-safe base64 (no padding) of the decimal user id.
pub fn encode_uid(user_id: i32) -> String {
    URL_SAFE_NO_PAD.encode(user_id.to_string())
}

pub fn decode_uid(uidb64: &str) -> Option<i32> {
    let bytes = URL_SAFE_NO_PAD.decode(uidb64).ok()?;
    let decimal = String::from_utf8(bytes).ok()?;

    decimal.parse::<i32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(user_id: i32) -> User {
        User {
            user_id,
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "$2b$04$hash".into(),
            is_email_verified: false,
            created_at: None,
            updated_at: None,
        }
    }

    fn generator() -> ActivationTokenGenerator {
        ActivationTokenGenerator::new("test-secret", Duration::hours(72))
    }

    #[test]
    fn test_fresh_token_is_valid_for_its_user_only() {
        let tokens = generator();
        let alice = user(1);

        let token = tokens.make_token(&alice).unwrap();

        assert!(tokens.check_token(&alice, &token));
        assert!(!tokens.check_token(&user(2), &token));
    }

    #[test]
    fn test_token_stops_working_once_user_is_verified() {
        let tokens = generator();
        let mut alice = user(1);
        let token = tokens.make_token(&alice).unwrap();

        alice.is_email_verified = true;

        assert!(!tokens.check_token(&alice, &token));
    }

    #[test]
    fn test_tampered_foreign_or_expired_tokens_fail() {
        let tokens = generator();
        let alice = user(1);
        let token = tokens.make_token(&alice).unwrap();

        let mut tampered = token.clone();
        tampered.push('x');
        assert!(!tokens.check_token(&alice, &tampered));
        assert!(!tokens.check_token(&alice, "not-a-token"));

        let foreign = ActivationTokenGenerator::new("other-secret", Duration::hours(72));
        assert!(!tokens.check_token(&alice, &foreign.make_token(&alice).unwrap()));

        let expired = ActivationTokenGenerator::new("test-secret", Duration::hours(-2));
        assert!(!tokens.check_token(&alice, &expired.make_token(&alice).unwrap()));
    }

    #[test]
    fn test_uid_encoding() {
        assert_eq!(encode_uid(1), "MQ");
        assert_eq!(decode_uid(&encode_uid(4821)), Some(4821));

        assert_eq!(decode_uid("!!!"), None);
        // "abc"
        assert_eq!(decode_uid("YWJj"), None);
        assert_eq!(decode_uid(""), None);
    }
}
