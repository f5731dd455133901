use chrono::{TimeDelta, Utc};
use rand::{RngCore, rngs::OsRng};
use sea_orm::{ActiveValue::Set, DatabaseConnection, prelude::*};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::entities::auth_session;
use crate::error::AppResult;

/// Sessions live as long as the original bearer tokens did: seven days.
const SESSION_TTL_DAYS: i64 = 7;

/// generate an opaque bearer token
pub fn generate_auth_token() -> String {
    let mut buffer = [0u8; 32];
    OsRng.fill_bytes(&mut buffer);

    let now = Utc::now().timestamp().to_string();
    let input = format!("{}:{}", hex::encode(buffer), now);

    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let result = hasher.finalize();

    hex::encode(result)
}

/// Persist a fresh session row for the user and return its token.
pub async fn issue_session(db: &DatabaseConnection, user_id: Uuid) -> AppResult<String> {
    let token = generate_auth_token();
    let session = auth_session::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        token: Set(token.clone()),
        expires_at: Set((Utc::now() + TimeDelta::days(SESSION_TTL_DAYS)).naive_utc()),
        ..Default::default()
    };
    session.insert(db).await?;

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_hex_encoded_sha256_digests() {
        let token = generate_auth_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tokens_do_not_repeat() {
        let a = generate_auth_token();
        let b = generate_auth_token();
        assert_ne!(a, b);
    }
}
