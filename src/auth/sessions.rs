// src/auth/sessions.rs
use rusqlite::{params, Connection, OptionalExtension};

use crate::auth::token::{generate_session_token, hash_token};
use crate::auth::Principal;
use crate::errors::ServerError;

/// Store a new session for `user_id` and return the raw token for the cookie.
pub fn create_session(
    conn: &Connection,
    user_id: i64,
    now: i64,
    ttl_secs: i64,
) -> Result<String, ServerError> {
    let raw_token = generate_session_token();
    let hash = hash_token(&raw_token);
    let expires_at = now + ttl_secs;

    conn.execute(
        r#"
        insert into sessions (user_id, token_hash, created_at, expires_at)
        values (?, ?, ?, ?)
        "#,
        params![user_id, hash.as_slice(), now, expires_at],
    )
    .map_err(|e| ServerError::DbError(format!("create session failed: {e}")))?;

    Ok(raw_token)
}

/// Principal behind a live (unexpired, unrevoked) session token.
pub fn load_principal_from_session(
    conn: &Connection,
    raw_token: &str,
    now: i64,
) -> Result<Option<Principal>, ServerError> {
    let hash = hash_token(raw_token);

    conn.query_row(
        r#"
        select u.id, u.username, u.is_admin
        from sessions s
        join users u on u.id = s.user_id
        where s.token_hash = ?
          and s.expires_at > ?
          and s.revoked_at is null
        "#,
        params![hash.as_slice(), now],
        |row| {
            Ok(Principal {
                user_id: row.get(0)?,
                username: row.get(1)?,
                is_admin: row.get(2)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))
}

/// Mark the session revoked. Returns whether a live session was found.
pub fn revoke_session(conn: &Connection, raw_token: &str, now: i64) -> Result<bool, ServerError> {
    let hash = hash_token(raw_token);
    let updated = conn
        .execute(
            "update sessions set revoked_at = ? where token_hash = ? and revoked_at is null",
            params![now, hash.as_slice()],
        )
        .map_err(|e| ServerError::DbError(format!("revoke session failed: {e}")))?;
    Ok(updated > 0)
}
