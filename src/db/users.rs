// src/db/users.rs
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{info, instrument};

use crate::errors::ServerError;

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
}

/// Create the user, or reset password and admin flag if the username exists.
/// Returns the user id.
#[instrument(skip(conn, password_hash))]
pub fn upsert_user(
    conn: &Connection,
    username: &str,
    password_hash: &str,
    is_admin: bool,
    now: i64,
) -> Result<i64, ServerError> {
    let id: i64 = conn
        .query_row(
            r#"
            insert into users (username, password_hash, is_admin, created_at)
            values (?1, ?2, ?3, ?4)
            on conflict(username) do update set
              password_hash = excluded.password_hash,
              is_admin = excluded.is_admin
            returning id
            "#,
            params![username, password_hash, is_admin, now],
            |r| r.get(0),
        )
        .map_err(|e| ServerError::DbError(format!("upsert user failed: {e}")))?;

    info!("User '{}' (id {}) saved, admin = {}", username, id, is_admin);
    Ok(id)
}

pub fn find_user_by_username(
    conn: &Connection,
    username: &str,
) -> Result<Option<UserRow>, ServerError> {
    conn.query_row(
        "select id, username, password_hash, is_admin from users where username = ?",
        params![username],
        |r| {
            Ok(UserRow {
                id: r.get(0)?,
                username: r.get(1)?,
                password_hash: r.get(2)?,
                is_admin: r.get(3)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select user failed: {e}")))
}

pub fn touch_last_login(conn: &Connection, user_id: i64, now: i64) -> Result<(), ServerError> {
    conn.execute(
        "update users set last_login_at = ? where id = ?",
        params![now, user_id],
    )
    .map_err(|e| ServerError::DbError(format!("update last_login_at failed: {e}")))?;
    Ok(())
}
