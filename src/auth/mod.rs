// src/auth/mod.rs
//
// Session gate for the admin console: password login, cookie sessions and a
// request-scoped context carrying the authenticated principal, if any.

pub mod password;
pub mod sessions;
pub mod token;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::db::users;
use crate::db::Database;
use crate::errors::ServerError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub user_id: i64,
    pub username: String,
    pub is_admin: bool,
}

/// `[sessions]` section of the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub ttl_secs: i64,
    pub cookie_name: String,
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 60 * 60 * 24 * 7, // 7 days
            cookie_name: "session".to_string(),
            secure_cookie: false,
        }
    }
}

impl SessionConfig {
    pub fn session_cookie(&self, token: &str) -> String {
        let secure = if self.secure_cookie { "; Secure" } else { "" };
        format!(
            "{}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}{secure}",
            self.cookie_name, self.ttl_secs
        )
    }

    pub fn clear_cookie(&self) -> String {
        let secure = if self.secure_cookie { "; Secure" } else { "" };
        format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0{secure}",
            self.cookie_name
        )
    }
}

/// Value of cookie `name` in a `Cookie:` header.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        (k == name && !v.is_empty()).then_some(v)
    })
}

/// Who is making this request. Built once per request, never stored globally.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub principal: Option<Principal>,
    pub session_token: Option<String>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn from_cookie_header(
        db: &Database,
        cfg: &SessionConfig,
        cookie_header: Option<&str>,
        now: i64,
    ) -> Result<Self, ServerError> {
        let Some(token) = cookie_header.and_then(|h| cookie_value(h, &cfg.cookie_name)) else {
            return Ok(Self::anonymous());
        };

        let principal =
            db.with_conn(|conn| sessions::load_principal_from_session(conn, token, now))?;
        Ok(Self {
            principal,
            session_token: Some(token.to_string()),
        })
    }

    /// No session -> Unauthorized; session without admin rights -> Forbidden.
    pub fn require_admin(&self) -> Result<&Principal, ServerError> {
        match &self.principal {
            None => Err(ServerError::Unauthorized("login required".into())),
            Some(p) if !p.is_admin => {
                warn!("User '{}' attempted an admin action", p.username);
                Err(ServerError::Forbidden("admin access required".into()))
            }
            Some(p) => Ok(p),
        }
    }
}

#[derive(Debug)]
pub struct LoginOutcome {
    pub principal: Principal,
    /// Raw session token for the cookie.
    pub token: String,
}

/// Exchange credentials for a new session.
#[instrument(skip(db, cfg, password))]
pub fn login(
    db: &Database,
    cfg: &SessionConfig,
    username: &str,
    password: &str,
    now: i64,
) -> Result<LoginOutcome, ServerError> {
    let username = username.trim();
    let user = db.with_conn(|conn| users::find_user_by_username(conn, username))?;

    let Some(user) = user.filter(|u| password::verify_password(password, &u.password_hash)) else {
        warn!("Failed login for '{}'", username);
        return Err(ServerError::Unauthorized("invalid username or password".into()));
    };

    let token = db.with_conn(|conn| {
        users::touch_last_login(conn, user.id, now)?;
        sessions::create_session(conn, user.id, now, cfg.ttl_secs)
    })?;

    info!("User '{}' logged in", user.username);
    Ok(LoginOutcome {
        principal: Principal {
            user_id: user.id,
            username: user.username,
            is_admin: user.is_admin,
        },
        token,
    })
}

/// Revoke the caller's session, if there is one.
pub fn logout(db: &Database, ctx: &RequestContext, now: i64) -> Result<(), ServerError> {
    if let Some(token) = &ctx.session_token {
        let revoked = db.with_conn(|conn| sessions::revoke_session(conn, token, now))?;
        if revoked {
            info!(
                "Session revoked for {}",
                ctx.principal
                    .as_ref()
                    .map_or("unknown user", |p| p.username.as_str())
            );
        }
    }
    Ok(())
}

/// Create the admin account, or reset its password.
pub fn bootstrap_admin(
    db: &Database,
    username: &str,
    password: &str,
    now: i64,
) -> Result<i64, ServerError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(ServerError::Config(
            "admin username and password must not be empty".into(),
        ));
    }
    let hash = password::hash_password(password)?;
    db.with_conn(|conn| users::upsert_user(conn, username, &hash, true, now))
}
