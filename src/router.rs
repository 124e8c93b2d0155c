use crate::auth::{self, RequestContext};
use crate::config::AppConfig;
use crate::db::Database;
use crate::domain::{LeadIntake, LeadKind, TriageConsole};
use crate::errors::{ResultResp, ServerError};
use crate::pricing::catalog::{
    ComplexityLevel, ComplexityScale, FeatureAddOn, PricingOption, TimeFrame,
};
use crate::pricing::{estimate, Catalog, CatalogVariant, Category, Selection};
use crate::responses::{
    error_to_response, html_response, html_with_status, json_response, json_with_cookie, redirect,
};
use crate::templates::pages::{admin_page, home_page, login_page, AdminVm};
use astra::{Body, Request, Response};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use tracing::debug;

/// Everything a request handler needs. Built once in `main`, shared by reference.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub config: AppConfig,
    pub intake: LeadIntake,
    pub triage: TriageConsole,
}

impl AppState {
    pub fn new(db: Database, config: AppConfig) -> Self {
        let intake = LeadIntake::new(db.clone(), config.pricing.verify_price_requests);
        let triage = TriageConsole::new(db.clone());
        Self {
            db,
            config,
            intake,
            triage,
        }
    }
}

/// Route, then render any error: JSON under `/api`, HTML elsewhere.
pub fn respond(req: Request, state: &AppState) -> Response {
    let api = req.uri().path().starts_with("/api/");
    handle(req, state).unwrap_or_else(|err| error_to_response(err, api))
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();
    let cookie_header = req
        .headers()
        .get("Cookie")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    debug!("{} {}", method, path);

    let now = Utc::now();
    let ctx = RequestContext::from_cookie_header(
        &state.db,
        &state.config.sessions,
        cookie_header.as_deref(),
        now.timestamp(),
    )?;

    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    let limit = state.config.server.max_body_bytes;

    match (method.as_str(), segments.as_slice()) {
        // HTML
        ("GET", [""]) => html_response(home_page(ctx.principal.as_ref())),
        ("GET", ["login"]) => html_response(login_page(None)),
        ("POST", ["login"]) => {
            let form = parse_form(&read_body(req, limit)?);
            let username = form.get("username").map(String::as_str).unwrap_or("");
            let password = form.get("password").map(String::as_str).unwrap_or("");

            match auth::login(
                &state.db,
                &state.config.sessions,
                username,
                password,
                now.timestamp(),
            ) {
                Ok(outcome) => redirect(
                    "/admin",
                    Some(&state.config.sessions.session_cookie(&outcome.token)),
                ),
                Err(ServerError::Unauthorized(msg)) => {
                    html_with_status(401, login_page(Some(&msg)))
                }
                Err(e) => Err(e),
            }
        }
        ("POST", ["logout"]) => {
            auth::logout(&state.db, &ctx, now.timestamp())?;
            redirect("/", Some(&state.config.sessions.clear_cookie()))
        }
        ("GET", ["admin"]) => admin_dashboard(state, &ctx),
        ("POST", ["admin", kind, id, "status"]) => {
            let kind = lead_kind(kind)?;
            let id = parse_id(id)?;
            let form = parse_form(&read_body(req, limit)?);
            let status = form.get("status").map(String::as_str).unwrap_or("");
            match state.triage.transition_status(&ctx, kind, id, status) {
                Ok(_) => redirect(&format!("/admin#{}", kind.slug()), None),
                Err(ServerError::Unauthorized(_)) => redirect("/login", None),
                Err(e) => Err(e),
            }
        }

        // Pricing
        ("GET", ["api", "pricing", catalog]) => {
            let catalog = Catalog::get(catalog_variant(catalog)?);
            json_response(200, &CatalogView::of(catalog))
        }
        ("POST", ["api", "pricing", catalog, "estimate"]) => {
            let catalog = Catalog::get(catalog_variant(catalog)?);
            let selection: Selection = parse_json(&read_body(req, limit)?)?;
            json_response(200, &estimate(catalog, &selection))
        }
        ("GET", ["api", "pricing", catalog, category]) => {
            let catalog = Catalog::get(catalog_variant(catalog)?);
            let category = Category::from_slug(category).ok_or(ServerError::NotFound)?;
            json_response(200, &catalog.options_in(category))
        }

        // Auth
        ("POST", ["api", "auth", "login"]) => {
            let creds: Credentials = parse_json(&read_body(req, limit)?)?;
            let outcome = auth::login(
                &state.db,
                &state.config.sessions,
                &creds.username,
                &creds.password,
                now.timestamp(),
            )?;
            json_with_cookie(
                200,
                &json!({ "authenticated": true, "user": outcome.principal }),
                &state.config.sessions.session_cookie(&outcome.token),
            )
        }
        ("POST", ["api", "auth", "logout"]) => {
            auth::logout(&state.db, &ctx, now.timestamp())?;
            json_with_cookie(
                200,
                &json!({ "authenticated": false }),
                &state.config.sessions.clear_cookie(),
            )
        }
        ("GET", ["api", "auth", "session"]) => json_response(
            200,
            &json!({
                "authenticated": ctx.principal.is_some(),
                "user": ctx.principal,
            }),
        ),

        // Admin
        ("GET", ["api", "admin", kind]) => {
            let kind = lead_kind(kind)?;
            json_response(200, &state.triage.list_records(&ctx, kind)?)
        }
        ("GET", ["api", "admin", kind, id]) => {
            let kind = lead_kind(kind)?;
            let id = parse_id(id)?;
            json_response(200, &state.triage.get_record(&ctx, kind, id)?)
        }
        ("PATCH", ["api", "admin", kind, id, "status"]) => {
            let kind = lead_kind(kind)?;
            let id = parse_id(id)?;
            ctx.require_admin()?;
            let change: StatusChange = parse_json(&read_body(req, limit)?)?;
            let status = change.status.unwrap_or_default();
            json_response(
                200,
                &state.triage.transition_status(&ctx, kind, id, &status)?,
            )
        }

        // Intake
        ("POST", ["api", kind]) => {
            let kind = lead_kind(kind)?;
            let body = read_body(req, limit)?;
            json_response(201, &state.intake.submit(kind, &body, now)?)
        }

        _ => Err(ServerError::NotFound),
    }
}

fn admin_dashboard(state: &AppState, ctx: &RequestContext) -> ResultResp {
    let principal = match ctx.require_admin() {
        Ok(p) => p,
        Err(ServerError::Unauthorized(_)) => return redirect("/login", None),
        Err(e) => return Err(e),
    };

    let mut sections = Vec::with_capacity(LeadKind::ALL.len());
    for kind in LeadKind::ALL {
        sections.push((kind, state.triage.list_records(ctx, kind)?));
    }

    html_response(admin_page(&AdminVm {
        principal,
        sections,
    }))
}

#[derive(Debug, Deserialize)]
struct Credentials {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Deserialize)]
struct StatusChange {
    status: Option<String>,
}

/// Whole catalog as served to the calculators.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogView {
    variant: CatalogVariant,
    complexity_scale: ComplexityScale,
    categories: Vec<CategoryView>,
    add_ons: BTreeMap<&'static str, &'static [FeatureAddOn]>,
    complexity_levels: &'static [ComplexityLevel],
    time_frames: &'static [TimeFrame],
}

#[derive(Debug, Serialize)]
struct CategoryView {
    id: Category,
    title: &'static str,
    options: Vec<&'static PricingOption>,
}

impl CatalogView {
    fn of(catalog: &'static Catalog) -> Self {
        let add_ons = catalog
            .options()
            .iter()
            .map(|o| (o.id, catalog.add_ons(o.id)))
            .filter(|(_, list)| !list.is_empty())
            .collect();

        Self {
            variant: catalog.variant,
            complexity_scale: catalog.complexity_scale,
            categories: Category::ALL
                .into_iter()
                .map(|c| CategoryView {
                    id: c,
                    title: c.title(),
                    options: catalog.options_in(c),
                })
                .collect(),
            add_ons,
            complexity_levels: catalog.complexity_levels(),
            time_frames: catalog.time_frames(),
        }
    }
}

fn lead_kind(slug: &str) -> Result<LeadKind, ServerError> {
    LeadKind::from_slug(slug).ok_or(ServerError::NotFound)
}

fn catalog_variant(slug: &str) -> Result<CatalogVariant, ServerError> {
    CatalogVariant::from_slug(slug).ok_or(ServerError::NotFound)
}

fn parse_id(raw: &str) -> Result<i64, ServerError> {
    raw.parse().map_err(|_| ServerError::NotFound)
}

/// Read at most `limit` bytes of the request body.
fn read_body(req: Request, limit: usize) -> Result<Vec<u8>, ServerError> {
    let mut body: Body = req.into_body();
    let mut buf = Vec::new();
    body.reader()
        .take(limit as u64 + 1)
        .read_to_end(&mut buf)?;
    if buf.len() > limit {
        return Err(ServerError::PayloadTooLarge);
    }
    Ok(buf)
}

fn parse_json<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, ServerError> {
    serde_json::from_slice(body)
        .map_err(|e| ServerError::BadRequest(format!("invalid JSON body: {e}")))
}

fn parse_form(body: &[u8]) -> HashMap<String, String> {
    url::form_urlencoded::parse(body).into_owned().collect()
}
