// src/db/leads.rs
//
// Lead store: insert, list, fetch and status update for the four lead tables.
// Each write is a single `... returning` statement, so it is atomic per row.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::domain::lead::{
    ContactMessage, FreelancerApplication, Lead, LeadKind, LeadRecord, NewLead, PriceRequest,
    ProjectRequest,
};
use crate::errors::ServerError;
use crate::pricing::CatalogVariant;

/// Payload columns per kind, in the order the row mapper reads them
/// (after `id, created_at, status`).
fn payload_columns(kind: LeadKind) -> &'static str {
    match kind {
        LeadKind::ProjectRequest => {
            "client_name, client_email, client_phone, company, project_type, budget, timeline, description"
        }
        LeadKind::FreelancerApplication => {
            "name, email, phone, specialty, experience, portfolio_url, cover_letter, languages"
        }
        LeadKind::ContactMessage => "name, email, phone, subject, message",
        LeadKind::PriceRequest => {
            "name, email, phone, company, catalog, category, option_id, complexity, time_frame, features, estimated_total, message"
        }
    }
}

fn select_columns(kind: LeadKind) -> String {
    format!("id, created_at, status, {}", payload_columns(kind))
}

fn json_column<T: DeserializeOwned>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn optional_json_column<T: DeserializeOwned>(
    row: &Row<'_>,
    idx: usize,
) -> rusqlite::Result<Option<T>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|s| {
        serde_json::from_str(&s)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    })
    .transpose()
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ServerError> {
    serde_json::to_string(value)
        .map_err(|e| ServerError::DbError(format!("encode json column failed: {e}")))
}

fn map_row(kind: LeadKind, row: &Row<'_>) -> rusqlite::Result<LeadRecord> {
    let id: i64 = row.get(0)?;
    let created_at: DateTime<Utc> = row.get(1)?;
    let status: String = row.get(2)?;

    let record = match kind {
        LeadKind::ProjectRequest => LeadRecord::ProjectRequest(Lead::from_store(
            id,
            created_at,
            status,
            ProjectRequest {
                client_name: row.get(3)?,
                client_email: row.get(4)?,
                client_phone: row.get(5)?,
                company: row.get(6)?,
                project_type: row.get(7)?,
                budget: row.get(8)?,
                timeline: row.get(9)?,
                description: row.get(10)?,
            },
        )),
        LeadKind::FreelancerApplication => LeadRecord::FreelancerApplication(Lead::from_store(
            id,
            created_at,
            status,
            FreelancerApplication {
                name: row.get(3)?,
                email: row.get(4)?,
                phone: row.get(5)?,
                specialty: row.get(6)?,
                experience: row.get(7)?,
                portfolio_url: row.get(8)?,
                cover_letter: row.get(9)?,
                languages: json_column(row, 10)?,
            },
        )),
        LeadKind::ContactMessage => LeadRecord::ContactMessage(Lead::from_store(
            id,
            created_at,
            status,
            ContactMessage {
                name: row.get(3)?,
                email: row.get(4)?,
                phone: row.get(5)?,
                subject: row.get(6)?,
                message: row.get(7)?,
            },
        )),
        LeadKind::PriceRequest => {
            let catalog: String = row.get(7)?;
            let catalog = CatalogVariant::from_slug(&catalog).ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    7,
                    Type::Text,
                    format!("unknown catalog '{catalog}'").into(),
                )
            })?;
            LeadRecord::PriceRequest(Lead::from_store(
                id,
                created_at,
                status,
                PriceRequest {
                    name: row.get(3)?,
                    email: row.get(4)?,
                    phone: row.get(5)?,
                    company: row.get(6)?,
                    catalog,
                    category: row.get(8)?,
                    option_id: row.get(9)?,
                    complexity: optional_json_column(row, 10)?,
                    time_frame: row.get(11)?,
                    features: json_column(row, 12)?,
                    estimated_total: row.get(13)?,
                    message: row.get(14)?,
                },
            ))
        }
    };
    Ok(record)
}

/// Insert a validated submission with the kind's initial status.
/// Returns the stored record including its assigned id and timestamp.
#[instrument(skip(conn, lead), fields(kind = ?lead.kind()))]
pub fn insert_lead(
    conn: &Connection,
    lead: &NewLead,
    now: DateTime<Utc>,
) -> Result<LeadRecord, ServerError> {
    let kind = lead.kind();
    let status = kind.initial_status();
    let returning = select_columns(kind);
    let table = kind.table();

    let result = match lead {
        NewLead::ProjectRequest(p) => conn.query_row(
            &format!(
                "insert into {table} (created_at, status, {})
                 values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                 returning {returning}",
                payload_columns(kind)
            ),
            params![
                now,
                status,
                p.client_name,
                p.client_email,
                p.client_phone,
                p.company,
                p.project_type,
                p.budget,
                p.timeline,
                p.description
            ],
            |row| map_row(kind, row),
        ),
        NewLead::FreelancerApplication(p) => conn.query_row(
            &format!(
                "insert into {table} (created_at, status, {})
                 values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                 returning {returning}",
                payload_columns(kind)
            ),
            params![
                now,
                status,
                p.name,
                p.email,
                p.phone,
                p.specialty,
                p.experience,
                p.portfolio_url,
                p.cover_letter,
                to_json(&p.languages)?
            ],
            |row| map_row(kind, row),
        ),
        NewLead::ContactMessage(p) => conn.query_row(
            &format!(
                "insert into {table} (created_at, status, {})
                 values (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 returning {returning}",
                payload_columns(kind)
            ),
            params![now, status, p.name, p.email, p.phone, p.subject, p.message],
            |row| map_row(kind, row),
        ),
        NewLead::PriceRequest(p) => {
            let complexity = p.complexity.as_ref().map(to_json).transpose()?;
            conn.query_row(
                &format!(
                    "insert into {table} (created_at, status, {})
                     values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
                     returning {returning}",
                    payload_columns(kind)
                ),
                params![
                    now,
                    status,
                    p.name,
                    p.email,
                    p.phone,
                    p.company,
                    p.catalog.slug(),
                    p.category,
                    p.option_id,
                    complexity,
                    p.time_frame,
                    to_json(&p.features)?,
                    p.estimated_total,
                    p.message
                ],
                |row| map_row(kind, row),
            )
        }
    };

    let record = result.map_err(|e| ServerError::DbError(format!("insert {table} failed: {e}")))?;
    info!("Stored {} #{} ({})", table, record.id(), record.status());
    Ok(record)
}

/// All records of a kind, oldest first.
#[instrument(skip(conn))]
pub fn list_leads(conn: &Connection, kind: LeadKind) -> Result<Vec<LeadRecord>, ServerError> {
    let table = kind.table();
    let mut stmt = conn
        .prepare(&format!(
            "select {} from {table} order by created_at asc, id asc",
            select_columns(kind)
        ))
        .map_err(|e| ServerError::DbError(format!("prepare list {table} failed: {e}")))?;

    let rows = stmt
        .query_map([], |row| map_row(kind, row))
        .map_err(|e| ServerError::DbError(format!("list {table} failed: {e}")))?;

    let mut records = Vec::new();
    for r in rows {
        records.push(r.map_err(|e| ServerError::DbError(format!("map {table} row failed: {e}")))?);
    }
    debug!("Fetched {} rows from {}", records.len(), table);
    Ok(records)
}

#[instrument(skip(conn))]
pub fn get_lead(
    conn: &Connection,
    kind: LeadKind,
    id: i64,
) -> Result<Option<LeadRecord>, ServerError> {
    let table = kind.table();
    conn.query_row(
        &format!("select {} from {table} where id = ?1", select_columns(kind)),
        params![id],
        |row| map_row(kind, row),
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select {table} failed: {e}")))
}

/// Overwrite the status of one record. `None` when the id does not exist,
/// in which case nothing was written. Last write wins.
#[instrument(skip(conn))]
pub fn update_lead_status(
    conn: &Connection,
    kind: LeadKind,
    id: i64,
    status: &str,
) -> Result<Option<LeadRecord>, ServerError> {
    let table = kind.table();
    conn.query_row(
        &format!(
            "update {table} set status = ?1 where id = ?2 returning {}",
            select_columns(kind)
        ),
        params![status, id],
        |row| map_row(kind, row),
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("update {table} status failed: {e}")))
}
