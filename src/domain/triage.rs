// src/domain/triage.rs
use tracing::{info, instrument};

use crate::auth::RequestContext;
use crate::db::leads::{get_lead, list_leads, update_lead_status};
use crate::db::Database;
use crate::domain::lead::{LeadKind, LeadRecord};
use crate::domain::validation::{clean, Problem, ValidationErrors};
use crate::errors::ServerError;

/// Admin-only read/update surface over stored leads.
///
/// Every operation checks the caller before touching the store.
#[derive(Debug, Clone)]
pub struct TriageConsole {
    db: Database,
}

impl TriageConsole {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All records of `kind`, oldest first.
    #[instrument(skip(self, ctx), fields(kind = kind.slug()))]
    pub fn list_records(
        &self,
        ctx: &RequestContext,
        kind: LeadKind,
    ) -> Result<Vec<LeadRecord>, ServerError> {
        ctx.require_admin()?;
        self.db.with_conn(|conn| list_leads(conn, kind))
    }

    pub fn get_record(
        &self,
        ctx: &RequestContext,
        kind: LeadKind,
        id: i64,
    ) -> Result<LeadRecord, ServerError> {
        ctx.require_admin()?;
        self.db
            .with_conn(|conn| get_lead(conn, kind, id))?
            .ok_or(ServerError::NotFound)
    }

    /// Set the status of one record. Any non-blank text is accepted and
    /// stored trimmed; the conventional values are not enforced.
    #[instrument(skip(self, ctx), fields(kind = kind.slug()))]
    pub fn transition_status(
        &self,
        ctx: &RequestContext,
        kind: LeadKind,
        id: i64,
        new_status: &str,
    ) -> Result<LeadRecord, ServerError> {
        let admin = ctx.require_admin()?;

        let Some(status) = clean(Some(new_status)) else {
            let mut errs = ValidationErrors::new();
            errs.push("status", Problem::Missing, "status is required");
            return Err(ServerError::Validation(errs));
        };

        let record = self
            .db
            .with_conn(|conn| update_lead_status(conn, kind, id, &status))?
            .ok_or(ServerError::NotFound)?;

        info!(
            "{} set {} #{} to '{}'",
            admin.username,
            kind.slug(),
            id,
            record.status()
        );
        Ok(record)
    }
}
