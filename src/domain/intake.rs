// src/domain/intake.rs
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use crate::db::leads::insert_lead;
use crate::db::Database;
use crate::domain::lead::{LeadKind, LeadRecord, NewLead, PriceRequest};
use crate::domain::submissions::parse_submission;
use crate::domain::validation::{Problem, ValidationErrors};
use crate::errors::ServerError;
use crate::pricing::{estimate, Catalog, Selection};

/// Public entry point for the four submission forms.
#[derive(Debug, Clone)]
pub struct LeadIntake {
    db: Database,
    verify_prices: bool,
}

impl LeadIntake {
    pub fn new(db: Database, verify_prices: bool) -> Self {
        Self { db, verify_prices }
    }

    /// Validate `body` as a `kind` submission and store it with the kind's
    /// initial status. Nothing is written when validation fails.
    #[instrument(skip(self, body), fields(kind = kind.slug()))]
    pub fn submit(
        &self,
        kind: LeadKind,
        body: &[u8],
        now: DateTime<Utc>,
    ) -> Result<LeadRecord, ServerError> {
        let lead = parse_submission(kind, body).inspect_err(|e| {
            debug!("Rejected {} submission: {}", kind.slug(), e);
        })?;

        if self.verify_prices {
            if let NewLead::PriceRequest(req) = &lead {
                verify_price(req).map_err(ServerError::Validation)?;
            }
        }

        let record = self.db.with_conn(|conn| insert_lead(conn, &lead, now))?;
        info!("New {} #{}", kind.slug(), record.id());
        Ok(record)
    }
}

impl PriceRequest {
    /// The calculator selection this request was priced from.
    pub fn selection(&self) -> Selection {
        Selection {
            option_id: Some(self.option_id.clone()),
            complexity: self.complexity.clone(),
            time_frame: self.time_frame.clone(),
            features: self.features.clone(),
        }
    }
}

/// Recompute the total from the named catalog and compare with the client's.
pub fn verify_price(req: &PriceRequest) -> Result<(), ValidationErrors> {
    let server = estimate(Catalog::get(req.catalog), &req.selection());
    let client = req.estimated_total.round() as u64;

    if client == server.total {
        return Ok(());
    }

    debug!(
        "Price mismatch for option {}: client {} vs server {}",
        req.option_id, client, server.total
    );
    let mut errs = ValidationErrors::new();
    errs.push(
        "estimatedTotal",
        Problem::PriceMismatch,
        format!("estimated total does not match the calculated price of {}", server.total),
    );
    Err(errs)
}
