// src/domain/lead.rs
use crate::pricing::{CatalogVariant, ComplexityInput};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The four kinds of inbound submission the site collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadKind {
    ProjectRequest,
    FreelancerApplication,
    ContactMessage,
    PriceRequest,
}

impl LeadKind {
    pub const ALL: [LeadKind; 4] = [
        LeadKind::ProjectRequest,
        LeadKind::FreelancerApplication,
        LeadKind::ContactMessage,
        LeadKind::PriceRequest,
    ];

    /// URL segment, e.g. `/api/admin/project-requests`.
    pub fn slug(self) -> &'static str {
        match self {
            LeadKind::ProjectRequest => "project-requests",
            LeadKind::FreelancerApplication => "freelancer-applications",
            LeadKind::ContactMessage => "contact-messages",
            LeadKind::PriceRequest => "price-requests",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        LeadKind::ALL.into_iter().find(|k| k.slug() == slug)
    }

    pub fn title(self) -> &'static str {
        match self {
            LeadKind::ProjectRequest => "Project Requests",
            LeadKind::FreelancerApplication => "Freelancer Applications",
            LeadKind::ContactMessage => "Contact Messages",
            LeadKind::PriceRequest => "Price Calculator Requests",
        }
    }

    pub(crate) fn table(self) -> &'static str {
        match self {
            LeadKind::ProjectRequest => "project_requests",
            LeadKind::FreelancerApplication => "freelancer_applications",
            LeadKind::ContactMessage => "contact_messages",
            LeadKind::PriceRequest => "price_requests",
        }
    }

    /// Fixed starting status for new records of this kind.
    pub fn initial_status(self) -> &'static str {
        match self {
            LeadKind::FreelancerApplication => "pending",
            LeadKind::ContactMessage => "unread",
            LeadKind::ProjectRequest | LeadKind::PriceRequest => "new",
        }
    }

    /// Values the admin console offers. Not enforced: any status text is stored.
    pub fn conventional_statuses(self) -> &'static [&'static str] {
        match self {
            LeadKind::ProjectRequest => &["new", "contacted", "in-progress", "completed", "rejected"],
            LeadKind::FreelancerApplication => &["pending", "approved", "rejected"],
            LeadKind::ContactMessage => &["unread", "read", "replied", "archived"],
            LeadKind::PriceRequest => &["new", "contacted", "converted", "rejected"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    pub company: Option<String>,
    pub project_type: String,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreelancerApplication {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub specialty: String,
    pub experience: f64,
    pub portfolio_url: Option<String>,
    pub cover_letter: Option<String>,
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub catalog: CatalogVariant,
    pub category: Option<String>,
    pub option_id: String,
    pub complexity: Option<ComplexityInput>,
    pub time_frame: Option<String>,
    pub features: Vec<String>,
    /// As computed by the submitting client.
    pub estimated_total: f64,
    pub message: Option<String>,
}

/// A validated submission, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub enum NewLead {
    ProjectRequest(ProjectRequest),
    FreelancerApplication(FreelancerApplication),
    ContactMessage(ContactMessage),
    PriceRequest(PriceRequest),
}

impl NewLead {
    pub fn kind(&self) -> LeadKind {
        match self {
            NewLead::ProjectRequest(_) => LeadKind::ProjectRequest,
            NewLead::FreelancerApplication(_) => LeadKind::FreelancerApplication,
            NewLead::ContactMessage(_) => LeadKind::ContactMessage,
            NewLead::PriceRequest(_) => LeadKind::PriceRequest,
        }
    }
}

/// A stored submission. Identity and creation time are fixed once the store
/// assigns them; status only changes through a status transition in the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead<P> {
    id: i64,
    created_at: DateTime<Utc>,
    status: String,
    #[serde(flatten)]
    payload: P,
}

impl<P> Lead<P> {
    pub(crate) fn from_store(id: i64, created_at: DateTime<Utc>, status: String, payload: P) -> Self {
        Self {
            id,
            created_at,
            status,
            payload,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LeadRecord {
    ProjectRequest(Lead<ProjectRequest>),
    FreelancerApplication(Lead<FreelancerApplication>),
    ContactMessage(Lead<ContactMessage>),
    PriceRequest(Lead<PriceRequest>),
}

impl LeadRecord {
    pub fn kind(&self) -> LeadKind {
        match self {
            LeadRecord::ProjectRequest(_) => LeadKind::ProjectRequest,
            LeadRecord::FreelancerApplication(_) => LeadKind::FreelancerApplication,
            LeadRecord::ContactMessage(_) => LeadKind::ContactMessage,
            LeadRecord::PriceRequest(_) => LeadKind::PriceRequest,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            LeadRecord::ProjectRequest(l) => l.id(),
            LeadRecord::FreelancerApplication(l) => l.id(),
            LeadRecord::ContactMessage(l) => l.id(),
            LeadRecord::PriceRequest(l) => l.id(),
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            LeadRecord::ProjectRequest(l) => l.created_at(),
            LeadRecord::FreelancerApplication(l) => l.created_at(),
            LeadRecord::ContactMessage(l) => l.created_at(),
            LeadRecord::PriceRequest(l) => l.created_at(),
        }
    }

    pub fn status(&self) -> &str {
        match self {
            LeadRecord::ProjectRequest(l) => l.status(),
            LeadRecord::FreelancerApplication(l) => l.status(),
            LeadRecord::ContactMessage(l) => l.status(),
            LeadRecord::PriceRequest(l) => l.status(),
        }
    }

    /// (name, email) of whoever submitted the record.
    pub fn contact(&self) -> (&str, &str) {
        match self {
            LeadRecord::ProjectRequest(l) => (l.payload.client_name.as_str(), l.payload.client_email.as_str()),
            LeadRecord::FreelancerApplication(l) => (l.payload.name.as_str(), l.payload.email.as_str()),
            LeadRecord::ContactMessage(l) => (l.payload.name.as_str(), l.payload.email.as_str()),
            LeadRecord::PriceRequest(l) => (l.payload.name.as_str(), l.payload.email.as_str()),
        }
    }

    /// One-line description for the admin tables.
    pub fn summary(&self) -> String {
        match self {
            LeadRecord::ProjectRequest(l) => {
                let p = &l.payload;
                match &p.budget {
                    Some(budget) => format!("{} ({budget})", p.project_type),
                    None => p.project_type.clone(),
                }
            }
            LeadRecord::FreelancerApplication(l) => {
                let p = &l.payload;
                format!("{}, {} yrs", p.specialty, p.experience)
            }
            LeadRecord::ContactMessage(l) => {
                let p = &l.payload;
                p.subject.clone().unwrap_or_else(|| truncate(&p.message, 60))
            }
            LeadRecord::PriceRequest(l) => {
                let p = &l.payload;
                format!("{} ({}): {}", p.option_id, p.catalog.slug(), p.estimated_total)
            }
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}…")
    }
}
