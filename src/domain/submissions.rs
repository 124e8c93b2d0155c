// src/domain/submissions.rs
//
// Raw request bodies as the public forms send them. Every field is an optional
// JSON value so that validation, not deserialization, decides what is missing
// or of the wrong type.

use crate::domain::lead::{
    ContactMessage, FreelancerApplication, NewLead, PriceRequest, ProjectRequest,
};
use crate::domain::validation::{clean, Problem, ValidationErrors};
use crate::domain::LeadKind;
use crate::errors::ServerError;
use crate::pricing::{CatalogVariant, ComplexityInput};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequestForm {
    pub client_name: Option<Value>,
    pub client_email: Option<Value>,
    pub client_phone: Option<Value>,
    pub company: Option<Value>,
    pub project_type: Option<Value>,
    pub budget: Option<Value>,
    pub timeline: Option<Value>,
    pub description: Option<Value>,
}

impl ProjectRequestForm {
    pub fn validate(self) -> Result<ProjectRequest, ValidationErrors> {
        let mut errs = ValidationErrors::new();
        let lead = ProjectRequest {
            client_name: errs.require_text("clientName", self.client_name.as_ref()),
            client_email: errs.require_email("clientEmail", self.client_email.as_ref()),
            client_phone: errs.optional_text("clientPhone", self.client_phone.as_ref()),
            company: errs.optional_text("company", self.company.as_ref()),
            project_type: errs.require_text("projectType", self.project_type.as_ref()),
            budget: errs.optional_text("budget", self.budget.as_ref()),
            timeline: errs.optional_text("timeline", self.timeline.as_ref()),
            description: errs.require_text("description", self.description.as_ref()),
        };
        errs.into_result(lead)
    }
}

/// Languages arrive either as a list or as "English, Spanish".
fn languages(errs: &mut ValidationErrors, value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(csv)) => csv.split(',').filter_map(|l| clean(Some(l))).collect(),
        other => errs.string_list("languages", other),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreelancerApplicationForm {
    pub name: Option<Value>,
    pub email: Option<Value>,
    pub phone: Option<Value>,
    pub specialty: Option<Value>,
    pub experience: Option<Value>,
    pub portfolio_url: Option<Value>,
    pub cover_letter: Option<Value>,
    pub languages: Option<Value>,
}

impl FreelancerApplicationForm {
    pub fn validate(self) -> Result<FreelancerApplication, ValidationErrors> {
        let mut errs = ValidationErrors::new();
        let lead = FreelancerApplication {
            name: errs.require_text("name", self.name.as_ref()),
            email: errs.require_email("email", self.email.as_ref()),
            phone: errs.optional_text("phone", self.phone.as_ref()),
            specialty: errs.require_text("specialty", self.specialty.as_ref()),
            experience: errs.require_non_negative("experience", self.experience.as_ref()),
            portfolio_url: errs.optional_url("portfolioUrl", self.portfolio_url.as_ref()),
            cover_letter: errs.optional_text("coverLetter", self.cover_letter.as_ref()),
            languages: languages(&mut errs, self.languages.as_ref()),
        };
        errs.into_result(lead)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessageForm {
    pub name: Option<Value>,
    pub email: Option<Value>,
    pub phone: Option<Value>,
    pub subject: Option<Value>,
    pub message: Option<Value>,
}

impl ContactMessageForm {
    pub fn validate(self) -> Result<ContactMessage, ValidationErrors> {
        let mut errs = ValidationErrors::new();
        let lead = ContactMessage {
            name: errs.require_text("name", self.name.as_ref()),
            email: errs.require_email("email", self.email.as_ref()),
            phone: errs.optional_text("phone", self.phone.as_ref()),
            subject: errs.optional_text("subject", self.subject.as_ref()),
            message: errs.require_text("message", self.message.as_ref()),
        };
        errs.into_result(lead)
    }
}

/// A level id, a slider number, or nothing.
fn complexity(errs: &mut ValidationErrors, value: Option<&Value>) -> Option<ComplexityInput> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => n.as_f64().map(ComplexityInput::Slider),
        Some(Value::String(level)) => clean(Some(level.as_str())).map(ComplexityInput::Level),
        Some(_) => {
            errs.invalid_type("complexity", "a level id or a number");
            None
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRequestForm {
    pub name: Option<Value>,
    pub email: Option<Value>,
    pub phone: Option<Value>,
    pub company: Option<Value>,
    pub catalog: Option<Value>,
    pub category: Option<Value>,
    pub option_id: Option<Value>,
    pub complexity: Option<Value>,
    pub time_frame: Option<Value>,
    pub features: Option<Value>,
    pub estimated_total: Option<Value>,
    pub message: Option<Value>,
}

impl PriceRequestForm {
    pub fn validate(self) -> Result<PriceRequest, ValidationErrors> {
        let mut errs = ValidationErrors::new();

        let catalog = match errs.optional_text("catalog", self.catalog.as_ref()) {
            None => CatalogVariant::Standalone,
            Some(slug) => CatalogVariant::from_slug(&slug).unwrap_or_else(|| {
                errs.push(
                    "catalog",
                    Problem::UnknownCatalog,
                    format!("unknown catalog '{slug}'"),
                );
                CatalogVariant::Standalone
            }),
        };

        let lead = PriceRequest {
            name: errs.require_text("name", self.name.as_ref()),
            email: errs.require_email("email", self.email.as_ref()),
            phone: errs.optional_text("phone", self.phone.as_ref()),
            company: errs.optional_text("company", self.company.as_ref()),
            catalog,
            category: errs.optional_text("category", self.category.as_ref()),
            option_id: errs.require_text("optionId", self.option_id.as_ref()),
            complexity: complexity(&mut errs, self.complexity.as_ref()),
            time_frame: errs.optional_text("timeFrame", self.time_frame.as_ref()),
            features: errs.string_list("features", self.features.as_ref()),
            estimated_total: errs
                .require_non_negative("estimatedTotal", self.estimated_total.as_ref()),
            message: errs.optional_text("message", self.message.as_ref()),
        };
        errs.into_result(lead)
    }
}

/// Decode a JSON body for `kind` and validate it.
///
/// Malformed JSON, or JSON that is not an object, is a plain bad request. A
/// well-formed object with bad fields is a validation failure listing every
/// offending field, wrong JSON types included.
pub fn parse_submission(kind: LeadKind, body: &[u8]) -> Result<NewLead, ServerError> {
    fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ServerError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ServerError::BadRequest(format!("invalid JSON body: {e}")))?;
        if !value.is_object() {
            return Err(ServerError::BadRequest(
                "request body must be a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value)
            .map_err(|e| ServerError::BadRequest(format!("invalid JSON body: {e}")))
    }

    let validated = match kind {
        LeadKind::ProjectRequest => decode::<ProjectRequestForm>(body)?
            .validate()
            .map(NewLead::ProjectRequest),
        LeadKind::FreelancerApplication => decode::<FreelancerApplicationForm>(body)?
            .validate()
            .map(NewLead::FreelancerApplication),
        LeadKind::ContactMessage => decode::<ContactMessageForm>(body)?
            .validate()
            .map(NewLead::ContactMessage),
        LeadKind::PriceRequest => decode::<PriceRequestForm>(body)?
            .validate()
            .map(NewLead::PriceRequest),
    };

    validated.map_err(ServerError::Validation)
}
