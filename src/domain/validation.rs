// src/domain/validation.rs
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// What is wrong with a single submitted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Problem {
    Missing,
    /// Sent as the wrong JSON type, e.g. a number where text belongs.
    InvalidType,
    InvalidEmail,
    InvalidNumber,
    InvalidUrl,
    UnknownCatalog,
    PriceMismatch,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub problem: Problem,
    pub message: String,
}

/// Every field error found in one payload, in field order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, problem: Problem, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            problem,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    /// `Ok(value)` when nothing was collected.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    /// The string inside a JSON field. Absent and `null` are `Ok(None)`; any
    /// other non-string is recorded as `invalid_type` and comes back as `Err`.
    fn string_of<'a>(
        &mut self,
        field: &'static str,
        value: Option<&'a Value>,
    ) -> Result<Option<&'a str>, ()> {
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => {
                self.invalid_type(field, "text");
                Err(())
            }
        }
    }

    pub fn invalid_type(&mut self, field: &'static str, expected: &str) {
        self.push(
            field,
            Problem::InvalidType,
            format!("{field} must be {expected}"),
        );
    }

    /// Required text: present and not blank after trimming.
    pub fn require_text(&mut self, field: &'static str, value: Option<&Value>) -> String {
        let Ok(raw) = self.string_of(field, value) else {
            return String::new();
        };
        match clean(raw) {
            Some(v) => v,
            None => {
                self.push(field, Problem::Missing, format!("{field} is required"));
                String::new()
            }
        }
    }

    /// Optional text: blank is absent, a non-string is still an error.
    pub fn optional_text(&mut self, field: &'static str, value: Option<&Value>) -> Option<String> {
        clean(self.string_of(field, value).ok()?)
    }

    /// Required email: missing and malformed are reported differently.
    pub fn require_email(&mut self, field: &'static str, value: Option<&Value>) -> String {
        let Ok(raw) = self.string_of(field, value) else {
            return String::new();
        };
        let Some(email) = clean(raw) else {
            self.push(field, Problem::Missing, format!("{field} is required"));
            return String::new();
        };
        if !is_email_shaped(&email) {
            self.push(
                field,
                Problem::InvalidEmail,
                format!("{field} must look like name@example.com"),
            );
        }
        email
    }

    /// Optional URL: blank is fine, anything else must be http(s).
    pub fn optional_url(&mut self, field: &'static str, value: Option<&Value>) -> Option<String> {
        let url = self.optional_text(field, value)?;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            self.push(
                field,
                Problem::InvalidUrl,
                format!("{field} must start with http:// or https://"),
            );
        }
        Some(url)
    }

    /// Optional list of strings. Blank entries are dropped.
    pub fn string_list(&mut self, field: &'static str, value: Option<&Value>) -> Vec<String> {
        let items = match value {
            None | Some(Value::Null) => return Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                self.invalid_type(field, "a list of strings");
                return Vec::new();
            }
        };
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::String(s) => out.extend(clean(Some(s.as_str()))),
                _ => {
                    self.invalid_type(field, "a list of strings");
                    return Vec::new();
                }
            }
        }
        out
    }

    /// Required non-negative number given either as a JSON number or a numeric string.
    pub fn require_non_negative(
        &mut self,
        field: &'static str,
        value: Option<&Value>,
    ) -> f64 {
        let parsed = match value {
            None | Some(Value::Null) => {
                self.push(field, Problem::Missing, format!("{field} is required"));
                return 0.0;
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                self.push(field, Problem::Missing, format!("{field} is required"));
                return 0.0;
            }
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            Some(_) => None,
        };

        match parsed {
            Some(n) if n.is_finite() && n >= 0.0 => n,
            _ => {
                self.push(
                    field,
                    Problem::InvalidNumber,
                    format!("{field} must be a non-negative number"),
                );
                0.0
            }
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.iter().map(|e| e.field).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Trim, and treat blank as absent.
pub fn clean(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// `local@domain.tld`: one `@`, no whitespace, a domain that neither starts
/// with a dot nor ends at one, with something on both sides of the last dot.
pub fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || domain.starts_with('.') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty() && !host.ends_with('.'),
        None => false,
    }
}
