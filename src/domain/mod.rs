pub mod intake;
pub mod lead;
pub mod submissions;
pub mod triage;
pub mod validation;

pub use intake::LeadIntake;
pub use lead::{LeadKind, LeadRecord};
pub use triage::TriageConsole;
