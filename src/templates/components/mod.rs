pub mod card;
pub mod error;
pub mod status_form;

pub use card::card;
pub use error::error_page;
pub use status_form::status_form;
