pub mod admin;
pub mod home;
pub mod login;

pub use admin::{admin_page, AdminVm};
pub use home::home_page;
pub use login::login_page;
