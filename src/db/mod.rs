pub mod connection;
pub mod leads;
pub mod users;

pub use connection::{init_db, Database};
