pub mod client;
pub mod postgres;

pub use client::{DirectoryError, DirectoryResult, UserDirectory, UserRecord};
pub use postgres::PgUserDirectory;
