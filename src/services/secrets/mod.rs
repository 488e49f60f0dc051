pub mod postgres;
pub mod store;

pub use postgres::PgSecretStore;
pub use store::{SecretMaterial, SecretResult, SecretStore, SecretsError};
