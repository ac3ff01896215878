pub mod connection;
pub mod migrations;
pub mod repository;

pub use connection::get_database_pool;
pub use migrations::{MigrationManager, run_migrations};
pub use repository::{SubmissionRepository, StoredInquiry, StoredServiceRequest};
