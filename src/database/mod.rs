//! # Database Operations
//!
//! The registry store and its schema management.
//!
//! ## Key Components
//!
//! - [`connection`] - [`RegistryStore`]: pool lifecycle and user operations
//! - [`schema`] - idempotent creation of the `users` table
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use user_registry::config::DatabaseConfig;
//! use user_registry::database::RegistryStore;
//! use user_registry::models::UserProfile;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = RegistryStore::new(DatabaseConfig::with_url("postgresql://localhost/registry"));
//! store.connect().await?;
//!
//! store.upsert_user(&UserProfile::new(42).username("alice")).await?;
//! let record = store.get_user(42).await?;
//! assert!(record.is_some());
//!
//! store.disconnect().await;
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod schema;

pub use connection::RegistryStore;
pub use schema::{SchemaManager, USERS_TABLE};
