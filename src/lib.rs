#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # User Registry Bot
//!
//! A Telegram bot front end backed by a PostgreSQL user registry.
//!
//! ## Overview
//!
//! Every interaction records the sender in a single `users` table through an
//! atomic upsert. The bot answers `/start`, `/help`, `/myinfo` and `/stats`,
//! and acknowledges plain text messages.
//!
//! ## Module Organization
//!
//! - [`models`] - `UserRecord` and the `UserProfile` write tuple
//! - [`database`] - `RegistryStore` and idempotent schema creation
//! - [`registry`] - the `UserRegistry` trait handlers depend on
//! - [`handlers`] - transport-neutral interaction handling and reply text
//! - [`telegram`] - teloxide dispatcher wiring
//! - [`config`] - layered configuration loading
//! - [`logging`] - structured logging setup
//! - [`error`] - structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use user_registry::config::DatabaseConfig;
//! use user_registry::database::RegistryStore;
//! use user_registry::handlers::{ChatCommand, InboundEvent, InteractionHandler};
//! use user_registry::models::UserProfile;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(RegistryStore::new(DatabaseConfig::default()));
//! store.connect().await?;
//!
//! let handler = InteractionHandler::new(store.clone());
//! let sender = UserProfile::new(42).username("alice").first_name("Alice");
//! let reply = handler.handle(&InboundEvent::command(sender, ChatCommand::Start)).await?;
//! println!("{reply}");
//!
//! store.disconnect().await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! Store tests use `#[sqlx::test]`, which creates a throwaway database per
//! test on the server in `DATABASE_URL`:
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! DATABASE_URL=postgresql://localhost/user_registry_test cargo test
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod registry;
pub mod telegram;

pub use config::{DatabaseConfig, RegistryBotConfig};
pub use database::RegistryStore;
pub use error::{RegistryError, Result};
pub use models::{UserProfile, UserRecord};
pub use registry::UserRegistry;
