//! Activity Roster API
//!
//! A small web API letting Mergington High School manage signups for
//! extracurricular activities: list activities, sign a student up by email,
//! and remove a registration.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     REST API (axum)                   │
//! │   GET /activities   POST .../signup   DELETE .../     │
//! │   unregister        GET /  → /static/index.html       │
//! ├──────────────────────────────────────────────────────┤
//! │                    Roster Store                       │
//! │   name → { description, schedule, capacity, roster }  │
//! │   seeded at startup, in-memory for process lifetime   │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`api`]: REST router, handlers, and server lifecycle
//! - [`roster`]: the in-memory roster store and its event stream
//! - [`config`]: seed catalog (built-in defaults or a YAML file)
//! - [`error`]: error types and HTTP status mapping

pub mod api;
pub mod config;
pub mod error;
pub mod roster;

// Re-export commonly used types
pub use api::{ApiServer, ApiServerConfig, MessageResponse, RestRouter};
pub use config::{build_catalog, default_catalog, load_seed_file, SeedActivity};
pub use error::{Error, Result};
pub use roster::{Activity, RosterEvent, RosterStats, RosterStatsSnapshot, RosterStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
