//! Activity Roster Module
//!
//! In-memory roster store holding every activity record for the lifetime of
//! the process, plus the event stream emitted on roster changes.

pub mod events;
pub mod store;

pub use events::*;
pub use store::*;
