//! Application layer - organized by Clean Architecture principles.
//!
//! Apart from the buffer helper in `infrastructure`, nothing under `app`
//! touches FLTK; the widgets live in [`crate::ui`].
//!
//! # Structure
//!
//! - `domain/` - Core data structures (Document, Settings, Messages)
//! - `controllers/` - Owned session state (DocumentSet, HaikuGate, TimerService)
//! - `services/` - Business operations (session, notes, quotes, haikus, text_ops)
//! - `infrastructure/` - External integrations (FLTK buffer, logging, error)
//! - `state.rs` - Main application coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use controllers::haiku_gate::GateState;
pub use controllers::timer::{TickScheduler, TickToken, TimerEvent};
pub use domain::{AppPaths, AppSettings, Document, DocumentId, EditKey, Message};
pub use infrastructure::buffer::buffer_text_no_leak;
pub use infrastructure::error::{AppError, Result};
pub use infrastructure::logging::init_logging;
pub use services::haiku::HaikuRule;
pub use state::{AppState, SaveOutcome, TabInfo};
