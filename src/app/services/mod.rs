//! Services layer - business operations and utilities.
//!
//! This module contains business logic and operations:
//! - Session persistence
//! - Note file storage
//! - Quote and haiku resources
//! - Text helpers (names, countdown format, word and syllable counts)

pub mod haiku;
pub mod notes;
pub mod quotes;
pub mod session;
pub mod text_ops;
