//! Controllers layer - orchestration and coordination.
//!
//! This module contains controllers that own the mutable session state:
//! - The open document set (tabs)
//! - The haiku-gated deletion flow
//! - The countdown timer

pub mod document_set;
pub mod haiku_gate;
pub mod timer;
