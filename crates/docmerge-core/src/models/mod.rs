//! Data models shared by extraction and consolidation.

pub mod config;
pub mod document;
pub mod record;
pub mod sentinel;
