//! Field extraction module.

mod parser;
pub mod rules;

pub use parser::{DocumentParser, ExtractionResult, RuleParser};
