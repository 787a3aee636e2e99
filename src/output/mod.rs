//! Report output: text lines, histogram rendering and JSON export

pub mod json;
pub mod plot;
pub mod text;
