//! CLI command implementations.

pub mod common;
pub mod debug;
pub mod generate;
pub mod parse;
pub mod render;
pub mod simulate;
pub mod validate;
pub mod version;
