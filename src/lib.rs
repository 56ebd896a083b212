#![deny(warnings)]
#![deny(clippy::unwrap_used)]

pub mod mcp;
