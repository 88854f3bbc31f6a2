//! LLM API client and types
//!
//! Claude Messages API client plus the per-turn tool loop.

mod client;
mod types;

pub use client::ClaudeClient;
pub use types::*;
