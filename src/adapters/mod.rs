//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//!
//! - `ai` - generation providers and the resilient gateway client
//! - `cache` - response cache implementations

pub mod ai;
pub mod cache;
