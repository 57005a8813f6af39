//! Career Compass - AI-backed career guidance core.
//!
//! This crate implements the request orchestration and personality-career
//! matching engine behind a student career-guidance platform: resilient,
//! cached access to an external text-generation API plus deterministic
//! assessment scoring and career matching.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
