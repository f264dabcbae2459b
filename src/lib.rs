//! Company Similarity API Library
//!
//! This library scores how similar two company profiles are across
//! firmographic, technographic, geographic, industry and behavioral
//! dimensions, and ranks candidate lists against a target company.
//!
//! # Modules
//!
//! - `obs`: Observability hooks for the scoring engine.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `models`: Core data models.
//! - `score_cache`: Pair score memoisation.
//! - `similarity`: Dimension scorers and the aggregating engine.

// Re-export primary modules for shared use in tests and other binaries
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod obs;
pub mod score_cache;
pub mod similarity;
