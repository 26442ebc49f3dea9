//! Product catalog service: paginated, filterable item listings with picture URLs
//! resolved against a configured external base, item editing, and picture lookup.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod client;
pub mod configuration;
pub mod context;
pub mod rest;
pub mod storage;
pub mod tracing;
pub mod types;
