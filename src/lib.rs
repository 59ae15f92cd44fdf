//! PhishGuard AI demo backend.
//!
//! The `phishguard` binary serves the HTTP API and the dashboard view models;
//! `phishguard-init-db` only prepares the database.

pub mod api;
pub mod config;
pub mod database;
pub mod detection;
pub mod jobs;
pub mod middleware;
pub mod models;
pub mod pages;
pub mod services;
pub mod utils;
