//! # Merchant Gateway Library
//!
//! This library provides the core functionality for the merchant gateway
//! service: the authentication boundary, the merchant ownership model, and
//! the merchant-scoped CRUD surface.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod payments;
pub mod repositories;
pub mod server;
pub mod telemetry;
pub use migration;
