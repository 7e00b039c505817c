//! Orderlens - order revenue reporting service
//!
//! Loads a denormalized order CSV into a relational store on a fixed schedule
//! and answers date-range revenue queries over HTTP.
//!
//! # Architecture
//! - `ingest`: CSV reader and scheduled loader
//! - `storage`: SeaORM backend (SQLite / MySQL / PostgreSQL)
//! - `services`: revenue aggregation and request validation
//! - `api`: HTTP handlers and middleware
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging setup

pub mod api;
pub mod config;
pub mod errors;
pub mod ingest;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
