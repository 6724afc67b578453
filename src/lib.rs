//! Biblion Library Catalog and Circulation Server
//!
//! An in-memory library system: catalog with secondary indices, member
//! registry, borrow/return/renew circulation with late fees, event fan-out
//! and statistics, exposed through a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod factory;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
