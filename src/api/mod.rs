//! API handlers for the Biblion REST endpoints

pub mod health;
pub mod items;
pub mod loans;
pub mod members;
pub mod openapi;
pub mod stats;
