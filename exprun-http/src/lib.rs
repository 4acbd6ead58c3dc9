//! exprun HTTP API Server
//!
//! Streams program runs to browsers as Server-Sent Events, one frame per
//! run event.

pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;

pub use server::{ServerConfig, create_app, start_server};
