// hearth-api: Async Rust client for the hearth hub HTTP API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod devices;
mod events;
mod map;

pub use client::HubClient;
pub use error::Error;
