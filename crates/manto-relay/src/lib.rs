#![allow(clippy::must_use_candidate)]

mod client;
mod error;
mod handler;
mod state;
pub mod types;
pub mod validate;

pub use client::AnthropicClient;
pub use error::RelayError;
pub use handler::relay_router;
pub use state::RelayState;
