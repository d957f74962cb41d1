//! Lead capture HTTP server: the contact section rendered server-side plus a
//! JSON API, both backed by `lead-capture-core`.

pub mod config;
pub mod error;
pub mod render;
pub mod router;
pub mod routes;
pub mod sinks;
pub mod state;
pub mod tokens;
