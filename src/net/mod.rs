//! Networking modules for the auth REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `types` defines the shared wire schema, `api` the object-safe client
//! boundary and its error type, and `http` the reqwest implementation.

pub mod api;
pub mod http;
pub mod types;
