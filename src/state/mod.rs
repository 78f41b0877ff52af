//! Client-side session state.
//!
//! DESIGN
//! ======
//! `store` is the persistent key/value layer that survives restarts; `auth`
//! is the single writer that keeps it consistent with the in-memory state.

pub mod auth;
pub mod store;
