//! # authdemo
//!
//! Terminal client for the username/password authentication demo API.
//!
//! This crate holds the wire types and REST client (`net`), the persistent
//! session store and the auth context that mediates between them (`state`),
//! and the two read-only pages rendered from auth state (`pages`). The `cli`
//! workspace member drives it from the command line.

pub mod config;
pub mod net;
pub mod pages;
pub mod state;
