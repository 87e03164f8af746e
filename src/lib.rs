//! A web server for a shared list of musical tabs.
//!
//! `GET /api/tabs` returns the list as JSON. `POST /api/tabs` overwrites it, provided the request
//! carries the shared secret in its `secret` header. The list lives in memory and is saved to a
//! JSON file on a best-effort basis, so it may not survive a restart.

pub mod config;
mod request_error;
mod response;
pub mod service;
pub mod store;
pub mod tab;
