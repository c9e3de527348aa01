//! # IO Module
//!
//! Interface layer exposing the engine to external collaborators. Only the
//! REST surface lives here; identity, uploads and notifications are separate
//! services that call into these endpoints.

pub mod rest;

pub use rest::*;
