//! Turnstile - Per-Client Request-Rate Governor
//!
//! This crate implements a fixed-window admission controller for HTTP
//! services. It tracks how many requests each client has made in the
//! current time window, rejects requests once a configured threshold is
//! exceeded, and produces the standard rate-limit header values the
//! request-handling layer attaches to every response.

pub mod admission;
pub mod config;
pub mod error;
