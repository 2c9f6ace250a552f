//! gf-http: HTTP transport for the gf GoFile client
//!
//! This crate provides the implementation of the Transport trait
//! using reqwest. It is the only crate that directly depends on an
//! HTTP client library.

pub mod client;

pub use client::HttpTransport;
