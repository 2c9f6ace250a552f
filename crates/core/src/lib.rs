//! gf-core: Core library for the GoFile client
//!
//! This crate provides the core functionality for gf, including:
//! - The account client with its guest/authenticated session state
//! - Endpoint URL construction
//! - The response envelope model
//! - Transport trait for the HTTP calls
//! - Configuration management
//!
//! This crate does not depend on any HTTP library, which keeps the session
//! logic testable against a mocked transport.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod session;
pub mod transport;

pub use client::{ClientOptions, ContentIds, FolderOption, GofileClient, UploadFile};
pub use config::{Config, ConfigManager};
pub use endpoints::Endpoints;
pub use envelope::{AccountDetails, ContentInfo, Envelope, ServerInfo, UploadedFile};
pub use error::{Error, Result};
pub use session::{AccountMode, Session, SessionOptions};
pub use transport::{Form, Multipart, Part, Transport};
