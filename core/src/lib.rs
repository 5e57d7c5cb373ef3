//! Core components for signing HTTP requests with AWS SigV4.
//!
//! This crate provides the building blocks shared by the signer in
//! `sigv4kit-aws-v4`:
//!
//! - [`SigningRequest`]: a plain request descriptor (method, url, headers, body)
//! - [`Error`] and [`ErrorKind`]: the error taxonomy of the signing process
//! - [`Env`]: environment access used by configuration loading
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time formatting utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod env;
pub use env::Env;
pub use env::OsEnv;
pub use env::StaticEnv;

mod error;
pub use error::{Error, ErrorKind, Result};

mod request;
pub use request::SigningRequest;
