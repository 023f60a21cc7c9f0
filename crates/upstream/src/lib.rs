//! Access to the third-party placeholder directory.
//!
//! The [`Directory`] trait is what request handlers depend on. Two
//! implementations are provided: [`HttpDirectory`], which talks to the real
//! service over HTTP, and [`InMemoryDirectory`], a scriptable fake for tests.
//!
//! Both translate outcomes into [`UpstreamError`]: unreachable service,
//! upstream "not found", or any other upstream error status.

pub mod directory;
pub mod error;
pub mod http;
pub mod memory;

pub use directory::{Directory, PostFilter};
pub use error::{Result, UpstreamError};
pub use http::{DEFAULT_BASE_URL, HttpDirectory, HttpDirectoryConfig};
pub use memory::InMemoryDirectory;
