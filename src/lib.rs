// src/lib.rs
// =============================================================================
// gistkit: read, create and update GitHub gists.
//
// - resolve() turns any common gist address into a GistId
// - GistClient::read/write/update talk to the gist API
// - Truncated files are fetched from their raw_url and merged in before a
//   read (or update) resolves
//
// The network sits behind the HttpRequester trait; ReqwestRequester is the
// default, and tests or embedders can plug in their own.
// =============================================================================

//! Client library for GitHub gists.
//!
//! ```no_run
//! # async fn demo() -> gistkit::Result<()> {
//! use gistkit::{resolve, Credentials, GistClient};
//!
//! let client = GistClient::new()?;
//! if let Some(id) = resolve("https://gist.github.com/octocat/6cad326836d38bd3a7ae") {
//!     for (name, content) in client.read(&id, &Credentials::anonymous()).await? {
//!         println!("{}: {} bytes", name, content.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod gist;
mod options;
pub mod transport;

pub use config::{ClientConfig, DEFAULT_API_ROOT, DEFAULT_TIMEOUT};
pub use error::{BoxError, Error, ErrorBody, Result};
pub use gist::{
    normalize_files, resolve, FileChanges, FileEntry, FileInput, FileSet, GistClient, GistId, RemoteFile,
};
pub use options::{CreateOptions, Credentials, UpdateOptions};
