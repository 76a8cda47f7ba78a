// src/gist/mod.rs
// =============================================================================
// This module holds everything gist-specific.
//
// Submodules:
// - id: resolving a gist id from an address
// - files: file entries, file sets and the API payload shapes
// - join: the fan-out/fan-in join for truncated files
// - client: GistClient read/write/update
// - callback: completion-callback wrappers around the client
// =============================================================================

mod callback;
mod client;
mod files;
mod id;
mod join;

pub use client::GistClient;
pub use files::{normalize_files, FileChanges, FileEntry, FileInput, FileSet, RemoteFile};
pub use id::{resolve, GistId};
