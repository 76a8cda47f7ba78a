// src/gist/client.rs
// =============================================================================
// GistClient: read, create and update gists.
//
// read   GET   {root}/{id}           -> files (following truncated raw_urls)
// write  POST  {root}                -> id of the new gist
// update PATCH {root}/{id}           -> files (same handling as read)
//
// Reads and updates share receive_files(): inline content is copied straight
// into the result, and every truncated file is fetched from its raw_url.
// The fetches run concurrently inside the operation's own future (no spawned
// tasks), and their results are joined through FanIn.
// =============================================================================

use std::sync::Arc;

use futures::stream::{self, StreamExt};

use super::files::{normalize_files, CreateBody, CreatedPayload, FileInput, FileSet, GistPayload, UpdateBody};
use super::id::GistId;
use super::join::{self, FanIn};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::options::{CreateOptions, Credentials, UpdateOptions};
use crate::transport::{
    execute_json, execute_text, BodyFormat, HttpRequest, HttpRequester, Method, ReqwestRequester,
};

/// Client for the gist API.
///
/// Cloning is cheap: clones share the same requester.
#[derive(Clone)]
pub struct GistClient {
    requester: Arc<dyn HttpRequester>,
    config: ClientConfig,
}

impl std::fmt::Debug for GistClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GistClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GistClient {
    /// A client for api.github.com using the default reqwest requester.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let requester = ReqwestRequester::new(&config)?;
        Ok(Self::with_requester(config, Arc::new(requester)))
    }

    /// Uses a caller-supplied transport instead of reqwest.
    pub fn with_requester(config: ClientConfig, requester: Arc<dyn HttpRequester>) -> Self {
        Self { requester, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches every file of a gist, following truncation pointers.
    ///
    /// Resolves once, either with all files (same names the server listed)
    /// or with the first error encountered.
    pub async fn read(&self, id: &GistId, credentials: &Credentials) -> Result<FileSet> {
        // Step 1: the gist document, as JSON
        let request = HttpRequest::new(Method::Get, self.config.gist_url(id.as_str()), BodyFormat::Json)
            .with_credentials(credentials);

        // Any failure here ends the read before a single file is fetched
        let payload: GistPayload = execute_json(self.requester.as_ref(), request).await?;

        // Step 2: inline files, plus the raw fetches for truncated ones
        self.receive_files(payload, credentials).await
    }

    /// Creates a gist and returns its id.
    ///
    /// ```no_run
    /// # async fn demo() -> gistkit::Result<()> {
    /// use gistkit::{CreateOptions, Credentials, GistClient};
    ///
    /// let client = GistClient::new()?;
    /// let options = CreateOptions::new()
    ///     .with_credentials(Credentials::token("ghp_..."))
    ///     .with_description("notes");
    /// let id = client.write([("a.txt", "hello")], &options).await?;
    /// println!("created {}", id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn write<I, K, V>(&self, files: I, options: &CreateOptions) -> Result<GistId>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FileInput>,
    {
        let url = self.config.collection_url();

        // Bare strings become { "content": ... }; absent options stay off the wire
        let files = normalize_files(files);
        let body = CreateBody {
            files: &files,
            description: options.description.as_deref(),
            public: options.public,
        };

        let request = HttpRequest::new(Method::Post, url, BodyFormat::Json)
            .with_json(&body)?
            .with_credentials(&options.credentials);

        let created: CreatedPayload = execute_json(self.requester.as_ref(), request).await?;
        tracing::debug!(id = %created.id, files = files.len(), "created gist");
        Ok(created.id)
    }

    /// Updates a gist and returns its files as the server now has them.
    ///
    /// Only the listed files change. Pass [`FileInput::Delete`] to remove a
    /// file, or [`FileEntry::rename`](super::files::FileEntry::rename) to
    /// rename one without touching its content.
    pub async fn update<I, K, V>(&self, id: &GistId, files: I, options: &UpdateOptions) -> Result<FileSet>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FileInput>,
    {
        let url = self.config.gist_url(id.as_str());

        // Deletions stay in the map as None and go out as null
        let files = normalize_files(files);
        let body = UpdateBody {
            files: &files,
            description: options.description.as_deref(),
        };

        let request = HttpRequest::new(Method::Patch, url, BodyFormat::Json)
            .with_json(&body)?
            .with_credentials(&options.credentials);

        // The answer is a full gist document: handled exactly like a read
        let payload: GistPayload = execute_json(self.requester.as_ref(), request).await?;
        self.receive_files(payload, &options.credentials).await
    }

    // Turns a gist document into a FileSet, fetching truncated files.
    //
    // Parameters:
    //   payload: the parsed gist document (files map only)
    //   credentials: applied to every raw_url fetch, same as the metadata call
    //
    // Returns: one entry per file the server listed, or the first failure
    async fn receive_files(&self, payload: GistPayload, credentials: &Credentials) -> Result<FileSet> {
        let mut files = FileSet::new();
        let mut truncated = Vec::new();

        // Split inline content from files that need a second request
        for (filename, file) in payload.files {
            if file.truncated {
                match file.raw_url {
                    Some(raw_url) => truncated.push((filename, raw_url)),
                    None => return Err(Error::MissingRawUrl { filename }),
                }
            } else {
                files.insert(filename, file.content.unwrap_or_default());
            }
        }

        // Nothing truncated: done, no join
        if truncated.is_empty() {
            return Ok(files);
        }

        let count = truncated.len();
        tracing::debug!(count, "fetching truncated files");

        // One future per truncated file, each tagged with its filename
        let requester = self.requester.as_ref();
        let fetches = truncated.into_iter().map(move |(filename, raw_url)| {
            let request = HttpRequest::new(Method::Get, raw_url, BodyFormat::Text).with_credentials(credentials);
            async move { (filename, execute_text(requester, request).await) }
        });

        // .buffer_unordered(count): every fetch in flight at once, results
        // handed over as they finish
        let results = stream::iter(fetches).buffer_unordered(count);
        join::join_all(FanIn::new(files, count), results).await
    }
}
