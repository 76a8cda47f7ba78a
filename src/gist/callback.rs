// src/gist/callback.rs
// =============================================================================
// Callback-style entry points.
//
// Each spawn_* method schedules the matching async operation on the current
// tokio runtime and hands the outcome to a completion closure. The closure
// runs exactly once, and never before spawn_* has returned.
//
// Must be called from inside a tokio runtime (tokio::spawn panics otherwise).
// =============================================================================

use tokio::task::JoinHandle;

use super::client::GistClient;
use super::files::{normalize_files, FileInput, FileSet};
use super::id::GistId;
use crate::error::Result;
use crate::options::{CreateOptions, Credentials, UpdateOptions};

impl GistClient {
    /// Reads a gist in the background, then calls `on_complete`.
    pub fn spawn_read<F>(&self, id: GistId, credentials: Credentials, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<FileSet>) + Send + 'static,
    {
        let client = self.clone();
        tokio::spawn(async move {
            let result = client.read(&id, &credentials).await;
            on_complete(result);
        })
    }

    /// Creates a gist in the background, then calls `on_complete` with its id.
    pub fn spawn_write<I, K, V, F>(&self, files: I, options: CreateOptions, on_complete: F) -> JoinHandle<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FileInput>,
        F: FnOnce(Result<GistId>) + Send + 'static,
    {
        let client = self.clone();
        let files = normalize_files(files);
        tokio::spawn(async move {
            let result = client.write(files, &options).await;
            on_complete(result);
        })
    }

    /// Updates a gist in the background, then calls `on_complete`.
    pub fn spawn_update<I, K, V, F>(
        &self,
        id: GistId,
        files: I,
        options: UpdateOptions,
        on_complete: F,
    ) -> JoinHandle<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FileInput>,
        F: FnOnce(Result<FileSet>) + Send + 'static,
    {
        let client = self.clone();
        let files = normalize_files(files);
        tokio::spawn(async move {
            let result = client.update(&id, files, &options).await;
            on_complete(result);
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;
    use crate::config::ClientConfig;
    use crate::transport::testing::ScriptedRequester;
    use crate::transport::Method;

    const GIST: &str = "https://api.github.com/gists/abc123";

    fn client(requester: &Arc<ScriptedRequester>) -> GistClient {
        GistClient::with_requester(ClientConfig::default(), requester.clone())
    }

    #[tokio::test]
    async fn test_callback_never_runs_during_registration() {
        let requester = ScriptedRequester::new();
        let doc = json!({"files": {"a.txt": {"content": "hi", "truncated": false}}}).to_string();
        requester.respond(Method::Get, GIST, 200, &doc);

        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(None));

        let handle = {
            let calls = Arc::clone(&calls);
            let seen = Arc::clone(&seen);
            client(&requester).spawn_read(GistId::new("abc123"), Credentials::anonymous(), move |result| {
                calls.fetch_add(1, Ordering::SeqCst);
                *seen.lock().unwrap() = Some(result.map(|files| files.len()));
            })
        };

        // Fast path (no truncated files) still completes later, not inline
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        handle.await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(*seen.lock().unwrap(), Some(Ok(1))));
    }

    #[tokio::test]
    async fn test_spawn_write_delivers_id() {
        let requester = ScriptedRequester::new();
        requester.respond(Method::Post, "https://api.github.com/gists", 201, r#"{"id":"xyz"}"#);

        let (tx, rx) = futures::channel::oneshot::channel();
        client(&requester).spawn_write([("a.txt", "hello")], CreateOptions::new(), move |result| {
            let _ = tx.send(result);
        });

        let id = rx.await.unwrap().unwrap();
        assert_eq!(id, GistId::new("xyz"));
    }

    #[tokio::test]
    async fn test_spawn_update_delivers_error_once() {
        let requester = ScriptedRequester::new();
        requester.respond(Method::Patch, GIST, 422, r#"{"message":"Validation Failed"}"#);

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handle = client(&requester).spawn_update(
            GistId::new("abc123"),
            [("a.txt", "x")],
            UpdateOptions::new(),
            move |result| {
                assert_eq!(result.unwrap_err().status(), Some(422));
                counter.fetch_add(1, Ordering::SeqCst);
            },
        );

        handle.await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
