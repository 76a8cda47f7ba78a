// src/gist/files.rs
// =============================================================================
// File shapes going to and coming from the gist API.
//
// Outgoing (create/update):
//   files: { "a.txt": { "content": "hello" }, "old.txt": null, ... }
//   A bare string is promoted to { "content": ... } before sending.
//   Entries pass through as given; a deletion goes out as null.
//
// Incoming (read/update response):
//   files: { "a.txt": { "content": ..., "raw_url": ..., "truncated": bool } }
//
// What callers get back is a FileSet: filename -> content.
// =============================================================================

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::GistId;

/// Filename to content. The result shape of read and update.
pub type FileSet = BTreeMap<String, String>;

/// A file as sent to the API.
///
/// Both fields are optional on the wire: an update may change only the
/// content, only the name, or both.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// New name for the file (update only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl FileEntry {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            filename: None,
        }
    }

    /// Rename-only update: the content stays as the server has it.
    pub fn rename(filename: impl Into<String>) -> Self {
        Self {
            content: None,
            filename: Some(filename.into()),
        }
    }

    pub fn renamed(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// What callers may pass for each file.
///
/// - `Text`: plain content, promoted to `{ "content": ... }`
/// - `Entry`: sent as given
/// - `Delete`: sent as `null`, which removes the file on update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileInput {
    Text(String),
    Entry(FileEntry),
    Delete,
}

impl FileInput {
    /// The wire form of this input: `None` means "delete this file".
    pub fn into_entry(self) -> Option<FileEntry> {
        match self {
            FileInput::Text(content) => Some(FileEntry::new(content)),
            FileInput::Entry(entry) => Some(entry),
            FileInput::Delete => None,
        }
    }
}

impl From<&str> for FileInput {
    fn from(value: &str) -> Self {
        FileInput::Text(value.to_string())
    }
}

impl From<String> for FileInput {
    fn from(value: String) -> Self {
        FileInput::Text(value)
    }
}

impl From<FileEntry> for FileInput {
    fn from(value: FileEntry) -> Self {
        FileInput::Entry(value)
    }
}

// Lets an already normalized map be passed back in
impl From<Option<FileEntry>> for FileInput {
    fn from(value: Option<FileEntry>) -> Self {
        match value {
            Some(entry) => FileInput::Entry(entry),
            None => FileInput::Delete,
        }
    }
}

/// Normalized files keyed by filename; `None` serializes to `null`.
pub type FileChanges = BTreeMap<String, Option<FileEntry>>;

/// Promotes every input to its wire form, keyed by filename.
///
/// Parameters:
///   files: pairs of (filename, anything convertible to [`FileInput`])
///
/// Returns: bare strings as `{ "content": ... }` entries, full entries
/// unchanged, and deletions as `None`
pub fn normalize_files<I, K, V>(files: I) -> FileChanges
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<FileInput>,
{
    files
        .into_iter()
        .map(|(name, input)| (name.into(), input.into().into_entry()))
        .collect()
}

// POST /gists body
#[derive(Debug, Serialize)]
pub(crate) struct CreateBody<'a> {
    pub files: &'a FileChanges,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
}

// PATCH /gists/{id} body
#[derive(Debug, Serialize)]
pub(crate) struct UpdateBody<'a> {
    pub files: &'a FileChanges,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

/// A file as the server reports it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteFile {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub raw_url: Option<String>,
    #[serde(default)]
    pub truncated: bool,
}

// Only the fields we use; serde ignores the rest of the gist document.
#[derive(Debug, Deserialize)]
pub(crate) struct GistPayload {
    #[serde(default)]
    pub files: BTreeMap<String, RemoteFile>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedPayload {
    pub id: GistId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_strings_promoted() {
        let files = normalize_files([
            ("a.txt", FileInput::from("hello")),
            ("b.txt", FileEntry::new("world").renamed("c.txt").into()),
        ]);

        assert_eq!(
            serde_json::to_value(&files).unwrap(),
            json!({
                "a.txt": {"content": "hello"},
                "b.txt": {"content": "world", "filename": "c.txt"},
            })
        );
    }

    #[test]
    fn test_file_input_accepts_either_json_shape() {
        let text: FileInput = serde_json::from_value(json!("plain")).unwrap();
        let entry: FileInput = serde_json::from_value(json!({"content": "full"})).unwrap();
        let deleted: FileInput = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(text.into_entry(), Some(FileEntry::new("plain")));
        assert_eq!(entry.into_entry(), Some(FileEntry::new("full")));
        assert_eq!(deleted, FileInput::Delete);
        assert_eq!(deleted.into_entry(), None);
    }

    #[test]
    fn test_delete_and_rename_only_wire_form() {
        let files = normalize_files([
            ("old.txt", FileInput::Delete),
            ("draft.md", FileEntry::rename("final.md").into()),
            ("keep.txt", FileInput::from("same")),
        ]);

        let body = UpdateBody {
            files: &files,
            description: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "files": {
                    "old.txt": null,
                    "draft.md": {"filename": "final.md"},
                    "keep.txt": {"content": "same"}
                }
            })
        );
    }

    #[test]
    fn test_create_body_omits_unset_options() {
        let files = normalize_files([("a.txt", "hello")]);
        let body = CreateBody {
            files: &files,
            description: None,
            public: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"files": {"a.txt": {"content": "hello"}}})
        );
    }

    #[test]
    fn test_gist_payload_defaults() {
        let payload: GistPayload = serde_json::from_value(json!({
            "id": "abc",
            "files": {
                "small.txt": {"content": "hi", "raw_url": "https://r/small", "truncated": false},
                "big.txt": {"raw_url": "https://r/big", "truncated": true},
                "bare.txt": {}
            }
        }))
        .unwrap();

        assert_eq!(payload.files.len(), 3);
        assert!(payload.files["big.txt"].truncated);
        assert_eq!(payload.files["big.txt"].content, None);
        assert!(!payload.files["bare.txt"].truncated);
    }

    #[test]
    fn test_created_payload_reads_id() {
        let payload: CreatedPayload =
            serde_json::from_value(json!({"id": "AB12", "url": "u"})).unwrap();
        assert_eq!(payload.id.as_str(), "ab12");
    }
}
