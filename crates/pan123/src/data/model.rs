//! Typed forms of the backend's JSON responses.
//!
//! Every endpoint answers with `{code, message, data}`. Field names follow the
//! backend's PascalCase; unknown fields are ignored.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

/// Status part of the response envelope, with `data` left undecoded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Status {
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

/// Full response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub token: String,
}

/// One page of a directory listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListData {
    #[serde(rename = "InfoList", default)]
    pub entries: Vec<FileEntry>,

    /// Cursor for the next page; `"-1"` once the listing is exhausted.
    #[serde(rename = "Next", default)]
    pub next: String,

    #[serde(rename = "Total", default)]
    pub total: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "i64")]
pub enum FileKind {
    File,
    Folder,
    Other(i64),
}

impl From<i64> for FileKind {
    fn from(raw: i64) -> Self {
        match raw {
            0 => FileKind::File,
            1 => FileKind::Folder,
            other => FileKind::Other(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileEntry {
    #[serde(rename = "FileId")]
    pub id: i64,

    #[serde(rename = "ParentFileId", default)]
    pub parent_id: i64,

    #[serde(rename = "FileName", default)]
    pub name: String,

    #[serde(rename = "Type", default = "default_kind")]
    pub kind: FileKind,

    #[serde(rename = "Size", default)]
    pub size: i64,

    #[serde(rename = "Etag", default)]
    pub etag: String,

    #[serde(rename = "S3KeyFlag", default)]
    pub s3_key_flag: String,

    #[serde(rename = "CreateAt", default)]
    pub created_at: String,

    #[serde(rename = "UpdateAt", default)]
    pub updated_at: String,
}

fn default_kind() -> FileKind { FileKind::File }

impl FileEntry {
    pub fn is_dir(&self) -> bool { self.kind == FileKind::Folder }

    pub fn created(&self) -> Option<DateTime<FixedOffset>> { parse_time(&self.created_at) }

    pub fn updated(&self) -> Option<DateTime<FixedOffset>> { parse_time(&self.updated_at) }
}

fn parse_time(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).ok()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserInfo {
    #[serde(rename = "UID", default)]
    pub uid: i64,

    #[serde(rename = "Nickname", default)]
    pub nickname: String,

    #[serde(rename = "SpaceUsed", default)]
    pub space_used: i64,

    #[serde(rename = "SpacePermanent", default)]
    pub space_permanent: i64,

    #[serde(rename = "SpaceTemp", default)]
    pub space_temp: i64,

    #[serde(rename = "FileCount", default)]
    pub file_count: i64,
}
