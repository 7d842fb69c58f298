//! Flat directory content encoding.
//!
//! A directory's logical content is a single text line of `name:id` pairs
//! separated by `|`, starting with the `.` and `..` entries, for example
//! `.:2|..:0|notes.txt:3`. Entries are only ever appended, so decoding
//! yields them in creation order.

use thiserror::Error;

use crate::node::InodeId;

/// A single decoded `name -> inode id` association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub id: InodeId,
}

/// Failure decoding directory content.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EntryError {
    #[error("directory content is not valid UTF-8")]
    NotUtf8,
    #[error("malformed directory entry {0:?}")]
    Malformed(String),
}

/// True when `name` can be embedded in the encoding without colliding with
/// the `:` and `|` separators.
pub(crate) fn valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(':') && !name.contains('|')
}

/// Initial content of a directory: `.` pointing at the directory itself and
/// `..` pointing at its parent. The root uses its own id for both.
pub(crate) fn dot_entries(id: InodeId, parent_id: InodeId) -> Vec<u8> {
    format!(".:{}|..:{}", id, parent_id).into_bytes()
}

/// Appends one encoded entry to existing directory content. Appended
/// entries carry a leading separator; only the `.`/`..` seed is written
/// bare.
pub(crate) fn push_entry(content: &mut Vec<u8>, name: &str, id: InodeId) {
    content.extend_from_slice(format!("|{}:{}", name, id).as_bytes());
}

/// Decodes directory content into entries, in encoding order.
pub(crate) fn parse(bytes: &[u8]) -> Result<Vec<DirEntry>, EntryError> {
    let content = std::str::from_utf8(bytes).map_err(|_| EntryError::NotUtf8)?;
    let mut entries = Vec::new();
    for raw in content.split('|') {
        let (name, id) = raw
            .split_once(':')
            .ok_or_else(|| EntryError::Malformed(raw.to_string()))?;
        let id = id
            .parse::<InodeId>()
            .map_err(|_| EntryError::Malformed(raw.to_string()))?;
        entries.push(DirEntry {
            name: name.to_string(),
            id,
        });
    }
    Ok(entries)
}
