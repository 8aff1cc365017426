//! Directory records and the ordered, id-unique collection holding them

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

use crate::error::{DirectoryError, DirectoryResult};

const LOCAL_EMAIL_DOMAIN: &str = "example.com";

/// Opaque entry identifier.
///
/// Locally created entries get a UUID v4; fetched entries keep whatever the
/// remote sent. Remote ids arrive as JSON integers, so both strings and
/// numbers are accepted on the way in. They are always written as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl<'de> Deserialize<'de> for EntryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => EntryId(s),
            RawId::Number(n) => EntryId(n.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub name: String,
    pub email: String,
}

impl Entry {
    /// Build a locally created entry from raw user input.
    ///
    /// The name is trimmed and must not be empty; the email is derived
    /// mechanically from it and never validated.
    pub fn from_name(raw_name: &str) -> DirectoryResult<Self> {
        let name = raw_name.trim();
        if name.is_empty() {
            return Err(DirectoryError::Validation("name must not be empty".into()));
        }

        Ok(Self {
            id: EntryId::generate(),
            name: name.to_string(),
            email: derive_email(name),
        })
    }
}

pub fn derive_email(name: &str) -> String {
    format!("{}@{}", name.to_lowercase(), LOCAL_EMAIL_DOMAIN)
}

/// Ordered sequence of entries with no two sharing an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Entry>", into = "Vec<Entry>")]
pub struct Directory {
    entries: Vec<Entry>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect entries in order, dropping later duplicates of an id.
    pub fn from_entries(entries: impl IntoIterator<Item = Entry>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        for entry in entries {
            if seen.insert(entry.id.clone()) {
                kept.push(entry);
            } else {
                log::warn!("Dropping duplicate directory entry with id {}", entry.id);
            }
        }
        Self { entries: kept }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    pub fn contains(&self, id: &EntryId) -> bool {
        self.get(id).is_some()
    }

    /// Append an entry. Returns false and leaves the directory untouched if
    /// the id is already present.
    pub fn push(&mut self, entry: Entry) -> bool {
        if self.contains(&entry.id) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn remove(&mut self, id: &EntryId) -> Option<Entry> {
        let index = self.entries.iter().position(|e| &e.id == id)?;
        Some(self.entries.remove(index))
    }
}

impl From<Vec<Entry>> for Directory {
    fn from(entries: Vec<Entry>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<Directory> for Vec<Entry> {
    fn from(directory: Directory) -> Self {
        directory.entries
    }
}

impl<'a> IntoIterator for &'a Directory {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
