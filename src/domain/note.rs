//! Note domain model.
//!
//! Notes are owned by the remote NoteHub store and mirrored read-only in list
//! results until a create or delete invalidates the cache.

use crate::domain::error::DomainError;
use crate::domain::ItemId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category attached to every note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteTag {
    Todo,
    Work,
    Personal,
    Meeting,
    Shopping,
}

impl NoteTag {
    /// All tags in the order the create form offers them.
    pub const ALL: [Self; 5] = [
        Self::Todo,
        Self::Work,
        Self::Personal,
        Self::Meeting,
        Self::Shopping,
    ];

    /// Returns the tag as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "Todo",
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Meeting => "Meeting",
            Self::Shopping => "Shopping",
        }
    }
}

impl fmt::Display for NoteTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteTag {
    type Err = DomainError;

    /// Parses a tag case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use notehub::domain::NoteTag;
    ///
    /// assert_eq!("work".parse::<NoteTag>().unwrap(), NoteTag::Work);
    /// assert!("urgent".parse::<NoteTag>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::Validation(format!("Unknown tag: {wanted}")))
    }
}

/// A note as returned by the NoteHub API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub tag: NoteTag,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body of `POST /notes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateNotePayload {
    pub title: String,
    pub content: String,
    pub tag: NoteTag,
}

impl CreateNotePayload {
    /// Parses the terminal shorthand `title | content | tag`.
    ///
    /// Content and tag are optional; the tag defaults to [`NoteTag::Todo`].
    /// Beyond a non-empty title nothing is validated here, the API has the
    /// final say.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] when the title is blank or the tag
    /// is unknown.
    ///
    /// # Examples
    ///
    /// ```
    /// use notehub::domain::{CreateNotePayload, NoteTag};
    ///
    /// let payload = CreateNotePayload::parse("Buy milk | 2 liters | shopping").unwrap();
    /// assert_eq!(payload.title, "Buy milk");
    /// assert_eq!(payload.tag, NoteTag::Shopping);
    /// ```
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let mut parts = input.splitn(3, '|').map(str::trim);
        let title = parts.next().unwrap_or_default();
        if title.is_empty() {
            return Err(DomainError::Validation("Title is required".to_string()));
        }

        let content = parts.next().unwrap_or_default().to_string();
        let tag = match parts.next() {
            Some(tag) if !tag.is_empty() => tag.parse()?,
            _ => NoteTag::Todo,
        };

        Ok(Self {
            title: title.to_string(),
            content,
            tag,
        })
    }
}
