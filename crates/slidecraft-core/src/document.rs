//! The persisted deck document layout and JSON import/export.

use crate::deck::Deck;
use crate::slide::Slide;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Format tag written into every exported document.
pub const DOCUMENT_FORMAT: &str = "slide-editor-v2";
/// Layout version written into every exported document.
pub const DOCUMENT_VERSION: &str = "2.0.0";

/// Import/export errors. These are the only surfaced errors in the core;
/// geometry operations clamp instead.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Not a slide document: expected a `slides` array or a bare slide array")]
    UnrecognizedShape,
    #[error("Document contains no slides")]
    Empty,
}

/// Which optional slide fields an export carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub include_audio: bool,
    pub include_transcripts: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_audio: true,
            include_transcripts: true,
        }
    }
}

/// The wrapped persisted layout:
/// `{ slides, exportedAt, format: "slide-editor-v2", version: "2.0.0" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckDocument {
    pub slides: Vec<Slide>,
    /// ISO-8601 timestamp supplied by the caller at export time.
    pub exported_at: String,
    pub format: String,
    pub version: String,
}

impl DeckDocument {
    /// Snapshot the full deck into the persisted layout.
    pub fn export(deck: &Deck, exported_at: impl Into<String>) -> Self {
        Self::export_with(deck, ExportOptions::default(), exported_at)
    }

    /// Snapshot the deck, stripping audio/transcripts per the options.
    pub fn export_with(
        deck: &Deck,
        options: ExportOptions,
        exported_at: impl Into<String>,
    ) -> Self {
        let slides = deck
            .slides()
            .iter()
            .cloned()
            .map(|mut slide| {
                if !options.include_audio {
                    slide.audio = None;
                }
                if !options.include_transcripts {
                    slide.transcript = None;
                }
                slide
            })
            .collect();
        Self {
            slides,
            exported_at: exported_at.into(),
            format: DOCUMENT_FORMAT.to_string(),
            version: DOCUMENT_VERSION.to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Import a deck from JSON: either the wrapped layout or a bare slide
    /// array. Any other shape is rejected and the caller's state stays
    /// untouched; the first imported slide becomes current.
    pub fn import(json: &str) -> Result<Deck, DocumentError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let slides_value = if value.is_array() {
            value
        } else if let Some(slides) = value.get("slides") {
            slides.clone()
        } else {
            return Err(DocumentError::UnrecognizedShape);
        };
        let slides: Vec<Slide> = serde_json::from_value(slides_value)?;
        Deck::from_slides(slides).ok_or(DocumentError::Empty)
    }
}
