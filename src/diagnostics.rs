// Inert trail of what the normalizer did with a payload
use crate::parser::ResponseShape;
use serde::Serialize;
use tracing::debug;

/// Where a record's photos came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoSource {
    PhotoList,
    MaxPhotoUrl,
    Photo,
    MainPhotoUrl,
    Image,
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    ShapeDetected { shape: ResponseShape, items: usize },
    SkippedItem { index: usize },
    FieldDefaulted { index: usize, field: &'static str },
    PhotoSource { index: usize, source: PhotoSource },
    Synthesized { count: usize },
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: Diagnostic) {
        debug!(?entry, "normalizer");
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Fields that fell back to a default for the item at `index`.
    pub fn defaulted_fields(&self, index: usize) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                Diagnostic::FieldDefaulted { index: i, field } if *i == index => Some(*field),
                _ => None,
            })
            .collect()
    }

    pub fn placeholder_photos(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    Diagnostic::PhotoSource {
                        source: PhotoSource::Placeholder,
                        ..
                    }
                )
            })
            .count()
    }
}
