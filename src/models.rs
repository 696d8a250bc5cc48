//! Domain models that mirror the `books` table and flow through the TUI. They
//! stay plain data holders so the persistence and presentation layers can do
//! the interesting work.

use std::fmt;

/// Availability marker stored in the `status` column.
///
/// The form only ever produces `Available` or `Issued`, but the column is plain
/// text, so rows written by other tools may carry anything. Those values are
/// kept verbatim in `Other` and shown as-is in the listing; the summary ignores
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BookStatus {
    #[default]
    Available,
    Issued,
    Other(String),
}

impl BookStatus {
    /// Text written to the `status` column.
    pub fn as_str(&self) -> &str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::Issued => "Issued",
            BookStatus::Other(raw) => raw,
        }
    }

    /// Interpret a raw column value. Matching is exact, so `"issued"` is an
    /// `Other` value just like any typo would be.
    pub fn from_db(raw: String) -> Self {
        match raw.as_str() {
            "Available" => BookStatus::Available,
            "Issued" => BookStatus::Issued,
            _ => BookStatus::Other(raw),
        }
    }

    /// Flip between the two selectable values. Unknown values fall back to the
    /// default so the form can never emit them.
    pub fn toggled(&self) -> Self {
        match self {
            BookStatus::Available => BookStatus::Issued,
            BookStatus::Issued | BookStatus::Other(_) => BookStatus::Available,
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One row of the catalog.
pub struct Book {
    /// Primary key assigned by SQLite on insert. Update and delete flows bubble
    /// it back to the persistence layer.
    pub id: i64,
    pub title: String,
    pub author: String,
    pub status: BookStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_parse_exactly() {
        assert_eq!(BookStatus::from_db("Available".into()), BookStatus::Available);
        assert_eq!(BookStatus::from_db("Issued".into()), BookStatus::Issued);
        assert_eq!(
            BookStatus::from_db("issued".into()),
            BookStatus::Other("issued".into())
        );
    }

    #[test]
    fn unknown_status_keeps_its_text() {
        let status = BookStatus::from_db("Lost".into());
        assert_eq!(status.as_str(), "Lost");
        assert_eq!(status.to_string(), "Lost");
    }

    #[test]
    fn toggling_never_produces_unknown_values() {
        assert_eq!(BookStatus::Available.toggled(), BookStatus::Issued);
        assert_eq!(BookStatus::Issued.toggled(), BookStatus::Available);
        assert_eq!(
            BookStatus::Other("Lost".into()).toggled(),
            BookStatus::Available
        );
    }
}
