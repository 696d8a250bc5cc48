//! Availability tallies derived from the full book list.

use std::collections::HashMap;

use crate::models::{Book, BookStatus};

/// Counts for one distinct (title, author) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleTally {
    pub title: String,
    pub author: String,
    pub available: usize,
    pub issued: usize,
}

/// Per-pair tallies in first-seen order plus grand totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSummary {
    pub tallies: Vec<TitleTally>,
    pub total_available: usize,
    pub total_issued: usize,
}

/// Group `books` by (title, author) and count by status.
///
/// Rows whose status is neither `Available` nor `Issued` still register their
/// pair but add to no count, per-pair or total.
pub fn summarize(books: &[Book]) -> CatalogSummary {
    let mut summary = CatalogSummary::default();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();

    for book in books {
        let slot = *index
            .entry((book.title.as_str(), book.author.as_str()))
            .or_insert_with(|| {
                summary.tallies.push(TitleTally {
                    title: book.title.clone(),
                    author: book.author.clone(),
                    available: 0,
                    issued: 0,
                });
                summary.tallies.len() - 1
            });

        let tally = &mut summary.tallies[slot];
        match book.status {
            BookStatus::Available => {
                tally.available += 1;
                summary.total_available += 1;
            }
            BookStatus::Issued => {
                tally.issued += 1;
                summary.total_issued += 1;
            }
            BookStatus::Other(_) => {}
        }
    }

    summary
}

impl CatalogSummary {
    /// One-line totals caption shown under the summary table.
    pub fn totals_label(&self) -> String {
        format!(
            "Total Available: {}, Total Issued: {}",
            self.total_available, self.total_issued
        )
    }
}
