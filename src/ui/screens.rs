use crate::models::Book;
use crate::summary::{summarize, CatalogSummary};

/// Listing plus summary, both projected from the same full read.
///
/// Selection is tracked by record id rather than row index so it survives a
/// refresh as long as the record does.
#[derive(Default)]
pub(crate) struct CatalogView {
    pub(crate) books: Vec<Book>,
    pub(crate) summary: CatalogSummary,
    pub(crate) selected_id: Option<i64>,
}

impl CatalogView {
    /// Replace the projection with a fresh read. A selection whose record is
    /// gone is dropped.
    pub(crate) fn set_books(&mut self, books: Vec<Book>) {
        self.summary = summarize(&books);
        self.books = books;
        if let Some(id) = self.selected_id {
            if !self.books.iter().any(|b| b.id == id) {
                self.selected_id = None;
            }
        }
    }

    pub(crate) fn selected_index(&self) -> Option<usize> {
        let id = self.selected_id?;
        self.books.iter().position(|b| b.id == id)
    }

    pub(crate) fn selected_book(&self) -> Option<&Book> {
        self.selected_index().map(|idx| &self.books[idx])
    }

    /// Move the highlight by `offset` rows, clamping at both ends. With nothing
    /// selected, moving down starts at the first row and moving up at the last.
    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.books.is_empty() {
            self.selected_id = None;
            return;
        }
        let last = self.books.len() - 1;
        let next = match self.selected_index() {
            Some(current) => {
                let target = current as isize + offset;
                target.clamp(0, last as isize) as usize
            }
            None if offset < 0 => last,
            None => 0,
        };
        self.selected_id = Some(self.books[next].id);
    }

    pub(crate) fn select_first(&mut self) {
        self.selected_id = self.books.first().map(|b| b.id);
    }

    pub(crate) fn select_last(&mut self) {
        self.selected_id = self.books.last().map(|b| b.id);
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selected_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookStatus;

    fn books(ids: &[i64]) -> Vec<Book> {
        ids.iter()
            .map(|&id| Book {
                id,
                title: format!("T{id}"),
                author: "A".into(),
                status: BookStatus::Available,
            })
            .collect()
    }

    #[test]
    fn movement_clamps_to_bounds() {
        let mut view = CatalogView::default();
        view.set_books(books(&[3, 5, 9]));

        view.move_selection(1);
        assert_eq!(view.selected_id, Some(3));
        view.move_selection(5);
        assert_eq!(view.selected_id, Some(9));
        view.move_selection(-1);
        assert_eq!(view.selected_id, Some(5));
        view.move_selection(-10);
        assert_eq!(view.selected_id, Some(3));
    }

    #[test]
    fn moving_up_without_selection_starts_at_bottom() {
        let mut view = CatalogView::default();
        view.set_books(books(&[1, 2]));
        view.move_selection(-1);
        assert_eq!(view.selected_id, Some(2));
    }

    #[test]
    fn refresh_keeps_surviving_selection_and_drops_vanished_one() {
        let mut view = CatalogView::default();
        view.set_books(books(&[1, 2, 3]));
        view.selected_id = Some(2);

        view.set_books(books(&[0, 1, 2, 3]));
        assert_eq!(view.selected_index(), Some(2));

        view.set_books(books(&[1, 3]));
        assert_eq!(view.selected_id, None);
    }

    #[test]
    fn refresh_recomputes_summary() {
        let mut view = CatalogView::default();
        view.set_books(books(&[1, 2]));
        assert_eq!(view.summary.total_available, 2);
        view.set_books(Vec::new());
        assert_eq!(view.summary.total_available, 0);
    }
}
