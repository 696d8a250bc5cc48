use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::models::{Book, BookStatus};

/// Retrieve every book in id order. Both the listing and the summary are built
/// from this single read.
pub fn fetch_books(conn: &Connection) -> Result<Vec<Book>> {
    let mut stmt = conn
        .prepare("SELECT id, title, author, status FROM books ORDER BY id")
        .context("failed to prepare book query")?;

    let books = stmt
        .query_map([], |row| {
            Ok(Book {
                id: row.get(0)?,
                title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                author: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                status: BookStatus::from_db(row.get::<_, Option<String>>(3)?.unwrap_or_default()),
            })
        })
        .context("failed to load books")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect books")?;

    Ok(books)
}

/// Insert a new book and return it with the id SQLite assigned.
pub fn create_book(conn: &Connection, title: &str, author: &str, status: &BookStatus) -> Result<Book> {
    conn.execute(
        "INSERT INTO books (title, author, status) VALUES (?1, ?2, ?3)",
        params![title, author, status.as_str()],
    )
    .context("failed to insert book")?;

    let id = conn.last_insert_rowid();
    tracing::info!(id, title, author, status = %status, "book added");
    Ok(Book {
        id,
        title: title.to_string(),
        author: author.to_string(),
        status: status.clone(),
    })
}

/// Overwrite every editable column of the book with `id`. An unknown id is not
/// an error: nothing changes and the affected-row count of zero is returned.
pub fn update_book(
    conn: &Connection,
    id: i64,
    title: &str,
    author: &str,
    status: &BookStatus,
) -> Result<usize> {
    let updated = conn
        .execute(
            "UPDATE books SET title = ?1, author = ?2, status = ?3 WHERE id = ?4",
            params![title, author, status.as_str(), id],
        )
        .context("failed to update book")?;

    if updated == 0 {
        tracing::warn!(id, "update matched no book");
    } else {
        tracing::info!(id, title, author, status = %status, "book updated");
    }
    Ok(updated)
}

/// Remove the book with `id`. Like updates, a missing id is a silent no-op.
pub fn delete_book(conn: &Connection, id: i64) -> Result<usize> {
    let deleted = conn
        .execute("DELETE FROM books WHERE id = ?1", params![id])
        .context("failed to delete book")?;

    if deleted == 0 {
        tracing::warn!(id, "delete matched no book");
    } else {
        tracing::info!(id, "book deleted");
    }
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::create_books_table;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_books_table(&conn).unwrap();
        conn
    }

    #[test]
    fn insert_adds_exactly_one_row_with_fresh_id() {
        let conn = setup();
        let first = create_book(&conn, "Dune", "Herbert", &BookStatus::Available).unwrap();
        let before = fetch_books(&conn).unwrap();

        let added = create_book(&conn, "Emma", "Austen", &BookStatus::Issued).unwrap();
        let after = fetch_books(&conn).unwrap();

        assert_eq!(after.len(), before.len() + 1);
        assert!(before.iter().all(|b| b.id != added.id));
        assert_ne!(added.id, first.id);
        let stored: Vec<_> = after.iter().filter(|b| b.id == added.id).collect();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0], &added);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let conn = setup();
        let first = create_book(&conn, "A", "X", &BookStatus::Available).unwrap();
        delete_book(&conn, first.id).unwrap();
        let second = create_book(&conn, "A", "X", &BookStatus::Available).unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn update_touches_only_the_target_row() {
        let conn = setup();
        let keep = create_book(&conn, "Dune", "Herbert", &BookStatus::Available).unwrap();
        let target = create_book(&conn, "Emma", "Austen", &BookStatus::Available).unwrap();

        let updated = update_book(&conn, target.id, "Persuasion", "Austen", &BookStatus::Issued).unwrap();
        assert_eq!(updated, 1);

        let books = fetch_books(&conn).unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0], keep);
        assert_eq!(
            books[1],
            Book {
                id: target.id,
                title: "Persuasion".into(),
                author: "Austen".into(),
                status: BookStatus::Issued,
            }
        );
    }

    #[test]
    fn delete_removes_exactly_that_row() {
        let conn = setup();
        let a = create_book(&conn, "A", "X", &BookStatus::Available).unwrap();
        let b = create_book(&conn, "B", "Y", &BookStatus::Available).unwrap();

        assert_eq!(delete_book(&conn, a.id).unwrap(), 1);

        let books = fetch_books(&conn).unwrap();
        assert_eq!(books, vec![b]);
    }

    #[test]
    fn missing_ids_are_silent_noops() {
        let conn = setup();
        let a = create_book(&conn, "A", "X", &BookStatus::Available).unwrap();

        assert_eq!(update_book(&conn, 999, "Z", "Z", &BookStatus::Issued).unwrap(), 0);
        assert_eq!(delete_book(&conn, 999).unwrap(), 0);
        assert_eq!(fetch_books(&conn).unwrap(), vec![a]);
    }

    #[test]
    fn duplicates_and_unknown_statuses_round_trip() {
        let conn = setup();
        create_book(&conn, "A", "X", &BookStatus::Available).unwrap();
        create_book(&conn, "A", "X", &BookStatus::Available).unwrap();
        conn.execute(
            "INSERT INTO books (title, author, status) VALUES ('A', 'X', 'Lost')",
            [],
        )
        .unwrap();

        let books = fetch_books(&conn).unwrap();
        assert_eq!(books.len(), 3);
        assert_eq!(books[2].status, BookStatus::Other("Lost".into()));
    }
}
