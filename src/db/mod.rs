//! Persistence layer around the embedded SQLite catalog.

mod books;
mod connection;

pub use books::{create_book, delete_book, fetch_books, update_book};
pub use connection::ensure_schema;

#[cfg(test)]
pub(crate) use connection::create_books_table;
