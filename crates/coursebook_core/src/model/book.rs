//! Bookstore catalog record.

use crate::model::form::{required_price, required_text, FormError};
use crate::model::record::{Keyed, Priced, RecordId};
use serde::{Deserialize, Serialize};

/// One book offered in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: RecordId,
    pub title: String,
    pub author: String,
    pub price: f64,
}

impl Book {
    pub fn new(
        id: RecordId,
        title: impl Into<String>,
        author: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            price,
        }
    }
}

impl Keyed for Book {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Priced for Book {
    fn price(&self) -> f64 {
        self.price
    }
}

/// Catalog every fresh bookstore starts with.
pub fn default_catalog() -> Vec<Book> {
    vec![
        Book::new(1, "1984", "George Orwell", 350.0),
        Book::new(2, "To Kill a Mockingbird", "Harper Lee", 300.0),
        Book::new(3, "The Great Gatsby", "F. Scott Fitzgerald", 280.0),
        Book::new(4, "Pride and Prejudice", "Jane Austen", 250.0),
        Book::new(5, "Moby-Dick", "Herman Melville", 400.0),
    ]
}

/// Raw add-book form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub price: String,
}

impl BookDraft {
    /// Validates the draft and assigns `id`.
    ///
    /// All three fields are required; `price` must be a finite, non-negative number.
    pub fn into_book(&self, id: RecordId) -> Result<Book, FormError> {
        let title = required_text("title", &self.title)?;
        let author = required_text("author", &self.author)?;
        let price = required_price("price", &self.price)?;
        Ok(Book {
            id,
            title,
            author,
            price,
        })
    }
}
