//! Bookstore use-case service: catalog plus shopping cart.
//!
//! # Responsibility
//! - Own the book catalog and the cart for one session.
//! - Add books from form drafts and move catalog books into the cart.
//!
//! # Invariants
//! - A fresh catalog starts with `default_catalog()`.
//! - New book ids are unique within the catalog.
//! - Only books present in the catalog can be added to the cart.
//! - Cart lines keep the book fields captured when first added.

use crate::model::book::{default_catalog, Book, BookDraft};
use crate::model::cart_line::CartLine;
use crate::model::form::FormError;
use crate::model::record::{RecordId, RecordIdGenerator};
use crate::persist::blob_store::BlobStore;
use crate::persist::snapshot::{
    load_snapshot, load_snapshot_or, PersistenceHook, BOOKS_KEY, CART_KEY,
};
use crate::store::cart::CartAggregator;
use crate::store::keyed_store::KeyedCollectionStore;
use crate::store::observer::SubscriptionId;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Bookstore use-case failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookstoreError {
    /// Requested book id is not in the catalog.
    BookNotFound(RecordId),
    /// Add-book form was rejected.
    Form(FormError),
}

impl Display for BookstoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BookNotFound(id) => write!(f, "book not found: {id}"),
            Self::Form(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BookstoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Form(err) => Some(err),
            Self::BookNotFound(_) => None,
        }
    }
}

impl From<FormError> for BookstoreError {
    fn from(value: FormError) -> Self {
        Self::Form(value)
    }
}

/// Catalog and cart facade used by the book list, add-book form and cart view.
pub struct BookstoreService {
    catalog: KeyedCollectionStore<Book>,
    cart: CartAggregator<Book>,
    ids: RecordIdGenerator,
}

impl BookstoreService {
    /// Starts a non-persistent store with the default catalog and an empty cart.
    pub fn in_memory() -> Self {
        Self::from_parts(default_catalog(), CartAggregator::new())
    }

    /// Rehydrates catalog and cart from `blob_store` and persists changes back.
    ///
    /// The default catalog is used only when no catalog was ever stored.
    pub fn with_persistence(blob_store: Rc<dyn BlobStore>) -> Self {
        let books: Vec<Book> = load_snapshot_or(blob_store.as_ref(), BOOKS_KEY, default_catalog);
        let lines: Vec<CartLine<Book>> = load_snapshot(blob_store.as_ref(), CART_KEY);

        let mut service = Self::from_parts(books, CartAggregator::with_lines(lines));
        service
            .catalog
            .attach(PersistenceHook::<Book>::new(Rc::clone(&blob_store), BOOKS_KEY));
        service
            .cart
            .attach(PersistenceHook::<CartLine<Book>>::new(blob_store, CART_KEY));
        info!(
            "event=bookstore_open module=service status=ok persisted=true books={} cart_lines={}",
            service.catalog.len(),
            service.cart.len()
        );
        service
    }

    fn from_parts(books: Vec<Book>, cart: CartAggregator<Book>) -> Self {
        let catalog = KeyedCollectionStore::with_records(BOOKS_KEY, books);
        let ids = RecordIdGenerator::starting_after(catalog.max_id().unwrap_or(0));
        Self { catalog, cart, ids }
    }

    /// Validates `draft`, assigns a fresh id, and appends the book to the catalog.
    pub fn add_book(&mut self, draft: &BookDraft) -> Result<Book, BookstoreError> {
        let book = draft.into_book(self.fresh_id())?;
        self.catalog.add(book.clone());
        Ok(book)
    }

    /// Puts one copy of catalog book `book_id` into the cart.
    ///
    /// Returns the cart line quantity after the call.
    ///
    /// # Errors
    /// - `BookNotFound` when the id is not in the catalog.
    pub fn add_to_cart(&mut self, book_id: RecordId) -> Result<u32, BookstoreError> {
        let book = self
            .catalog
            .find(book_id)
            .cloned()
            .ok_or(BookstoreError::BookNotFound(book_id))?;
        Ok(self.cart.add_or_increment(book))
    }

    pub fn books(&self) -> &[Book] {
        self.catalog.list()
    }

    pub fn book(&self, id: RecordId) -> Option<&Book> {
        self.catalog.find(id)
    }

    pub fn cart_lines(&self) -> &[CartLine<Book>] {
        self.cart.list()
    }

    pub fn cart_total(&self) -> f64 {
        self.cart.total()
    }

    pub fn subscribe_catalog<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&[Book]) + 'static,
    {
        self.catalog.subscribe(observer)
    }

    pub fn subscribe_cart<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&[CartLine<Book>]) + 'static,
    {
        self.cart.subscribe(observer)
    }

    fn fresh_id(&mut self) -> RecordId {
        self.ids.next_id().unwrap_or_else(|| {
            let id = self.catalog.lowest_free_id();
            warn!(
                "event=bookstore_id module=service status=generator_exhausted fallback_id={}",
                id
            );
            id
        })
    }
}
