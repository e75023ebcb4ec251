//! Domain records held by keyed collections.
//!
//! # Responsibility
//! - Define the roster and bookstore record shapes and their form drafts.
//! - Provide the `Keyed`/`Priced` accessors the store layer is generic over.
//!
//! # Invariants
//! - Every record is identified by an integer `RecordId`.
//! - The store layer treats record fields as opaque payload.

pub mod book;
pub mod cart_line;
pub mod form;
pub mod record;
pub mod student;
