//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `coursebook_core` linkage.
//! - Drive one headless roster and bookstore session against in-memory storage.

use coursebook_core::{
    BlobStore, BookstoreService, MemoryBlobStore, RosterService, StudentDraft, CART_KEY,
    STUDENTS_KEY,
};
use std::cell::Cell;
use std::process::ExitCode;
use std::rc::Rc;

fn main() -> ExitCode {
    println!("coursebook_core ping={}", coursebook_core::ping());
    println!("coursebook_core version={}", coursebook_core::core_version());

    let storage = Rc::new(MemoryBlobStore::new());
    run_roster(Rc::clone(&storage));
    if let Err(err) = run_bookstore(Rc::clone(&storage)) {
        eprintln!("bookstore session failed: {err}");
        return ExitCode::FAILURE;
    }

    for key in [STUDENTS_KEY, CART_KEY] {
        let bytes = storage
            .read(key)
            .ok()
            .flatten()
            .map_or(0, |blob| blob.len());
        println!("persisted key={key} bytes={bytes}");
    }
    ExitCode::SUCCESS
}

fn run_roster(storage: Rc<MemoryBlobStore>) {
    let mut roster = RosterService::with_persistence(storage);
    let renders = Rc::new(Cell::new(0_u32));
    let counter = Rc::clone(&renders);
    roster.subscribe(move |_| counter.set(counter.get() + 1));

    let draft = StudentDraft {
        name: "Ana".to_string(),
        age: "20".to_string(),
        grade: "90".to_string(),
        email: "ana@school.edu".to_string(),
        ..StudentDraft::default()
    };
    match roster.add_student(&draft) {
        Ok(student) => println!("roster added id={} row=\"{}\"", student.id, student.summary()),
        Err(err) => println!("roster rejected draft: {err}"),
    }

    let blank = StudentDraft::default();
    if let Err(err) = roster.add_student(&blank) {
        println!("roster rejected draft: {err}");
    }

    for student in roster.students() {
        println!("roster row=\"{}\"", student.summary());
    }
    println!("roster renders={}", renders.get());
}

fn run_bookstore(storage: Rc<MemoryBlobStore>) -> Result<(), coursebook_core::BookstoreError> {
    let mut store = BookstoreService::with_persistence(storage);
    store.add_to_cart(1)?;
    store.add_to_cart(1)?;
    store.add_to_cart(4)?;

    for line in store.cart_lines() {
        println!(
            "cart line title=\"{}\" price={} quantity={}",
            line.item.title, line.item.price, line.quantity
        );
    }
    println!("cart total={}", store.cart_total());
    Ok(())
}
