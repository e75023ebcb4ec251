use coursebook_core::{Book, CartAggregator, CartLine};
use std::cell::RefCell;
use std::rc::Rc;

fn nineteen_eighty_four() -> Book {
    Book::new(1, "1984", "George Orwell", 350.0)
}

#[test]
fn adding_same_book_twice_totals_seven_hundred() {
    let mut cart = CartAggregator::new();
    assert_eq!(cart.add_or_increment(nineteen_eighty_four()), 1);
    assert_eq!(cart.add_or_increment(nineteen_eighty_four()), 2);

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.total(), 700.0);
}

#[test]
fn first_insert_starts_at_one_and_increment_keeps_original_fields() {
    let mut cart = CartAggregator::new();
    cart.add_or_increment(nineteen_eighty_four());

    let repriced = Book::new(1, "1984 (Deluxe)", "George Orwell", 999.0);
    cart.add_or_increment(repriced);

    let line = cart.find(1).expect("line exists");
    assert_eq!(line.quantity, 2);
    assert_eq!(line.item, nineteen_eighty_four());
}

#[test]
fn total_is_sum_of_price_times_quantity() {
    let mut cart = CartAggregator::new();
    assert_eq!(cart.total(), 0.0);

    cart.add_or_increment(nineteen_eighty_four());
    cart.add_or_increment(Book::new(4, "Pride and Prejudice", "Jane Austen", 250.0));
    cart.add_or_increment(Book::new(4, "Pride and Prejudice", "Jane Austen", 250.0));
    cart.add_or_increment(Book::new(4, "Pride and Prejudice", "Jane Austen", 250.0));

    let expected: f64 = cart
        .list()
        .iter()
        .map(|line| line.item.price * f64::from(line.quantity))
        .sum();
    assert_eq!(cart.total(), expected);
    assert_eq!(cart.total(), 350.0 + 750.0);
}

#[test]
fn lines_keep_first_insertion_order() {
    let mut cart = CartAggregator::new();
    cart.add_or_increment(Book::new(3, "The Great Gatsby", "F. Scott Fitzgerald", 280.0));
    cart.add_or_increment(nineteen_eighty_four());
    cart.add_or_increment(Book::new(3, "The Great Gatsby", "F. Scott Fitzgerald", 280.0));

    let ids: Vec<_> = cart.list().iter().map(|line| line.item.id).collect();
    assert_eq!(ids, vec![3, 1]);
}

#[test]
fn every_add_or_increment_notifies_with_quantities() {
    let mut cart = CartAggregator::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    cart.subscribe(move |lines: &[CartLine<Book>]| {
        sink.borrow_mut()
            .push(lines.iter().map(|line| line.quantity).collect::<Vec<_>>());
    });

    cart.add_or_increment(nineteen_eighty_four());
    cart.add_or_increment(nineteen_eighty_four());

    assert_eq!(*seen.borrow(), vec![vec![1], vec![2]]);
}

#[test]
fn with_lines_drops_zero_quantity_entries() {
    let cart = CartAggregator::with_lines(vec![
        CartLine {
            item: nineteen_eighty_four(),
            quantity: 0,
        },
        CartLine {
            item: Book::new(5, "Moby-Dick", "Herman Melville", 400.0),
            quantity: 2,
        },
    ]);

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.total(), 800.0);
}

#[test]
fn unsubscribed_cart_view_stops_receiving_snapshots() {
    let mut cart = CartAggregator::new();
    let seen = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&seen);
    let subscription = cart.subscribe(move |_: &[CartLine<Book>]| *sink.borrow_mut() += 1);

    cart.add_or_increment(nineteen_eighty_four());
    assert!(cart.unsubscribe(subscription));
    cart.add_or_increment(nineteen_eighty_four());

    assert_eq!(*seen.borrow(), 1);
    assert_eq!(cart.find(1).map(|line| line.quantity), Some(2));
}
