use coursebook_core::{KeyedCollectionStore, Student};
use std::cell::RefCell;
use std::rc::Rc;

fn ana() -> Student {
    Student::new(1, "Ana", 20, 90)
}

fn seeded_store() -> KeyedCollectionStore<Student> {
    let mut store = KeyedCollectionStore::new("students");
    store.add(Student::new(10, "Bo", 21, 75));
    store.add(Student::new(20, "Cy", 19, 88));
    store
}

fn recorded_ids(store: &mut KeyedCollectionStore<Student>) -> Rc<RefCell<Vec<Vec<i64>>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.subscribe(move |snapshot: &[Student]| {
        sink.borrow_mut()
            .push(snapshot.iter().map(|student| student.id).collect());
    });
    seen
}

#[test]
fn add_then_find_then_remove_scenario() {
    let mut store = KeyedCollectionStore::new("students");
    store.add(ana());

    assert_eq!(store.find(1), Some(&ana()));
    assert!(store.remove(1));
    assert!(store.find(1).is_none());
}

#[test]
fn add_appends_without_losing_existing_records() {
    let mut store = seeded_store();
    store.add(ana());

    let ids: Vec<_> = store.list().iter().map(|student| student.id).collect();
    assert_eq!(ids, vec![10, 20, 1]);
    assert_eq!(store.list().iter().filter(|s| s.id == 1).count(), 1);
    assert_eq!(store.list()[2], ana());
}

#[test]
fn removing_absent_id_is_idempotent_and_silent() {
    let mut store = seeded_store();
    let seen = recorded_ids(&mut store);
    let before = store.list().to_vec();

    assert!(!store.remove(999));
    assert!(!store.remove(999));

    assert_eq!(store.list(), before.as_slice());
    assert!(seen.borrow().is_empty());
}

#[test]
fn update_replaces_in_place_and_keeps_length() {
    let mut store = seeded_store();
    store.add(ana());
    let mut edited = Student::new(10, "Bo Updated", 22, 80);
    edited.email = "bo@school.edu".to_string();

    assert!(store.update(edited.clone()));

    assert_eq!(store.len(), 3);
    assert_eq!(store.find(10), Some(&edited));
    assert_eq!(store.list()[0], edited);
}

#[test]
fn update_without_match_is_a_silent_no_op() {
    let mut store = seeded_store();
    let seen = recorded_ids(&mut store);

    assert!(!store.update(Student::new(404, "Ghost", 30, 50)));

    assert_eq!(store.len(), 2);
    assert!(store.find(404).is_none());
    assert!(seen.borrow().is_empty());
}

#[test]
fn observers_receive_post_mutation_snapshot_in_order() {
    let mut store = KeyedCollectionStore::new("students");
    let order = Rc::new(RefCell::new(Vec::new()));

    let first = Rc::clone(&order);
    store.subscribe(move |snapshot: &[Student]| first.borrow_mut().push(("render", snapshot.len())));
    let second = Rc::clone(&order);
    store.subscribe(move |snapshot: &[Student]| second.borrow_mut().push(("persist", snapshot.len())));

    store.add(ana());
    store.update(Student::new(1, "Ana Maria", 20, 95));
    store.remove(1);

    assert_eq!(
        *order.borrow(),
        vec![
            ("render", 1),
            ("persist", 1),
            ("render", 1),
            ("persist", 1),
            ("render", 0),
            ("persist", 0),
        ]
    );
}

#[test]
fn unsubscribed_observer_is_not_called() {
    let mut store = KeyedCollectionStore::new("students");
    let seen = recorded_ids(&mut store);
    store.add(ana());

    let extra_calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&extra_calls);
    let subscription = store.subscribe(move |_: &[Student]| *counter.borrow_mut() += 1);
    assert_eq!(store.observer_count(), 2);
    assert!(store.unsubscribe(subscription));
    assert!(!store.unsubscribe(subscription));

    store.add(Student::new(2, "Bea", 18, 70));

    assert_eq!(*extra_calls.borrow(), 0);
    assert_eq!(*seen.borrow(), vec![vec![1], vec![1, 2]]);
}
