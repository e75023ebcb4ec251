//! Student roster use-case service.
//!
//! # Responsibility
//! - Own the student store for one session and hand out fresh ids.
//! - Turn creation-form drafts into stored students.
//!
//! # Invariants
//! - Rejected drafts never reach the store.
//! - Ids issued here are unique within the roster: greater than every stored id
//!   while the generator has room, otherwise the lowest unused id.

use crate::model::form::FormError;
use crate::model::record::{RecordId, RecordIdGenerator};
use crate::model::student::{Student, StudentDraft};
use crate::persist::blob_store::BlobStore;
use crate::persist::snapshot::{load_snapshot, PersistenceHook, STUDENTS_KEY};
use crate::store::keyed_store::KeyedCollectionStore;
use crate::store::observer::SubscriptionId;
use log::{info, warn};
use std::rc::Rc;

/// Roster facade used by list, detail and form views.
pub struct RosterService {
    students: KeyedCollectionStore<Student>,
    ids: RecordIdGenerator,
}

impl RosterService {
    /// Starts an empty, non-persistent roster.
    pub fn in_memory() -> Self {
        Self::from_store(KeyedCollectionStore::new(STUDENTS_KEY))
    }

    /// Rehydrates the roster from `blob_store` and persists every change back.
    pub fn with_persistence(blob_store: Rc<dyn BlobStore>) -> Self {
        let records: Vec<Student> = load_snapshot(blob_store.as_ref(), STUDENTS_KEY);
        let mut service =
            Self::from_store(KeyedCollectionStore::with_records(STUDENTS_KEY, records));
        service
            .students
            .attach(PersistenceHook::<Student>::new(blob_store, STUDENTS_KEY));
        info!(
            "event=roster_open module=service status=ok persisted=true students={}",
            service.students.len()
        );
        service
    }

    fn from_store(students: KeyedCollectionStore<Student>) -> Self {
        let ids = RecordIdGenerator::starting_after(students.max_id().unwrap_or(0));
        Self { students, ids }
    }

    /// Validates `draft`, assigns a fresh id, and stores the student.
    ///
    /// # Errors
    /// - Returns the draft's `FormError`; the roster is left untouched.
    pub fn add_student(&mut self, draft: &StudentDraft) -> Result<Student, FormError> {
        // A rejected draft may burn an id; ids only need to be unique.
        let student = draft.into_student(self.fresh_id())?;
        self.students.add(student.clone());
        Ok(student)
    }

    /// Replaces the stored student sharing `student.id`.
    ///
    /// Returns `false` when no such student exists.
    pub fn edit_student(&mut self, student: Student) -> bool {
        self.students.update(student)
    }

    /// Removes a student; absent ids are a no-op returning `false`.
    pub fn delete_student(&mut self, id: RecordId) -> bool {
        self.students.remove(id)
    }

    /// Detail lookup. `None` is the "student not found" state.
    pub fn student(&self, id: RecordId) -> Option<&Student> {
        self.students.find(id)
    }

    pub fn students(&self) -> &[Student] {
        self.students.list()
    }

    /// Registers a re-render trigger.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&[Student]) + 'static,
    {
        self.students.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.students.unsubscribe(id)
    }

    fn fresh_id(&mut self) -> RecordId {
        self.ids.next_id().unwrap_or_else(|| {
            let id = self.students.lowest_free_id();
            warn!(
                "event=roster_id module=service status=generator_exhausted fallback_id={}",
                id
            );
            id
        })
    }
}
