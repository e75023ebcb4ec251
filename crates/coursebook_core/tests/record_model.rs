use coursebook_core::{BookDraft, FormError, Keyed, Student, StudentDraft};

#[test]
fn student_draft_trims_and_parses_fields() {
    let draft = StudentDraft {
        name: "  Ana  ".to_string(),
        age: " 20".to_string(),
        grade: "90 ".to_string(),
        email: " ana@school.edu ".to_string(),
        phone_number: " 555-0100 ".to_string(),
        address: "".to_string(),
    };

    let student = draft.into_student(7).expect("complete draft converts");
    assert_eq!(student.id(), 7);
    assert_eq!(student.name, "Ana");
    assert_eq!(student.age, 20);
    assert_eq!(student.grade, 90);
    assert_eq!(student.email, "ana@school.edu");
    assert_eq!(student.phone_number, "555-0100");
    assert!(student.address.is_empty());
}

#[test]
fn student_draft_reports_first_missing_required_field() {
    let draft = StudentDraft {
        name: "Ana".to_string(),
        ..StudentDraft::default()
    };
    assert_eq!(
        draft.into_student(1).expect_err("age is missing"),
        FormError::MissingField("age")
    );
}

#[test]
fn book_draft_requires_every_field() {
    let err = BookDraft::default()
        .into_book(1)
        .expect_err("empty draft is rejected");
    assert_eq!(err, FormError::MissingField("title"));

    let book = BookDraft {
        title: "Dune".to_string(),
        author: "Frank Herbert".to_string(),
        price: "0".to_string(),
    }
    .into_book(9)
    .expect("free book is valid");
    assert_eq!(book.price, 0.0);
    assert_eq!(book.id(), 9);
}

#[test]
fn student_optional_fields_default_when_missing_from_json() {
    let value = serde_json::json!({
        "id": 1,
        "name": "Ana",
        "age": 20,
        "grade": 90
    });

    let student: Student = serde_json::from_value(value).expect("minimal student decodes");
    assert_eq!(student, Student::new(1, "Ana", 20, 90));
}

#[test]
fn student_decodes_legacy_camel_case_blob_with_text_numbers() {
    let value = serde_json::json!({
        "id": 1700000000000_i64,
        "name": "Ana",
        "age": "20",
        "grade": " 90",
        "email": "ana@school.edu",
        "phoneNumber": "555-0100",
        "address": "1 Main St"
    });

    let student: Student = serde_json::from_value(value).expect("legacy student decodes");
    assert_eq!(student.age, 20);
    assert_eq!(student.grade, 90);
    assert_eq!(student.phone_number, "555-0100");

    let rewritten = serde_json::to_value(&student).expect("student encodes");
    assert_eq!(rewritten["phone_number"], "555-0100");
    assert_eq!(rewritten["age"], 20);
}

#[test]
fn student_with_non_numeric_age_text_is_rejected() {
    let value = serde_json::json!({
        "id": 1,
        "name": "Ana",
        "age": "twenty",
        "grade": 90
    });

    let err = serde_json::from_value::<Student>(value).expect_err("age must be numeric");
    assert!(err.to_string().contains("twenty"));
}
