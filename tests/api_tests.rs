//! HTTP facade integration tests against the in-process API stub

mod common;

use folium_client::{
    api::ApiClient,
    config::ApiConfig,
    error::ClientError,
    models::{CreateBook, CreateMember, ReturnRequest},
};

use common::spawn_stub;

fn client(base_url: &str) -> ApiClient {
    ApiClient::new(&ApiConfig {
        base_url: base_url.to_string(),
    })
}

#[tokio::test]
async fn test_list_books_roundtrip() {
    let (base_url, stub) = spawn_stub().await;
    stub.seed_book("The Hobbit", "J.R.R. Tolkien", Some("978-0-261-10221-7"), true);
    stub.seed_book("Dune", "Frank Herbert", None, false);

    let books = client(&base_url).list_books().await.expect("list books");
    assert_eq!(books.len(), 2);
    assert_eq!(books[0].title, "The Hobbit");
    assert_eq!(books[0].isbn.as_deref(), Some("978-0-261-10221-7"));
    assert!(!books[1].available);
}

#[tokio::test]
async fn test_create_book_returns_canonical_record() {
    let (base_url, _stub) = spawn_stub().await;

    let created = client(&base_url)
        .create_book(&CreateBook {
            title: "Emma".to_string(),
            author: "Jane Austen".to_string(),
            isbn: None,
        })
        .await
        .expect("create book");

    assert!(created.id > 0);
    assert!(created.available);
    assert!(created.created_at.is_some());
}

#[tokio::test]
async fn test_error_body_message_is_surfaced() {
    let (base_url, stub) = spawn_stub().await;
    stub.lock().fail_create_book = Some((400, Some("ISBN already exists".to_string())));

    let err = client(&base_url)
        .create_book(&CreateBook {
            title: "Emma".to_string(),
            author: "Jane Austen".to_string(),
            isbn: Some("978-0".to_string()),
        })
        .await
        .expect_err("create should fail");

    match err {
        ClientError::Request { status, message } => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(message, "ISBN already exists");
        }
        other => panic!("expected request error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_error_message_falls_back_to_status() {
    let (base_url, stub) = spawn_stub().await;
    stub.lock().fail_list_books = Some((500, None));

    let err = client(&base_url).list_books().await.expect_err("list should fail");
    assert_eq!(err.user_message(), "HTTP error, status 500");
}

#[tokio::test]
async fn test_transport_error_is_passed_through() {
    // Nothing listens here; the request never completes
    let err = client("http://127.0.0.1:1")
        .list_books()
        .await
        .expect_err("connection should fail");
    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn test_delete_book_removes_record() {
    let (base_url, stub) = spawn_stub().await;
    let id = stub.seed_book("Dune", "Frank Herbert", None, true);

    let api = client(&base_url);
    api.delete_book(id).await.expect("delete book");
    assert!(api.list_books().await.expect("list books").is_empty());
}

#[tokio::test]
async fn test_member_create_and_update() {
    let (base_url, _stub) = spawn_stub().await;
    let api = client(&base_url);

    let created = api
        .create_member(&CreateMember {
            name: "Ada Lovelace".to_string(),
            email: "ada@analytical.engine".to_string(),
            phone: None,
        })
        .await
        .expect("create member");

    let updated = api
        .update_member(
            created.id,
            &folium_client::models::UpdateMember {
                name: "Ada King".to_string(),
                email: created.email.clone(),
                phone: Some("+44 1815".to_string()),
            },
        )
        .await
        .expect("update member");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Ada King");
    assert_eq!(updated.phone.as_deref(), Some("+44 1815"));
}

#[tokio::test]
async fn test_loan_and_return_receipts() {
    let (base_url, stub) = spawn_stub().await;
    let book_id = stub.seed_book("Dune", "Frank Herbert", None, true);
    let member_id = stub.seed_member("Ada Lovelace", "ada@analytical.engine", None);

    let api = client(&base_url);
    let loan = api
        .create_loan(&folium_client::models::CreateLoan { book_id, member_id })
        .await
        .expect("create loan");
    assert_eq!(loan.book_id, book_id);
    assert_eq!(loan.member_id, member_id);

    let receipt = api
        .create_return(&ReturnRequest { loan_id: loan.loan_id })
        .await
        .expect("create return");
    assert_eq!(receipt.loan_id, loan.loan_id);
    assert!(receipt.returned_at.is_some());

    // Unknown loan id surfaces the server's message
    let err = api
        .create_return(&ReturnRequest { loan_id: 9999 })
        .await
        .expect_err("unknown loan");
    assert_eq!(err.user_message(), "Loan not found");
}
