//! In-process stub of the library API for integration tests
//!
//! Serves the same resource contract the client consumes, keeps a request
//! log for reload assertions, and supports one-shot failure injection per
//! operation. Not every helper is exercised by every test binary.
#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};

/// One-shot injected failure: status plus optional error-body message
pub type Failure = (u16, Option<String>);

#[derive(Default)]
pub struct Inner {
    books: Vec<Value>,
    members: Vec<Value>,
    loans: Vec<Value>,
    next_id: i32,
    pub request_log: Vec<String>,
    pub fail_list_books: Option<Failure>,
    pub fail_create_book: Option<Failure>,
    pub fail_create_member: Option<Failure>,
    pub fail_create_loan: Option<Failure>,
    pub fail_create_return: Option<Failure>,
    /// Book ids whose detail fetch fails with a 500
    pub fail_get_book_ids: Vec<i32>,
}

#[derive(Clone, Default)]
pub struct StubState {
    inner: Arc<Mutex<Inner>>,
}

impl StubState {
    pub fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    fn next_id(&self) -> i32 {
        let mut inner = self.lock();
        inner.next_id += 1;
        inner.next_id
    }

    fn log(&self, entry: String) {
        self.lock().request_log.push(entry);
    }

    pub fn request_log(&self) -> Vec<String> {
        self.lock().request_log.clone()
    }

    pub fn clear_log(&self) {
        self.lock().request_log.clear();
    }

    pub fn seed_book(&self, title: &str, author: &str, isbn: Option<&str>, available: bool) -> i32 {
        let id = self.next_id();
        self.lock().books.push(json!({
            "id": id,
            "title": title,
            "author": author,
            "isbn": isbn,
            "available": available,
            "created_at": Utc::now(),
            "updated_at": null,
        }));
        id
    }

    pub fn seed_member(&self, name: &str, email: &str, phone: Option<&str>) -> i32 {
        let id = self.next_id();
        self.lock().members.push(json!({
            "id": id,
            "name": name,
            "email": email,
            "phone": phone,
            "created_at": Utc::now(),
            "updated_at": null,
        }));
        id
    }

    pub fn seed_loan(&self, book_id: i32, member_id: i32) -> i32 {
        let id = self.next_id();
        self.lock().loans.push(json!({
            "id": id,
            "book_id": book_id,
            "member_id": member_id,
            "status": "active",
            "borrowed_at": Utc::now(),
            "returned_at": null,
        }));
        set_field(&mut self.lock().books, book_id, "available", json!(false));
        id
    }

    pub fn book(&self, id: i32) -> Option<Value> {
        self.lock().books.iter().find(|b| b["id"] == json!(id)).cloned()
    }
}

fn set_field(records: &mut [Value], id: i32, field: &str, value: Value) {
    if let Some(record) = records.iter_mut().find(|r| r["id"] == json!(id)) {
        record[field] = value;
    }
}

fn failure_reply(failure: Failure) -> (StatusCode, Json<Value>) {
    let (status, message) = failure;
    let body = match message {
        Some(message) => json!({ "message": message }),
        None => json!({}),
    };
    (StatusCode::from_u16(status).unwrap(), Json(body))
}

pub fn router(state: StubState) -> Router {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/:id", get(get_book).put(update_book).delete(delete_book))
        .route("/members", get(list_members).post(create_member))
        .route("/members/:id", get(get_member).put(update_member))
        .route("/loans", get(list_loans).post(create_loan))
        .route("/returns", post(create_return))
        .with_state(state)
}

/// Bind the stub on an ephemeral port and serve it in the background
pub async fn spawn_stub() -> (String, StubState) {
    let state = StubState::default();
    let app = router(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), state)
}

async fn list_books(State(state): State<StubState>) -> (StatusCode, Json<Value>) {
    state.log("GET /books".to_string());
    if let Some(failure) = state.lock().fail_list_books.take() {
        return failure_reply(failure);
    }
    let books = state.lock().books.clone();
    (StatusCode::OK, Json(Value::Array(books)))
}

async fn get_book(State(state): State<StubState>, Path(id): Path<i32>) -> (StatusCode, Json<Value>) {
    state.log(format!("GET /books/{}", id));
    if state.lock().fail_get_book_ids.contains(&id) {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "message": "boom" })));
    }
    match state.book(id) {
        Some(book) => (StatusCode::OK, Json(book)),
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "Book not found" }))),
    }
}

async fn create_book(
    State(state): State<StubState>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.log("POST /books".to_string());
    if let Some(failure) = state.lock().fail_create_book.take() {
        return failure_reply(failure);
    }
    let id = state.next_id();
    let book = json!({
        "id": id,
        "title": payload["title"],
        "author": payload["author"],
        "isbn": payload["isbn"],
        "available": true,
        "created_at": Utc::now(),
        "updated_at": null,
    });
    state.lock().books.push(book.clone());
    (StatusCode::CREATED, Json(book))
}

async fn update_book(
    State(state): State<StubState>,
    Path(id): Path<i32>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.log(format!("PUT /books/{}", id));
    let mut inner = state.lock();
    let Some(book) = inner.books.iter_mut().find(|b| b["id"] == json!(id)) else {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Book not found" })));
    };
    book["title"] = payload["title"].clone();
    book["author"] = payload["author"].clone();
    book["isbn"] = payload["isbn"].clone();
    book["updated_at"] = json!(Utc::now());
    (StatusCode::OK, Json(book.clone()))
}

async fn delete_book(State(state): State<StubState>, Path(id): Path<i32>) -> (StatusCode, Json<Value>) {
    state.log(format!("DELETE /books/{}", id));
    let mut inner = state.lock();
    let before = inner.books.len();
    inner.books.retain(|b| b["id"] != json!(id));
    if inner.books.len() == before {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Book not found" })));
    }
    (StatusCode::OK, Json(json!({ "message": "Book deleted successfully" })))
}

async fn list_members(State(state): State<StubState>) -> Json<Value> {
    state.log("GET /members".to_string());
    let members = state.lock().members.clone();
    Json(Value::Array(members))
}

async fn get_member(State(state): State<StubState>, Path(id): Path<i32>) -> (StatusCode, Json<Value>) {
    state.log(format!("GET /members/{}", id));
    let member = state.lock().members.iter().find(|m| m["id"] == json!(id)).cloned();
    match member {
        Some(member) => (StatusCode::OK, Json(member)),
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "Member not found" }))),
    }
}

async fn create_member(
    State(state): State<StubState>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.log("POST /members".to_string());
    if let Some(failure) = state.lock().fail_create_member.take() {
        return failure_reply(failure);
    }
    let id = state.next_id();
    let member = json!({
        "id": id,
        "name": payload["name"],
        "email": payload["email"],
        "phone": payload["phone"],
        "created_at": Utc::now(),
        "updated_at": null,
    });
    state.lock().members.push(member.clone());
    (StatusCode::CREATED, Json(member))
}

async fn update_member(
    State(state): State<StubState>,
    Path(id): Path<i32>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.log(format!("PUT /members/{}", id));
    let mut inner = state.lock();
    let Some(member) = inner.members.iter_mut().find(|m| m["id"] == json!(id)) else {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Member not found" })));
    };
    member["name"] = payload["name"].clone();
    member["email"] = payload["email"].clone();
    member["phone"] = payload["phone"].clone();
    member["updated_at"] = json!(Utc::now());
    (StatusCode::OK, Json(member.clone()))
}

async fn list_loans(State(state): State<StubState>) -> Json<Value> {
    state.log("GET /loans".to_string());
    let loans = state.lock().loans.clone();
    Json(Value::Array(loans))
}

async fn create_loan(
    State(state): State<StubState>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.log("POST /loans".to_string());
    if let Some(failure) = state.lock().fail_create_loan.take() {
        return failure_reply(failure);
    }
    let book_id = payload["book_id"].as_i64().unwrap() as i32;
    let member_id = payload["member_id"].as_i64().unwrap() as i32;
    let id = state.next_id();
    let borrowed_at = Utc::now();
    {
        let mut inner = state.lock();
        inner.loans.push(json!({
            "id": id,
            "book_id": book_id,
            "member_id": member_id,
            "status": "active",
            "borrowed_at": borrowed_at,
            "returned_at": null,
        }));
        set_field(&mut inner.books, book_id, "available", json!(false));
    }
    (
        StatusCode::CREATED,
        Json(json!({
            "loan_id": id,
            "book_id": book_id,
            "member_id": member_id,
            "borrowed_at": borrowed_at,
            "status": "active",
            "message": "Book borrowed successfully",
        })),
    )
}

async fn create_return(
    State(state): State<StubState>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.log("POST /returns".to_string());
    if let Some(failure) = state.lock().fail_create_return.take() {
        return failure_reply(failure);
    }
    let loan_id = payload["loan_id"].as_i64().unwrap() as i32;
    let returned_at = Utc::now();
    let mut inner = state.lock();
    let Some(loan) = inner.loans.iter_mut().find(|l| l["id"] == json!(loan_id)) else {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Loan not found" })));
    };
    if loan["status"] == json!("returned") {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Book has already been returned" })),
        );
    }
    loan["status"] = json!("returned");
    loan["returned_at"] = json!(returned_at);
    let book_id = loan["book_id"].as_i64().unwrap() as i32;
    let member_id = loan["member_id"].as_i64().unwrap() as i32;
    let borrowed_at = loan["borrowed_at"].clone();
    set_field(&mut inner.books, book_id, "available", json!(true));
    (
        StatusCode::OK,
        Json(json!({
            "loan_id": loan_id,
            "book_id": book_id,
            "member_id": member_id,
            "borrowed_at": borrowed_at,
            "returned_at": returned_at,
            "status": "returned",
            "message": "Book returned successfully",
        })),
    )
}
