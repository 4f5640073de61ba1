//! Book resource operations

use reqwest::Method;

use crate::{
    error::ClientResult,
    models::book::{Book, CreateBook, UpdateBook},
};

use super::ApiClient;

impl ApiClient {
    /// List all books
    pub async fn list_books(&self) -> ClientResult<Vec<Book>> {
        self.send(Method::GET, "/books").await
    }

    /// Get a single book by id
    pub async fn get_book(&self, id: i32) -> ClientResult<Book> {
        self.send(Method::GET, &format!("/books/{}", id)).await
    }

    /// Create a book; returns the canonical created record
    pub async fn create_book(&self, book: &CreateBook) -> ClientResult<Book> {
        self.send_json(Method::POST, "/books", book).await
    }

    /// Update a book; returns the canonical updated record
    pub async fn update_book(&self, id: i32, book: &UpdateBook) -> ClientResult<Book> {
        self.send_json(Method::PUT, &format!("/books/{}", id), book)
            .await
    }

    /// Delete a book
    pub async fn delete_book(&self, id: i32) -> ClientResult<()> {
        // The API replies with a confirmation body; nothing in it is needed
        let _: serde_json::Value = self.send(Method::DELETE, &format!("/books/{}", id)).await?;
        Ok(())
    }
}
