//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Identified;

/// Book record as returned by the API
///
/// `id`, `available` and the timestamps are server-owned. The client never
/// sets `available` directly; it flips on loan and return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub available: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Identified for Book {
    fn id(&self) -> i32 {
        self.id
    }
}

impl Book {
    /// "Title by Author" label used in select controls
    pub fn label(&self) -> String {
        format!("{} by {}", self.title, self.author)
    }
}

/// Create book request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 100, message = "Author must be 1-100 characters"))]
    pub author: String,
    #[validate(length(max = 20, message = "ISBN must be at most 20 characters"))]
    pub isbn: Option<String>,
}

/// Update book request
///
/// The client always sends the full editable field set.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 100, message = "Author must be 1-100 characters"))]
    pub author: String,
    #[validate(length(max = 20, message = "ISBN must be at most 20 characters"))]
    pub isbn: Option<String>,
}
