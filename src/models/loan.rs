//! Loan (borrow) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Identified;

/// Loan lifecycle status (server-owned)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Active,
    Returned,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Active => "active",
            LoanStatus::Returned => "returned",
        }
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Loan record as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub id: i32,
    pub book_id: i32,
    pub member_id: i32,
    pub status: LoanStatus,
    pub borrowed_at: DateTime<Utc>,
    /// Present only once the loan has been returned
    pub returned_at: Option<DateTime<Utc>>,
}

impl Identified for Loan {
    fn id(&self) -> i32 {
        self.id
    }
}

/// Create loan request (borrow a book)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLoan {
    pub book_id: i32,
    pub member_id: i32,
}

/// Return request, addressed by loan id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnRequest {
    pub loan_id: i32,
}

/// Reply to a successful loan creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanReceipt {
    pub loan_id: i32,
    pub book_id: i32,
    pub member_id: i32,
    pub borrowed_at: DateTime<Utc>,
    pub status: Option<LoanStatus>,
    pub message: Option<String>,
}

/// Reply to a successful return
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnReceipt {
    pub loan_id: i32,
    pub book_id: i32,
    pub member_id: i32,
    pub borrowed_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
    pub status: Option<LoanStatus>,
    pub message: Option<String>,
}
