//! Loan and return operations

use reqwest::Method;

use crate::{
    error::ClientResult,
    models::loan::{CreateLoan, Loan, LoanReceipt, ReturnReceipt, ReturnRequest},
};

use super::ApiClient;

impl ApiClient {
    /// List all loans, active and returned
    pub async fn list_loans(&self) -> ClientResult<Vec<Loan>> {
        self.send(Method::GET, "/loans").await
    }

    /// Borrow a book for a member
    pub async fn create_loan(&self, loan: &CreateLoan) -> ClientResult<LoanReceipt> {
        self.send_json(Method::POST, "/loans", loan).await
    }

    /// Return a borrowed book by loan id
    pub async fn create_return(&self, request: &ReturnRequest) -> ClientResult<ReturnReceipt> {
        self.send_json(Method::POST, "/returns", request).await
    }
}
