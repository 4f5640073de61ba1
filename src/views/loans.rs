//! Loans page controller
//!
//! Orchestrates the two-phase borrow flow (pick an available book, pick a
//! member, submit) and the one-phase return flow (submit a loan id). A
//! successful loan removes the book from the local available cache, since
//! availability is a direct consequence of the loan. A successful return
//! reloads the whole page instead: the client cannot infer which cached
//! state the return invalidated.

use std::sync::Arc;

use tokio::task::JoinSet;

use crate::{
    api::ApiClient,
    models::{
        book::Book,
        loan::{CreateLoan, LoanReceipt, LoanStatus, ReturnReceipt, ReturnRequest},
        member::Member,
    },
    render::{
        self,
        loans::{BookSlot, LoanCard},
        el, Listing, Node,
    },
};

use super::{form::Field, Notifier, Severity};

/// Borrow flow state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorrowFlow {
    #[default]
    Idle,
    BookChosen {
        book_id: i32,
    },
    Submitting {
        book_id: i32,
    },
}

impl BorrowFlow {
    pub fn selected_book(&self) -> Option<i32> {
        match self {
            BorrowFlow::Idle => None,
            BorrowFlow::BookChosen { book_id } | BorrowFlow::Submitting { book_id } => {
                Some(*book_id)
            }
        }
    }
}

/// New-loan form controls: the book and member select values
#[derive(Debug, Clone, Default)]
pub struct LoanForm {
    pub book: Field,
    pub member: Field,
}

impl LoanForm {
    fn clear(&mut self) {
        self.book.clear();
        self.member.clear();
    }
}

/// Return form control: the loan id input
#[derive(Debug, Clone, Default)]
pub struct ReturnForm {
    pub loan_id: Field,
}

/// Active-loans panel state
#[derive(Debug, Clone, Default)]
enum PanelState {
    #[default]
    Loading,
    Failed,
    Ready(Vec<LoanCard>),
}

/// Loan confirmation, with book and member resolved at commit time
/// (the book leaves the available cache as part of the same commit)
#[derive(Debug, Clone)]
pub struct LoanConfirmation {
    pub receipt: LoanReceipt,
    pub book: Option<Book>,
    pub member: Option<Member>,
}

/// Return confirmation, resolved against the reloaded page data
#[derive(Debug, Clone)]
pub struct ReturnConfirmation {
    pub receipt: ReturnReceipt,
    pub book: Option<Book>,
    pub member: Option<Member>,
}

/// Loans page controller
pub struct LoansView {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
    available_books: Vec<Book>,
    members: Vec<Member>,
    panel: PanelState,
    borrow: BorrowFlow,
    pub loan_form: LoanForm,
    borrow_open: bool,
    borrow_busy: bool,
    pub return_form: ReturnForm,
    return_open: bool,
    return_busy: bool,
    last_loan: Option<LoanConfirmation>,
    last_return: Option<ReturnConfirmation>,
}

impl LoansView {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            available_books: Vec::new(),
            members: Vec::new(),
            panel: PanelState::Loading,
            borrow: BorrowFlow::Idle,
            loan_form: LoanForm::default(),
            borrow_open: false,
            borrow_busy: false,
            return_form: ReturnForm::default(),
            return_open: false,
            return_busy: false,
            last_loan: None,
            last_return: None,
        }
    }

    /// Load everything the page needs: available books, members, the
    /// active-loans panel, then the per-loan book details.
    pub async fn load_page(&mut self) {
        let books = match self.api.list_books().await {
            Ok(books) => books,
            Err(err) => {
                self.notifier.notify(
                    Severity::Danger,
                    &format!("Error loading data: {}", err.user_message()),
                );
                return;
            }
        };
        self.available_books = books.into_iter().filter(|book| book.available).collect();

        match self.api.list_members().await {
            Ok(members) => self.members = members,
            Err(err) => {
                self.notifier.notify(
                    Severity::Danger,
                    &format!("Error loading data: {}", err.user_message()),
                );
                return;
            }
        }

        self.load_active_loans().await;
        self.resolve_loan_books().await;
    }

    /// Fetch all loans and rebuild the panel with placeholder book slots
    pub async fn load_active_loans(&mut self) {
        match self.api.list_loans().await {
            Ok(loans) => {
                let cards = loans
                    .into_iter()
                    .filter(|loan| loan.status == LoanStatus::Active)
                    .map(|loan| LoanCard {
                        loan_id: loan.id,
                        book_id: loan.book_id,
                        member_name: self
                            .members
                            .iter()
                            .find(|member| member.id == loan.member_id)
                            .map(|member| member.name.clone())
                            .unwrap_or_else(|| "Unknown Member".to_string()),
                        borrowed_at: loan.borrowed_at,
                        book: BookSlot::Loading,
                    })
                    .collect();
                self.panel = PanelState::Ready(cards);
            }
            Err(err) => {
                tracing::error!("Error loading current loans: {}", err);
                self.panel = PanelState::Failed;
            }
        }
    }

    /// Patch the panel's book slots in place with per-loan detail fetches.
    ///
    /// The fetches are independent and unordered; one failure is logged and
    /// leaves that card's placeholder visible without blocking the others.
    pub async fn resolve_loan_books(&mut self) {
        let PanelState::Ready(cards) = &self.panel else {
            return;
        };
        let book_ids: Vec<i32> = cards.iter().map(|card| card.book_id).collect();

        let mut fetches = JoinSet::new();
        for book_id in book_ids {
            let api = self.api.clone();
            fetches.spawn(async move { (book_id, api.get_book(book_id).await) });
        }

        while let Some(joined) = fetches.join_next().await {
            let Ok((book_id, result)) = joined else {
                continue;
            };
            match result {
                Ok(book) => {
                    if let PanelState::Ready(cards) = &mut self.panel {
                        for card in cards.iter_mut().filter(|card| card.book_id == book_id) {
                            card.book = BookSlot::Loaded {
                                title: book.title.clone(),
                                author: book.author.clone(),
                            };
                        }
                    }
                }
                Err(err) => {
                    tracing::warn!("Error loading book {}: {}", book_id, err);
                }
            }
        }
    }

    /// Pick a book card: prefill the select and open the loan modal
    pub fn select_book(&mut self, book_id: i32) {
        if !self.available_books.iter().any(|book| book.id == book_id) {
            return;
        }
        self.borrow = BorrowFlow::BookChosen { book_id };
        self.loan_form.book.set(book_id.to_string());
        self.borrow_open = true;
    }

    /// Submit the new-loan form
    pub async fn submit_borrow(&mut self) {
        if self.borrow_busy {
            return;
        }
        let (book_id, member_id) = match (self.loan_form.book.check_int(), self.loan_form.member.check_int())
        {
            (Some(book_id), Some(member_id)) => (book_id, member_id),
            _ => {
                self.notifier
                    .notify(Severity::Danger, "Please select both a book and a member");
                return;
            }
        };

        self.borrow = BorrowFlow::Submitting { book_id };
        self.borrow_busy = true;
        let result = self.api.create_loan(&CreateLoan { book_id, member_id }).await;
        self.borrow_busy = false;

        match result {
            Ok(receipt) => {
                // Optimistic removal: a committed loan makes the book
                // unavailable, no refetch needed for this one transition.
                let book = self
                    .available_books
                    .iter()
                    .position(|book| book.id == book_id)
                    .map(|index| self.available_books.remove(index));
                let member = self
                    .members
                    .iter()
                    .find(|member| member.id == member_id)
                    .cloned();

                self.borrow = BorrowFlow::Idle;
                self.borrow_open = false;
                self.loan_form.clear();
                self.notifier.notify(
                    Severity::Success,
                    &format!("Book loaned successfully! Loan ID: {}", receipt.loan_id),
                );
                self.last_loan = Some(LoanConfirmation { receipt, book, member });
            }
            Err(err) => {
                // Local state unchanged; the modal stays open with the
                // selection intact.
                self.borrow = BorrowFlow::BookChosen { book_id };
                self.notifier.notify(
                    Severity::Danger,
                    &format!("Error creating loan: {}", err.user_message()),
                );
            }
        }
    }

    /// Prefill the return form from an active-loan card
    pub fn prefill_return(&mut self, loan_id: i32) {
        self.return_form.loan_id.set(loan_id.to_string());
        self.return_open = true;
    }

    /// Submit the return form
    pub async fn submit_return(&mut self) {
        if self.return_busy {
            return;
        }
        let Some(loan_id) = self.return_form.loan_id.check_int() else {
            self.notifier.notify(Severity::Danger, "Please enter a loan ID");
            return;
        };

        self.return_busy = true;
        let result = self.api.create_return(&ReturnRequest { loan_id }).await;
        self.return_busy = false;

        match result {
            Ok(receipt) => {
                // A return's effect on availability cannot be patched in
                // locally; reload the whole page from the server.
                self.load_page().await;

                self.return_open = false;
                self.return_form.loan_id.clear();
                self.notifier.notify(Severity::Success, "Book returned successfully!");

                let book = self
                    .available_books
                    .iter()
                    .find(|book| book.id == receipt.book_id)
                    .cloned();
                let member = self
                    .members
                    .iter()
                    .find(|member| member.id == receipt.member_id)
                    .cloned();
                self.last_return = Some(ReturnConfirmation { receipt, book, member });
            }
            Err(err) => {
                self.notifier.notify(
                    Severity::Danger,
                    &format!("Error returning book: {}", err.user_message()),
                );
            }
        }
    }

    /// Card grid of available books, with the chosen one marked
    pub fn render_available(&self) -> Node {
        render::loans::available_books(&self.available_books, self.borrow.selected_book())
    }

    /// Book select control for the loan modal
    pub fn render_book_select(&self) -> Node {
        render::loans::book_options(&self.available_books, self.borrow.selected_book())
    }

    /// Member select control for the loan modal
    pub fn render_member_select(&self) -> Node {
        render::loans::member_options(&self.members)
    }

    /// Active-loans panel, with confirmation receipts prepended
    pub fn render_panel(&self) -> Node {
        let mut wrapper = el("div").class("current-loans");
        if let Some(confirmation) = &self.last_return {
            wrapper = wrapper.child(render::loans::return_receipt(
                &confirmation.receipt,
                confirmation.book.as_ref(),
                confirmation.member.as_ref(),
            ));
        }
        if let Some(confirmation) = &self.last_loan {
            wrapper = wrapper.child(render::loans::loan_receipt(
                &confirmation.receipt,
                confirmation.book.as_ref(),
                confirmation.member.as_ref(),
            ));
        }
        let listing = match &self.panel {
            PanelState::Loading => Listing::Loading,
            PanelState::Failed => Listing::Failed,
            PanelState::Ready(cards) => Listing::Ready(cards.as_slice()),
        };
        wrapper.child(render::loans::active_loans(listing)).into()
    }

    pub fn available_books(&self) -> &[Book] {
        &self.available_books
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn borrow_flow(&self) -> BorrowFlow {
        self.borrow
    }

    pub fn borrow_open(&self) -> bool {
        self.borrow_open
    }

    pub fn return_open(&self) -> bool {
        self.return_open
    }

    pub fn panel_cards(&self) -> Option<&[LoanCard]> {
        match &self.panel {
            PanelState::Ready(cards) => Some(cards.as_slice()),
            _ => None,
        }
    }

    pub fn panel_failed(&self) -> bool {
        matches!(self.panel, PanelState::Failed)
    }

    pub fn last_loan(&self) -> Option<&LoanConfirmation> {
        self.last_loan.as_ref()
    }

    pub fn last_return(&self) -> Option<&ReturnConfirmation> {
        self.last_return.as_ref()
    }
}
