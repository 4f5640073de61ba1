//! Loans page rendering: available-book cards, select controls, the
//! active-loans panel and loan/return receipts

use chrono::{DateTime, Utc};

use crate::models::{
    book::Book,
    loan::{LoanReceipt, ReturnReceipt},
    member::Member,
};

use super::{el, fmt_datetime, Element, Listing, Node};

/// Book details slot on an active-loan card
///
/// Rendered as a placeholder first, then patched in place once the per-loan
/// book fetch resolves. A failed fetch leaves the placeholder visible.
#[derive(Debug, Clone, PartialEq)]
pub enum BookSlot {
    Loading,
    Loaded { title: String, author: String },
}

impl BookSlot {
    pub fn title(&self) -> &str {
        match self {
            BookSlot::Loading => "Loading...",
            BookSlot::Loaded { title, .. } => title,
        }
    }

    pub fn author(&self) -> &str {
        match self {
            BookSlot::Loading => "Loading...",
            BookSlot::Loaded { author, .. } => author,
        }
    }
}

/// View model for one active loan in the panel
#[derive(Debug, Clone)]
pub struct LoanCard {
    pub loan_id: i32,
    pub book_id: i32,
    pub member_name: String,
    pub borrowed_at: DateTime<Utc>,
    pub book: BookSlot,
}

fn available_book_card(book: &Book, selected: Option<i32>) -> Node {
    let mut card = el("div").class("book-card");
    if selected == Some(book.id) {
        card = card.class("selected");
    }
    card = card
        .value(book.id.to_string())
        .child(el("h6").text(&book.title))
        .child(el("p").text(&book.author));
    if let Some(isbn) = &book.isbn {
        card = card.child(el("p").text(isbn));
    }
    card.child(el("span").class("badge").class("available").text("Available"))
        .into()
}

/// Card grid of books currently available for loan
pub fn available_books(books: &[Book], selected: Option<i32>) -> Node {
    if books.is_empty() {
        return el("div")
            .class("empty-state")
            .child(el("h5").text("No books available for loan"))
            .child(el("p").text(
                "All books are currently borrowed or no books exist in the system.",
            ))
            .into();
    }

    el("div")
        .class("book-cards")
        .children(books.iter().map(|book| available_book_card(book, selected)))
        .into()
}

fn option(value: String, label: String) -> Element {
    el("option").value(value).text(label)
}

/// Select control listing available books, optionally prefilled
pub fn book_options(books: &[Book], selected: Option<i32>) -> Node {
    let mut select = el("select")
        .class("book-select")
        .child(option(String::new(), "Choose a book...".to_string()));
    if let Some(id) = selected {
        select = select.value(id.to_string());
    }
    select
        .children(books.iter().map(|book| option(book.id.to_string(), book.label())))
        .into()
}

/// Select control listing all members
pub fn member_options(members: &[Member]) -> Node {
    el("select")
        .class("member-select")
        .child(option(String::new(), "Choose a member...".to_string()))
        .children(
            members
                .iter()
                .map(|member| option(member.id.to_string(), member.label())),
        )
        .into()
}

fn loan_card(card: &LoanCard) -> Node {
    el("div")
        .class("loan-card")
        .value(card.loan_id.to_string())
        .child(el("h6").class("book-title").text(card.book.title()))
        .child(el("p").class("book-author").text(format!("Author: {}", card.book.author())))
        .child(el("p").text(format!("Borrowed by: {}", card.member_name)))
        .child(el("p").text(format!(
            "Borrowed on: {}",
            fmt_datetime(Some(card.borrowed_at))
        )))
        .child(el("span").class("badge").class("active").text("Active"))
        .into()
}

/// The active-loans panel
pub fn active_loans(listing: Listing<'_, LoanCard>) -> Node {
    match listing {
        Listing::Loading => el("section")
            .class("loans-panel")
            .child(el("p").class("loading-row").text("Loading current loans..."))
            .into(),
        Listing::Failed => el("section")
            .class("loans-panel")
            .child(el("p").class("error-row").text("Error loading current loans"))
            .into(),
        Listing::Ready(cards) if cards.is_empty() => el("section")
            .class("loans-panel")
            .child(el("p").class("empty-row").text("No active loans at the moment"))
            .into(),
        Listing::Ready(cards) => el("section")
            .class("loans-panel")
            .children(cards.iter().map(loan_card))
            .into(),
    }
}

fn book_line(book: Option<&Book>) -> String {
    match book {
        Some(book) => format!("Book: {} by {}", book.title, book.author),
        None => "Book: Unknown Book by Unknown Author".to_string(),
    }
}

fn member_line(member: Option<&Member>) -> String {
    match member {
        Some(member) => format!("Member: {}", member.name),
        None => "Member: Unknown Member".to_string(),
    }
}

/// Confirmation details shown after a successful loan
pub fn loan_receipt(receipt: &LoanReceipt, book: Option<&Book>, member: Option<&Member>) -> Node {
    el("div")
        .class("alert")
        .class("loan-created")
        .child(el("h5").text("Loan Created"))
        .child(el("p").text(format!("Loan ID: {}", receipt.loan_id)))
        .child(el("p").text(book_line(book)))
        .child(el("p").text(member_line(member)))
        .child(el("p").text(format!(
            "Borrowed At: {}",
            fmt_datetime(Some(receipt.borrowed_at))
        )))
        .into()
}

/// Confirmation details shown after a successful return
pub fn return_receipt(
    receipt: &ReturnReceipt,
    book: Option<&Book>,
    member: Option<&Member>,
) -> Node {
    el("div")
        .class("alert")
        .class("book-returned")
        .child(el("h5").text("Book Returned"))
        .child(el("p").text(format!("Loan ID: {}", receipt.loan_id)))
        .child(el("p").text(book_line(book)))
        .child(el("p").text(member_line(member)))
        .child(el("p").text(format!(
            "Borrowed At: {}",
            fmt_datetime(Some(receipt.borrowed_at))
        )))
        .child(el("p").text(format!("Returned At: {}", fmt_datetime(receipt.returned_at))))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn book(id: i32, title: &str) -> Book {
        Book {
            id,
            title: title.to_string(),
            author: "Author".to_string(),
            isbn: None,
            available: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_empty_available_books() {
        let node = available_books(&[], None);
        assert!(node.text_content().contains("No books available for loan"));
    }

    #[test]
    fn test_selected_card_is_marked() {
        let books = vec![book(1, "Dune"), book(2, "Emma")];
        let node = available_books(&books, Some(2));
        let selected = node.find_class("selected").expect("one card selected");
        assert_eq!(selected.value.as_deref(), Some("2"));
    }

    #[test]
    fn test_loan_card_placeholder_then_patch() {
        let borrowed_at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let mut card = LoanCard {
            loan_id: 3,
            book_id: 1,
            member_name: "Ada Lovelace".to_string(),
            borrowed_at,
            book: BookSlot::Loading,
        };

        let cards = vec![card.clone()];
        let node = active_loans(Listing::Ready(&cards));
        assert!(node.text_content().contains("Loading..."));

        card.book = BookSlot::Loaded {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
        };
        let cards = vec![card];
        let node = active_loans(Listing::Ready(&cards));
        let text = node.text_content();
        assert!(text.contains("Dune"));
        assert!(text.contains("Borrowed by: Ada Lovelace"));
        assert!(!text.contains("Loading..."));
    }

    #[test]
    fn test_receipt_falls_back_to_unknown() {
        let receipt = LoanReceipt {
            loan_id: 9,
            book_id: 1,
            member_id: 2,
            borrowed_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
            status: None,
            message: None,
        };

        let node = loan_receipt(&receipt, None, None);
        let text = node.text_content();
        assert!(text.contains("Loan ID: 9"));
        assert!(text.contains("Unknown Book"));
        assert!(text.contains("Unknown Member"));
    }
}
