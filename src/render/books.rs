//! Books table rendering

use crate::models::book::Book;

use super::{el, fmt_date, Listing, Node};

/// Availability badge for one book
fn availability_badge(book: &Book) -> Node {
    if book.available {
        el("span").class("badge").class("available").text("Available").into()
    } else {
        el("span").class("badge").class("borrowed").text("Borrowed").into()
    }
}

fn book_row(book: &Book) -> Node {
    el("tr")
        .child(el("td").text(book.id.to_string()))
        .child(el("td").child(el("strong").text(&book.title)))
        .child(el("td").text(&book.author))
        .child(el("td").text(book.isbn.clone().unwrap_or_else(|| "N/A".to_string())))
        .child(el("td").child(availability_badge(book)))
        .child(el("td").text(fmt_date(book.created_at)))
        .into()
}

/// Table body for the books page
pub fn table_body(listing: Listing<'_, Book>) -> Node {
    match listing {
        Listing::Loading => el("tbody")
            .child(el("tr").class("loading-row").child(el("td").text("Loading books...")))
            .into(),
        Listing::Failed => el("tbody")
            .child(el("tr").class("error-row").child(el("td").text("Error loading books")))
            .into(),
        Listing::Ready(books) if books.is_empty() => el("tbody")
            .child(el("tr").class("empty-row").child(el("td").text("No books found")))
            .into(),
        Listing::Ready(books) => el("tbody").children(books.iter().map(book_row)).into(),
    }
}
