//! Pure search and filter predicates
//!
//! Case-insensitive substring matching with OR semantics across an entity's
//! string fields, combined with AND semantics against the categorical
//! availability filter. Empty search text matches everything.

use crate::models::{book::Book, member::Member};

/// Availability select-control state
///
/// Parsed from the control's string value: `""` (any), `"true"`, `"false"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AvailabilityFilter {
    #[default]
    Any,
    Available,
    Borrowed,
}

impl AvailabilityFilter {
    pub fn matches(&self, available: bool) -> bool {
        match self {
            AvailabilityFilter::Any => true,
            AvailabilityFilter::Available => available,
            AvailabilityFilter::Borrowed => !available,
        }
    }
}

impl std::str::FromStr for AvailabilityFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(AvailabilityFilter::Any),
            "true" => Ok(AvailabilityFilter::Available),
            "false" => Ok(AvailabilityFilter::Borrowed),
            other => Err(format!("Invalid availability filter: {}", other)),
        }
    }
}

/// True when `haystack` contains `needle` regardless of case
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Search predicate over title, author and isbn
pub fn book_matches(book: &Book, search: &str) -> bool {
    search.is_empty()
        || contains_ci(&book.title, search)
        || contains_ci(&book.author, search)
        || book
            .isbn
            .as_deref()
            .is_some_and(|isbn| contains_ci(isbn, search))
}

/// Search predicate over name, email and phone
pub fn member_matches(member: &Member, search: &str) -> bool {
    search.is_empty()
        || contains_ci(&member.name, search)
        || contains_ci(&member.email, search)
        || member
            .phone
            .as_deref()
            .is_some_and(|phone| contains_ci(phone, search))
}

/// Filter a book list by search text and availability
pub fn filter_books(books: &[Book], search: &str, availability: AvailabilityFilter) -> Vec<Book> {
    let search = search.trim().to_lowercase();
    books
        .iter()
        .filter(|book| book_matches(book, &search) && availability.matches(book.available))
        .cloned()
        .collect()
}

/// Filter a member list by search text
pub fn filter_members(members: &[Member], search: &str) -> Vec<Member> {
    let search = search.trim().to_lowercase();
    members
        .iter()
        .filter(|member| member_matches(member, &search))
        .cloned()
        .collect()
}
