//! Books page controller
//!
//! Owns the books mirror store, the search and availability controls, and
//! the add/edit modals. Local state changes only after a confirmed server
//! reply; every mutation re-runs the filter so the table projection stays
//! consistent with the live controls.

use std::sync::Arc;

use crate::{
    api::ApiClient,
    models::book::{Book, CreateBook, UpdateBook},
    render::{self, Listing, Node},
    store::{filter::book_matches, AvailabilityFilter, Debounce, MirrorStore},
};

use super::{form::Field, LoadState, Notifier, Severity};

/// Add/edit book form controls
#[derive(Debug, Clone, Default)]
pub struct BookForm {
    pub title: Field,
    pub author: Field,
    pub isbn: Field,
}

impl BookForm {
    /// Required checks on title and author; isbn is optional
    fn validate(&mut self) -> bool {
        let title_ok = self.title.check_required();
        let author_ok = self.author.check_required();
        title_ok && author_ok
    }

    fn to_create(&self) -> CreateBook {
        CreateBook {
            title: self.title.trimmed().to_string(),
            author: self.author.trimmed().to_string(),
            isbn: self.isbn.optional(),
        }
    }

    fn to_update(&self) -> UpdateBook {
        UpdateBook {
            title: self.title.trimmed().to_string(),
            author: self.author.trimmed().to_string(),
            isbn: self.isbn.optional(),
        }
    }

    fn populate(&mut self, book: &Book) {
        self.title.set(book.title.clone());
        self.author.set(book.author.clone());
        self.isbn.set(book.isbn.clone().unwrap_or_default());
    }

    fn clear(&mut self) {
        self.title.clear();
        self.author.clear();
        self.isbn.clear();
    }
}

/// Books page controller
pub struct BooksView {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
    store: MirrorStore<Book>,
    state: LoadState,
    search: String,
    availability: AvailabilityFilter,
    search_debounce: Debounce,
    pub add_form: BookForm,
    add_open: bool,
    add_busy: bool,
    pub edit_form: BookForm,
    edit_open: bool,
    edit_busy: bool,
    edit_id: Option<i32>,
}

impl BooksView {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>, search_debounce_ms: u64) -> Self {
        Self {
            api,
            notifier,
            store: MirrorStore::new(),
            state: LoadState::Loading,
            search: String::new(),
            availability: AvailabilityFilter::Any,
            search_debounce: Debounce::from_millis(search_debounce_ms),
            add_form: BookForm::default(),
            add_open: false,
            add_busy: false,
            edit_form: BookForm::default(),
            edit_open: false,
            edit_busy: false,
            edit_id: None,
        }
    }

    /// Load the books mirror wholesale from the server
    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        match self.api.list_books().await {
            Ok(books) => {
                tracing::debug!("loaded {} books", books.len());
                self.store.replace_all(books);
                self.state = LoadState::Ready;
                self.refilter();
            }
            Err(err) => {
                self.store.clear();
                self.state = LoadState::Failed;
                self.notifier.notify(
                    Severity::Danger,
                    &format!("Error loading books: {}", err.user_message()),
                );
            }
        }
    }

    /// Typed search input: store the text and arm the debounce window
    pub fn input_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        self.search_debounce.trigger();
    }

    /// Fire the pending debounced search, if any, once its window elapses
    pub async fn settle_search(&mut self) {
        if self.search_debounce.settled().await {
            self.refilter();
        }
    }

    /// Poll-style counterpart of [`BooksView::settle_search`]
    pub fn tick(&mut self) {
        if self.search_debounce.ready() {
            self.refilter();
        }
    }

    /// Availability select change: immediate recompute, no debounce
    pub fn set_availability(&mut self, filter: AvailabilityFilter) {
        self.availability = filter;
        self.refilter();
    }

    /// Reset search and availability and re-project the full list
    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.availability = AvailabilityFilter::Any;
        self.search_debounce.cancel();
        self.refilter();
    }

    fn refilter(&mut self) {
        let search = self.search.trim().to_lowercase();
        let availability = self.availability;
        self.store
            .apply_filter(|book| book_matches(book, &search) && availability.matches(book.available));
    }

    pub fn open_add(&mut self) {
        self.add_open = true;
    }

    pub fn close_add(&mut self) {
        self.add_open = false;
    }

    /// Submit the add-book form
    pub async fn submit_add(&mut self) {
        if self.add_busy {
            return;
        }
        if !self.add_form.validate() {
            self.notifier
                .notify(Severity::Danger, "Please fill in all required fields correctly");
            return;
        }

        let payload = self.add_form.to_create();
        self.add_busy = true;
        let result = self.api.create_book(&payload).await;
        self.add_busy = false;

        match result {
            Ok(book) => {
                self.store.insert(book);
                self.refilter();
                self.add_open = false;
                self.add_form.clear();
                self.notifier.notify(Severity::Success, "Book added successfully!");
            }
            Err(err) => {
                self.notifier.notify(
                    Severity::Danger,
                    &format!("Error adding book: {}", err.user_message()),
                );
            }
        }
    }

    /// Fetch the book and open the edit modal with its current values
    pub async fn open_edit(&mut self, id: i32) {
        match self.api.get_book(id).await {
            Ok(book) => {
                self.edit_form.populate(&book);
                self.edit_id = Some(book.id);
                self.edit_open = true;
            }
            Err(err) => {
                self.notifier.notify(
                    Severity::Danger,
                    &format!("Error loading book details: {}", err.user_message()),
                );
            }
        }
    }

    pub fn close_edit(&mut self) {
        self.edit_open = false;
        self.edit_id = None;
    }

    /// Submit the edit-book form
    pub async fn submit_edit(&mut self) {
        if self.edit_busy {
            return;
        }
        let Some(id) = self.edit_id else {
            return;
        };
        if !self.edit_form.validate() {
            self.notifier
                .notify(Severity::Danger, "Please fill in all required fields correctly");
            return;
        }

        let payload = self.edit_form.to_update();
        self.edit_busy = true;
        let result = self.api.update_book(id, &payload).await;
        self.edit_busy = false;

        match result {
            Ok(book) => {
                self.store.replace(book);
                self.refilter();
                self.edit_open = false;
                self.edit_id = None;
                self.notifier.notify(Severity::Success, "Book updated successfully!");
            }
            Err(err) => {
                self.notifier.notify(
                    Severity::Danger,
                    &format!("Error updating book: {}", err.user_message()),
                );
            }
        }
    }

    /// Confirmation prompt for a delete, or None for an unknown id
    pub fn delete_prompt(&self, id: i32) -> Option<String> {
        self.store.find(id).map(|book| {
            format!(
                "Are you sure you want to delete \"{}\" by {}?",
                book.title, book.author
            )
        })
    }

    /// Delete a book after the embedder confirmed the prompt
    pub async fn delete_confirmed(&mut self, id: i32) {
        match self.api.delete_book(id).await {
            Ok(()) => {
                self.store.remove(id);
                self.refilter();
                self.notifier.notify(Severity::Success, "Book deleted successfully!");
            }
            Err(err) => {
                self.notifier.notify(
                    Severity::Danger,
                    &format!("Error deleting book: {}", err.user_message()),
                );
            }
        }
    }

    /// Render the table body for the current state
    pub fn render(&self) -> Node {
        let listing = match self.state {
            LoadState::Loading => Listing::Loading,
            LoadState::Failed => Listing::Failed,
            LoadState::Ready => Listing::Ready(self.store.filtered()),
        };
        render::books::table_body(listing)
    }

    pub fn books(&self) -> &[Book] {
        self.store.full()
    }

    pub fn filtered(&self) -> &[Book] {
        self.store.filtered()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn availability(&self) -> AvailabilityFilter {
        self.availability
    }

    pub fn add_open(&self) -> bool {
        self.add_open
    }

    pub fn edit_open(&self) -> bool {
        self.edit_open
    }

    pub fn is_busy(&self) -> bool {
        self.add_busy || self.edit_busy
    }
}
