//! Members page controller
//!
//! Same shape as the books page minus delete and the categorical filter:
//! mirror store, debounced search, add/edit modals with email validation.

use std::sync::Arc;

use crate::{
    api::ApiClient,
    models::member::{CreateMember, Member, UpdateMember},
    render::{self, Listing, Node},
    store::{filter::member_matches, Debounce, MirrorStore},
};

use super::{form::Field, LoadState, Notifier, Severity};

/// Add/edit member form controls
#[derive(Debug, Clone, Default)]
pub struct MemberForm {
    pub name: Field,
    pub email: Field,
    pub phone: Field,
}

impl MemberForm {
    /// Name and email are required; email must look like an address
    fn validate(&mut self) -> bool {
        let name_ok = self.name.check_required();
        let email_ok = self.email.check_required() && self.email.check_email();
        name_ok && email_ok
    }

    fn to_create(&self) -> CreateMember {
        CreateMember {
            name: self.name.trimmed().to_string(),
            email: self.email.trimmed().to_string(),
            phone: self.phone.optional(),
        }
    }

    fn to_update(&self) -> UpdateMember {
        UpdateMember {
            name: self.name.trimmed().to_string(),
            email: self.email.trimmed().to_string(),
            phone: self.phone.optional(),
        }
    }

    fn populate(&mut self, member: &Member) {
        self.name.set(member.name.clone());
        self.email.set(member.email.clone());
        self.phone.set(member.phone.clone().unwrap_or_default());
    }

    fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.phone.clear();
    }
}

/// Members page controller
pub struct MembersView {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
    store: MirrorStore<Member>,
    state: LoadState,
    search: String,
    search_debounce: Debounce,
    pub add_form: MemberForm,
    add_open: bool,
    add_busy: bool,
    pub edit_form: MemberForm,
    edit_open: bool,
    edit_busy: bool,
    edit_id: Option<i32>,
}

impl MembersView {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>, search_debounce_ms: u64) -> Self {
        Self {
            api,
            notifier,
            store: MirrorStore::new(),
            state: LoadState::Loading,
            search: String::new(),
            search_debounce: Debounce::from_millis(search_debounce_ms),
            add_form: MemberForm::default(),
            add_open: false,
            add_busy: false,
            edit_form: MemberForm::default(),
            edit_open: false,
            edit_busy: false,
            edit_id: None,
        }
    }

    /// Load the members mirror wholesale from the server
    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        match self.api.list_members().await {
            Ok(members) => {
                tracing::debug!("loaded {} members", members.len());
                self.store.replace_all(members);
                self.state = LoadState::Ready;
                self.refilter();
            }
            Err(err) => {
                self.store.clear();
                self.state = LoadState::Failed;
                self.notifier.notify(
                    Severity::Danger,
                    &format!("Error loading members: {}", err.user_message()),
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

    /// Poll-style counterpart of [`MembersView::settle_search`]
    pub fn tick(&mut self) {
        if self.search_debounce.ready() {
            self.refilter();
        }
    }

    /// Reset the search control and re-project the full list
    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.search_debounce.cancel();
        self.refilter();
    }

    fn refilter(&mut self) {
        let search = self.search.trim().to_lowercase();
        self.store.apply_filter(|member| member_matches(member, &search));
    }

    pub fn open_add(&mut self) {
        self.add_open = true;
    }

    pub fn close_add(&mut self) {
        self.add_open = false;
    }

    /// Submit the add-member form
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
        let result = self.api.create_member(&payload).await;
        self.add_busy = false;

        match result {
            Ok(member) => {
                self.store.insert(member);
                self.refilter();
                self.add_open = false;
                self.add_form.clear();
                self.notifier.notify(Severity::Success, "Member added successfully!");
            }
            Err(err) => {
                self.notifier.notify(
                    Severity::Danger,
                    &format!("Error adding member: {}", err.user_message()),
                );
            }
        }
    }

    /// Fetch the member and open the edit modal with their current values
    pub async fn open_edit(&mut self, id: i32) {
        match self.api.get_member(id).await {
            Ok(member) => {
                self.edit_form.populate(&member);
                self.edit_id = Some(member.id);
                self.edit_open = true;
            }
            Err(err) => {
                self.notifier.notify(
                    Severity::Danger,
                    &format!("Error loading member details: {}", err.user_message()),
                );
            }
        }
    }

    pub fn close_edit(&mut self) {
        self.edit_open = false;
        self.edit_id = None;
    }

    /// Submit the edit-member form
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
        let result = self.api.update_member(id, &payload).await;
        self.edit_busy = false;

        match result {
            Ok(member) => {
                self.store.replace(member);
                self.refilter();
                self.edit_open = false;
                self.edit_id = None;
                self.notifier.notify(Severity::Success, "Member updated successfully!");
            }
            Err(err) => {
                self.notifier.notify(
                    Severity::Danger,
                    &format!("Error updating member: {}", err.user_message()),
                );
            }
        }
    }

    /// Loan history is not part of this page yet
    pub fn view_member_loans(&self, id: i32) {
        if let Some(member) = self.store.find(id) {
            self.notifier.notify(
                Severity::Info,
                &format!("Loan history for {} - Feature coming soon!", member.name),
            );
        }
    }

    /// Render the table body for the current state
    pub fn render(&self) -> Node {
        let listing = match self.state {
            LoadState::Loading => Listing::Loading,
            LoadState::Failed => Listing::Failed,
            LoadState::Ready => Listing::Ready(self.store.filtered()),
        };
        render::members::table_body(listing)
    }

    pub fn members(&self) -> &[Member] {
        self.store.full()
    }

    pub fn filtered(&self) -> &[Member] {
        self.store.filtered()
    }

    pub fn state(&self) -> LoadState {
        self.state
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
