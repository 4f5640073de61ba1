//! Folium Library Management Client
//!
//! Client-side data synchronization and rendering for the Folium library
//! API: an HTTP facade over the remote books/members/loans resources,
//! in-memory mirror stores with derived filtered views, form and loan
//! workflow controllers, and a pure render engine producing structured
//! trees independent of any output surface.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod store;
pub mod views;

pub use config::AppConfig;
pub use error::{ClientError, ClientResult};

/// Shared context handed to each view controller
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub api: api::ApiClient,
    pub notifier: Arc<dyn views::Notifier>,
}

impl AppContext {
    pub fn new(config: AppConfig, notifier: Arc<dyn views::Notifier>) -> Self {
        let api = api::ApiClient::new(&config.api);
        Self {
            config: Arc::new(config),
            api,
            notifier,
        }
    }

    pub fn books_view(&self) -> views::books::BooksView {
        views::books::BooksView::new(
            self.api.clone(),
            self.notifier.clone(),
            self.config.ui.search_debounce_ms,
        )
    }

    pub fn members_view(&self) -> views::members::MembersView {
        views::members::MembersView::new(
            self.api.clone(),
            self.notifier.clone(),
            self.config.ui.search_debounce_ms,
        )
    }

    pub fn loans_view(&self) -> views::loans::LoansView {
        views::loans::LoansView::new(self.api.clone(), self.notifier.clone())
    }
}
