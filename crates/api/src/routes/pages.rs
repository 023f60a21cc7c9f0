//! Server-rendered HTML pages.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use record_store::RecordQuery;
use upstream::Directory;

use crate::error::ApiError;
use crate::templates::{ContactsTemplate, IndexTemplate, render_page};
use crate::state::AppState;

/// GET /batcave-display
pub async fn batcave_display<D: Directory + 'static>(
    State(state): State<Arc<AppState<D>>>,
) -> Result<Html<String>, ApiError> {
    let gadgets = state.inventory.all().await?;
    render_page(&IndexTemplate::new(&gadgets))
}

/// GET /contacts-view
pub async fn contacts_view<D: Directory + 'static>(
    State(state): State<Arc<AppState<D>>>,
) -> Result<Html<String>, ApiError> {
    let contacts = state.contacts.list(RecordQuery::all()).await?;
    if contacts.is_empty() {
        tracing::debug!("contact registry is empty");
    }
    render_page(&ContactsTemplate::new(&contacts))
}
