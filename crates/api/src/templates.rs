//! Askama page templates.
//!
//! Rows are flattened into display strings before rendering so the
//! templates never deal with optional fields. Pages go out through
//! [`render_page`], which turns a failed render into an internal error.

use askama::Template;
use axum::response::Html;
use domain::{Contact, Gadget, StockSummary};
use record_store::Stored;

use crate::error::ApiError;

const NOT_SPECIFIED: &str = "Not specified";

/// Renders `page` to HTML. Failures surface as `ApiError::Internal`.
pub fn render_page<T: Template>(page: &T) -> Result<Html<String>, ApiError> {
    page.render().map(Html).map_err(|err| {
        ApiError::Internal(format!("failed to render page: {err}"))
    })
}

/// Batcave main display.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub page_title: &'static str,
    pub heading: &'static str,
    pub status: String,
    pub gadgets: Vec<GadgetRow>,
}

impl IndexTemplate {
    /// The status line is computed from `gadgets` so it always agrees with
    /// the rows shown.
    pub fn new(gadgets: &[Stored<Gadget>]) -> Self {
        Self {
            page_title: "Batcave Main Display",
            heading: "Welcome to the Batcave",
            status: StockSummary::of(gadgets).to_string(),
            gadgets: gadgets.iter().map(GadgetRow::from).collect(),
        }
    }
}

pub struct GadgetRow {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub in_stock: bool,
}

impl From<&Stored<Gadget>> for GadgetRow {
    fn from(stored: &Stored<Gadget>) -> Self {
        Self {
            id: stored.id.as_u64(),
            name: stored.record.name.clone(),
            category: stored
                .record
                .category
                .clone()
                .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            in_stock: stored.record.in_stock,
        }
    }
}

/// Registered contacts listing.
#[derive(Template)]
#[template(path = "contacts_list.html")]
pub struct ContactsTemplate {
    pub page_title: &'static str,
    pub heading: &'static str,
    pub contacts: Vec<ContactRow>,
}

impl ContactsTemplate {
    pub fn new(contacts: &[Stored<Contact>]) -> Self {
        Self {
            page_title: "Contact Database",
            heading: "Registered Contacts",
            contacts: contacts.iter().map(ContactRow::from).collect(),
        }
    }
}

pub struct ContactRow {
    pub id: u64,
    pub name: String,
    pub affiliation: String,
    pub trust_level: u8,
}

impl From<&Stored<Contact>> for ContactRow {
    fn from(stored: &Stored<Contact>) -> Self {
        Self {
            id: stored.id.as_u64(),
            name: stored.record.name.clone(),
            affiliation: stored
                .record
                .affiliation
                .clone()
                .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            trust_level: stored.record.trust_level.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use axum::http::StatusCode;
    use common::RecordId;
    use domain::{NewContact, default_inventory};

    use super::*;

    struct Unprintable;

    impl fmt::Display for Unprintable {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[derive(Template)]
    #[template(source = "<p>{{ value }}</p>", ext = "html")]
    struct BrokenPage {
        value: Unprintable,
    }

    #[test]
    fn index_lists_every_gadget_with_summary() {
        let gadgets: Vec<_> = default_inventory()
            .into_iter()
            .enumerate()
            .map(|(i, g)| Stored::new(RecordId::new(i as u64 + 1), g))
            .collect();
        let html = IndexTemplate::new(&gadgets).render().unwrap();

        assert!(html.contains("<title>Batcave Main Display</title>"));
        assert!(html.contains("Welcome to the Batcave"));
        assert!(html.contains("4/5 gadget types in stock."));
        assert!(html.contains("Remote Hacking Device"));
        assert!(html.contains("Out of stock"));
    }

    #[test]
    fn contacts_page_escapes_names_and_fills_blanks() {
        let contact = NewContact::new("<Oracle>").validate().unwrap();
        let html = ContactsTemplate::new(&[Stored::new(RecordId::new(1), contact)])
            .render()
            .unwrap();

        assert!(html.contains("Oracle"));
        assert!(!html.contains("<Oracle>"));
        assert!(html.contains("Not specified"));
        assert!(!html.contains("No contacts found"));
    }

    #[test]
    fn failed_render_is_internal_error() {
        let err = render_page(&BrokenPage { value: Unprintable }).unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(err, ApiError::Internal(ref msg) if msg.starts_with("failed to render page")));
    }

    #[test]
    fn render_page_wraps_html() {
        let Html(body) = render_page(&ContactsTemplate::new(&[])).unwrap();
        assert!(body.contains("Registered Contacts"));
    }

    #[test]
    fn empty_contacts_page_says_so() {
        let html = ContactsTemplate::new(&[]).render().unwrap();
        assert!(html.contains("No contacts found"));
    }
}
