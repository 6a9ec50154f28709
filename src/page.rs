//! Mounted-view registry
//!
//! The success page registers its visual elements here by id; the export
//! pipeline looks the ticket up by the same id when triggered. A missing id
//! is a valid (if unexpected) state, not an error.

use std::collections::HashMap;

use crate::ticket::TicketView;

/// Fixed id under which the success page mounts the ticket visual
pub const TICKET_ELEMENT_ID: &str = "conference-ticket";

/// A page's mounted views, keyed by element id
#[derive(Default)]
pub struct Page {
    views: HashMap<String, TicketView>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a view under an id, replacing any previous occupant
    pub fn mount(&mut self, id: impl Into<String>, view: TicketView) {
        self.views.insert(id.into(), view);
    }

    /// Unmount and return the view under `id`, if present
    pub fn unmount(&mut self, id: &str) -> Option<TicketView> {
        self.views.remove(id)
    }

    /// Look up a mounted view
    pub fn view(&self, id: &str) -> Option<&TicketView> {
        self.views.get(id)
    }
}
