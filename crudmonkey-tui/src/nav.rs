//! Page identifiers and the navigation transition table.

use crudmonkey_core::RecordId;
use std::fmt;

/// Identifier of a page in the page stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageId {
    Menu,
    /// The record list of a resource.
    List(String),
    /// Ephemeral create form.
    New(String),
    /// Ephemeral edit form for one record.
    Edit(String, RecordId),
}

impl PageId {
    /// Page name in the stack: `menu`, `widgets`, `widgets_new`, `widgets_edit_<id>`.
    pub fn name(&self) -> String {
        match self {
            PageId::Menu => "menu".to_string(),
            PageId::List(resource) => resource.clone(),
            PageId::New(resource) => format!("{}_new", resource),
            PageId::Edit(resource, id) => format!("{}_edit_{}", resource, id),
        }
    }

    /// Resource the page belongs to; `None` for the menu.
    pub fn resource(&self) -> Option<&str> {
        match self {
            PageId::Menu => None,
            PageId::List(resource) | PageId::New(resource) | PageId::Edit(resource, _) => {
                Some(resource)
            }
        }
    }

    /// Create and edit pages are discarded once the form closes.
    pub fn is_ephemeral(&self) -> bool {
        matches!(self, PageId::New(_) | PageId::Edit(_, _))
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Navigation events consumed by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// Menu entry for a resource list.
    SelectResource(String),
    /// Menu entry "New <resource>".
    SelectNew(String),
    /// Row chosen on a list page.
    SelectRow(RecordId),
    /// "new" key on a list page.
    NewKey,
    /// Leave a list page for the menu.
    Back,
    /// The store accepted a form's Create/Update.
    SaveSucceeded,
    /// Cancel button, Esc or close on a form.
    Cancel,
}

/// Target page for `event` on `current`, or `None` if the event does not apply.
pub fn transition(current: &PageId, event: &NavEvent) -> Option<PageId> {
    match (current, event) {
        (PageId::Menu, NavEvent::SelectResource(resource)) => Some(PageId::List(resource.clone())),
        (PageId::Menu, NavEvent::SelectNew(resource)) => Some(PageId::New(resource.clone())),
        (PageId::List(resource), NavEvent::SelectRow(id)) => {
            Some(PageId::Edit(resource.clone(), *id))
        }
        (PageId::List(resource), NavEvent::NewKey) => Some(PageId::New(resource.clone())),
        (PageId::List(_), NavEvent::Back) => Some(PageId::Menu),
        (
            PageId::New(resource) | PageId::Edit(resource, _),
            NavEvent::SaveSucceeded | NavEvent::Cancel,
        ) => Some(PageId::List(resource.clone())),
        _ => None,
    }
}
