//! Named page stack.
//!
//! Holds every live page by name with exactly one of them active. The menu
//! page always exists and is the fallback whenever the active page goes away.

use crate::form::FormView;
use crate::list::ListView;
use crate::nav::PageId;

#[derive(Debug, Clone)]
pub enum Page {
    Menu,
    List(ListView),
    Form(FormView),
}

impl Page {
    pub fn id(&self) -> PageId {
        match self {
            Page::Menu => PageId::Menu,
            Page::List(view) => view.page_id(),
            Page::Form(view) => view.page_id(),
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    id: PageId,
    page: Page,
}

#[derive(Debug, Clone)]
pub struct PageStack {
    entries: Vec<Entry>,
    active: usize,
}

impl PageStack {
    pub fn new() -> Self {
        Self {
            entries: vec![Entry {
                id: PageId::Menu,
                page: Page::Menu,
            }],
            active: 0,
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id.name() == name)
    }

    /// Add a page, replacing any page of the same name. `visible` also switches to it.
    pub fn add_page(&mut self, page: Page, visible: bool) {
        let id = page.id();
        let index = match self.position(&id.name()) {
            Some(index) => {
                self.entries[index] = Entry { id, page };
                index
            }
            None => {
                self.entries.push(Entry { id, page });
                self.entries.len() - 1
            }
        };
        if visible {
            self.active = index;
        }
    }

    /// Make the named page active. Returns false when no such page exists.
    pub fn switch_to(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => {
                self.active = index;
                true
            }
            None => false,
        }
    }

    /// Drop a page. The menu cannot be removed; removing the active page shows the menu.
    pub fn remove_page(&mut self, name: &str) -> Option<Page> {
        let index = self.position(name)?;
        if self.entries[index].id == PageId::Menu {
            return None;
        }
        let active_name = self.active_name();
        let removed = self.entries.remove(index);
        self.active = if removed.id.name() == active_name {
            0
        } else {
            self.position(&active_name).unwrap_or(0)
        };
        Some(removed.page)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn active_id(&self) -> &PageId {
        &self.entries[self.active].id
    }

    pub fn active_name(&self) -> String {
        self.active_id().name()
    }

    pub fn active(&self) -> &Page {
        &self.entries[self.active].page
    }

    pub fn active_mut(&mut self) -> &mut Page {
        &mut self.entries[self.active].page
    }

    pub fn get(&self, name: &str) -> Option<&Page> {
        self.position(name).map(|index| &self.entries[index].page)
    }

    /// Names of live pages, in the order they were first added.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.id.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PageStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registration;
    use crudmonkey_core::{FieldDef, RecordType, TypeTag};

    fn registration(name: &str) -> Registration {
        let record_type = RecordType {
            table: "widgets",
            fields: vec![FieldDef::new("name", "name", TypeTag::String)],
        };
        Registration::new(name, record_type).unwrap()
    }

    fn list(name: &str) -> Page {
        Page::List(ListView::empty(&registration(name)))
    }

    #[test]
    fn test_starts_on_menu() {
        let stack = PageStack::new();
        assert_eq!(stack.active_id(), &PageId::Menu);
        assert_eq!(stack.names(), vec!["menu"]);
    }

    #[test]
    fn test_add_replaces_by_name() {
        let mut stack = PageStack::new();
        stack.add_page(list("widgets"), false);
        stack.add_page(list("widgets"), false);
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.active_name(), "menu");

        stack.add_page(list("widgets"), true);
        assert_eq!(stack.active_name(), "widgets");
    }

    #[test]
    fn test_switch_to_unknown_page_is_refused() {
        let mut stack = PageStack::new();
        assert!(!stack.switch_to("widgets"));
        assert_eq!(stack.active_name(), "menu");
    }

    #[test]
    fn test_removing_active_page_falls_back_to_menu() {
        let mut stack = PageStack::new();
        stack.add_page(list("widgets"), true);
        assert!(stack.remove_page("widgets").is_some());
        assert_eq!(stack.active_name(), "menu");
        assert!(!stack.contains("widgets"));
    }

    #[test]
    fn test_removing_other_page_keeps_active() {
        let mut stack = PageStack::new();
        stack.add_page(list("blogs"), false);
        stack.add_page(list("widgets"), true);
        stack.remove_page("blogs");
        assert_eq!(stack.active_name(), "widgets");
    }

    #[test]
    fn test_menu_cannot_be_removed() {
        let mut stack = PageStack::new();
        assert!(stack.remove_page("menu").is_none());
        assert!(stack.contains("menu"));
    }
}
