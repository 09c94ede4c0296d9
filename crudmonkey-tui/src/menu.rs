//! Main menu entries.

use crudmonkey_core::title_case;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Switch to the resource's list page.
    OpenList(String),
    /// Open a blank create form.
    NewRecord(String),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub description: String,
    pub shortcut: Option<char>,
    pub action: MenuAction,
}

/// The menu page: one entry pair per resource, then Quit.
#[derive(Debug, Clone)]
pub struct Menu {
    entries: Vec<MenuEntry>,
    selected: usize,
}

impl Menu {
    pub fn new() -> Self {
        Self {
            entries: vec![MenuEntry {
                label: "Quit".to_string(),
                description: "Exit the app".to_string(),
                shortcut: Some('q'),
                action: MenuAction::Quit,
            }],
            selected: 0,
        }
    }

    /// Add the entry pair for `resource`, or replace it in place.
    pub fn upsert_resource(&mut self, resource: &str) {
        let title = title_case(resource);
        let pair = [
            MenuEntry {
                label: title.clone(),
                description: format!("Manage {}", resource),
                shortcut: None,
                action: MenuAction::OpenList(resource.to_string()),
            },
            MenuEntry {
                label: format!("New {}", title),
                description: format!("Create a new {}", resource),
                shortcut: None,
                action: MenuAction::NewRecord(resource.to_string()),
            },
        ];

        let existing = self
            .entries
            .iter()
            .position(|entry| entry.action == MenuAction::OpenList(resource.to_string()));
        match existing {
            Some(index) => {
                self.entries.splice(index..index + 2, pair);
            }
            None => {
                let quit = self
                    .entries
                    .iter()
                    .position(|entry| entry.action == MenuAction::Quit)
                    .unwrap_or(self.entries.len());
                self.entries.splice(quit..quit, pair);
            }
        }
        self.selected = self.selected.min(self.entries.len() - 1);
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_action(&self) -> Option<&MenuAction> {
        self.entries.get(self.selected).map(|entry| &entry.action)
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index < self.entries.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.entries.len();
    }

    pub fn select_previous(&mut self) {
        self.selected = if self.selected == 0 {
            self.entries.len() - 1
        } else {
            self.selected - 1
        };
    }

    /// Entries pointing at `resource`.
    pub fn entries_for(&self, resource: &str) -> usize {
        self.entries
            .iter()
            .filter(|entry| match &entry.action {
                MenuAction::OpenList(name) | MenuAction::NewRecord(name) => name == resource,
                MenuAction::Quit => false,
            })
            .count()
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}
