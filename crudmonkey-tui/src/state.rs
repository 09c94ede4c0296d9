//! Application state: resource registrar and navigation controller.
//!
//! `App` owns the page stack, the menu and every registration, and is the
//! single consumer of [`NavEvent`]s. All store calls happen synchronously
//! inside the handling of one event.

use crate::form::{build_form, FormFocus, SubmitError};
use crate::keys::{InputMode, KeyAction};
use crate::list::{build_list, ListView};
use crate::menu::{Menu, MenuAction};
use crate::nav::{transition, NavEvent, PageId};
use crate::notifications::{Notification, NotificationLevel};
use crate::pages::{Page, PageStack};
use crate::persistence::PersistedState;
use crate::registry::{Registration, Registry};
use crate::theme::SynthBruteTheme;
use crudmonkey_core::{ConfigurationError, Describable, RecordType, StoreError};
use crudmonkey_storage::Store;
use std::sync::Arc;

const HELP_TEXT: &str = "Menu/list: j/k or arrows move, Enter selects, n new record, \
r refresh, Esc back, q quit, Ctrl-C quits from menu or list.\nForm: Tab/Shift-Tab move focus, Ctrl-S save, Esc cancel.";

#[derive(Debug, Clone)]
pub struct Modal {
    pub title: String,
    pub message: String,
}

/// Why a page could not be entered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("Unknown resource: {0}")]
    UnknownResource(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct App {
    pub theme: SynthBruteTheme,
    store: Arc<dyn Store>,
    pub registry: Registry,
    pub menu: Menu,
    pub pages: PageStack,
    pub notifications: Vec<Notification>,
    pub modal: Option<Modal>,
    pub should_quit: bool,
    /// Resource whose list page was entered last.
    pub last_resource: Option<String>,
}

impl App {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            theme: SynthBruteTheme::synthbrute(),
            store,
            registry: Registry::new(),
            menu: Menu::new(),
            pages: PageStack::new(),
            notifications: Vec::new(),
            modal: None,
            should_quit: false,
            last_resource: None,
        }
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    pub fn register<T: Describable>(&mut self, resource_name: &str) -> Result<(), ConfigurationError> {
        self.register_resource(resource_name, RecordType::of::<T>())
    }

    /// Install the menu entry pair and the list page for a resource.
    ///
    /// Re-registering a name replaces its registration, menu entries and list
    /// page. Only a broken record type fails; a store failure leaves an empty
    /// list page behind and is reported as a notification.
    pub fn register_resource(
        &mut self,
        resource_name: &str,
        record_type: RecordType,
    ) -> Result<(), ConfigurationError> {
        let registration = Registration::new(resource_name, record_type)?;

        let view = match build_list(self.store.as_ref(), &registration) {
            Ok(view) => view,
            Err(err) => {
                tracing::warn!(resource = resource_name, error = %err, "Initial list build failed");
                self.notify(
                    NotificationLevel::Error,
                    format!("Loading {} failed: {}", resource_name, err),
                );
                ListView::empty(&registration)
            }
        };

        self.menu.upsert_resource(resource_name);
        self.pages.add_page(Page::List(view), false);
        let replaced = self.registry.insert(registration);

        tracing::info!(
            resource = resource_name,
            replaced,
            "Registered resource"
        );
        Ok(())
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
    }

    pub fn latest_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    pub fn active_id(&self) -> &PageId {
        self.pages.active_id()
    }

    pub fn active_page(&self) -> &Page {
        self.pages.active()
    }

    pub fn input_mode(&self) -> InputMode {
        match (self.modal.is_some(), self.pages.active()) {
            (false, Page::Form(_)) => InputMode::Edit,
            _ => InputMode::Browse,
        }
    }

    /// Apply a navigation event to the active page. Returns true when the page changed.
    pub fn dispatch(&mut self, event: NavEvent) -> bool {
        let current = self.pages.active_id().clone();
        let Some(target) = transition(&current, &event) else {
            tracing::debug!(page = %current, ?event, "Event does not apply to page");
            return false;
        };

        if let Err(err) = self.enter(&target) {
            tracing::warn!(from = %current, to = %target, error = %err, "Page switch failed");
            self.notify(NotificationLevel::Error, err.to_string());
            if !current.is_ephemeral() {
                return false;
            }
            // A closing form never stays open; fall back to the last good list.
            if !self.pages.switch_to(&target.name()) {
                self.pages.switch_to(&PageId::Menu.name());
            }
        }

        if current.is_ephemeral() {
            self.pages.remove_page(&current.name());
        }
        tracing::info!(from = %current, to = %self.pages.active_name(), "Switched page");
        true
    }

    /// Build (or rebuild) the target page and make it active.
    fn enter(&mut self, target: &PageId) -> Result<(), NavigationError> {
        match target {
            PageId::Menu => {
                self.pages.switch_to(&target.name());
            }
            PageId::List(resource) => {
                let registration = self.registration(resource)?;
                let view = build_list(self.store.as_ref(), registration)?;
                self.pages.add_page(Page::List(view), true);
                self.last_resource = Some(resource.clone());
            }
            PageId::New(resource) => {
                let registration = self.registration(resource)?;
                let form = build_form(self.store.as_ref(), registration, None)?;
                self.pages.add_page(Page::Form(form), true);
            }
            PageId::Edit(resource, id) => {
                let registration = self.registration(resource)?;
                let form = build_form(self.store.as_ref(), registration, Some(*id))?;
                self.pages.add_page(Page::Form(form), true);
            }
        }
        Ok(())
    }

    fn registration(&self, resource: &str) -> Result<&Registration, NavigationError> {
        self.registry
            .get(resource)
            .ok_or_else(|| NavigationError::UnknownResource(resource.to_string()))
    }

    /// Switch from the menu to a resource's list page.
    pub fn open_resource(&mut self, resource: &str) -> bool {
        if self.pages.active_id() != &PageId::Menu {
            self.pages.switch_to(&PageId::Menu.name());
        }
        self.dispatch(NavEvent::SelectResource(resource.to_string()))
    }

    pub fn activate_menu_entry(&mut self) {
        match self.menu.selected_action().cloned() {
            Some(MenuAction::OpenList(resource)) => {
                self.dispatch(NavEvent::SelectResource(resource));
            }
            Some(MenuAction::NewRecord(resource)) => {
                self.dispatch(NavEvent::SelectNew(resource));
            }
            Some(MenuAction::Quit) => self.should_quit = true,
            None => {}
        }
    }

    /// Rebuild the active list page in place, keeping the selected record.
    pub fn refresh_active_list(&mut self) -> bool {
        let (resource, selected) = match self.pages.active() {
            Page::List(view) => (view.resource.clone(), view.selected_id()),
            Page::Menu | Page::Form(_) => return false,
        };
        let rebuilt = match self.registration(&resource) {
            Ok(registration) => build_list(self.store.as_ref(), registration).map_err(NavigationError::from),
            Err(err) => Err(err),
        };
        match rebuilt {
            Ok(mut view) => {
                if let Some(id) = selected {
                    view.select_id(id);
                }
                self.pages.add_page(Page::List(view), true);
                true
            }
            Err(err) => {
                tracing::warn!(resource = %resource, error = %err, "List refresh failed");
                self.notify(NotificationLevel::Error, err.to_string());
                false
            }
        }
    }

    /// Parse and persist the active form. On success the form closes and the list is rebuilt.
    pub fn save_active_form(&mut self) -> bool {
        let store = Arc::clone(&self.store);
        let (title, result) = match self.pages.active_mut() {
            Page::Form(form) => (form.title.clone(), form.submit(store.as_ref())),
            Page::Menu | Page::List(_) => return false,
        };

        match result {
            Ok(record) => {
                tracing::info!(form = %title, id = ?record.id, "Saved record");
                self.dispatch(NavEvent::SaveSucceeded);
                if let (Some(id), Page::List(view)) = (record.id, self.pages.active_mut()) {
                    view.select_id(id);
                }
                self.notify(NotificationLevel::Success, format!("{}: saved", title));
                true
            }
            Err(SubmitError::Invalid { fields }) => {
                tracing::warn!(form = %title, ?fields, "Rejected invalid input");
                self.notify(
                    NotificationLevel::Warning,
                    format!("Invalid input in {}", fields.join(", ")),
                );
                false
            }
            Err(SubmitError::Store(err)) => {
                tracing::warn!(form = %title, error = %err, "Save failed");
                self.notify(NotificationLevel::Error, format!("{}: {}", title, err));
                false
            }
        }
    }

    pub fn open_help(&mut self) {
        self.modal = Some(Modal {
            title: "Keybindings".to_string(),
            message: HELP_TEXT.to_string(),
        });
    }

    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            last_resource: self.last_resource.clone(),
        }
    }

    /// Reopen the last visited list page if its resource is still registered.
    pub fn restore(&mut self, state: &PersistedState) -> bool {
        match &state.last_resource {
            Some(resource) if self.registry.contains(resource) => self.open_resource(resource),
            _ => false,
        }
    }

    pub fn handle_action(&mut self, action: KeyAction) {
        if action == KeyAction::ForceQuit {
            self.should_quit = true;
            return;
        }
        if self.modal.is_some() {
            self.modal = None;
            return;
        }
        match self.pages.active_id().clone() {
            PageId::Menu => self.handle_menu_action(action),
            PageId::List(_) => self.handle_list_action(action),
            PageId::New(_) | PageId::Edit(_, _) => self.handle_form_action(action),
        }
    }

    fn handle_menu_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::MoveUp => self.menu.select_previous(),
            KeyAction::MoveDown => self.menu.select_next(),
            KeyAction::Select => self.activate_menu_entry(),
            KeyAction::JumpTo(index) => {
                self.menu.select(index);
            }
            KeyAction::NewItem => match self.menu.selected_action().cloned() {
                Some(MenuAction::OpenList(resource)) | Some(MenuAction::NewRecord(resource)) => {
                    self.dispatch(NavEvent::SelectNew(resource));
                }
                Some(MenuAction::Quit) | None => {}
            },
            KeyAction::OpenHelp => self.open_help(),
            _ => {}
        }
    }

    fn handle_list_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit | KeyAction::Back => {
                self.dispatch(NavEvent::Back);
            }
            KeyAction::MoveUp => {
                if let Page::List(view) = self.pages.active_mut() {
                    view.select_previous();
                }
            }
            KeyAction::MoveDown => {
                if let Page::List(view) = self.pages.active_mut() {
                    view.select_next();
                }
            }
            KeyAction::JumpTo(index) => {
                if let Page::List(view) = self.pages.active_mut() {
                    if index < view.rows.len() {
                        view.selected = Some(index);
                    }
                }
            }
            KeyAction::Select => {
                let selected = match self.pages.active() {
                    Page::List(view) => view.selected_id(),
                    Page::Menu | Page::Form(_) => None,
                };
                if let Some(id) = selected {
                    self.dispatch(NavEvent::SelectRow(id));
                }
            }
            KeyAction::NewItem => {
                self.dispatch(NavEvent::NewKey);
            }
            KeyAction::Refresh => {
                self.refresh_active_list();
            }
            KeyAction::OpenHelp => self.open_help(),
            _ => {}
        }
    }

    fn handle_form_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Save => {
                self.save_active_form();
                return;
            }
            KeyAction::Cancel => {
                self.dispatch(NavEvent::Cancel);
                return;
            }
            _ => {}
        }

        let Page::Form(form) = self.pages.active_mut() else {
            return;
        };
        match action {
            KeyAction::Insert(c) => form.insert_char(c),
            KeyAction::Backspace => form.backspace(),
            KeyAction::Delete => form.delete(),
            KeyAction::CursorLeft => form.cursor_left(),
            KeyAction::CursorRight => form.cursor_right(),
            KeyAction::CursorHome => form.cursor_home(),
            KeyAction::CursorEnd => form.cursor_end(),
            KeyAction::NextFocus => form.focus_next(),
            KeyAction::PrevFocus => form.focus_previous(),
            KeyAction::Activate => {
                let focus = form.focus;
                match focus {
                    FormFocus::Input(_) => form.focus_next(),
                    FormFocus::Save => {
                        self.save_active_form();
                    }
                    FormFocus::Cancel => {
                        self.dispatch(NavEvent::Cancel);
                    }
                }
            }
            _ => {}
        }
    }
}
