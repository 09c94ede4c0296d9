//! Form view builder.
//!
//! One text input per field descriptor. Create mode starts blank; edit mode
//! loads the record first and pre-populates every input through the codecs.
//! Save parses every input before touching the store: a single parse failure
//! keeps the form open with the offending fields marked.

use crate::nav::PageId;
use crate::registry::Registration;
use crudmonkey_core::{parse, render, FieldDescriptor, Record, RecordId, StoreError};
use crudmonkey_storage::{Store, StoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(RecordId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Input(usize),
    Save,
    Cancel,
}

/// A labeled text input bound to one descriptor.
#[derive(Debug, Clone)]
pub struct FormInput {
    pub descriptor: FieldDescriptor,
    pub text: String,
    /// Cursor position in chars.
    pub cursor: usize,
    pub error: Option<String>,
}

impl FormInput {
    fn new(descriptor: FieldDescriptor, text: String) -> Self {
        let cursor = text.chars().count();
        Self {
            descriptor,
            text,
            cursor,
            error: None,
        }
    }

    pub fn label(&self) -> String {
        self.descriptor.label()
    }

    fn byte_index(&self) -> usize {
        self.text
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn insert(&mut self, c: char) {
        let at = self.byte_index();
        self.text.insert(at, c);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index();
        self.text.remove(at);
    }

    fn delete(&mut self) {
        if self.cursor < self.text.chars().count() {
            let at = self.byte_index();
            self.text.remove(at);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("invalid input in {}", fields.join(", "))]
    Invalid { fields: Vec<String> },
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone)]
pub struct FormView {
    pub resource: String,
    pub title: String,
    pub mode: FormMode,
    pub inputs: Vec<FormInput>,
    pub focus: FormFocus,
    /// Last store failure, shown above the inputs.
    pub store_error: Option<String>,
    /// Record the form writes over: blank for create, the loaded record for edit.
    base: Record,
}

/// Build a create form (`edit_id` absent) or an edit form pre-populated from the store.
pub fn build_form(
    store: &dyn Store,
    registration: &Registration,
    edit_id: Option<RecordId>,
) -> StoreResult<FormView> {
    let (mode, base) = match edit_id {
        Some(id) => (FormMode::Edit(id), store.find_by_id(registration.table(), id)?),
        None => (FormMode::Create, Record::new(registration.table())),
    };

    let inputs: Vec<FormInput> = registration
        .descriptors
        .iter()
        .map(|descriptor| {
            let text = match mode {
                FormMode::Edit(_) => render(
                    &descriptor.semantic_type,
                    base.get(&descriptor.persisted_name),
                ),
                FormMode::Create => String::new(),
            };
            FormInput::new(descriptor.clone(), text)
        })
        .collect();

    let title = match mode {
        FormMode::Create => format!("New {}", registration.title()),
        FormMode::Edit(id) => format!("Edit {} {}", registration.title(), id),
    };

    Ok(FormView {
        resource: registration.resource_name.clone(),
        title,
        mode,
        focus: if inputs.is_empty() {
            FormFocus::Save
        } else {
            FormFocus::Input(0)
        },
        inputs,
        store_error: None,
        base,
    })
}

impl FormView {
    pub fn page_id(&self) -> PageId {
        match self.mode {
            FormMode::Create => PageId::New(self.resource.clone()),
            FormMode::Edit(id) => PageId::Edit(self.resource.clone(), id),
        }
    }

    pub fn input(&self, persisted_name: &str) -> Option<&FormInput> {
        self.inputs
            .iter()
            .find(|input| input.descriptor.persisted_name == persisted_name)
    }

    /// Replace an input's text, as if typed. Returns false for unknown fields.
    pub fn set_text(&mut self, persisted_name: &str, text: &str) -> bool {
        match self
            .inputs
            .iter_mut()
            .find(|input| input.descriptor.persisted_name == persisted_name)
        {
            Some(input) => {
                input.text = text.to_string();
                input.cursor = input.text.chars().count();
                true
            }
            None => false,
        }
    }

    fn focused_input(&mut self) -> Option<&mut FormInput> {
        match self.focus {
            FormFocus::Input(index) => self.inputs.get_mut(index),
            FormFocus::Save | FormFocus::Cancel => None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(input) = self.focused_input() {
            input.insert(c);
            input.error = None;
        }
    }

    pub fn backspace(&mut self) {
        if let Some(input) = self.focused_input() {
            input.backspace();
            input.error = None;
        }
    }

    pub fn delete(&mut self) {
        if let Some(input) = self.focused_input() {
            input.delete();
            input.error = None;
        }
    }

    pub fn cursor_left(&mut self) {
        if let Some(input) = self.focused_input() {
            input.cursor = input.cursor.saturating_sub(1);
        }
    }

    pub fn cursor_right(&mut self) {
        if let Some(input) = self.focused_input() {
            input.cursor = (input.cursor + 1).min(input.text.chars().count());
        }
    }

    pub fn cursor_home(&mut self) {
        if let Some(input) = self.focused_input() {
            input.cursor = 0;
        }
    }

    pub fn cursor_end(&mut self) {
        if let Some(input) = self.focused_input() {
            input.cursor = input.text.chars().count();
        }
    }

    /// Cycle focus: inputs, then Save, then Cancel.
    pub fn focus_next(&mut self) {
        let count = self.inputs.len();
        self.focus = match self.focus {
            FormFocus::Input(index) if index + 1 < count => FormFocus::Input(index + 1),
            FormFocus::Input(_) => FormFocus::Save,
            FormFocus::Save => FormFocus::Cancel,
            FormFocus::Cancel if count > 0 => FormFocus::Input(0),
            FormFocus::Cancel => FormFocus::Save,
        };
    }

    pub fn focus_previous(&mut self) {
        let count = self.inputs.len();
        self.focus = match self.focus {
            FormFocus::Input(0) => FormFocus::Cancel,
            FormFocus::Input(index) => FormFocus::Input(index - 1),
            FormFocus::Save if count > 0 => FormFocus::Input(count - 1),
            FormFocus::Save => FormFocus::Cancel,
            FormFocus::Cancel => FormFocus::Save,
        };
    }

    /// Parse every input into a record. Marks and names the failing fields.
    pub fn collect(&mut self) -> Result<Record, SubmitError> {
        let mut record = self.base.clone();
        let mut failed = Vec::new();
        for input in &mut self.inputs {
            let descriptor = &input.descriptor;
            match parse(&descriptor.semantic_type, &input.text, descriptor.nullable) {
                Ok(value) => {
                    input.error = None;
                    record.set(descriptor.persisted_name.clone(), value);
                }
                Err(err) => {
                    input.error = Some(err.to_string());
                    failed.push(descriptor.persisted_name.clone());
                }
            }
        }
        if !failed.is_empty() {
            if let Some(index) = self.inputs.iter().position(|i| i.error.is_some()) {
                self.focus = FormFocus::Input(index);
            }
            return Err(SubmitError::Invalid { fields: failed });
        }
        if let FormMode::Edit(id) = self.mode {
            record.id = Some(id);
        }
        Ok(record)
    }

    /// Parse, then Create or Update. The store is untouched unless every input parses.
    pub fn submit(&mut self, store: &dyn Store) -> Result<Record, SubmitError> {
        let record = self.collect()?;
        let result = match self.mode {
            FormMode::Create => store.create(record),
            FormMode::Edit(_) => store.update(record),
        };
        match result {
            Ok(stored) => {
                self.store_error = None;
                Ok(stored)
            }
            Err(err) => {
                self.store_error = Some(err.to_string());
                Err(SubmitError::Store(err))
            }
        }
    }
}
