//! Resource registrations.
//!
//! A registration binds a resource name to a record type and the field
//! descriptors extracted from it. It is validated once, when created, so an
//! unsupported field type stops startup instead of surfacing at edit time.

use crudmonkey_core::{
    describe, is_supported, title_case, ConfigurationError, FieldDescriptor, RecordType,
};
use std::collections::HashSet;
use std::sync::Arc;

/// Page names reserved by the navigation shell.
const RESERVED_NAMES: [&str; 1] = ["menu"];

/// An immutable resource registration.
#[derive(Debug, Clone)]
pub struct Registration {
    pub resource_name: String,
    pub record_type: RecordType,
    pub descriptors: Arc<[FieldDescriptor]>,
}

impl Registration {
    pub fn new(
        resource_name: &str,
        record_type: RecordType,
    ) -> Result<Self, ConfigurationError> {
        validate_resource_name(resource_name)?;

        let descriptors = describe(&record_type);
        let mut names = HashSet::new();
        let mut columns = HashSet::new();
        for descriptor in &descriptors {
            if !is_supported(&descriptor.semantic_type) {
                return Err(ConfigurationError::UnsupportedFieldType {
                    resource: resource_name.to_string(),
                    field: descriptor.name.clone(),
                    type_name: descriptor.semantic_type.name().to_string(),
                });
            }
            if !names.insert(descriptor.name.as_str())
                || !columns.insert(descriptor.persisted_name.as_str())
            {
                return Err(ConfigurationError::DuplicateField {
                    resource: resource_name.to_string(),
                    field: descriptor.name.clone(),
                });
            }
        }

        Ok(Self {
            resource_name: resource_name.to_string(),
            record_type,
            descriptors: descriptors.into(),
        })
    }

    pub fn table(&self) -> &str {
        self.record_type.table
    }

    /// Display title, e.g. `Widgets`.
    pub fn title(&self) -> String {
        title_case(&self.resource_name)
    }
}

fn validate_resource_name(name: &str) -> Result<(), ConfigurationError> {
    if name.trim().is_empty() {
        return Err(ConfigurationError::EmptyResourceName);
    }
    // Names that would collide with another page in the stack.
    if RESERVED_NAMES.contains(&name)
        || name.ends_with("_new")
        || name.contains("_edit_")
        || name.chars().any(char::is_whitespace)
    {
        return Err(ConfigurationError::ReservedResourceName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Registrations keyed by resource name, in first-registration order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    registrations: Vec<Registration>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. Returns true when an existing registration was replaced.
    pub fn insert(&mut self, registration: Registration) -> bool {
        match self
            .registrations
            .iter_mut()
            .find(|r| r.resource_name == registration.resource_name)
        {
            Some(existing) => {
                *existing = registration;
                true
            }
            None => {
                self.registrations.push(registration);
                false
            }
        }
    }

    pub fn get(&self, resource_name: &str) -> Option<&Registration> {
        self.registrations
            .iter()
            .find(|r| r.resource_name == resource_name)
    }

    pub fn contains(&self, resource_name: &str) -> bool {
        self.get(resource_name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registrations.iter().map(|r| r.resource_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}
