//! List view builder.
//!
//! A list page is a point-in-time snapshot of one `find_all` call. It is
//! rebuilt on every entry and never shown with a partial set of rows.

use crate::nav::PageId;
use crate::registry::Registration;
use crudmonkey_core::{render, RecordId, Timestamp, Value};
use crudmonkey_storage::{Store, StoreResult};

/// Header of the identifier column.
pub const ID_HEADER: &str = "ID";

#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    pub id: Option<RecordId>,
    /// Rendered cells, identifier first, aligned with the headers.
    pub cells: Vec<String>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone)]
pub struct ListView {
    pub resource: String,
    pub title: String,
    /// `ID` followed by each descriptor's persisted name.
    pub headers: Vec<String>,
    pub rows: Vec<ListRow>,
    pub selected: Option<usize>,
    pub loaded_at: Timestamp,
}

/// Fetch every record of the resource and render it through the codecs.
pub fn build_list(store: &dyn Store, registration: &Registration) -> StoreResult<ListView> {
    let records = store.find_all(registration.table())?;

    let mut headers = Vec::with_capacity(registration.descriptors.len() + 1);
    headers.push(ID_HEADER.to_string());
    headers.extend(
        registration
            .descriptors
            .iter()
            .map(|d| d.persisted_name.clone()),
    );

    let rows: Vec<ListRow> = records
        .iter()
        .map(|record| {
            let mut cells = Vec::with_capacity(headers.len());
            cells.push(record.id.map(|id| id.to_string()).unwrap_or_default());
            cells.extend(registration.descriptors.iter().map(|d| {
                render(&d.semantic_type, record.get(&d.persisted_name))
            }));
            ListRow {
                id: record.id,
                cells,
                created_at: record.created_at,
                updated_at: record.updated_at,
            }
        })
        .collect();

    tracing::debug!(
        resource = %registration.resource_name,
        rows = rows.len(),
        "Built list view"
    );

    Ok(ListView {
        resource: registration.resource_name.clone(),
        title: registration.title(),
        headers,
        selected: if rows.is_empty() { None } else { Some(0) },
        rows,
        loaded_at: chrono::Utc::now(),
    })
}

impl ListView {
    /// An empty list shown when the registration-time fetch failed.
    pub fn empty(registration: &Registration) -> Self {
        let mut headers = vec![ID_HEADER.to_string()];
        headers.extend(
            registration
                .descriptors
                .iter()
                .map(|d| d.persisted_name.clone()),
        );
        Self {
            resource: registration.resource_name.clone(),
            title: registration.title(),
            headers,
            rows: Vec::new(),
            selected: None,
            loaded_at: chrono::Utc::now(),
        }
    }

    pub fn page_id(&self) -> PageId {
        PageId::List(self.resource.clone())
    }

    pub fn selected_row(&self) -> Option<&ListRow> {
        self.selected.and_then(|index| self.rows.get(index))
    }

    pub fn selected_id(&self) -> Option<RecordId> {
        self.selected_row().and_then(|row| row.id)
    }

    /// Select the row holding `id`, if present.
    pub fn select_id(&mut self, id: RecordId) -> bool {
        match self.rows.iter().position(|row| row.id == Some(id)) {
            Some(index) => {
                self.selected = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn select_next(&mut self) {
        if self.rows.is_empty() {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(index) => (index + 1) % self.rows.len(),
            None => 0,
        });
    }

    pub fn select_previous(&mut self) {
        if self.rows.is_empty() {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => self.rows.len() - 1,
            Some(index) => index - 1,
        });
    }

    /// Rendered cell under `header` for a row.
    pub fn cell<'a>(&self, row: &'a ListRow, header: &str) -> Option<&'a str> {
        self.headers
            .iter()
            .position(|h| h == header)
            .and_then(|index| row.cells.get(index))
            .map(String::as_str)
    }
}

/// Rendered label/value pairs for the detail panel of a row.
pub fn row_details(view: &ListView, row: &ListRow) -> Vec<(String, String)> {
    let mut fields: Vec<(String, String)> = view
        .headers
        .iter()
        .zip(row.cells.iter())
        .map(|(header, cell)| (crudmonkey_core::title_case(header), cell.clone()))
        .collect();
    if let Some(created) = row.created_at {
        fields.push(("Created".to_string(), Value::Timestamp(created).to_string()));
    }
    if let Some(updated) = row.updated_at {
        fields.push(("Updated".to_string(), Value::Timestamp(updated).to_string()));
    }
    fields
}
