//! Record types served by the `crudmonkey` binary.

use crate::notifications::NotificationLevel;
use crate::state::App;
use chrono::{TimeZone, Utc};
use crudmonkey_core::{CrudResult, Describable, FieldDef, Record, RecordId, Timestamp, TypeTag};
use crudmonkey_storage::{Store, StoreResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Blog {
    pub id: Option<RecordId>,
    pub title: String,
    pub body: String,
    pub published_at: Option<Timestamp>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl Describable for Blog {
    fn table() -> &'static str {
        "blogs"
    }

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new("id", "id", TypeTag::Identifier),
            FieldDef::new("title", "title", TypeTag::String),
            FieldDef::new("body", "body", TypeTag::String),
            FieldDef::new("published_at", "published_at", TypeTag::Timestamp).nullable(),
            FieldDef::new("created_at", "created_at", TypeTag::Timestamp),
            FieldDef::new("updated_at", "updated_at", TypeTag::Timestamp),
        ]
    }
}

impl From<Blog> for Record {
    fn from(blog: Blog) -> Self {
        let mut record = Record::new(Blog::table())
            .with_value("title", blog.title)
            .with_value("body", blog.body)
            .with_value("published_at", blog.published_at);
        record.id = blog.id;
        record.created_at = blog.created_at;
        record.updated_at = blog.updated_at;
        record
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Option<RecordId>,
    pub name: String,
    pub email: String,
    pub age: Option<i64>,
    pub admin: bool,
    /// Never stored or shown.
    pub session_token: Option<String>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl Describable for User {
    fn table() -> &'static str {
        "users"
    }

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new("id", "id", TypeTag::Identifier),
            FieldDef::new("name", "name", TypeTag::String),
            FieldDef::new("email", "email", TypeTag::String),
            FieldDef::new("age", "age", TypeTag::Integer).nullable(),
            FieldDef::new("admin", "admin", TypeTag::Boolean),
            FieldDef::new("session_token", "-", TypeTag::String),
            FieldDef::new("created_at", "created_at", TypeTag::Timestamp),
            FieldDef::new("updated_at", "updated_at", TypeTag::Timestamp),
        ]
    }
}

impl From<User> for Record {
    fn from(user: User) -> Self {
        let mut record = Record::new(User::table())
            .with_value("name", user.name)
            .with_value("email", user.email)
            .with_value("age", user.age)
            .with_value("admin", user.admin);
        record.id = user.id;
        record.created_at = user.created_at;
        record.updated_at = user.updated_at;
        record
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub id: Option<RecordId>,
    pub name: String,
    pub count: i64,
}

impl Describable for Widget {
    fn table() -> &'static str {
        "widgets"
    }

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new("id", "id", TypeTag::Identifier),
            FieldDef::new("name", "name", TypeTag::String),
            FieldDef::new("count", "count", TypeTag::Integer),
        ]
    }
}

impl From<Widget> for Record {
    fn from(widget: Widget) -> Self {
        let mut record = Record::new(Widget::table())
            .with_value("name", widget.name)
            .with_value("count", widget.count);
        record.id = widget.id;
        record
    }
}

/// Register `blogs`, `users` and `widgets`, in menu order.
pub fn register_demo_resources(app: &mut App) -> CrudResult<()> {
    app.register::<Blog>("blogs")?;
    app.register::<User>("users")?;
    app.register::<Widget>("widgets")?;
    Ok(())
}

/// Insert one sample row into each empty demo table. Returns the rows created.
pub fn seed_demo_data(store: &dyn Store) -> StoreResult<usize> {
    let published = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).single();
    let samples: Vec<Record> = vec![
        Blog {
            id: None,
            title: "Hello, crudmonkey".to_string(),
            body: "Every screen here is generated from field metadata.".to_string(),
            published_at: published,
            created_at: None,
            updated_at: None,
        }
        .into(),
        User {
            id: None,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            age: Some(36),
            admin: true,
            session_token: None,
            created_at: None,
            updated_at: None,
        }
        .into(),
        Widget {
            id: None,
            name: "bolt".to_string(),
            count: 12,
        }
        .into(),
    ];

    let mut created = 0;
    for record in samples {
        if store.find_all(&record.table)?.is_empty() {
            store.create(record)?;
            created += 1;
        }
    }
    if created > 0 {
        tracing::info!(created, "Seeded demo data");
    }
    Ok(created)
}

/// Seed through the app's store. A failure is logged and posted as an error
/// notification; startup carries on with whatever the store already holds.
pub fn seed_demo_data_or_notify(app: &mut App) -> usize {
    let result = seed_demo_data(app.store());
    match result {
        Ok(created) => created,
        Err(err) => {
            tracing::warn!(error = %err, "Seeding demo data failed");
            app.notify(
                NotificationLevel::Error,
                format!("Seeding demo data failed: {}", err),
            );
            0
        }
    }
}
