// src/schema/mod.rs

pub mod ddl;
pub mod registry;

use serde::Serialize;

pub use registry::{AssociateFn, ModelRegistry};

/// Storage type of a declared attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Integer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
    pub nullable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssociationKind {
    BelongsToMany,
}

/// A relationship declared from `source` to `target`. For many-to-many links
/// `through` names the join entity holding `source_key` and `target_key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Association {
    pub kind: AssociationKind,
    pub source: String,
    pub source_table: String,
    pub target: String,
    pub target_table: String,
    pub through: String,
    pub source_key: String,
    pub target_key: String,
}

impl Association {
    pub fn belongs_to_many(
        source: &ModelDescriptor,
        target: &ModelDescriptor,
        through: &str,
    ) -> Self {
        Association {
            kind: AssociationKind::BelongsToMany,
            source: source.name.clone(),
            source_table: source.table_name.clone(),
            target: target.name.clone(),
            target_table: target.table_name.clone(),
            through: through.to_string(),
            source_key: foreign_key(&source.name),
            target_key: foreign_key(&target.name),
        }
    }
}

/// Declarative shape of one entity. Identity is an implicit `id` key and the
/// `createdAt`/`updatedAt` pair is implied by `timestamps`; neither is listed
/// among the attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelDescriptor {
    pub name: String,
    pub table_name: String,
    pub timestamps: bool,
    columns: Vec<Column>,
    associations: Vec<Association>,
}

impl ModelDescriptor {
    pub fn new(name: &str) -> Self {
        ModelDescriptor {
            name: name.to_string(),
            table_name: format!("{}s", name),
            timestamps: true,
            columns: Vec::new(),
            associations: Vec::new(),
        }
    }

    pub fn attribute(mut self, name: &str, column_type: ColumnType) -> Self {
        self.columns.push(Column {
            name: name.to_string(),
            column_type,
            nullable: true,
        });
        self
    }

    pub fn without_timestamps(mut self) -> Self {
        self.timestamps = false;
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn attribute_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn associations(&self) -> &[Association] {
        &self.associations
    }

    pub(crate) fn push_association(&mut self, association: Association) {
        self.associations.push(association);
    }
}

fn foreign_key(model: &str) -> String {
    format!("{}Id", model)
}
