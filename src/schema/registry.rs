use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use super::{Association, ModelDescriptor};
use crate::error::SchemaError;

/// Hook run once during wiring. It reads the fully built registry and returns
/// the associations its model declares.
pub type AssociateFn = fn(&ModelRegistry) -> Result<Vec<Association>, SchemaError>;

/// Lookup table from entity name to descriptor.
#[derive(Debug, Default, Serialize)]
pub struct ModelRegistry {
    models: BTreeMap<String, ModelDescriptor>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: ModelDescriptor) -> Result<(), SchemaError> {
        if self.models.contains_key(&descriptor.name) {
            return Err(SchemaError::DuplicateModel(descriptor.name));
        }
        self.models.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ModelDescriptor> {
        self.models.get(name)
    }

    pub fn require(&self, name: &str) -> Result<&ModelDescriptor, SchemaError> {
        self.get(name)
            .ok_or_else(|| SchemaError::ModelNotFound(name.to_string()))
    }

    pub fn models(&self) -> impl Iterator<Item = &ModelDescriptor> {
        self.models.values()
    }

    /// Runs every hook against the registry as it stands, then attaches the
    /// returned associations to their source models. Nothing is attached if
    /// any hook fails.
    pub fn wire(&mut self, hooks: &[AssociateFn]) -> Result<(), SchemaError> {
        let mut declared = Vec::new();
        for hook in hooks {
            declared.extend(hook(self)?);
        }

        for (i, association) in declared.iter().enumerate() {
            let source = self.require(&association.source)?;
            let duplicate = source
                .associations()
                .iter()
                .chain(&declared[..i])
                .any(|a| {
                    a.source == association.source
                        && a.target == association.target
                        && a.through == association.through
                });
            if duplicate {
                return Err(SchemaError::DuplicateAssociation {
                    source_model: association.source.clone(),
                    target: association.target.clone(),
                    through: association.through.clone(),
                });
            }
            self.require(&association.target)?;
        }

        for association in declared {
            debug!(
                "{} belongsToMany {} through {}",
                association.source, association.target, association.through
            );
            if let Some(source) = self.models.get_mut(&association.source) {
                source.push_association(association);
            }
        }
        Ok(())
    }

    /// One association per distinct join entity, in model order.
    pub fn join_tables(&self) -> Vec<&Association> {
        let mut seen: Vec<&str> = Vec::new();
        let mut joins = Vec::new();
        for association in self.models.values().flat_map(|m| m.associations()) {
            if !seen.contains(&association.through.as_str()) {
                seen.push(&association.through);
                joins.push(association);
            }
        }
        joins
    }
}
