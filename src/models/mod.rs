// src/models/mod.rs

pub mod poi;
pub mod poi_tag;
pub mod tag;

use crate::error::SchemaError;
use crate::schema::{AssociateFn, ModelRegistry};

/// Builds every descriptor first, then runs the association hooks against
/// the complete lookup table.
pub fn registry() -> Result<ModelRegistry, SchemaError> {
    let mut models = ModelRegistry::new();
    models.register(tag::descriptor())?;
    models.register(poi::descriptor())?;

    let hooks: [AssociateFn; 1] = [tag::associate];
    models.wire(&hooks)?;
    Ok(models)
}
