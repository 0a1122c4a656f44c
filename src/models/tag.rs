use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use super::poi;
use crate::error::SchemaError;
use crate::schema::{Association, ColumnType, ModelDescriptor, ModelRegistry};

pub const MODEL: &str = "Tag";
pub const THROUGH: &str = "POITag";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: i64,
    pub name: Option<String>,
    pub image: Option<String>,
    pub color: Option<String>,
    pub group: Option<i64>,
    #[sqlx(rename = "creatorId")]
    pub creator_id: Option<String>,
    #[sqlx(rename = "createdAt")]
    pub created_at: NaiveDateTime,
    #[sqlx(rename = "updatedAt")]
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTag {
    pub name: Option<String>,
    pub image: Option<String>,
    pub color: Option<String>,
    pub group: Option<i64>,
    pub creator_id: Option<String>,
}

/// Partial update. The outer `Option` selects the field; `Some(None)` writes
/// NULL. In JSON an absent key leaves the field alone and `null` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagChanges {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub image: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub color: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub group: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<Option<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl TagChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.image.is_none()
            && self.color.is_none()
            && self.group.is_none()
            && self.creator_id.is_none()
    }
}

pub fn descriptor() -> ModelDescriptor {
    ModelDescriptor::new(MODEL)
        .attribute("name", ColumnType::String)
        .attribute("image", ColumnType::String)
        .attribute("color", ColumnType::String)
        .attribute("group", ColumnType::Integer)
        .attribute("creatorId", ColumnType::String)
}

/// Tag belongsToMany POI through POITag.
pub fn associate(models: &ModelRegistry) -> Result<Vec<Association>, SchemaError> {
    let tag = models.require(MODEL)?;
    let poi = models.require(poi::MODEL)?;
    Ok(vec![Association::belongs_to_many(tag, poi, THROUGH)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AssociationKind;

    #[test]
    fn attribute_set_and_types() {
        let tag = descriptor();
        let shape: Vec<(&str, ColumnType)> = tag
            .columns()
            .iter()
            .map(|c| (c.name.as_str(), c.column_type))
            .collect();

        assert_eq!(
            shape,
            vec![
                ("name", ColumnType::String),
                ("image", ColumnType::String),
                ("color", ColumnType::String),
                ("group", ColumnType::Integer),
                ("creatorId", ColumnType::String),
            ]
        );
    }

    #[test]
    fn associate_links_tag_to_poi_through_poitag() {
        let mut models = ModelRegistry::new();
        models.register(descriptor()).unwrap();
        models.register(poi::descriptor()).unwrap();
        models.wire(&[associate]).unwrap();

        let assoc = &models.get(MODEL).unwrap().associations()[0];
        assert_eq!(assoc.kind, AssociationKind::BelongsToMany);
        assert_eq!(assoc.target, "POI");
        assert_eq!(assoc.through, "POITag");
    }

    #[test]
    fn associate_without_poi_fails() {
        let mut models = ModelRegistry::new();
        models.register(descriptor()).unwrap();

        let err = associate(&models).unwrap_err();
        assert_eq!(err, SchemaError::ModelNotFound("POI".to_string()));
    }

    #[test]
    fn changes_serialize_with_camel_case_creator() {
        let changes = TagChanges {
            creator_id: Some(Some("user-42".into())),
            ..Default::default()
        };
        let json = serde_json::to_value(&changes).unwrap();
        assert_eq!(json["creatorId"], "user-42");
        assert!(json.get("name").is_none());
        assert!(!changes.is_empty());
        assert!(TagChanges::default().is_empty());
    }

    #[test]
    fn changes_distinguish_null_from_absent() {
        let changes: TagChanges =
            serde_json::from_str(r#"{"color": null, "group": 3}"#).unwrap();

        assert_eq!(changes.color, Some(None));
        assert_eq!(changes.group, Some(Some(3)));
        assert_eq!(changes.name, None);
    }
}
