use crate::domain::{
    descriptor::{EntityDescriptor, FieldDescriptor},
    value_objects::FieldType,
};

use super::{
    Catalog,
    model::{PreparedEntity, PrimaryKey, PrimaryKeyField},
};

fn declared_key_fields(descriptor: &EntityDescriptor) -> Vec<&FieldDescriptor> {
    descriptor.fields.iter().filter(|f| f.id).collect()
}

/// Key type of an entity as seen from a relationship deriving its key.
fn key_type_of(descriptor: &EntityDescriptor, catalog: &Catalog<'_>) -> String {
    match declared_key_fields(descriptor).as_slice() {
        [single] => single.field_type.clone().unwrap_or_default(),
        _ => catalog.context.database_type.default_primary_key_type().to_string(),
    }
}

fn with_type_flags(mut key: PrimaryKey) -> PrimaryKey {
    let kind = FieldType::parse(&key.key_type);
    key.type_uuid = kind == FieldType::Uuid;
    key.type_string = kind == FieldType::String;
    key.type_long = kind == FieldType::Long;
    key.type_integer = kind == FieldType::Integer;
    key.type_numeric = key.type_long || key.type_integer;
    key
}

/// Pass: give every non-embedded entity a primary key.
///
/// Fields flagged `id` form the key (composite when more than one). Failing
/// that, a relationship flagged `id` derives the key from the related
/// entity. Otherwise an `id` field is synthesized with the database's
/// default key type.
pub(super) fn derive_primary_key(entity: &mut PreparedEntity, descriptor: &EntityDescriptor, catalog: &Catalog<'_>) {
    if entity.embedded {
        return;
    }

    let declared = declared_key_fields(descriptor);
    let key = if !declared.is_empty() {
        let fields: Vec<PrimaryKeyField> = declared
            .iter()
            .map(|f| PrimaryKeyField {
                field_name: f.name().to_string(),
                field_type: f.field_type.clone().unwrap_or_default(),
            })
            .collect();
        let composite = fields.len() > 1;
        let (name, key_type) = if composite {
            ("id".to_string(), "composite".to_string())
        } else {
            (fields[0].field_name.clone(), fields[0].field_type.clone())
        };
        let generated_type = matches!(
            FieldType::parse(&key_type),
            FieldType::Long | FieldType::Integer | FieldType::Uuid
        );
        PrimaryKey {
            name,
            key_type,
            fields,
            composite,
            auto_generate: !composite && generated_type,
            ..PrimaryKey::default()
        }
    } else if let Some(relationship) = descriptor.relationships.iter().find(|r| r.id) {
        let key_type = relationship
            .other_entity_name
            .as_deref()
            .and_then(|name| catalog.get(name))
            .map_or_else(
                || catalog.context.database_type.default_primary_key_type().to_string(),
                |other| key_type_of(other, catalog),
            );
        PrimaryKey {
            name: "id".to_string(),
            fields: vec![PrimaryKeyField {
                field_name: "id".to_string(),
                field_type: key_type.clone(),
            }],
            key_type,
            derived: true,
            derived_from: relationship.relationship_name.clone(),
            ..PrimaryKey::default()
        }
    } else {
        let key_type = catalog.context.database_type.default_primary_key_type().to_string();
        PrimaryKey {
            name: "id".to_string(),
            fields: vec![PrimaryKeyField {
                field_name: "id".to_string(),
                field_type: key_type.clone(),
            }],
            key_type,
            auto_generate: true,
            ..PrimaryKey::default()
        }
    };

    entity.primary_key = Some(with_type_flags(key));
}
