use std::str::FromStr;

use convert_case::{Case, Casing};

use crate::domain::{
    common::{OrderedMap, OrderedSet, upper_first},
    descriptor::{EntityDescriptor, FieldDescriptor},
    value_objects::{BlobContent, FieldType, ValidationRule},
};

use super::model::{FieldFlags, PreparedEntity, PreparedField};

fn blob_content(field: &FieldDescriptor, kind: &FieldType) -> Option<BlobContent> {
    match kind {
        FieldType::Bytes | FieldType::ByteBuffer => {
            Some(field.field_type_blob_content.unwrap_or(BlobContent::Any))
        }
        other => other.blob_content(),
    }
}

fn prepare_field(field: &FieldDescriptor) -> PreparedField {
    let name = field.name().to_string();
    let field_type = field.field_type.clone().unwrap_or_default();
    let kind = FieldType::parse(&field_type);
    let content = blob_content(field, &kind);

    let field_values: Vec<String> = field
        .field_values
        .as_deref()
        .map(|values| {
            values
                .split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let mut field_validate_values = OrderedMap::new();
    for rule in field
        .field_validate_rules
        .iter()
        .filter_map(|name| ValidationRule::from_str(name).ok())
    {
        if let (Some(key), Some(value)) = (rule.companion_key(), field.companion(rule)) {
            field_validate_values.insert(key.to_string(), value.clone());
        }
    }

    PreparedField {
        field_name_capitalized: upper_first(&name),
        field_name_humanized: name.to_case(Case::Title),
        field_name_underscored: name.to_case(Case::Snake),
        field_is_enum: kind.is_enum() || !field_values.is_empty(),
        field_validate: !field.field_validate_rules.is_empty(),
        field_validation_required: field.has_rule(ValidationRule::Required),
        field_validation_unique: field.has_rule(ValidationRule::Unique),
        field_type_temporal: kind.is_temporal(),
        field_type_binary: kind.is_binary(),
        field_type_blob: content == Some(BlobContent::Any),
        field_type_image_blob: content == Some(BlobContent::Image),
        field_type_text_blob: content == Some(BlobContent::Text),
        field_type_blob_content: content,
        field_name: name,
        field_type,
        field_values,
        field_validate_rules: field.field_validate_rules.clone(),
        field_validate_values,
        id: field.id,
        javadoc: field.javadoc.clone(),
    }
}

/// Pass: derive per-field values and the entity-level field flags.
pub(super) fn prepare_fields(entity: &mut PreparedEntity, descriptor: &EntityDescriptor) {
    let fields: Vec<PreparedField> = descriptor.fields.iter().map(prepare_field).collect();

    let mut flags = FieldFlags::default();
    let mut different_types = OrderedSet::new();
    for field in &fields {
        if !field.field_is_enum {
            different_types.insert(field.field_type.clone());
        }
        match FieldType::parse(&field.field_type) {
            FieldType::Instant => flags.fields_contain_instant = true,
            FieldType::ZonedDateTime => flags.fields_contain_zoned_date_time = true,
            FieldType::LocalDate => flags.fields_contain_local_date = true,
            FieldType::Duration => flags.fields_contain_duration = true,
            FieldType::BigDecimal => flags.fields_contain_big_decimal = true,
            FieldType::Uuid => flags.fields_contain_uuid = true,
            _ => {}
        }
        flags.fields_contain_blob |= field.field_type_binary;
        flags.fields_contain_image_blob |= field.field_type_image_blob;
        flags.fields_contain_text_blob |= field.field_type_text_blob;
        flags.fields_contain_blob_or_image |= field.field_type_blob || field.field_type_image_blob;
        flags.validation |= field.field_validate;
    }
    flags.fields_contain_date = flags.fields_contain_instant
        || flags.fields_contain_zoned_date_time
        || flags.fields_contain_local_date;

    entity.different_types = different_types.iter().cloned().collect();
    entity.field_flags = flags;
    entity.fields = fields;
}
