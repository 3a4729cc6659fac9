//! Schema registry.
//!
//! # Responsibilities
//! - Check the descriptor table for internal consistency
//! - Render it to SDL and compile it into a validated GraphQL schema
//! - Serve that schema read-only to the query executor
//!
//! # Design Decisions
//! - Built once at startup; any error here is fatal to the process
//! - Runtime traffic never reaches this code path except through `schema()`

use std::collections::HashSet;
use std::fmt::Write as _;

use apollo_compiler::validation::{DiagnosticList, Valid};
use apollo_compiler::Schema;
use thiserror::Error;

use crate::schema::descriptor::{
    EntityDescriptor, RootOperationDescriptor, DATA_ENTITY, GET_DATA,
};

/// Errors raised while building the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("type {entity} declares no fields")]
    EmptyEntity { entity: &'static str },

    #[error("type {entity} declares field {field} more than once")]
    DuplicateField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("field {field} returns unknown type {type_name}")]
    UnresolvedType {
        field: &'static str,
        type_name: &'static str,
    },

    #[error("schema failed validation: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// The immutable schema every request is validated against.
#[derive(Debug)]
pub struct SchemaRegistry {
    entity: EntityDescriptor,
    root: RootOperationDescriptor,
    sdl: String,
    schema: Valid<Schema>,
}

impl SchemaRegistry {
    /// Build the registry for the `Data` entity and `getData` root field.
    pub fn new() -> Result<Self, RegistryError> {
        Self::from_descriptors(DATA_ENTITY, GET_DATA)
    }

    /// Build a registry from an arbitrary descriptor pair.
    pub fn from_descriptors(
        entity: EntityDescriptor,
        root: RootOperationDescriptor,
    ) -> Result<Self, RegistryError> {
        check_descriptors(&entity, &root)?;

        let sdl = render_sdl(&entity, &root);
        let schema = Schema::parse_and_validate(sdl.as_str(), "schema.graphql")
            .map_err(|invalid| RegistryError::Invalid(diagnostic_messages(&invalid.errors)))?;

        tracing::debug!(
            entity = entity.name,
            fields = entity.fields.len(),
            root_field = root.field,
            "Schema registry built"
        );

        Ok(Self {
            entity,
            root,
            sdl,
            schema,
        })
    }

    /// The validated schema.
    pub fn schema(&self) -> &Valid<Schema> {
        &self.schema
    }

    /// The exposed entity.
    pub fn entity(&self) -> &EntityDescriptor {
        &self.entity
    }

    /// The root query field.
    pub fn root(&self) -> &RootOperationDescriptor {
        &self.root
    }

    /// The SDL the schema was compiled from.
    pub fn sdl(&self) -> &str {
        &self.sdl
    }
}

fn check_descriptors(
    entity: &EntityDescriptor,
    root: &RootOperationDescriptor,
) -> Result<(), RegistryError> {
    if entity.fields.is_empty() {
        return Err(RegistryError::EmptyEntity {
            entity: entity.name,
        });
    }

    let mut seen = HashSet::new();
    for field in entity.fields {
        if !seen.insert(field.name) {
            return Err(RegistryError::DuplicateField {
                entity: entity.name,
                field: field.name,
            });
        }
    }

    if root.returns != entity.name {
        return Err(RegistryError::UnresolvedType {
            field: root.field,
            type_name: root.returns,
        });
    }

    Ok(())
}

fn render_sdl(entity: &EntityDescriptor, root: &RootOperationDescriptor) -> String {
    let mut sdl = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(sdl, "schema {{ query: {} }}\n", root.type_name);
    let _ = writeln!(sdl, "type {} {{", root.type_name);
    let _ = writeln!(
        sdl,
        "  {}({}: {}): {}",
        root.field, root.argument, root.argument_kind, root.returns
    );
    let _ = writeln!(sdl, "}}\n");
    let _ = writeln!(sdl, "type {} {{", entity.name);
    for field in entity.fields {
        let _ = writeln!(sdl, "  {}: {}", field.name, field.kind);
    }
    let _ = writeln!(sdl, "}}");
    sdl
}

/// Flatten compiler diagnostics into their message text.
pub(crate) fn diagnostic_messages(errors: &DiagnosticList) -> Vec<String> {
    errors
        .iter()
        .map(|diagnostic| diagnostic.unstable_to_json_compat().message.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::descriptor::{FieldDescriptor, ScalarKind};

    const DUPLICATED: EntityDescriptor = EntityDescriptor {
        name: "Data",
        fields: &[
            FieldDescriptor {
                name: "id",
                kind: ScalarKind::String,
            },
            FieldDescriptor {
                name: "id",
                kind: ScalarKind::String,
            },
        ],
    };

    const EMPTY: EntityDescriptor = EntityDescriptor {
        name: "Data",
        fields: &[],
    };

    #[test]
    fn test_builtin_registry_builds() {
        let registry = SchemaRegistry::new().unwrap();
        let names: Vec<_> = registry.entity().field_names().collect();
        assert_eq!(names, ["id", "name", "description"]);

        let data = registry.schema().get_object("Data").unwrap();
        assert_eq!(data.fields.len(), 3);
        let root = registry.schema().get_object("RootQuery").unwrap();
        assert!(root.fields.contains_key("getData"));
    }

    #[test]
    fn test_sdl_renders_root_and_entity() {
        let registry = SchemaRegistry::new().unwrap();
        assert!(registry.sdl().contains("getData(id: String): Data"));
        assert!(registry.sdl().contains("  description: String"));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let err = SchemaRegistry::from_descriptors(DUPLICATED, GET_DATA).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateField {
                entity: "Data",
                field: "id"
            }
        );
    }

    #[test]
    fn test_empty_entity_rejected() {
        let err = SchemaRegistry::from_descriptors(EMPTY, GET_DATA).unwrap_err();
        assert_eq!(err, RegistryError::EmptyEntity { entity: "Data" });
    }

    #[test]
    fn test_unresolved_return_type_rejected() {
        let root = RootOperationDescriptor {
            returns: "Record",
            ..GET_DATA
        };
        let err = SchemaRegistry::from_descriptors(DATA_ENTITY, root).unwrap_err();
        assert!(matches!(err, RegistryError::UnresolvedType { type_name: "Record", .. }));
    }
}
