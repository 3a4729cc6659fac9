//! Static descriptor table for the exposed entity and root operation.
//!
//! The table is plain data: nothing here touches the GraphQL compiler.
//! `registry.rs` checks it and renders it to SDL once at startup.

use std::fmt;

/// Scalar kinds an entity field may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    String,
}

impl ScalarKind {
    /// Name of the scalar in GraphQL SDL.
    pub fn graphql_name(self) -> &'static str {
        match self {
            ScalarKind::String => "String",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.graphql_name())
    }
}

/// A single named scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: ScalarKind,
}

/// The declared shape of the queryable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDescriptor {
    pub name: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl EntityDescriptor {
    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}

/// The single root query field: `<name>(<argument>: <kind>) -> <returns>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootOperationDescriptor {
    pub type_name: &'static str,
    pub field: &'static str,
    pub argument: &'static str,
    pub argument_kind: ScalarKind,
    pub returns: &'static str,
}

/// `type Data { id: String name: String description: String }`
pub const DATA_ENTITY: EntityDescriptor = EntityDescriptor {
    name: "Data",
    fields: &[
        FieldDescriptor {
            name: "id",
            kind: ScalarKind::String,
        },
        FieldDescriptor {
            name: "name",
            kind: ScalarKind::String,
        },
        FieldDescriptor {
            name: "description",
            kind: ScalarKind::String,
        },
    ],
};

/// `type RootQuery { getData(id: String): Data }`
pub const GET_DATA: RootOperationDescriptor = RootOperationDescriptor {
    type_name: "RootQuery",
    field: "getData",
    argument: "id",
    argument_kind: ScalarKind::String,
    returns: "Data",
};
