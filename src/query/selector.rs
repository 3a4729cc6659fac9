//! Field selection extraction.
//!
//! Flattens the selection set under a single field invocation into the
//! list of field names the caller asked for, in source order.
//! Fragment spreads and inline fragments contribute nothing. Repeated
//! fields stay repeated; aliases are ignored in favour of the field name.

use apollo_compiler::executable::{Selection, SelectionSet};

/// Names of the plain fields directly under `selection_set`.
pub fn select_fields(selection_set: &SelectionSet) -> Vec<String> {
    selection_set
        .selections
        .iter()
        .filter_map(|selection| match selection {
            Selection::Field(field) => Some(field.name.as_str().to_owned()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaRegistry;
    use apollo_compiler::ExecutableDocument;

    /// Selected field names under the first root field of `query`.
    fn selected(query: &str) -> Vec<String> {
        let registry = SchemaRegistry::new().unwrap();
        let document =
            ExecutableDocument::parse_and_validate(registry.schema(), query, "query.graphql")
                .unwrap();
        let operation = document.operations.get(None).unwrap();
        match &operation.selection_set.selections[0] {
            Selection::Field(field) => select_fields(&field.selection_set),
            other => panic!("expected a root field, got {other:?}"),
        }
    }

    #[test]
    fn test_fields_in_source_order() {
        assert_eq!(
            selected(r#"{ getData(id: "42") { name description id } }"#),
            ["name", "description", "id"]
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        assert_eq!(
            selected(r#"{ getData(id: "42") { id name id } }"#),
            ["id", "name", "id"]
        );
    }

    #[test]
    fn test_fragments_contribute_nothing() {
        let query = r#"
            query {
              getData(id: "42") {
                id
                ...Extra
                ... on Data { description }
                name
              }
            }
            fragment Extra on Data { description }
        "#;
        assert_eq!(selected(query), ["id", "name"]);
    }

    #[test]
    fn test_only_fragments_yield_empty() {
        let query = r#"
            query { getData { ...Extra } }
            fragment Extra on Data { id }
        "#;
        assert!(selected(query).is_empty());
    }

    #[test]
    fn test_alias_uses_field_name() {
        assert_eq!(
            selected(r#"{ getData { label: name id } }"#),
            ["name", "id"]
        );
    }
}
