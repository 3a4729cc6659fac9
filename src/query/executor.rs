//! Query execution.
//!
//! # Responsibilities
//! - Parse and validate query text against the schema registry
//! - Pick the operation and check its variables
//! - Collect `getData` through root fragments, honouring `@skip`/`@include`
//! - Resolve the `id` argument (literal, variable, default, absent)
//! - Run the field selector, call the translator, encode the envelope
//!
//! # Design Decisions
//! - Every non-fatal failure becomes an entry in `errors`; nothing panics
//! - Validation failures never reach the downstream
//! - One `getData` response key per request; more is rejected rather than fanned out

use std::sync::Arc;

use apollo_compiler::ast::{DirectiveList, OperationType, Value};
use apollo_compiler::executable::{Field, Operation, Selection, SelectionSet};
use apollo_compiler::{ExecutableDocument, Name};
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use crate::query::request::GraphqlRequest;
use crate::query::selector::select_fields;
use crate::schema::registry::diagnostic_messages;
use crate::schema::SchemaRegistry;
use crate::translate::response::{self, ResponseEnvelope};
use crate::translate::RequestTranslator;

const STRING_MISMATCH: &str = "String cannot represent a non string value";
const BOOLEAN_MISMATCH: &str = "Boolean cannot represent a non boolean value";

/// Reasons a request is answered without calling the downstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// Query text failed to parse or validate.
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("{0}")]
    Operation(String),

    #[error("{0} operations are not supported")]
    UnsupportedOperation(String),

    #[error("only one {0} selection is supported per request")]
    MultipleRootFields(&'static str),

    #[error("Variable \"${name}\" of required type \"{ty}\" was not provided.")]
    MissingVariable { name: String, ty: String },

    #[error("Variable \"${name}\" of non-null type \"{ty}\" must not be null.")]
    NullVariable { name: String, ty: String },

    #[error("Variable \"${name}\" got invalid value {value}; {reason}")]
    InvalidVariable {
        name: String,
        value: String,
        reason: &'static str,
    },
}

impl ExecutionError {
    /// The envelope entries for this error.
    pub fn messages(self) -> Vec<String> {
        match self {
            ExecutionError::Validation(messages) => messages,
            other => vec![other.to_string()],
        }
    }
}

/// Executes `getData` queries end to end.
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    registry: Arc<SchemaRegistry>,
    translator: RequestTranslator,
}

impl QueryExecutor {
    pub fn new(registry: Arc<SchemaRegistry>, translator: RequestTranslator) -> Self {
        Self {
            registry,
            translator,
        }
    }

    /// Execute one request. Always returns an envelope.
    pub async fn execute(&self, request: GraphqlRequest) -> ResponseEnvelope {
        let document = match ExecutableDocument::parse_and_validate(
            self.registry.schema(),
            request.query.as_str(),
            "request.graphql",
        ) {
            Ok(document) => document,
            Err(invalid) => {
                let error = ExecutionError::Validation(diagnostic_messages(&invalid.errors));
                return response::reject(error.messages());
            }
        };

        let operation = match document.operations.get(request.operation_name.as_deref()) {
            Ok(operation) => operation,
            Err(e) => return response::reject(ExecutionError::Operation(e.message().to_string()).messages()),
        };

        let plan = match self.plan(&document, operation, &request.variables) {
            Ok(Some(plan)) => plan,
            Ok(None) => return ResponseEnvelope::empty(),
            Err(e) => return response::reject(e.messages()),
        };

        let fields = plan
            .fields
            .iter()
            .flat_map(|field| select_fields(&field.selection_set))
            .collect();
        response::encode(self.translator.fetch(Some(plan.id), fields).await)
    }

    /// Locate the root field and resolve its `id` argument.
    fn plan<'doc>(
        &self,
        document: &'doc ExecutableDocument,
        operation: &'doc Operation,
        values: &Map<String, JsonValue>,
    ) -> Result<Option<Plan<'doc>>, ExecutionError> {
        if operation.operation_type != OperationType::Query {
            return Err(ExecutionError::UnsupportedOperation(format!(
                "{:?}",
                operation.operation_type
            )));
        }

        let variables = Variables { operation, values };
        variables.check_required()?;

        let root = self.registry.root();
        let mut fields = Vec::new();
        collect_root_fields(
            document,
            &operation.selection_set,
            root.field,
            &variables,
            &mut fields,
        )?;

        let Some(first) = fields.first().copied() else {
            return Ok(None);
        };
        // Same response key means same arguments once validated; those merge.
        if fields
            .iter()
            .any(|field| response_key(field) != response_key(first))
        {
            return Err(ExecutionError::MultipleRootFields(root.field));
        }

        let id = variables.string_argument(first, root.argument)?;
        Ok(Some(Plan { fields, id }))
    }
}

struct Plan<'doc> {
    fields: Vec<&'doc Field>,
    id: String,
}

fn response_key(field: &Field) -> &Name {
    field.alias.as_ref().unwrap_or(&field.name)
}

/// Walk the root selection set, descending into fragments, and gather every
/// included field named `root_field` in document order.
fn collect_root_fields<'doc>(
    document: &'doc ExecutableDocument,
    selection_set: &'doc SelectionSet,
    root_field: &str,
    variables: &Variables<'_>,
    fields: &mut Vec<&'doc Field>,
) -> Result<(), ExecutionError> {
    for selection in &selection_set.selections {
        match selection {
            Selection::Field(field) => {
                if field.name.as_str() == root_field && variables.included(&field.directives)? {
                    fields.push(&**field);
                }
            }
            Selection::InlineFragment(inline) => {
                if variables.included(&inline.directives)? {
                    collect_root_fields(
                        document,
                        &inline.selection_set,
                        root_field,
                        variables,
                        fields,
                    )?;
                }
            }
            Selection::FragmentSpread(spread) => {
                if !variables.included(&spread.directives)? {
                    continue;
                }
                // Validation guarantees the fragment exists and is acyclic.
                if let Some(fragment) = document.fragments.get(&spread.fragment_name) {
                    collect_root_fields(
                        document,
                        &fragment.selection_set,
                        root_field,
                        variables,
                        fields,
                    )?;
                }
            }
        }
    }
    Ok(())
}

/// Request variables read against the operation's definitions.
struct Variables<'a> {
    operation: &'a Operation,
    values: &'a Map<String, JsonValue>,
}

impl<'a> Variables<'a> {
    /// Non-null variables must be supplied (or defaulted) and never null.
    fn check_required(&self) -> Result<(), ExecutionError> {
        for definition in &self.operation.variables {
            if !definition.ty.is_non_null() {
                continue;
            }
            match self.values.get(definition.name.as_str()) {
                Some(JsonValue::Null) => {
                    return Err(ExecutionError::NullVariable {
                        name: definition.name.to_string(),
                        ty: definition.ty.to_string(),
                    })
                }
                None if definition.default_value.is_none() => {
                    return Err(ExecutionError::MissingVariable {
                        name: definition.name.to_string(),
                        ty: definition.ty.to_string(),
                    })
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn default_of(&self, name: &Name) -> Option<&'a Value> {
        self.operation
            .variables
            .iter()
            .find(|definition| definition.name == *name)
            .and_then(|definition| definition.default_value.as_deref())
    }

    /// Value of a nullable `String` argument; absent and null both give `""`.
    fn string_argument(&self, field: &Field, argument: &str) -> Result<String, ExecutionError> {
        let Some(value) = field
            .arguments
            .iter()
            .find(|arg| arg.name.as_str() == argument)
            .map(|arg| &*arg.value)
        else {
            return Ok(String::new());
        };

        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Variable(name) => match self.values.get(name.as_str()) {
                Some(JsonValue::String(s)) => Ok(s.clone()),
                Some(JsonValue::Null) => Ok(String::new()),
                Some(other) => Err(invalid_variable(name, other, STRING_MISMATCH)),
                None => match self.default_of(name) {
                    Some(Value::String(s)) => Ok(s.clone()),
                    _ => Ok(String::new()),
                },
            },
            // Validation admits only strings, variables and null here.
            _ => Ok(String::new()),
        }
    }

    /// Whether `@skip` and `@include` keep a selection.
    fn included(&self, directives: &DirectiveList) -> Result<bool, ExecutionError> {
        for directive in directives.iter() {
            let skip_when = match directive.name.as_str() {
                "skip" => true,
                "include" => false,
                _ => continue,
            };
            let Some(condition) = directive
                .arguments
                .iter()
                .find(|arg| arg.name.as_str() == "if")
            else {
                continue;
            };
            if self.boolean(&condition.value)? == skip_when {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn boolean(&self, value: &Value) -> Result<bool, ExecutionError> {
        match value {
            Value::Boolean(b) => Ok(*b),
            Value::Variable(name) => match self.values.get(name.as_str()) {
                Some(JsonValue::Bool(b)) => Ok(*b),
                Some(other) => Err(invalid_variable(name, other, BOOLEAN_MISMATCH)),
                None => match self.default_of(name) {
                    Some(Value::Boolean(b)) => Ok(*b),
                    // Only reachable for a nullable variable without a
                    // default, which validation rejects in a `Boolean!` slot.
                    _ => Err(ExecutionError::MissingVariable {
                        name: name.to_string(),
                        ty: "Boolean!".into(),
                    }),
                },
            },
            _ => Ok(false),
        }
    }
}

fn invalid_variable(name: &Name, value: &JsonValue, reason: &'static str) -> ExecutionError {
    ExecutionError::InvalidVariable {
        name: name.to_string(),
        value: value.to_string(),
        reason,
    }
}
