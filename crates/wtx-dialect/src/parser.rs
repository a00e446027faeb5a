// crates/wtx-dialect/src/parser.rs

//! Entry points and per-dialect extraction routines.

use crate::dom::{self, Element};
use crate::error::WtxError;
use crate::types::{
    Component, Connection, Dialect, Field, Function, MapRecord, Record, SystemRecord, TypeNode,
    TypeTreeRecord,
};
use indexmap::IndexMap;
use log::debug;
use std::fs;
use std::path::Path;

/// Parses the WTX file at `path` as the given dialect.
///
/// The dialect is authoritative: nothing is inferred from the path's
/// extension or from the document content, so a map document handed in as
/// [`Dialect::System`] parses into a (probably empty) system record.
///
/// # Errors
///
/// * [`WtxError::FileNotFound`] when `path` does not exist.
/// * [`WtxError::MalformedDocument`] when the content is not well-formed
///   XML, or not valid UTF-8.
/// * [`WtxError::Io`] for any other read failure.
pub fn parse_file(path: impl AsRef<Path>, dialect: Dialect) -> Result<Record, WtxError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(WtxError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    debug!("parsing {} as a {} document", path.display(), dialect);
    let bytes = fs::read(path)?;
    let content = String::from_utf8(bytes).map_err(|e| {
        WtxError::MalformedDocument(format!("document is not valid UTF-8: {}", e))
    })?;
    parse_str(&content, dialect)
}

/// Parses an in-memory WTX document as the given dialect.
///
/// Every call is independent and keeps no state between documents, so
/// concurrent use from multiple threads needs no coordination.
pub fn parse_str(content: &str, dialect: Dialect) -> Result<Record, WtxError> {
    let root = dom::parse_document(content)?;

    Ok(match dialect {
        Dialect::Map => Record::Map(extract_map(&root)),
        Dialect::System => Record::System(extract_system(&root)),
        Dialect::TypeTree => Record::TypeTree(extract_typetree(&root)),
    })
}

/// Builds a [`MapRecord`] from the document root.
///
/// `InputCard`, `OutputCard` and `Function` elements are collected from the
/// whole document, however deeply they nest. A function's `Input`/`Output`
/// references come from its direct children only; both scopes match the
/// classic WTX exporter, and real files rely on the asymmetry.
fn extract_map(root: &Element) -> MapRecord {
    let inputs: Vec<Field> = root
        .descendants_named("InputCard")
        .into_iter()
        .map(field_from)
        .collect();
    let outputs: Vec<Field> = root
        .descendants_named("OutputCard")
        .into_iter()
        .map(field_from)
        .collect();
    let functions: Vec<Function> = root
        .descendants_named("Function")
        .into_iter()
        .map(|function| Function {
            name: function.attr_or_empty("name"),
            function_type: function.attr_or_empty("type"),
            inputs: function
                .children_named("Input")
                .map(|input| input.attr_or_empty("ref"))
                .collect(),
            outputs: function
                .children_named("Output")
                .map(|output| output.attr_or_empty("ref"))
                .collect(),
        })
        .collect();

    let record = MapRecord {
        name: root.attr_or_empty("name"),
        inputs,
        outputs,
        functions,
    };
    debug!(
        "map '{}': {} input cards, {} output cards, {} functions",
        record.name,
        record.inputs.len(),
        record.outputs.len(),
        record.functions.len()
    );
    record
}

/// Maps a card element to a [`Field`]; absent attributes become `""`.
fn field_from(card: &Element) -> Field {
    Field {
        name: card.attr_or_empty("name"),
        field_type: card.attr_or_empty("type"),
        format: card.attr_or_empty("format"),
    }
}

/// Builds a [`SystemRecord`] from the document root.
///
/// Components and connections are collected document-wide. Each component's
/// property bag folds its direct `Property` children in declaration order,
/// with the last declaration winning on a repeated name.
fn extract_system(root: &Element) -> SystemRecord {
    let components: Vec<Component> = root
        .descendants_named("Component")
        .into_iter()
        .map(|component| {
            let mut properties = IndexMap::new();
            for property in component.children_named("Property") {
                properties.insert(
                    property.attr_or_empty("name"),
                    property.attr_or_empty("value"),
                );
            }
            Component {
                name: component.attr_or_empty("name"),
                component_type: component.attr_or_empty("type"),
                properties,
            }
        })
        .collect();
    let connections: Vec<Connection> = root
        .descendants_named("Connection")
        .into_iter()
        .map(|connection| Connection {
            from: connection.attr_or_empty("from"),
            to: connection.attr_or_empty("to"),
            connection_type: connection.attr_or_empty("type"),
        })
        .collect();

    let record = SystemRecord {
        name: root.attr_or_empty("name"),
        components,
        connections,
    };
    debug!(
        "system '{}': {} components, {} connections",
        record.name,
        record.components.len(),
        record.connections.len()
    );
    record
}

/// Builds a [`TypeTreeRecord`] from the root's direct `Type` children.
fn extract_typetree(root: &Element) -> TypeTreeRecord {
    let types: Vec<TypeNode> = root.children_named("Type").map(type_node_from).collect();

    let record = TypeTreeRecord {
        name: root.attr_or_empty("name"),
        types,
    };
    debug!(
        "type tree '{}': {} top-level types",
        record.name,
        record.types.len()
    );
    record
}

/// Rebuilds one type node and, recursively, its direct `Type` children.
///
/// Descending child by child reproduces the document's nesting depth
/// exactly; a grandchild never collapses into an ancestor's child list.
fn type_node_from(element: &Element) -> TypeNode {
    TypeNode {
        name: element.attr_or_empty("name"),
        datatype: element.attr_or_empty("datatype"),
        children: element.children_named("Type").map(type_node_from).collect(),
    }
}
