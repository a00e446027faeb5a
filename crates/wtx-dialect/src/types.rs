// crates/wtx-dialect/src/types.rs

//! Public, ergonomic data structures for representing parsed WTX design files.

use crate::error::WtxError;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

// --- Dialect Selection ---

/// The three recognized WTX file dialects.
///
/// The dialect is always supplied explicitly by the caller. The parser never
/// sniffs it from the path's extension or from the document content, so a
/// `.mmc` file parsed as [`Dialect::System`] yields a (likely empty) system
/// record rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Map definition files (`.mmc`): input/output cards and functions.
    Map,
    /// System definition files (`.sys`): components and connections.
    System,
    /// Type tree files (`.tts`): recursively nested type declarations.
    TypeTree,
}

impl Dialect {
    /// The tag this dialect is selected by: `"map"`, `"system"` or `"typetree"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Map => "map",
            Dialect::System => "system",
            Dialect::TypeTree => "typetree",
        }
    }

    /// Maps a WTX file extension to its customary dialect.
    ///
    /// Accepts the extension with or without the leading dot, in any case.
    /// This is a convenience for callers walking project directories;
    /// [`parse_file`](crate::parse_file) itself trusts the dialect it is
    /// handed even when the extension disagrees.
    pub fn from_extension(ext: &str) -> Option<Dialect> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "mmc" => Some(Dialect::Map),
            "sys" => Some(Dialect::System),
            "tts" => Some(Dialect::TypeTree),
            _ => None,
        }
    }
}

impl FromStr for Dialect {
    type Err = WtxError;

    /// Parses a dialect tag. The comparison is exact; anything other than the
    /// three recognized values is a [`WtxError::UnsupportedDialect`], raised
    /// before any document is opened or read.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "map" => Ok(Dialect::Map),
            "system" => Ok(Dialect::System),
            "typetree" => Ok(Dialect::TypeTree),
            _ => Err(WtxError::UnsupportedDialect {
                tag: tag.to_string(),
            }),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Parsed Records ---

/// A parsed WTX document, tagged by the dialect it was parsed as.
///
/// Serialization is untagged: a record serializes as the plain object its
/// dialect defines, with no wrapper naming the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Map(MapRecord),
    System(SystemRecord),
    TypeTree(TypeTreeRecord),
}

impl Record {
    /// The dialect this record was parsed as.
    pub fn dialect(&self) -> Dialect {
        match self {
            Record::Map(_) => Dialect::Map,
            Record::System(_) => Dialect::System,
            Record::TypeTree(_) => Dialect::TypeTree,
        }
    }
}

// --- Map Dialect ---

/// A parsed map (`.mmc`) document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MapRecord {
    /// `@name` on the document root.
    pub name: String,
    /// Every `<InputCard>` in the document, in document order.
    pub inputs: Vec<Field>,
    /// Every `<OutputCard>` in the document, in document order.
    pub outputs: Vec<Field>,
    /// Every `<Function>` in the document, in document order.
    pub functions: Vec<Function>,
}

/// An input or output card declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Field {
    /// `@name`
    pub name: String,
    /// `@type`
    #[serde(rename = "type")]
    pub field_type: String,
    /// `@format`
    pub format: String,
}

/// A map function and the card references it is wired to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Function {
    /// `@name`
    pub name: String,
    /// `@type`
    #[serde(rename = "type")]
    pub function_type: String,
    /// `@ref` of each direct `<Input>` child, in document order. References
    /// are kept as free-standing identifiers and are not checked against the
    /// declared cards.
    pub inputs: Vec<String>,
    /// `@ref` of each direct `<Output>` child, in document order.
    pub outputs: Vec<String>,
}

// --- System Dialect ---

/// A parsed system (`.sys`) document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SystemRecord {
    /// `@name` on the document root.
    pub name: String,
    /// Every `<Component>` in the document, in document order.
    pub components: Vec<Component>,
    /// Every `<Connection>` in the document, in document order.
    pub connections: Vec<Connection>,
}

/// A system component and its property bag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Component {
    /// `@name`
    pub name: String,
    /// `@type`
    #[serde(rename = "type")]
    pub component_type: String,
    /// Direct `<Property>` children, keyed by `@name` with `@value` values.
    /// Declaration order is preserved; a repeated name keeps its first
    /// position but takes the last declared value.
    pub properties: IndexMap<String, String>,
}

/// A directed connection between two components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Connection {
    /// `@from`
    pub from: String,
    /// `@to`
    pub to: String,
    /// `@type`
    #[serde(rename = "type")]
    pub connection_type: String,
}

// --- Type Tree Dialect ---

/// A parsed type tree (`.tts`) document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypeTreeRecord {
    /// `@name` on the document root.
    pub name: String,
    /// Direct `<Type>` children of the root, in document order.
    pub types: Vec<TypeNode>,
}

/// One node of a type tree.
///
/// Nodes own their children outright, so the tree reproduces the document's
/// nesting depth exactly; nothing below a node is flattened into it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypeNode {
    /// `@name`
    pub name: String,
    /// `@datatype`
    pub datatype: String,
    /// Direct `<Type>` children only, in document order.
    pub children: Vec<TypeNode>,
}

#[cfg(test)]
mod tests {
    use super::Dialect;
    use crate::error::WtxError;

    #[test]
    fn test_dialect_tags_round_trip() {
        for dialect in [Dialect::Map, Dialect::System, Dialect::TypeTree] {
            let reparsed: Dialect = dialect.as_str().parse().unwrap();
            assert_eq!(reparsed, dialect);
        }
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let result = "bogus".parse::<Dialect>();
        assert!(
            matches!(result, Err(WtxError::UnsupportedDialect { ref tag }) if tag == "bogus"),
            "Expected UnsupportedDialect error, got {:?}",
            result
        );
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert!("Map".parse::<Dialect>().is_err());
        assert!("TYPETREE".parse::<Dialect>().is_err());
    }

    #[test]
    fn test_extension_association() {
        assert_eq!(Dialect::from_extension("mmc"), Some(Dialect::Map));
        assert_eq!(Dialect::from_extension(".mmc"), Some(Dialect::Map));
        assert_eq!(Dialect::from_extension("SYS"), Some(Dialect::System));
        assert_eq!(Dialect::from_extension("tts"), Some(Dialect::TypeTree));
        assert_eq!(Dialect::from_extension("xml"), None);
        assert_eq!(Dialect::from_extension(""), None);
    }

    #[test]
    fn test_display_matches_tag() {
        assert_eq!(Dialect::TypeTree.to_string(), "typetree");
    }
}
