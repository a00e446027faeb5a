// crates/wtx-dialect/src/lib.rs

//! Parser for IBM WebSphere TX (WTX) design files.
//!
//! Legacy WTX projects are spread across three XML dialects, and migration
//! tooling needs all of them in one typed shape:
//!
//! - **map** (`.mmc`): input/output cards and the functions wired between
//!   them, parsed into a [`MapRecord`];
//! - **system** (`.sys`): components, their property bags, and the directed
//!   connections between them, parsed into a [`SystemRecord`];
//! - **typetree** (`.tts`): recursively nested type declarations, parsed
//!   into a [`TypeTreeRecord`].
//!
//! The caller always states the dialect; nothing is sniffed from file
//! extensions or document content. Parsing is a single stateless pass: a
//! document goes in, an immutable [`Record`] comes out, and every record
//! serializes loss-lessly through serde for downstream tools.
//!
//! ```no_run
//! use wtx_dialect::{Dialect, Record, parse_file};
//!
//! let record = parse_file("orders/PurchaseOrder.mmc", Dialect::Map)?;
//! if let Record::Map(map) = &record {
//!     println!("{} maps {} input cards", map.name, map.inputs.len());
//! }
//! # Ok::<(), wtx_dialect::WtxError>(())
//! ```

// --- Crate Modules ---

mod dom;
mod error;
mod parser;
mod types;

// --- Public API Re-exports ---

pub use error::WtxError;
pub use parser::{parse_file, parse_str};
pub use types::{
    Component, Connection, Dialect, Field, Function, MapRecord, Record, SystemRecord, TypeNode,
    TypeTreeRecord,
};
