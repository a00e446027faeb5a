// crates/wtx-dialect/src/error.rs

use quick_xml::Error as XmlError;
use std::error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors that can occur while parsing a WTX design file.
#[derive(Debug)]
pub enum WtxError {
    /// The input path does not exist.
    FileNotFound { path: PathBuf },

    /// The dialect tag was not one of the three recognized values
    /// (`map`, `system`, `typetree`).
    UnsupportedDialect { tag: String },

    /// The document is not well-formed XML (unclosed or mismatched tags,
    /// bad entities, content outside the root, invalid encoding).
    MalformedDocument(String),

    /// An I/O failure other than a missing path (e.g., permissions).
    Io(io::Error),
}

/// Converts reader errors from `quick-xml` into the malformed-document case.
impl From<XmlError> for WtxError {
    fn from(e: XmlError) -> Self {
        WtxError::MalformedDocument(e.to_string())
    }
}

impl From<io::Error> for WtxError {
    fn from(e: io::Error) -> Self {
        WtxError::Io(e)
    }
}

impl fmt::Display for WtxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WtxError::FileNotFound { path } => {
                write!(f, "File not found: {}", path.display())
            }
            WtxError::UnsupportedDialect { tag } => {
                write!(f, "Unsupported file type: {}", tag)
            }
            WtxError::MalformedDocument(reason) => {
                write!(f, "Malformed document: {}", reason)
            }
            WtxError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl error::Error for WtxError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            WtxError::Io(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::WtxError;
    use quick_xml::Reader;
    use quick_xml::events::Event;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_from_xml_error() {
        // Drive the reader over mismatched tags to get a real reader error.
        let mut reader = Reader::from_str("<Map></System>");
        let xml_err = loop {
            match reader.read_event() {
                Err(e) => break e,
                Ok(Event::Eof) => panic!("reader accepted mismatched tags"),
                Ok(_) => {}
            }
        };
        let wtx_err: WtxError = xml_err.into();
        assert!(matches!(wtx_err, WtxError::MalformedDocument(_)));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let wtx_err: WtxError = io_err.into();
        assert!(matches!(wtx_err, WtxError::Io(_)));
    }

    #[test]
    fn test_display_file_not_found() {
        let err = WtxError::FileNotFound {
            path: PathBuf::from("/data/missing.mmc"),
        };
        assert_eq!(err.to_string(), "File not found: /data/missing.mmc");
    }

    #[test]
    fn test_display_unsupported_dialect() {
        let err = WtxError::UnsupportedDialect {
            tag: "spreadsheet".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported file type: spreadsheet");
    }

    #[test]
    fn test_io_error_exposes_source() {
        use std::error::Error;

        let err = WtxError::Io(io::Error::other("disk"));
        assert!(err.source().is_some());
    }
}
