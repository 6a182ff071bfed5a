//! Errors raised while loading schemas, listing descriptors and decoding messages.

use std::error;
use std::fmt;
use std::io;

/// The broad category of an [`Error`].
///
/// Every failure aborts the current invocation; the kind only tells the caller
/// which stage gave up.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A required argument is missing.
    Usage,
    /// The `.proto` files could not be parsed or linked.
    Parse,
    /// The requested message type is not declared in the loaded files.
    Resolve,
    /// Reading the input stream (or decoding its base64 armor) failed, or the
    /// output could not be written.
    Io,
    /// The input bytes are not a valid encoding of the resolved message.
    Decode,
    /// The decoded message could not be rendered as JSON.
    Serialize,
}

/// An error produced by `pb`.
pub struct Error {
    inner: Box<Inner>,
}

enum Inner {
    Usage(&'static str),
    Parse(protox::Error),
    Resolve { name: String },
    Read(io::Error),
    Write(io::Error),
    Decode(prost::DecodeError),
    MissingRequired { field: String },
    Serialize(serde_json::Error),
}

/// A specialized `Result` type for `pb` operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    fn new(inner: Inner) -> Error {
        Error {
            inner: Box::new(inner),
        }
    }

    /// Creates a usage error reporting a missing or invalid argument.
    #[cold]
    pub fn usage(message: &'static str) -> Error {
        Error::new(Inner::Usage(message))
    }

    #[cold]
    pub(crate) fn parse(error: protox::Error) -> Error {
        Error::new(Inner::Parse(error))
    }

    #[cold]
    pub(crate) fn resolve(name: impl Into<String>) -> Error {
        Error::new(Inner::Resolve { name: name.into() })
    }

    #[cold]
    pub(crate) fn read(error: io::Error) -> Error {
        Error::new(Inner::Read(error))
    }

    #[cold]
    pub(crate) fn write(error: io::Error) -> Error {
        Error::new(Inner::Write(error))
    }

    #[cold]
    pub(crate) fn decode(error: prost::DecodeError) -> Error {
        Error::new(Inner::Decode(error))
    }

    #[cold]
    pub(crate) fn missing_required(field: impl Into<String>) -> Error {
        Error::new(Inner::MissingRequired {
            field: field.into(),
        })
    }

    #[cold]
    pub(crate) fn serialize(error: serde_json::Error) -> Error {
        Error::new(Inner::Serialize(error))
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match *self.inner {
            Inner::Usage(_) => ErrorKind::Usage,
            Inner::Parse(_) => ErrorKind::Parse,
            Inner::Resolve { .. } => ErrorKind::Resolve,
            Inner::Read(_) | Inner::Write(_) => ErrorKind::Io,
            Inner::Decode(_) | Inner::MissingRequired { .. } => ErrorKind::Decode,
            Inner::Serialize(_) => ErrorKind::Serialize,
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Error");
        debug.field("kind", &self.kind());
        match &*self.inner {
            Inner::Usage(message) => debug.field("message", message),
            Inner::Parse(error) => debug.field("source", error),
            Inner::Resolve { name } => debug.field("name", name),
            Inner::Read(error) | Inner::Write(error) => debug.field("source", error),
            Inner::Decode(error) => debug.field("source", error),
            Inner::MissingRequired { field } => debug.field("field", field),
            Inner::Serialize(error) => debug.field("source", error),
        };
        debug.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.inner {
            Inner::Usage(message) => f.write_str(message),
            Inner::Parse(error) => write!(f, "failed to parse proto files: {}", error),
            Inner::Resolve { name } => write!(
                f,
                "failed to resolve message: unknown message type \"{}\"",
                name
            ),
            Inner::Read(error) => write!(f, "failed to read input from stdin: {}", error),
            Inner::Write(error) => write!(f, "failed to write output: {}", error),
            Inner::Decode(error) => write!(f, "failed to unmarshal message: {}", error),
            Inner::MissingRequired { field } => write!(
                f,
                "failed to unmarshal message: required field \"{}\" not set",
                field
            ),
            Inner::Serialize(error) => write!(f, "failed to marshal message: {}", error),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &*self.inner {
            Inner::Usage(_) | Inner::Resolve { .. } | Inner::MissingRequired { .. } => None,
            Inner::Parse(error) => Some(error),
            Inner::Read(error) | Inner::Write(error) => Some(error),
            Inner::Decode(error) => Some(error),
            Inner::Serialize(error) => Some(error),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_resolve_display() {
        let error = Error::resolve("foo.Bar");
        assert_eq!(error.kind(), ErrorKind::Resolve);
        assert_eq!(
            error.to_string(),
            "failed to resolve message: unknown message type \"foo.Bar\""
        );
        assert!(error.source().is_none());
    }

    #[test]
    fn test_read_source() {
        let error = Error::read(io::Error::new(io::ErrorKind::InvalidData, "bad byte"));
        assert_eq!(error.kind(), ErrorKind::Io);
        assert_eq!(error.to_string(), "failed to read input from stdin: bad byte");
        assert_eq!(error.source().unwrap().to_string(), "bad byte");
    }

    #[test]
    fn test_usage_is_bare_message() {
        let error = Error::usage("specify fully-qualified message name");
        assert_eq!(error.kind(), ErrorKind::Usage);
        assert_eq!(error.to_string(), "specify fully-qualified message name");
    }
}
