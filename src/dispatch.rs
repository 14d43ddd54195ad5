//! Result Dispatch
//!
//! Chooses the printable form of a backend result. `Reply` is a closed set of
//! capabilities checked in a fixed order:
//!
//! 1. `Formatted`: the value formats itself for the current `Format`
//! 2. `Display`: the value has a plain textual form
//! 3. `Text`: the value is already a string
//! 4. `Error`: the value is an error, printed as `Error: <message>`
//! 5. `Opaque`: none of the above; dispatch fails with `UnsupportedType`

use crate::error::FormatError;
use crate::output::{self, Format};
use std::any::Any;
use std::fmt;

/// A result that renders itself for a given output format.
pub trait SelfFormatting: fmt::Debug {
    fn format(&self, format: &Format) -> Result<String, FormatError>;
}

/// Backend result value
pub enum Reply {
    Formatted(Box<dyn SelfFormatting>),
    Display(Box<dyn fmt::Display>),
    Text(String),
    Error(Box<dyn std::error::Error>),
    Opaque {
        type_name: &'static str,
        value: Box<dyn Any>,
    },
}

impl Reply {
    /// A structured document rendered through the output façade.
    pub fn document(document: impl Into<String>) -> Self {
        Reply::Formatted(Box::new(DocumentReply::new(document)))
    }

    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }

    pub fn error<E: std::error::Error + 'static>(err: E) -> Self {
        Reply::Error(Box::new(err))
    }

    /// Wrap a value with no printable capability.
    pub fn opaque<T: Any>(value: T) -> Self {
        Reply::Opaque {
            type_name: std::any::type_name::<T>(),
            value: Box::new(value),
        }
    }

    pub fn downcast_opaque<T: Any>(&self) -> Option<&T> {
        match self {
            Reply::Opaque { value, .. } => value.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl fmt::Debug for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Formatted(value) => write!(f, "{:?}", value),
            Reply::Display(value) => write!(f, "{}", value),
            Reply::Text(text) => write!(f, "{:?}", text),
            Reply::Error(err) => write!(f, "Error({:?})", err.to_string()),
            Reply::Opaque { type_name, .. } => write!(f, "<{}>", type_name),
        }
    }
}

/// Structured document result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReply {
    document: String,
}

impl DocumentReply {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
        }
    }
}

impl SelfFormatting for DocumentReply {
    fn format(&self, format: &Format) -> Result<String, FormatError> {
        output::render(format.mode, &self.document, &format.opts)
    }
}

/// Produce the printable form of a reply.
pub fn sprint(reply: &Reply, format: &Format) -> Result<String, FormatError> {
    match reply {
        Reply::Formatted(value) => value.format(format),
        Reply::Display(value) => Ok(value.to_string()),
        Reply::Text(text) => Ok(text.clone()),
        Reply::Error(err) => Ok(format!("Error: {}", err)),
        Reply::Opaque { type_name, .. } => Err(FormatError::UnsupportedType(type_name.to_string())),
    }
}
