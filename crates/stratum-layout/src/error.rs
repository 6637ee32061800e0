use thiserror::Error;

/// Errors raised while declaring, finalizing, or writing through a layout.
///
/// Every variant describes a mistake in the caller's schema or data; none of
/// them is transient, so callers should not retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("unsupported type tag `{tag}`")]
    UnsupportedType { tag: String },

    #[error("incomplete descriptor `{label}`: {reason}")]
    IncompleteDescriptor { label: String, reason: &'static str },

    #[error("descriptor `{label}` has no field `{field}`")]
    UnknownField { label: String, field: String },

    #[error("descriptor `{label}` declares field `{name}` more than once")]
    DuplicateField { label: String, name: String },

    #[error("vertex stride of `{label}` is {extent} bytes, not a multiple of 4")]
    UnalignedStride { label: String, extent: u32 },

    #[error("field `{field}` takes {expected} component(s), got {got}")]
    ValueCount {
        field: String,
        expected: u32,
        got: usize,
    },

    #[error("value {value} does not fit field `{field}`")]
    ValueRange { field: String, value: f64 },

    #[error("write into `{label}` ends at byte {end}, buffer holds {len}")]
    OutOfBounds { label: String, end: u64, len: u64 },
}

pub type LayoutResult<T> = Result<T, LayoutError>;

impl LayoutError {
    pub(crate) fn incomplete(label: &str, reason: &'static str) -> Self {
        LayoutError::IncompleteDescriptor { label: label.to_owned(), reason }
    }

    pub(crate) fn unknown_field(label: &str, field: impl ToString) -> Self {
        LayoutError::UnknownField { label: label.to_owned(), field: field.to_string() }
    }
}
