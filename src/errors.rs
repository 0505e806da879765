//! The error taxonomy of the render core.  There is exactly one
//! failure mode: a malformed view specification, rejected up front
//! before any pixel work begins.  Nothing inside the iteration loop
//! can fail; squaring and adding finite floats are total operations.

/// Errors reported by view validation.  Once a renderer has been
/// constructed, no further errors are possible.
#[derive(Debug, Fail, PartialEq)]
pub enum RenderError {
    /// The requested image size is degenerate (zero on an axis) or
    /// exceeds the per-axis limit.
    #[fail(
        display = "invalid image dimensions {}x{}: each axis must be between 1 and {}",
        width, height, limit
    )]
    InvalidDimension {
        /// Requested image width in pixels.
        width: usize,
        /// Requested image height in pixels.
        height: usize,
        /// The per-axis maximum.
        limit: usize,
    },

    /// Some field of the view specification is out of range.
    #[fail(display = "invalid view specification: {}", _0)]
    InvalidViewSpec(String),
}
