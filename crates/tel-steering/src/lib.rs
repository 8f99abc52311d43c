//! tel-steering: TELEMAC steering-file model, parser and writer.
//!
//! Provides:
//! - typed steering values (value)
//! - the ordered parameter set with position/key access (set)
//! - parser and writer for the solver's fixed-format grammar (parse, render)
//! - the built-in baseline template (template)
//! - copy-on-write merge/update API (update)
//! - one construction entry point over the four input shapes (source)
//!
//! # Example
//!
//! ```
//! use tel_steering::{SteeringSet, SteeringSource, UpdateSet};
//!
//! let cas = SteeringSet::from_source(SteeringSource::Template, None).unwrap();
//! let cas = cas.merged(&UpdateSet::new().set("TIME STEP", 60));
//!
//! assert_eq!(cas.get_int("TIME STEP"), Some(60));
//! ```

pub mod display;
pub mod keys;
pub mod parse;
pub mod render;
pub mod set;
pub mod source;
pub mod template;
pub mod update;
pub mod value;

// Re-exports for ergonomics
pub use display::preview;
pub use parse::{parse_file, parse_str, parse_value};
pub use render::{render, write_file};
pub use set::SteeringSet;
pub use source::SteeringSource;
pub use template::generate_template;
pub use update::{Update, UpdateSet};
pub use value::{RawValue, Scalar, Value};

pub type SteeringResult<T> = Result<T, SteeringError>;

/// Line width accepted by the solver's fixed-format steering reader.
pub const LINE_WIDTH: usize = 72;

#[derive(thiserror::Error, Debug)]
pub enum SteeringError {
    #[error("line {line}: no '=' separator in {text:?}")]
    MissingEquals { line: usize, text: String },

    #[error("line {line}: missing parameter name before '='")]
    EmptyName { line: usize },

    #[error("line {line}: value continues past end of input")]
    UnterminatedContinuation { line: usize },

    #[error("parameter name must not be empty")]
    BlankKey,

    #[error("nested list value for {key:?}: steering values are flat")]
    NestedValue { key: String },

    #[error("unknown key(s): {}", keys.join(", "))]
    UnknownKeys { keys: Vec<String> },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
