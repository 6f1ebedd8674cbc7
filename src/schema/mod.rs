//! Payload schemas and validation
//!
//! Schemas are plain data ([`FieldRule`] tables) interpreted by [`validate`];
//! they know nothing about how records are stored.

pub mod group;
mod rules;
mod time;

pub use rules::{validate, FieldError, FieldKind, FieldRule, Mode, ValidationErrors};
pub use time::{parse_time, TimeOfDay};
