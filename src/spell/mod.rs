//! Spell record to markdown note conversion.
//!
//! Records follow the 5eTools spell schema and are read as untyped JSON so
//! that missing or unexpected fields degrade to fallback text instead of
//! failing deserialization. Every function here is pure.

pub mod document;
pub mod entry;
pub mod fields;

pub use document::{description, higher_level_lines, spell_to_markdown};
pub use entry::{flatten_entries, Entry};
pub use fields::{CastingTime, Components, Duration};
