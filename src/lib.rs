//! `spellmark` - 5eTools spell JSON to Obsidian markdown notes.
//!
//! The core is [`spell::spell_to_markdown`], a pure function from one spell
//! record to one note, built on [`markup::strip_markup`]. The [`export`]
//! module handles the file plumbing around it.
//!
//! ```
//! use serde_json::json;
//!
//! let spell = json!({
//!     "name": "Fire Bolt",
//!     "level": 0,
//!     "time": [{"number": 1, "unit": "action"}],
//!     "entries": ["You hurl a mote of fire. It deals {@damage 1d10} fire damage."]
//! });
//! let note = spellmark::spell::spell_to_markdown(&spell);
//! assert!(note.contains("  - Cantrip\n"));
//! assert!(note.ends_with("It deals 1d10 fire damage.\n"));
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod markup;
pub mod spell;

pub use error::{Error, Result};
pub use markup::strip_markup;
pub use spell::spell_to_markdown;
