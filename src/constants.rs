//! Application constants.
//!
//! Centralizes file names and default paths.

/// Default locations used when neither the environment nor the CLI override them.
pub mod defaults {
    /// Default path of the JSON array of spells.
    pub const INPUT_PATH: &str = "examples/all-spells.json";

    /// Default directory the markdown notes are written into.
    pub const OUTPUT_DIR: &str = "output/spells";

    /// Default directory the zip archive is written into.
    pub const ARCHIVE_DIR: &str = ".";
}

/// Names of the files the exporter produces.
pub mod files {
    /// Extension of every rendered spell note.
    pub const NOTE_EXTENSION: &str = "md";

    /// Version stamp written next to the notes.
    pub const VERSION_FILE: &str = "_version.txt";

    /// Prefix of the zip archive name; the version and `.zip` follow.
    pub const ARCHIVE_PREFIX: &str = "spells-";

    /// Slug used when a spell name has no filename-safe characters.
    pub const FALLBACK_SLUG: &str = "spell";

    /// Name used when a spell record has no name at all.
    pub const UNNAMED_SPELL: &str = "unnamed";
}

/// Environment variables read by [`crate::config::Config::load`].
pub mod env {
    /// Overrides the input JSON path.
    pub const INPUT: &str = "SPELLMARK_INPUT";

    /// Overrides the output directory.
    pub const OUTPUT_DIR: &str = "SPELLMARK_OUTPUT_DIR";

    /// Disables the zip archive when truthy.
    pub const NO_ZIP: &str = "SPELLMARK_NO_ZIP";

    /// Overrides the directory the archive is written into.
    pub const ARCHIVE_DIR: &str = "SPELLMARK_ARCHIVE_DIR";
}
