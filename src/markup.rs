//! Inline markup stripping for 5eTools text.
//!
//! Spell text embeds citation tags such as `{@damage 1d6}` or
//! `{@variantrule Hit Points|XPHB}`. These resolve to their visible text.
//! Tags never nest in this schema, so three ordered regex passes are enough.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// `{@scaledamage 2d8|1-9|1d8}` keeps the third segment.
#[allow(clippy::expect_used)]
static RE_SCALEDAMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{@scaledamage\s+[^|}]+\|[^|}]*\|([^}]+)\}").expect("valid regex: RE_SCALEDAMAGE")
});

/// `{@variantrule Emanation [Area of Effect]|XPHB|Emanation}` keeps the display text
/// before any bracketed qualifier and pipe segments.
#[allow(clippy::expect_used)]
static RE_WITH_SOURCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{@([^\s}]+)\s+([^|}\[]+)(?:\s*\[[^\]]+\])?\|[^}]*\}")
        .expect("valid regex: RE_WITH_SOURCE")
});

/// `{@damage 1d6}` keeps everything after the command.
#[allow(clippy::expect_used)]
static RE_SIMPLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{@([^\s}]+)\s+([^}]+)\}").expect("valid regex: RE_SIMPLE")
});

/// Resolve every recognized `{@...}` tag in `text` to its display text.
///
/// Text without tags is returned borrowed. Unrecognized brace sequences are
/// left in place.
pub fn strip_markup(text: &str) -> Cow<'_, str> {
    if !text.contains("{@") {
        return Cow::Borrowed(text);
    }

    let cleaned = RE_SCALEDAMAGE.replace_all(text, |caps: &Captures<'_>| caps[1].trim().to_string());
    let cleaned = RE_WITH_SOURCE
        .replace_all(&cleaned, |caps: &Captures<'_>| caps[2].trim().to_string())
        .into_owned();
    let cleaned = RE_SIMPLE
        .replace_all(&cleaned, |caps: &Captures<'_>| caps[2].trim().to_string())
        .into_owned();

    Cow::Owned(cleaned)
}

/// [`strip_markup`] for a fragment that may be absent. `None` stays `None`.
pub fn strip_optional(text: Option<&str>) -> Option<Cow<'_, str>> {
    text.map(strip_markup)
}
