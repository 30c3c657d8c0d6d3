//! Header fields of a spell note: casting time, range, components, duration
//! and tags.
//!
//! Every reader falls back to a fixed string when its field is missing.

use serde_json::Value;

use crate::markup::strip_markup;

/// Tag names for spell levels 0 through 9.
const LEVEL_NAMES: [&str; 10] = [
    "Cantrip", "1stLevel", "2ndLevel", "3rdLevel", "4thLevel", "5thLevel", "6thLevel",
    "7thLevel", "8thLevel", "9thLevel",
];

/// Rendered casting time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastingTime {
    /// e.g. `1A`, `1BA`, `10 Minutes`.
    pub text: String,
    /// Trigger of a reaction spell, verbatim.
    pub reaction_condition: Option<String>,
}

/// Rendered component list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Components {
    /// e.g. `V, S, M*`, or `None`.
    pub text: String,
    /// Material description for the footnote, markup stripped.
    pub material: Option<String>,
}

/// Rendered duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duration {
    /// e.g. `Instant`, `1 Minute`, `8 Hours`.
    pub text: String,
    /// Whether the spell requires concentration.
    pub concentration: bool,
}

/// First element of the array under `key`, or `Null`.
fn first_block<'a>(spell: &'a Value, key: &str) -> &'a Value {
    spell
        .get(key)
        .and_then(Value::as_array)
        .and_then(|blocks| blocks.first())
        .unwrap_or(&Value::Null)
}

fn str_field<'a>(block: &'a Value, key: &str) -> Option<&'a str> {
    block.get(key).and_then(Value::as_str)
}

fn flag(block: &Value, key: &str) -> bool {
    block.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Display text of a count, or `None` when it is absent, zero or empty.
fn count_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn is_one(value: Option<&Value>) -> bool {
    value.and_then(Value::as_f64) == Some(1.0)
}

fn plural(singular: &str, plural: &str, one: bool) -> String {
    (if one { singular } else { plural }).to_string()
}

/// Casting time from the first `time` block.
pub fn casting_time(spell: &Value) -> CastingTime {
    let block = first_block(spell, "time");
    let number = block.get("number");
    let unit = str_field(block, "unit").unwrap_or_default().to_lowercase();

    let code = match unit.as_str() {
        "action" => "A".to_string(),
        "bonus action" => "BA".to_string(),
        "reaction" => "R".to_string(),
        "minute" => plural(" Minute", " Minutes", is_one(number)),
        "hour" => plural(" Hour", " Hours", is_one(number)),
        "" => "?".to_string(),
        _ => unit.clone(),
    };

    let text = match count_text(number) {
        Some(n) => format!("{n}{code}"),
        None => code,
    };

    let reaction_condition = (unit == "reaction")
        .then(|| str_field(block, "condition"))
        .flatten()
        .filter(|condition| !condition.is_empty())
        .map(str::to_string);

    CastingTime { text, reaction_condition }
}

/// Range, preferring the distance descriptor over the range type.
pub fn range(spell: &Value) -> String {
    let block = spell.get("range").unwrap_or(&Value::Null);
    let distance = block.get("distance").unwrap_or(&Value::Null);

    match str_field(distance, "type").filter(|kind| !kind.is_empty()) {
        Some("unlimited") => "Unlimited".to_string(),
        Some("self") => "Self".to_string(),
        Some("touch") => "Touch".to_string(),
        Some(kind) => match distance.get("amount").filter(|amount| !amount.is_null()) {
            Some(amount) => format!("{} {kind}", stringify(amount)),
            None => range_type(block),
        },
        None => range_type(block),
    }
}

fn range_type(block: &Value) -> String {
    str_field(block, "type")
        .filter(|kind| !kind.is_empty())
        .unwrap_or("Unknown")
        .to_string()
}

/// Component list and material footnote text.
pub fn components(spell: &Value) -> Components {
    let block = spell.get("components").unwrap_or(&Value::Null);
    let mut parts = Vec::new();

    if flag(block, "v") {
        parts.push("V");
    }
    if flag(block, "s") {
        parts.push("S");
    }

    let m = block.get("m").filter(|m| is_present(m));
    if m.is_some() {
        parts.push("M*");
    }

    // An empty description still counts as a material component, just without a footnote.
    let material = m
        .map(|m| match m.get("text").and_then(Value::as_str) {
            Some(text) => strip_markup(text).into_owned(),
            None => strip_markup(&stringify(m)).into_owned(),
        })
        .filter(|text| !text.is_empty());

    let text = if parts.is_empty() { "None".to_string() } else { parts.join(", ") };
    Components { text, material }
}

/// `null`, `false` and `""` mean no material component.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn stringify(value: &Value) -> String {
    value.as_str().map_or_else(|| value.to_string(), str::to_string)
}

/// Duration and concentration from the first `duration` block.
pub fn duration(spell: &Value) -> Duration {
    let block = first_block(spell, "duration");

    match str_field(block, "type") {
        Some("instant") => Duration { text: "Instant".to_string(), concentration: false },
        Some("permanent") => Duration { text: "Permanent".to_string(), concentration: false },
        Some("timed") => {
            let inner = block.get("duration").unwrap_or(&Value::Null);
            let amount = inner.get("amount");
            let unit = str_field(inner, "type").unwrap_or_default().to_lowercase();

            let unit_name = match unit.as_str() {
                "round" => plural("Round", "Rounds", is_one(amount)),
                "minute" => plural("Minute", "Minutes", is_one(amount)),
                "hour" => plural("Hour", "Hours", is_one(amount)),
                _ => unit,
            };

            let text = match count_text(amount) {
                Some(n) => format!("{n} {unit_name}"),
                None => unit_name,
            };

            Duration { text, concentration: flag(block, "concentration") }
        }
        _ => Duration { text: "Unknown".to_string(), concentration: false },
    }
}

/// Level tag: `Cantrip`, `1stLevel` ... `9thLevel`, or `Level{n}` out of range.
pub fn level_tag(level: i64) -> String {
    usize::try_from(level)
        .ok()
        .and_then(|i| LEVEL_NAMES.get(i))
        .map_or_else(|| format!("Level{level}"), |name| (*name).to_string())
}

/// Whether `meta.ritual` is set.
pub fn is_ritual(spell: &Value) -> bool {
    spell.get("meta").is_some_and(|meta| flag(meta, "ritual"))
}

/// Whether the spell has a non-empty `entriesHigherLevel`.
pub fn is_upcastable(spell: &Value) -> bool {
    spell
        .get("entriesHigherLevel")
        .and_then(Value::as_array)
        .is_some_and(|blocks| !blocks.is_empty())
}

/// Frontmatter tags, always starting with `Spell` and one level tag.
pub fn tags(spell: &Value, concentration: bool) -> Vec<String> {
    let level = spell.get("level").and_then(Value::as_i64).unwrap_or(0);
    let mut tags = vec!["Spell".to_string(), level_tag(level)];

    if concentration {
        tags.push("Concentration".to_string());
    }
    if is_ritual(spell) {
        tags.push("Ritual".to_string());
    }
    if is_upcastable(spell) {
        tags.push("Upcastable".to_string());
    }

    tags
}
