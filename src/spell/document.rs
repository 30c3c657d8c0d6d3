//! Assembly of the final markdown note.

use serde_json::Value;

use super::entry::{children, flatten_entries};
use super::fields;
use crate::markup::strip_markup;

/// Main description: every body fragment stripped and separated by a blank line.
pub fn description(spell: &Value) -> String {
    let entries = spell
        .get("entries")
        .and_then(Value::as_array)
        .map_or(&[][..], Vec::as_slice);

    flatten_entries(entries)
        .iter()
        .map(|fragment| strip_markup(fragment))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// One line per `entriesHigherLevel` block that has text, e.g.
/// `**_Using a Higher-Level Spell Slot._** The damage increases by 1d6.`
pub fn higher_level_lines(spell: &Value) -> Vec<String> {
    let Some(blocks) = spell.get("entriesHigherLevel").and_then(Value::as_array) else {
        return Vec::new();
    };

    blocks
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|block| {
            let text = flatten_entries(children(block, "entries"))
                .iter()
                .map(|part| strip_markup(part).trim().to_string())
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            if text.is_empty() {
                return None;
            }

            let name = block
                .get("name")
                .and_then(Value::as_str)
                .map(str::trim)
                .unwrap_or_default();
            if name.is_empty() {
                return Some(text);
            }

            let period = if name.ends_with('.') { "" } else { "." };
            Some(format!("**_{name}{period}_** {text}"))
        })
        .collect()
}

/// Render one spell record as a markdown note with YAML frontmatter.
///
/// Never fails: absent fields fall back to `Unknown`, `?` or `None`. The
/// result always ends with exactly one newline.
pub fn spell_to_markdown(spell: &Value) -> String {
    let time = fields::casting_time(spell);
    let range = fields::range(spell);
    let components = fields::components(spell);
    let duration = fields::duration(spell);
    let tags = fields::tags(spell, duration.concentration);

    let mut lines = vec!["---".to_string(), "tags:".to_string()];
    lines.extend(tags.iter().map(|tag| format!("  - {tag}")));
    lines.push(format!("Time: {}", time.text));
    lines.push(format!("range: {range}"));
    lines.push(format!("Components: {}", components.text));
    lines.push(format!("Duration: {}", duration.text));
    lines.push("---".to_string());

    if let Some(condition) = &time.reaction_condition {
        lines.push(format!("A reaction {condition}"));
        lines.push(String::new());
    }

    lines.push(description(spell).trim().to_string());

    let higher_level = higher_level_lines(spell);
    if !higher_level.is_empty() {
        lines.push(String::new());
        lines.extend(higher_level);
    }

    if let Some(material) = &components.material {
        lines.push(String::new());
        lines.push(format!("\\* {material}"));
    }

    let mut out = lines.join("\n").trim_end().to_string();
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use serde_json::json;

    #[test]
    fn description_strips_each_fragment() {
        let spell = json!({"entries": [
            "Deal {@damage 2d6} damage.",
            {"type": "entries", "entries": ["Target must pass a {@skill Strength|XPHB} check."]}
        ]});
        assert_eq!(description(&spell), "Deal 2d6 damage.\n\nTarget must pass a Strength check.");
    }

    #[test]
    fn higher_level_named_block() {
        let spell = json!({"entriesHigherLevel": [{
            "type": "entries",
            "name": "Using a Higher-Level Spell Slot",
            "entries": ["The damage increases by {@scaledamage 3d8|3-9|1d8} for each", " slot level above 3. "]
        }]});
        assert_eq!(
            higher_level_lines(&spell),
            vec!["**_Using a Higher-Level Spell Slot._** The damage increases by 1d8 for each slot level above 3."]
        );
    }

    #[test]
    fn higher_level_name_keeps_existing_period() {
        let spell = json!({"entriesHigherLevel": [{"name": "At Higher Levels.", "entries": ["More."]}]});
        assert_eq!(higher_level_lines(&spell), vec!["**_At Higher Levels._** More."]);
    }

    #[test]
    fn higher_level_skips_empty_and_non_objects() {
        let spell = json!({"entriesHigherLevel": [
            "stray string",
            {"name": "Empty", "entries": []},
            {"entries": ["Unnamed scaling."]}
        ]});
        assert_eq!(higher_level_lines(&spell), vec!["Unnamed scaling."]);
    }

    #[test]
    fn minimal_record_uses_fallbacks() {
        let doc = spell_to_markdown(&json!({}));
        assert_eq!(
            doc,
            "---\ntags:\n  - Spell\n  - Cantrip\nTime: ?\nrange: Unknown\nComponents: None\nDuration: Unknown\n---\n"
        );
    }

    #[test]
    fn empty_material_text_has_no_footnote() {
        let doc = spell_to_markdown(&json!({"components": {"v": true, "m": {"text": ""}}, "entries": ["Body."]}));
        assert!(doc.contains("Components: V, M*\n"));
        assert!(doc.ends_with("---\nBody.\n"), "doc: {doc:?}");
    }

    #[test]
    fn empty_reaction_condition_has_no_callout() {
        let doc = spell_to_markdown(&json!({
            "time": [{"number": 1, "unit": "reaction", "condition": ""}],
            "entries": ["Body."]
        }));
        assert!(!doc.contains("A reaction"));
        assert!(doc.ends_with("---\nBody.\n"), "doc: {doc:?}");
    }

    #[test]
    fn document_sections_in_order() {
        let spell = json!({
            "name": "Shield",
            "level": 1,
            "time": [{"number": 1, "unit": "reaction", "condition": "which you take when you are hit by an attack roll"}],
            "range": {"type": "point", "distance": {"type": "self"}},
            "components": {"v": true, "s": true},
            "duration": [{"type": "timed", "duration": {"type": "round", "amount": 1}}],
            "entries": ["An imperceptible barrier of magical force protects you."]
        });

        let doc = spell_to_markdown(&spell);
        let expected = "---\ntags:\n  - Spell\n  - 1stLevel\nTime: 1R\nrange: Self\nComponents: V, S\nDuration: 1 Round\n---\n\
                        A reaction which you take when you are hit by an attack roll\n\n\
                        An imperceptible barrier of magical force protects you.\n";
        assert_eq!(doc, expected);
    }
}
