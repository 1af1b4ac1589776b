use serde::Deserialize;

use crate::spells::repo::{NewSpell, SpellComponents};

/// One record of the spell seed file. Missing required keys fail the
/// whole parse, which aborts the batch.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellSource {
    pub name: String,
    pub level: i32,
    pub school: String,
    pub classes: Vec<String>,
    pub action_type: Option<String>,
    #[serde(default)]
    pub concentration: bool,
    #[serde(default)]
    pub ritual: bool,
    pub casting_time: Option<String>,
    pub range: Option<String>,
    pub components: Option<SpellComponents>,
    pub duration: Option<String>,
    pub description: String,
    pub material: Option<String>,
    pub cantrip_upgrade: Option<String>,
}

impl From<SpellSource> for NewSpell {
    fn from(s: SpellSource) -> Self {
        Self {
            name: s.name,
            level: s.level,
            school: s.school,
            classes: s.classes,
            action_type: s.action_type,
            concentration: s.concentration,
            ritual: s.ritual,
            casting_time: s.casting_time,
            range_distance: s.range,
            components: s.components,
            duration: s.duration,
            description: s.description,
            material: s.material,
            cantrip_upgrade: s.cantrip_upgrade,
        }
    }
}

/// One record of the feat seed file. The source labels its keys in
/// Russian; these exact keys are part of the file format.
#[derive(Debug, Deserialize)]
pub struct FeatSource {
    #[serde(rename = "название")]
    pub name: String,
    #[serde(rename = "описание")]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn spell_source_parses_camel_case_keys() {
        let s: SpellSource = serde_json::from_value(json!({
            "name": "Fire Bolt",
            "level": 0,
            "school": "Evocation",
            "classes": ["Wizard", "Sorcerer"],
            "actionType": "action",
            "castingTime": "1 action",
            "range": "120 feet",
            "description": "You hurl a mote of fire.",
            "cantripUpgrade": "The damage increases at 5th, 11th and 17th level."
        }))
        .unwrap();
        assert_eq!(s.name, "Fire Bolt");
        assert!(!s.concentration);
        assert!(!s.ritual);
        assert_eq!(s.casting_time.as_deref(), Some("1 action"));
        assert!(s.cantrip_upgrade.is_some());
    }

    #[test]
    fn spell_source_requires_name() {
        let res: Result<SpellSource, _> = serde_json::from_value(json!({
            "level": 1,
            "school": "Abjuration",
            "classes": [],
            "description": "..."
        }));
        assert!(res.is_err());
    }

    #[test]
    fn feat_source_reads_source_language_keys() {
        let f: FeatSource = serde_json::from_value(json!({
            "название": "Бдительный",
            "описание": "Всегда начеку, вас нельзя застать врасплох."
        }))
        .unwrap();
        assert_eq!(f.name, "Бдительный");
        assert!(!f.description.is_empty());
    }
}
