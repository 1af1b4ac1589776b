use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::repo::{Spell, SpellComponents, SpellFilter};

#[derive(Debug, Deserialize)]
pub struct SpellListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
    pub search: Option<String>,
    pub level: Option<i32>,
    pub school: Option<String>,
    #[serde(rename = "class")]
    pub class_name: Option<String>,
    pub concentration: Option<bool>,
    pub ritual: Option<bool>,
}

fn default_page() -> i64 {
    1
}
fn default_per_page() -> i64 {
    50
}

impl SpellListQuery {
    /// Empty strings mean "no filter", same as an absent parameter.
    pub fn into_filter(self) -> SpellFilter {
        SpellFilter {
            search: self.search.filter(|s| !s.is_empty()),
            level: self.level,
            school: self.school.filter(|s| !s.is_empty()),
            class_name: self.class_name.filter(|s| !s.is_empty()),
            concentration: self.concentration,
            ritual: self.ritual,
        }
    }
}

/// External spell shape. The camelCase names are a client contract.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellJson {
    pub id: i32,
    pub name: String,
    pub level: i32,
    pub school: String,
    pub classes: Vec<String>,
    pub action_type: Option<String>,
    pub concentration: bool,
    pub ritual: bool,
    pub casting_time: Option<String>,
    pub range: Option<String>,
    pub components: Option<SpellComponents>,
    pub duration: Option<String>,
    pub description: String,
    pub material: Option<String>,
    pub cantrip_upgrade: Option<String>,
}

impl From<Spell> for SpellJson {
    fn from(s: Spell) -> Self {
        Self {
            id: s.id,
            name: s.name,
            level: s.level,
            school: s.school,
            classes: s.classes.0,
            action_type: s.action_type,
            concentration: s.concentration,
            ritual: s.ritual,
            casting_time: s.casting_time,
            range: s.range_distance,
            components: s.components.map(|c| c.0),
            duration: s.duration,
            description: s.description,
            material: s.material,
            cantrip_upgrade: s.cantrip_upgrade,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SpellListResponse {
    pub spells: Vec<SpellJson>,
    pub total: i64,
    pub pages: i64,
    pub current_page: i64,
}

#[derive(Debug, Serialize)]
pub struct SpellFilterOptions {
    pub schools: Vec<String>,
    pub classes: Vec<String>,
    pub levels: Vec<i32>,
}

/// Flattens every spell's class list into one sorted, deduplicated list.
pub fn flatten_classes(lists: Vec<Vec<String>>) -> Vec<String> {
    let set: BTreeSet<String> = lists.into_iter().flatten().collect();
    set.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_defaults_to_first_page_of_fifty() {
        let q: SpellListQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(q.page, 1);
        assert_eq!(q.per_page, 50);
        assert!(q.search.is_none());
    }

    #[test]
    fn empty_string_filters_are_dropped() {
        let q: SpellListQuery =
            serde_json::from_value(json!({ "search": "", "school": "", "class": "Wizard" }))
                .unwrap();
        let f = q.into_filter();
        assert!(f.search.is_none());
        assert!(f.school.is_none());
        assert_eq!(f.class_name.as_deref(), Some("Wizard"));
    }

    #[test]
    fn spell_json_uses_external_camel_case_names() {
        let spell = SpellJson {
            id: 1,
            name: "Fireball".into(),
            level: 3,
            school: "Evocation".into(),
            classes: vec!["Wizard".into(), "Sorcerer".into()],
            action_type: Some("action".into()),
            concentration: false,
            ritual: false,
            casting_time: Some("1 action".into()),
            range: Some("150 feet".into()),
            components: Some(SpellComponents {
                verbal: true,
                somatic: true,
                material: true,
            }),
            duration: Some("Instantaneous".into()),
            description: "A bright streak...".into(),
            material: Some("a tiny ball of bat guano".into()),
            cantrip_upgrade: None,
        };
        let v = serde_json::to_value(&spell).unwrap();
        assert!(v.get("actionType").is_some());
        assert!(v.get("castingTime").is_some());
        assert!(v.get("cantripUpgrade").is_some());
        assert!(v.get("range").is_some());
        assert!(v.get("action_type").is_none());
        assert_eq!(v["classes"], json!(["Wizard", "Sorcerer"]));
    }

    #[test]
    fn flatten_classes_sorts_and_dedups() {
        let classes = flatten_classes(vec![
            vec!["Wizard".into(), "Sorcerer".into()],
            vec!["Bard".into(), "Wizard".into()],
        ]);
        assert_eq!(classes, vec!["Bard", "Sorcerer", "Wizard"]);
    }
}
