use serde::{Deserialize, Serialize};

use super::repo::{Feat, FeatFilter};

#[derive(Debug, Deserialize)]
pub struct FeatListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
    pub search: Option<String>,
    pub category: Option<String>,
}

fn default_page() -> i64 {
    1
}
fn default_per_page() -> i64 {
    50
}

impl FeatListQuery {
    pub fn into_filter(self) -> FeatFilter {
        FeatFilter {
            search: self.search.filter(|s| !s.is_empty()),
            category: self.category.filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FeatJson {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub category: String,
}

impl From<Feat> for FeatJson {
    fn from(f: Feat) -> Self {
        Self {
            id: f.id,
            name: f.name,
            description: f.description,
            category: f.category,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FeatListResponse {
    pub feats: Vec<FeatJson>,
    pub total: i64,
    pub pages: i64,
    pub current_page: i64,
}

#[derive(Debug, Serialize)]
pub struct FeatFilterOptions {
    pub categories: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_defaults_match_spell_listing() {
        let q: FeatListQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(q.page, 1);
        assert_eq!(q.per_page, 50);
    }

    #[test]
    fn empty_category_is_no_filter() {
        let q: FeatListQuery = serde_json::from_value(json!({ "category": "" })).unwrap();
        assert!(q.into_filter().category.is_none());
    }
}
