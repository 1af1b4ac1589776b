use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::repo::{User, UserFeatRow, UserSpellRow};

#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            created_at: u.created_at,
        }
    }
}

/// Body of the favorite/notes upsert. Both fields optional; an absent
/// field leaves the stored value untouched.
#[derive(Debug, Default, Deserialize)]
pub struct SetAssociationRequest {
    pub is_favorite: Option<bool>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserSpellItem {
    pub id: i32,
    pub name: String,
    pub level: i32,
    pub school: String,
    pub classes: Vec<String>,
    pub is_favorite: bool,
    pub notes: Option<String>,
}

impl From<UserSpellRow> for UserSpellItem {
    fn from(r: UserSpellRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            level: r.level,
            school: r.school,
            classes: r.classes.0,
            is_favorite: r.is_favorite,
            notes: r.notes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserSpellsResponse {
    pub spells: Vec<UserSpellItem>,
}

#[derive(Debug, Serialize)]
pub struct UserFeatItem {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub is_favorite: bool,
    pub notes: Option<String>,
}

impl From<UserFeatRow> for UserFeatItem {
    fn from(r: UserFeatRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            description: r.description,
            category: r.category,
            is_favorite: r.is_favorite,
            notes: r.notes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserFeatsResponse {
    pub feats: Vec<UserFeatItem>,
}
