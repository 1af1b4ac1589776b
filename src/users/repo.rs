use sqlx::{types::Json, FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: OffsetDateTime,
}

pub async fn find_by_username(db: &PgPool, username: &str) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, email, created_at FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(db)
    .await?;
    Ok(user)
}

pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, email, created_at FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(db)
    .await?;
    Ok(user)
}

/// Returns the raw sqlx error so the caller can map a unique violation
/// (lost race against a concurrent create) to a conflict.
pub async fn create(db: &PgPool, username: &str, email: &str) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, email)
        VALUES ($1, $2)
        RETURNING id, username, email, created_at
        "#,
    )
    .bind(username)
    .bind(email)
    .fetch_one(db)
    .await
}

/// One joined row per association whose spell still resolves; dangling
/// associations drop out of the join.
#[derive(Debug, Clone, FromRow)]
pub struct UserSpellRow {
    pub id: i32,
    pub name: String,
    pub level: i32,
    pub school: String,
    pub classes: Json<Vec<String>>,
    pub is_favorite: bool,
    pub notes: Option<String>,
}

pub async fn list_spells_for_user(db: &PgPool, user_id: i32) -> anyhow::Result<Vec<UserSpellRow>> {
    let rows = sqlx::query_as::<_, UserSpellRow>(
        r#"
        SELECT s.id, s.name, s.level, s.school, s.classes, us.is_favorite, us.notes
        FROM user_spells us
        JOIN spells s ON s.id = us.spell_id
        WHERE us.user_id = $1
        ORDER BY us.created_at
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Atomic create-or-update of the (user, spell) association. Unsupplied
/// fields keep their current value on update; a fresh row defaults to
/// not-favorite with empty notes. No existence check on either id.
pub async fn upsert_user_spell(
    db: &PgPool,
    user_id: i32,
    spell_id: i32,
    is_favorite: Option<bool>,
    notes: Option<String>,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO user_spells (user_id, spell_id, is_favorite, notes)
        VALUES ($1, $2, COALESCE($3::boolean, FALSE), COALESCE($4::text, ''))
        ON CONFLICT (user_id, spell_id) DO UPDATE
        SET is_favorite = COALESCE($3::boolean, user_spells.is_favorite),
            notes = COALESCE($4::text, user_spells.notes)
        "#,
    )
    .bind(user_id)
    .bind(spell_id)
    .bind(is_favorite)
    .bind(notes)
    .execute(db)
    .await?;
    Ok(())
}

#[derive(Debug, Clone, FromRow)]
pub struct UserFeatRow {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub is_favorite: bool,
    pub notes: Option<String>,
}

pub async fn list_feats_for_user(db: &PgPool, user_id: i32) -> anyhow::Result<Vec<UserFeatRow>> {
    let rows = sqlx::query_as::<_, UserFeatRow>(
        r#"
        SELECT f.id, f.name, f.description, f.category, uf.is_favorite, uf.notes
        FROM user_feats uf
        JOIN feats f ON f.id = uf.feat_id
        WHERE uf.user_id = $1
        ORDER BY uf.created_at
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn upsert_user_feat(
    db: &PgPool,
    user_id: i32,
    feat_id: i32,
    is_favorite: Option<bool>,
    notes: Option<String>,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO user_feats (user_id, feat_id, is_favorite, notes)
        VALUES ($1, $2, COALESCE($3::boolean, FALSE), COALESCE($4::text, ''))
        ON CONFLICT (user_id, feat_id) DO UPDATE
        SET is_favorite = COALESCE($3::boolean, user_feats.is_favorite),
            notes = COALESCE($4::text, user_feats.notes)
        "#,
    )
    .bind(user_id)
    .bind(feat_id)
    .bind(is_favorite)
    .bind(notes)
    .execute(db)
    .await?;
    Ok(())
}
