use sqlx::{FromRow, PgPool, Postgres, Transaction};

#[derive(Debug, Clone, FromRow)]
pub struct Feat {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub category: String,
}

/// `None` means "not filtered". Search is a case-insensitive substring
/// match on name; category is an exact match.
#[derive(Debug, Default)]
pub struct FeatFilter {
    pub search: Option<String>,
    pub category: Option<String>,
}

const COLUMNS: &str = "id, name, description, category";

const FILTER: &str = "($1::text IS NULL OR name ILIKE '%' || $1 || '%') \
     AND ($2::text IS NULL OR category = $2)";

pub async fn list(
    db: &PgPool,
    filter: &FeatFilter,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Feat>> {
    let sql = format!("SELECT {COLUMNS} FROM feats WHERE {FILTER} ORDER BY id LIMIT $3 OFFSET $4");
    let rows = sqlx::query_as::<_, Feat>(&sql)
        .bind(&filter.search)
        .bind(&filter.category)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

pub async fn count(db: &PgPool, filter: &FeatFilter) -> anyhow::Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM feats WHERE {FILTER}");
    let total = sqlx::query_scalar::<_, i64>(&sql)
        .bind(&filter.search)
        .bind(&filter.category)
        .fetch_one(db)
        .await?;
    Ok(total)
}

pub async fn get(db: &PgPool, id: i32) -> anyhow::Result<Option<Feat>> {
    let sql = format!("SELECT {COLUMNS} FROM feats WHERE id = $1");
    let feat = sqlx::query_as::<_, Feat>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(feat)
}

// Storage order, deliberately unsorted.
pub async fn distinct_categories(db: &PgPool) -> anyhow::Result<Vec<String>> {
    let categories = sqlx::query_scalar::<_, String>("SELECT DISTINCT category FROM feats")
        .fetch_all(db)
        .await?;
    Ok(categories)
}

pub async fn exists_by_name(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
) -> anyhow::Result<bool> {
    let id = sqlx::query_scalar::<_, i32>("SELECT id FROM feats WHERE name = $1 LIMIT 1")
        .bind(name)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(id.is_some())
}

pub async fn insert(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    description: &str,
    category: &str,
) -> anyhow::Result<()> {
    sqlx::query("INSERT INTO feats (name, description, category) VALUES ($1, $2, $3)")
        .bind(name)
        .bind(description)
        .bind(category)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
