use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, PgPool, Postgres, Transaction};

/// Casting components of a spell. Stored as JSONB, typed everywhere else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellComponents {
    #[serde(default)]
    pub verbal: bool,
    #[serde(default)]
    pub somatic: bool,
    #[serde(default)]
    pub material: bool,
}

#[derive(Debug, Clone, FromRow)]
pub struct Spell {
    pub id: i32,
    pub name: String,
    pub level: i32,
    pub school: String,
    pub classes: Json<Vec<String>>,
    pub action_type: Option<String>,
    pub concentration: bool,
    pub ritual: bool,
    pub casting_time: Option<String>,
    pub range_distance: Option<String>,
    pub components: Option<Json<SpellComponents>>,
    pub duration: Option<String>,
    pub description: String,
    pub material: Option<String>,
    pub cantrip_upgrade: Option<String>,
}

/// Insert payload used by the bulk loader.
#[derive(Debug, Clone)]
pub struct NewSpell {
    pub name: String,
    pub level: i32,
    pub school: String,
    pub classes: Vec<String>,
    pub action_type: Option<String>,
    pub concentration: bool,
    pub ritual: bool,
    pub casting_time: Option<String>,
    pub range_distance: Option<String>,
    pub components: Option<SpellComponents>,
    pub duration: Option<String>,
    pub description: String,
    pub material: Option<String>,
    pub cantrip_upgrade: Option<String>,
}

/// Conjunctive filter over the catalog. `None` means "not filtered".
#[derive(Debug, Default)]
pub struct SpellFilter {
    pub search: Option<String>,
    pub level: Option<i32>,
    pub school: Option<String>,
    pub class_name: Option<String>,
    pub concentration: Option<bool>,
    pub ritual: Option<bool>,
}

const COLUMNS: &str = "id, name, level, school, classes, action_type, concentration, ritual, \
     casting_time, range_distance, components, duration, description, material, \
     cantrip_upgrade";

// The class filter is a containment match against the serialized list, not
// an exact element match; a class name that is a substring of another would
// false-positive. Kept intentionally for client compatibility.
const FILTER: &str = "($1::text IS NULL OR name ILIKE '%' || $1 || '%') \
     AND ($2::int IS NULL OR level = $2) \
     AND ($3::text IS NULL OR school = $3) \
     AND ($4::text IS NULL OR classes::text LIKE '%' || $4 || '%') \
     AND ($5::boolean IS NULL OR concentration = $5) \
     AND ($6::boolean IS NULL OR ritual = $6)";

pub async fn list(
    db: &PgPool,
    filter: &SpellFilter,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Spell>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM spells WHERE {FILTER} ORDER BY id LIMIT $7 OFFSET $8"
    );
    let rows = sqlx::query_as::<_, Spell>(&sql)
        .bind(&filter.search)
        .bind(filter.level)
        .bind(&filter.school)
        .bind(&filter.class_name)
        .bind(filter.concentration)
        .bind(filter.ritual)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

pub async fn count(db: &PgPool, filter: &SpellFilter) -> anyhow::Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM spells WHERE {FILTER}");
    let total = sqlx::query_scalar::<_, i64>(&sql)
        .bind(&filter.search)
        .bind(filter.level)
        .bind(&filter.school)
        .bind(&filter.class_name)
        .bind(filter.concentration)
        .bind(filter.ritual)
        .fetch_one(db)
        .await?;
    Ok(total)
}

pub async fn get(db: &PgPool, id: i32) -> anyhow::Result<Option<Spell>> {
    let sql = format!("SELECT {COLUMNS} FROM spells WHERE id = $1");
    let spell = sqlx::query_as::<_, Spell>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(spell)
}

pub async fn distinct_schools(db: &PgPool) -> anyhow::Result<Vec<String>> {
    let schools =
        sqlx::query_scalar::<_, String>("SELECT DISTINCT school FROM spells ORDER BY school")
            .fetch_all(db)
            .await?;
    Ok(schools)
}

pub async fn class_lists(db: &PgPool) -> anyhow::Result<Vec<Vec<String>>> {
    let lists = sqlx::query_scalar::<_, Json<Vec<String>>>("SELECT classes FROM spells")
        .fetch_all(db)
        .await?;
    Ok(lists.into_iter().map(|l| l.0).collect())
}

pub async fn exists_by_name(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
) -> anyhow::Result<bool> {
    let id = sqlx::query_scalar::<_, i32>("SELECT id FROM spells WHERE name = $1 LIMIT 1")
        .bind(name)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(id.is_some())
}

pub async fn insert(tx: &mut Transaction<'_, Postgres>, spell: &NewSpell) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO spells (name, level, school, classes, action_type, concentration,
                            ritual, casting_time, range_distance, components, duration,
                            description, material, cantrip_upgrade)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        "#,
    )
    .bind(&spell.name)
    .bind(spell.level)
    .bind(&spell.school)
    .bind(Json(&spell.classes))
    .bind(&spell.action_type)
    .bind(spell.concentration)
    .bind(spell.ritual)
    .bind(&spell.casting_time)
    .bind(&spell.range_distance)
    .bind(spell.components.as_ref().map(Json))
    .bind(&spell.duration)
    .bind(&spell.description)
    .bind(&spell.material)
    .bind(&spell.cantrip_upgrade)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_default_to_nothing() {
        let c: SpellComponents = serde_json::from_str("{}").unwrap();
        assert_eq!(c, SpellComponents::default());
    }

    #[test]
    fn components_roundtrip_named_fields() {
        let c: SpellComponents =
            serde_json::from_str(r#"{"verbal": true, "material": true}"#).unwrap();
        assert!(c.verbal);
        assert!(!c.somatic);
        assert!(c.material);
    }

    fn fireball() -> NewSpell {
        NewSpell {
            name: "Fireball".into(),
            level: 3,
            school: "Evocation".into(),
            classes: vec!["Wizard".into(), "Sorcerer".into()],
            action_type: Some("action".into()),
            concentration: false,
            ritual: false,
            casting_time: Some("1 action".into()),
            range_distance: Some("150 feet".into()),
            components: Some(SpellComponents {
                verbal: true,
                somatic: true,
                material: true,
            }),
            duration: Some("Instantaneous".into()),
            description: "A bright streak...".into(),
            material: Some("a tiny ball of bat guano".into()),
            cantrip_upgrade: None,
        }
    }

    #[sqlx::test]
    async fn filters_combine_conjunctively(pool: PgPool) {
        let mut tx = pool.begin().await.unwrap();
        insert(&mut tx, &fireball()).await.unwrap();
        tx.commit().await.unwrap();

        let by_search = SpellFilter {
            search: Some("fire".into()),
            ..Default::default()
        };
        assert_eq!(count(&pool, &by_search).await.unwrap(), 1);
        let hits = list(&pool, &by_search, 50, 0).await.unwrap();
        assert_eq!(hits[0].name, "Fireball");

        let by_level_and_class = SpellFilter {
            level: Some(3),
            class_name: Some("Sorcerer".into()),
            ..Default::default()
        };
        assert_eq!(count(&pool, &by_level_and_class).await.unwrap(), 1);

        let wrong_level = SpellFilter {
            level: Some(2),
            ..Default::default()
        };
        assert_eq!(count(&pool, &wrong_level).await.unwrap(), 0);
        assert!(list(&pool, &wrong_level, 50, 0).await.unwrap().is_empty());
    }
}
