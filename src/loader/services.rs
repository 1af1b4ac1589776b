use std::collections::HashMap;

use anyhow::Context;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;

use crate::{feats, spells};

use super::source::{FeatSource, SpellSource};

/// Runs both seed loads in a single transaction and reports how many
/// rows each added. Any read, parse or insert failure rolls back the
/// entire load; a partial import is never left behind.
pub async fn load_all(
    db: &PgPool,
    spells_path: &str,
    feats_path: &str,
) -> anyhow::Result<(u64, u64)> {
    let mut tx = db.begin().await?;
    let spells_added = load_spells(&mut tx, spells_path).await?;
    let feats_added = load_feats(&mut tx, feats_path).await?;
    tx.commit().await?;

    info!(spells_added, feats_added, "seed load complete");
    Ok((spells_added, feats_added))
}

/// Inserts every seed spell whose name is not already in the catalog.
async fn load_spells(tx: &mut Transaction<'_, Postgres>, path: &str) -> anyhow::Result<u64> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read spell seed file {path}"))?;
    let records: Vec<SpellSource> =
        serde_json::from_str(&raw).with_context(|| format!("parse spell seed file {path}"))?;

    let mut added = 0u64;
    for record in records {
        if spells::repo::exists_by_name(tx, &record.name).await? {
            continue;
        }
        spells::repo::insert(tx, &record.into()).await?;
        added += 1;
    }
    Ok(added)
}

/// Same idempotent load for feats. The seed file maps category name to
/// a list of records; the category becomes a column on each row.
async fn load_feats(tx: &mut Transaction<'_, Postgres>, path: &str) -> anyhow::Result<u64> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read feat seed file {path}"))?;
    let by_category: HashMap<String, Vec<FeatSource>> =
        serde_json::from_str(&raw).with_context(|| format!("parse feat seed file {path}"))?;

    let mut added = 0u64;
    for (category, records) in by_category {
        for record in records {
            if feats::repo::exists_by_name(tx, &record.name).await? {
                continue;
            }
            feats::repo::insert(tx, &record.name, &record.description, &category).await?;
            added += 1;
        }
    }
    Ok(added)
}
