use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub spells_file: String,
    pub feats_file: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let spells_file =
            std::env::var("SPELLS_FILE").unwrap_or_else(|_| "data/spells.json".into());
        let feats_file = std::env::var("FEATS_FILE").unwrap_or_else(|_| "data/feats.json".into());
        Ok(Self {
            database_url,
            spells_file,
            feats_file,
        })
    }
}
