//! Application configuration constants.

use serde::Deserialize;
use std::path::PathBuf;

// ==================== Database Configuration ====================

/// Configuration file structure for config.toml
#[derive(Debug, Deserialize)]
struct AppConfig {
    database: Option<DatabaseConfig>,
}

#[derive(Debug, Deserialize)]
struct DatabaseConfig {
    path: Option<String>,
}

/// Load database path with priority: config.toml > .env > default
pub fn load_database_path() -> PathBuf {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Priority 1: config.toml
    if let Ok(contents) = std::fs::read_to_string("config.toml") {
        if let Ok(config) = toml::from_str::<AppConfig>(&contents) {
            if let Some(db) = config.database {
                if let Some(path) = db.path {
                    tracing::info!("Using database from config.toml: {}", path);
                    return PathBuf::from(path);
                }
            }
        }
    }

    // Priority 2: .env DATABASE_PATH
    if let Ok(path) = std::env::var("DATABASE_PATH") {
        tracing::info!("Using database from DATABASE_PATH env: {}", path);
        return PathBuf::from(path);
    }

    // Default
    let default = PathBuf::from("data/satzbau.db");
    tracing::info!("Using default database path: {}", default.display());
    default
}

/// Cache file written by the external exercise generator, ingested at boot
/// if present.
pub const GENERATED_CACHE_PATH: &str = "data/generated/exercises_cache.json";

// ==================== Scheduling Configuration ====================

/// Days between a logged error and its retry becoming due
pub const RETRY_DELAY_DAYS: i64 = 2;

// ==================== Level Configuration ====================

/// Difficulty level information
pub struct LevelInfo {
    pub level: u8,
    pub code: &'static str,
    pub name: &'static str,
}

/// All difficulty levels, ordinal 1-4 mapping to CEFR proficiency labels
pub const LEVELS: [LevelInfo; 4] = [
    LevelInfo { level: 1, code: "A2", name: "Grundstufe" },
    LevelInfo { level: 2, code: "B1", name: "Mittelstufe" },
    LevelInfo { level: 3, code: "B2", name: "Obere Mittelstufe" },
    LevelInfo { level: 4, code: "C1", name: "Fortgeschritten" },
];

/// Get level info by level number
pub fn get_level_info(level: u8) -> Option<&'static LevelInfo> {
    LEVELS.iter().find(|l| l.level == level)
}

/// CEFR label for a difficulty level ("A2".."C1")
pub fn level_label(level: u8) -> String {
    get_level_info(level)
        .map(|l| l.code.to_string())
        .unwrap_or_else(|| format!("Level {}", level))
}
