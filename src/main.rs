use std::path::Path;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use satzbau::db::LogOnError;
use satzbau::{config, content, db, store};

fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "satzbau=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let db_path = config::load_database_path();
  let pool = db::init_db(&db_path).expect("Failed to initialize database");

  let mut templates = store::TemplateStore::seeded();
  tracing::info!(count = templates.len(), "loaded built-in exercise banks");

  // Generated candidates are optional; a missing cache file is normal
  let cache = Path::new(config::GENERATED_CACHE_PATH);
  if cache.exists() {
    if let Some(candidates) =
      content::load_candidates(cache).log_warn("Failed to load generated exercises")
    {
      let accepted = templates.append_validated(candidates);
      tracing::info!(accepted, "ingested generated exercise candidates");
    }
  }

  let conn = pool.lock().expect("Database lock failed during startup");
  let user_count: i64 = conn
    .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
    .log_warn_default("Failed to count users");

  tracing::info!(
    templates = templates.len(),
    users = user_count,
    db = %db_path.display(),
    "satzbau ready"
  );
}
