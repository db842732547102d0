//! `migrate` command: apply, roll back, inspect or rebuild the schema
//! holding users, restaurants, opening hours and tags.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config).await?;

    match args.action {
        MigrateAction::Up => {
            let pending = pending_migrations(&db).await?;
            if pending.is_empty() {
                tracing::info!("Schema is up to date");
                return Ok(());
            }
            db.run_migrations().await?;
            for name in &pending {
                tracing::info!(migration = %name, "Applied");
            }
        }
        MigrateAction::Down => {
            let last = applied_migrations(&db).await?.pop();
            match last {
                Some(name) => {
                    db.rollback_migration().await?;
                    tracing::info!(migration = %name, "Rolled back");
                }
                None => tracing::info!("Nothing to roll back"),
            }
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            let applied = status.iter().filter(|(_, applied)| *applied).count();
            for (name, is_applied) in &status {
                println!("[{}] {}", if *is_applied { "x" } else { " " }, name);
            }
            println!("{} of {} migrations applied", applied, status.len());
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables, saved restaurants will be lost");
            db.fresh_migrations().await?;
            tracing::info!("Schema rebuilt");
        }
    }

    Ok(())
}

async fn pending_migrations(db: &Database) -> AppResult<Vec<String>> {
    Ok(db
        .migration_status()
        .await?
        .into_iter()
        .filter_map(|(name, applied)| (!applied).then_some(name))
        .collect())
}

async fn applied_migrations(db: &Database) -> AppResult<Vec<String>> {
    Ok(db
        .migration_status()
        .await?
        .into_iter()
        .filter_map(|(name, applied)| applied.then_some(name))
        .collect())
}
