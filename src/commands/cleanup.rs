//! `cleanup-orphaned-menus`: report and optionally delete menus that have
//! no restaurant association.
//!
//! Dry-run is the default and never mutates. Execute mode asks for a
//! literal "yes" before deleting; the delete reuses the same orphan
//! predicate as the report and runs in one transaction.

use chrono::{DateTime, Utc};
use sqlx::{Connection, FromRow, PgConnection};

use crate::config::Config;
use crate::confirm::ConfirmationProvider;
use crate::db;
use crate::errors::{Error, Result};

const ORPHAN_LIST: &str = "\
    SELECT m.id, m.name, v.business_name AS vendor_name, m.created_at \
    FROM menus m \
    LEFT JOIN restaurant_menus rm ON m.id = rm.menu_id \
    LEFT JOIN vendors v ON m.vendor_id = v.id \
    WHERE rm.menu_id IS NULL \
    ORDER BY m.created_at DESC";

const ORPHAN_COUNT: &str = "\
    SELECT COUNT(*) \
    FROM menus m \
    LEFT JOIN restaurant_menus rm ON m.id = rm.menu_id \
    WHERE rm.menu_id IS NULL";

const ORPHAN_DELETE: &str = "\
    DELETE FROM menus \
    WHERE id IN (\
        SELECT m.id \
        FROM menus m \
        LEFT JOIN restaurant_menus rm ON m.id = rm.menu_id \
        WHERE rm.menu_id IS NULL)";

const FINAL_STATS: &str = "\
    SELECT \
        (SELECT COUNT(*) FROM menus) AS total_menus, \
        (SELECT COUNT(*) FROM restaurant_menus) AS total_assignments, \
        (SELECT COUNT(DISTINCT menu_id) FROM restaurant_menus) AS menus_with_restaurants";

#[derive(Debug, FromRow)]
struct OrphanedMenu {
    id: i32,
    name: String,
    vendor_name: Option<String>,
    created_at: DateTime<Utc>,
}

pub async fn run(
    config: &Config,
    dry_run: bool,
    confirm: &mut dyn ConfirmationProvider,
) -> Result<()> {
    println!("\n=== Cleaning Up Orphaned Menus ===");

    let mut conn = db::connect(&config.database_url).await?;
    let result = execute(&mut conn, dry_run, confirm).await;
    db::close(conn).await;
    result
}

async fn execute(
    conn: &mut PgConnection,
    dry_run: bool,
    confirm: &mut dyn ConfirmationProvider,
) -> Result<()> {
    let orphans: Vec<OrphanedMenu> = sqlx::query_as(ORPHAN_LIST).fetch_all(&mut *conn).await?;

    if orphans.is_empty() {
        println!("\n✓ No orphaned menus found. Database is clean!");
        return Ok(());
    }

    println!("\nFound {} orphaned menu(s):", orphans.len());
    println!("{}", "-".repeat(80));
    for menu in &orphans {
        let vendor = menu
            .vendor_name
            .as_deref()
            .unwrap_or("NO VENDOR (System Menu)");
        println!(
            "  • ID: {:>3} | {:<30} | {:<25} | Created: {}",
            menu.id, menu.name, vendor, menu.created_at
        );
    }
    println!("{}", "-".repeat(80));

    if dry_run {
        println!("\n⚠ DRY RUN MODE: No changes will be made");
        println!("  To actually delete orphaned menus, re-run with the --execute flag:");
        println!("  deliveryctl cleanup-orphaned-menus --execute");
        return Ok(());
    }

    println!("\n⚠ WARNING: This will permanently delete the above menus!");
    if !confirm.confirm("Are you sure you want to continue? (yes/no): ")? {
        return Err(Error::Aborted);
    }

    let mut tx = conn.begin().await?;
    let deleted = sqlx::query(ORPHAN_DELETE)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    tx.commit().await?;

    println!("\n✓ Successfully deleted {deleted} orphaned menu(s)");

    let remaining: i64 = sqlx::query_scalar(ORPHAN_COUNT).fetch_one(&mut *conn).await?;
    if remaining == 0 {
        println!("✓ All orphaned menus have been removed");
    } else {
        println!("⚠ Warning: {remaining} orphaned menu(s) still exist");
    }

    let (total_menus, total_assignments, menus_with_restaurants): (i64, i64, i64) =
        sqlx::query_as(FINAL_STATS).fetch_one(&mut *conn).await?;
    println!("\nFinal Statistics:");
    println!("  Total menus:             {total_menus}");
    println!("  Menus with restaurants:  {menus_with_restaurants}");
    println!("  Menu assignments:        {total_assignments}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::PresetConfirmation;

    const FIXTURE: &str = "\
        CREATE TABLE vendors (id SERIAL PRIMARY KEY, business_name TEXT); \
        CREATE TABLE menus (\
            id SERIAL PRIMARY KEY, \
            name TEXT NOT NULL, \
            vendor_id INT REFERENCES vendors (id), \
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()); \
        CREATE TABLE restaurant_menus (menu_id INT REFERENCES menus (id)); \
        INSERT INTO vendors (business_name) VALUES ('Pasta Place'); \
        INSERT INTO menus (name, vendor_id) VALUES ('attached', 1), ('orphan-a', 1), ('orphan-b', NULL); \
        INSERT INTO restaurant_menus (menu_id) VALUES (1);";

    async fn menu_count(conn: &mut PgConnection) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM menus")
            .fetch_one(conn)
            .await
            .unwrap()
    }

    #[sqlx::test]
    #[ignore = "requires a PostgreSQL server (DATABASE_URL)"]
    async fn dry_run_never_deletes_or_prompts(pool: sqlx::PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        sqlx::raw_sql(FIXTURE).execute(&mut *conn).await.unwrap();

        let mut confirm = PresetConfirmation::new(true);
        execute(&mut conn, true, &mut confirm).await.unwrap();

        assert_eq!(menu_count(&mut conn).await, 3);
        assert_eq!(confirm.times_asked(), 0);
    }

    #[sqlx::test]
    #[ignore = "requires a PostgreSQL server (DATABASE_URL)"]
    async fn execute_deletes_exactly_the_orphans(pool: sqlx::PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        sqlx::raw_sql(FIXTURE).execute(&mut *conn).await.unwrap();

        let mut confirm = PresetConfirmation::new(true);
        execute(&mut conn, false, &mut confirm).await.unwrap();
        assert_eq!(confirm.times_asked(), 1);

        let names: Vec<String> = sqlx::query_scalar("SELECT name FROM menus")
            .fetch_all(&mut *conn)
            .await
            .unwrap();
        assert_eq!(names, vec!["attached".to_string()]);

        let remaining: i64 = sqlx::query_scalar(ORPHAN_COUNT)
            .fetch_one(&mut *conn)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[sqlx::test]
    #[ignore = "requires a PostgreSQL server (DATABASE_URL)"]
    async fn declined_confirmation_aborts_without_mutation(pool: sqlx::PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        sqlx::raw_sql(FIXTURE).execute(&mut *conn).await.unwrap();

        let mut confirm = PresetConfirmation::new(false);
        let err = execute(&mut conn, false, &mut confirm).await.unwrap_err();
        assert!(matches!(err, Error::Aborted));
        assert_eq!(menu_count(&mut conn).await, 3);
    }

    #[sqlx::test]
    #[ignore = "requires a PostgreSQL server (DATABASE_URL)"]
    async fn clean_database_reports_clean(pool: sqlx::PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        sqlx::raw_sql(
            "CREATE TABLE vendors (id SERIAL PRIMARY KEY, business_name TEXT); \
             CREATE TABLE menus (id SERIAL PRIMARY KEY, name TEXT, vendor_id INT, \
                 created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()); \
             CREATE TABLE restaurant_menus (menu_id INT);",
        )
        .execute(&mut *conn)
        .await
        .unwrap();

        // Even in execute mode a clean database asks nothing.
        let mut confirm = PresetConfirmation::new(false);
        execute(&mut conn, false, &mut confirm).await.unwrap();
        assert_eq!(confirm.times_asked(), 0);
    }
}
