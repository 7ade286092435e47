use dotenv::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::error::Error;
use std::str::FromStr;
use tracing::info;

pub async fn db_connection() -> Result<SqlitePool, Box<dyn Error>> {
    dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        tracing::warn!("DATABASE_URL not set, using default SQLite file");
        "sqlite:porcfleet.sqlite".to_string()
    });

    let pool = connect(&database_url).await?;
    info!("Connected to SQLite database at {database_url}");
    Ok(pool)
}

pub async fn connect(database_url: &str) -> Result<SqlitePool, Box<dyn Error>> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    // An in-memory database exists per connection; cap the pool so
    // every caller sees the same one.
    let pool = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?
    } else {
        SqlitePool::connect_with(options).await?
    };

    create_schema(&pool).await?;
    Ok(pool)
}

async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS farms (
            farm_id TEXT PRIMARY KEY,
            name TEXT NOT NULL DEFAULT '',
            lat REAL NOT NULL,
            lon REAL NOT NULL,
            inventory_pigs INTEGER NOT NULL,
            avg_weight_kg REAL NOT NULL,
            growth_rate_kg_per_week REAL,
            age_weeks INTEGER,
            price_per_kg REAL,
            created_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS slaughterhouses (
            slaughterhouse_id TEXT PRIMARY KEY,
            name TEXT NOT NULL DEFAULT '',
            lat REAL NOT NULL,
            lon REAL NOT NULL,
            capacity_per_day INTEGER NOT NULL,
            price_per_kg REAL,
            created_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS transports (
            transport_id TEXT PRIMARY KEY,
            truck_type TEXT NOT NULL,
            capacity_tons REAL NOT NULL,
            cost_per_km REAL NOT NULL,
            max_hours_per_week REAL,
            fixed_weekly_cost REAL,
            available INTEGER NOT NULL DEFAULT 1,
            created_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
