use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SlaughterhouseRecord {
    pub slaughterhouse_id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub capacity_per_day: i64,
    pub price_per_kg: Option<f64>,
    pub created_at: i64,
}

/// Ids are server-assigned on create.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlaughterhouseCreate {
    #[serde(default)]
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub capacity_per_day: i64,
    #[serde(default)]
    pub price_per_kg: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlaughterhouseUpdateFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub capacity_per_day: Option<i64>,
    #[serde(default)]
    pub price_per_kg: Option<f64>,
}

pub async fn list_slaughterhouses(
    pool: &SqlitePool,
    skip: i64,
    limit: i64,
) -> Result<Vec<SlaughterhouseRecord>, sqlx::Error> {
    sqlx::query_as::<_, SlaughterhouseRecord>(
        "SELECT * FROM slaughterhouses ORDER BY slaughterhouse_id LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(skip)
    .fetch_all(pool)
    .await
}

pub async fn get_slaughterhouse(
    pool: &SqlitePool,
    slaughterhouse_id: &str,
) -> Result<Option<SlaughterhouseRecord>, sqlx::Error> {
    sqlx::query_as::<_, SlaughterhouseRecord>(
        "SELECT * FROM slaughterhouses WHERE slaughterhouse_id = ?",
    )
    .bind(slaughterhouse_id)
    .fetch_optional(pool)
    .await
}

pub async fn create_slaughterhouse(
    pool: &SqlitePool,
    input: SlaughterhouseCreate,
) -> Result<SlaughterhouseRecord, sqlx::Error> {
    let slaughterhouse_id = Uuid::new_v4().to_string();
    let created_at = Utc::now().timestamp();
    sqlx::query(
        r#"
        INSERT INTO slaughterhouses (
            slaughterhouse_id, name, lat, lon, capacity_per_day, price_per_kg, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&slaughterhouse_id)
    .bind(input.name.clone().unwrap_or_default())
    .bind(input.lat)
    .bind(input.lon)
    .bind(input.capacity_per_day)
    .bind(input.price_per_kg)
    .bind(created_at)
    .execute(pool)
    .await?;

    Ok(SlaughterhouseRecord {
        slaughterhouse_id,
        name: input.name.unwrap_or_default(),
        lat: input.lat,
        lon: input.lon,
        capacity_per_day: input.capacity_per_day,
        price_per_kg: input.price_per_kg,
        created_at,
    })
}

pub async fn update_slaughterhouse(
    pool: &SqlitePool,
    slaughterhouse_id: &str,
    fields: SlaughterhouseUpdateFields,
) -> Result<Option<SlaughterhouseRecord>, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE slaughterhouses SET
            name = COALESCE(?, name),
            lat = COALESCE(?, lat),
            lon = COALESCE(?, lon),
            capacity_per_day = COALESCE(?, capacity_per_day),
            price_per_kg = COALESCE(?, price_per_kg)
        WHERE slaughterhouse_id = ?
        "#,
    )
    .bind(fields.name)
    .bind(fields.lat)
    .bind(fields.lon)
    .bind(fields.capacity_per_day)
    .bind(fields.price_per_kg)
    .bind(slaughterhouse_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_slaughterhouse(pool, slaughterhouse_id).await
}

pub async fn delete_slaughterhouse(
    pool: &SqlitePool,
    slaughterhouse_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM slaughterhouses WHERE slaughterhouse_id = ?")
        .bind(slaughterhouse_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
