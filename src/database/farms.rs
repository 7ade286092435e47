use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Farms carry caller-supplied ids; the rest of the record mirrors the
/// production inventory store.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct FarmRecord {
    pub farm_id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub inventory_pigs: i64,
    pub avg_weight_kg: f64,
    pub growth_rate_kg_per_week: Option<f64>,
    pub age_weeks: Option<i64>,
    pub price_per_kg: Option<f64>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FarmCreate {
    pub farm_id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub inventory_pigs: i64,
    pub avg_weight_kg: f64,
    #[serde(default)]
    pub growth_rate_kg_per_week: Option<f64>,
    #[serde(default)]
    pub age_weeks: Option<i64>,
    #[serde(default)]
    pub price_per_kg: Option<f64>,
}

/// Partial update; unknown fields are rejected at the serde boundary.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FarmUpdateFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub inventory_pigs: Option<i64>,
    #[serde(default)]
    pub avg_weight_kg: Option<f64>,
    #[serde(default)]
    pub growth_rate_kg_per_week: Option<f64>,
    #[serde(default)]
    pub age_weeks: Option<i64>,
    #[serde(default)]
    pub price_per_kg: Option<f64>,
}

pub async fn list_farms(
    pool: &SqlitePool,
    skip: i64,
    limit: i64,
) -> Result<Vec<FarmRecord>, sqlx::Error> {
    sqlx::query_as::<_, FarmRecord>("SELECT * FROM farms ORDER BY farm_id LIMIT ? OFFSET ?")
        .bind(limit)
        .bind(skip)
        .fetch_all(pool)
        .await
}

pub async fn get_farm(pool: &SqlitePool, farm_id: &str) -> Result<Option<FarmRecord>, sqlx::Error> {
    sqlx::query_as::<_, FarmRecord>("SELECT * FROM farms WHERE farm_id = ?")
        .bind(farm_id)
        .fetch_optional(pool)
        .await
}

pub async fn create_farm(pool: &SqlitePool, input: FarmCreate) -> Result<FarmRecord, sqlx::Error> {
    let created_at = Utc::now().timestamp();
    sqlx::query(
        r#"
        INSERT INTO farms (
            farm_id, name, lat, lon, inventory_pigs, avg_weight_kg,
            growth_rate_kg_per_week, age_weeks, price_per_kg, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.farm_id)
    .bind(input.name.clone().unwrap_or_default())
    .bind(input.lat)
    .bind(input.lon)
    .bind(input.inventory_pigs)
    .bind(input.avg_weight_kg)
    .bind(input.growth_rate_kg_per_week)
    .bind(input.age_weeks)
    .bind(input.price_per_kg)
    .bind(created_at)
    .execute(pool)
    .await?;

    Ok(FarmRecord {
        farm_id: input.farm_id,
        name: input.name.unwrap_or_default(),
        lat: input.lat,
        lon: input.lon,
        inventory_pigs: input.inventory_pigs,
        avg_weight_kg: input.avg_weight_kg,
        growth_rate_kg_per_week: input.growth_rate_kg_per_week,
        age_weeks: input.age_weeks,
        price_per_kg: input.price_per_kg,
        created_at,
    })
}

pub async fn update_farm(
    pool: &SqlitePool,
    farm_id: &str,
    fields: FarmUpdateFields,
) -> Result<Option<FarmRecord>, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE farms SET
            name = COALESCE(?, name),
            lat = COALESCE(?, lat),
            lon = COALESCE(?, lon),
            inventory_pigs = COALESCE(?, inventory_pigs),
            avg_weight_kg = COALESCE(?, avg_weight_kg),
            growth_rate_kg_per_week = COALESCE(?, growth_rate_kg_per_week),
            age_weeks = COALESCE(?, age_weeks),
            price_per_kg = COALESCE(?, price_per_kg)
        WHERE farm_id = ?
        "#,
    )
    .bind(fields.name)
    .bind(fields.lat)
    .bind(fields.lon)
    .bind(fields.inventory_pigs)
    .bind(fields.avg_weight_kg)
    .bind(fields.growth_rate_kg_per_week)
    .bind(fields.age_weeks)
    .bind(fields.price_per_kg)
    .bind(farm_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_farm(pool, farm_id).await
}

pub async fn delete_farm(pool: &SqlitePool, farm_id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM farms WHERE farm_id = ?")
        .bind(farm_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
