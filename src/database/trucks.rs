use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TransportRecord {
    pub transport_id: String,
    pub truck_type: String,
    pub capacity_tons: f64,
    pub cost_per_km: f64,
    pub max_hours_per_week: Option<f64>,
    pub fixed_weekly_cost: Option<f64>,
    pub available: bool,
    pub created_at: i64,
}

/// Ids are server-assigned on create.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransportCreate {
    pub truck_type: String,
    pub capacity_tons: f64,
    pub cost_per_km: f64,
    #[serde(default)]
    pub max_hours_per_week: Option<f64>,
    #[serde(default)]
    pub fixed_weekly_cost: Option<f64>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransportUpdateFields {
    #[serde(default)]
    pub truck_type: Option<String>,
    #[serde(default)]
    pub capacity_tons: Option<f64>,
    #[serde(default)]
    pub cost_per_km: Option<f64>,
    #[serde(default)]
    pub max_hours_per_week: Option<f64>,
    #[serde(default)]
    pub fixed_weekly_cost: Option<f64>,
    #[serde(default)]
    pub available: Option<bool>,
}

pub async fn list_transports(
    pool: &SqlitePool,
    skip: i64,
    limit: i64,
) -> Result<Vec<TransportRecord>, sqlx::Error> {
    sqlx::query_as::<_, TransportRecord>(
        "SELECT * FROM transports ORDER BY transport_id LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(skip)
    .fetch_all(pool)
    .await
}

pub async fn get_transport(
    pool: &SqlitePool,
    transport_id: &str,
) -> Result<Option<TransportRecord>, sqlx::Error> {
    sqlx::query_as::<_, TransportRecord>("SELECT * FROM transports WHERE transport_id = ?")
        .bind(transport_id)
        .fetch_optional(pool)
        .await
}

pub async fn create_transport(
    pool: &SqlitePool,
    input: TransportCreate,
) -> Result<TransportRecord, sqlx::Error> {
    let transport_id = Uuid::new_v4().to_string();
    let created_at = Utc::now().timestamp();
    sqlx::query(
        r#"
        INSERT INTO transports (
            transport_id, truck_type, capacity_tons, cost_per_km,
            max_hours_per_week, fixed_weekly_cost, available, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&transport_id)
    .bind(&input.truck_type)
    .bind(input.capacity_tons)
    .bind(input.cost_per_km)
    .bind(input.max_hours_per_week)
    .bind(input.fixed_weekly_cost)
    .bind(input.available)
    .bind(created_at)
    .execute(pool)
    .await?;

    Ok(TransportRecord {
        transport_id,
        truck_type: input.truck_type,
        capacity_tons: input.capacity_tons,
        cost_per_km: input.cost_per_km,
        max_hours_per_week: input.max_hours_per_week,
        fixed_weekly_cost: input.fixed_weekly_cost,
        available: input.available,
        created_at,
    })
}

pub async fn update_transport(
    pool: &SqlitePool,
    transport_id: &str,
    fields: TransportUpdateFields,
) -> Result<Option<TransportRecord>, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE transports SET
            truck_type = COALESCE(?, truck_type),
            capacity_tons = COALESCE(?, capacity_tons),
            cost_per_km = COALESCE(?, cost_per_km),
            max_hours_per_week = COALESCE(?, max_hours_per_week),
            fixed_weekly_cost = COALESCE(?, fixed_weekly_cost),
            available = COALESCE(?, available)
        WHERE transport_id = ?
        "#,
    )
    .bind(fields.truck_type)
    .bind(fields.capacity_tons)
    .bind(fields.cost_per_km)
    .bind(fields.max_hours_per_week)
    .bind(fields.fixed_weekly_cost)
    .bind(fields.available)
    .bind(transport_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_transport(pool, transport_id).await
}

pub async fn delete_transport(pool: &SqlitePool, transport_id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM transports WHERE transport_id = ?")
        .bind(transport_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
