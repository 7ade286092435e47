use std::error::Error;

use sqlx::SqlitePool;
use tracing::info;

use crate::config::constant::PRICE_PER_KG;
use crate::database::farms::{self, FarmCreate};
use crate::database::slaughterhouses::{self, SlaughterhouseCreate};
use crate::database::trucks::{self, TransportCreate};
use crate::domain::scenario::{FarmSpec, Scenario, TruckSpec};
use crate::domain::types::{Slaughterhouse, TruckClass};

/// Populate empty tables with the default records. Each entity kind is
/// seeded independently, so a partially filled store is left alone.
pub async fn seed_if_empty(pool: &SqlitePool) -> Result<(), Box<dyn Error>> {
    seed_slaughterhouses(pool).await?;
    seed_farms(pool).await?;
    seed_transports(pool).await?;
    Ok(())
}

async fn count(pool: &SqlitePool, table: &str) -> Result<i64, sqlx::Error> {
    let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await?;
    Ok(n)
}

async fn seed_slaughterhouses(pool: &SqlitePool) -> Result<(), Box<dyn Error>> {
    if count(pool, "slaughterhouses").await? > 0 {
        return Ok(());
    }

    slaughterhouses::create_slaughterhouse(
        pool,
        SlaughterhouseCreate {
            name: Some("Escorxador Central de Catalunya".to_string()),
            lat: 41.930,
            lon: 2.254,
            capacity_per_day: 2000,
            price_per_kg: Some(1.56),
        },
    )
    .await?;
    info!("Seeded 1 slaughterhouse");
    Ok(())
}

async fn seed_farms(pool: &SqlitePool) -> Result<(), Box<dyn Error>> {
    if count(pool, "farms").await? > 0 {
        return Ok(());
    }

    let seed_rows = [
        ("F1", "Granja del Nord", 41.94, 2.26, 500, 98.5, 6.3, 18, 1.50),
        ("F2", "Granja del Sud", 41.92, 2.24, 600, 112.0, 6.1, 19, 1.52),
        ("F3", "Can Porc", 41.95, 2.21, 350, 105.3, 5.8, 17, 1.49),
        ("F4", "Masia del Riu", 41.91, 2.28, 420, 118.7, 6.0, 20, 1.51),
    ];

    for (id, name, lat, lon, pigs, weight, growth, age, price) in seed_rows {
        farms::create_farm(
            pool,
            FarmCreate {
                farm_id: id.to_string(),
                name: Some(name.to_string()),
                lat,
                lon,
                inventory_pigs: pigs,
                avg_weight_kg: weight,
                growth_rate_kg_per_week: Some(growth),
                age_weeks: Some(age),
                price_per_kg: Some(price),
            },
        )
        .await?;
    }
    info!("Seeded {} farms", seed_rows.len());
    Ok(())
}

async fn seed_transports(pool: &SqlitePool) -> Result<(), Box<dyn Error>> {
    if count(pool, "transports").await? > 0 {
        return Ok(());
    }

    trucks::create_transport(
        pool,
        TransportCreate {
            truck_type: "small".to_string(),
            capacity_tons: 10.0,
            cost_per_km: 1.15,
            max_hours_per_week: Some(40.0),
            fixed_weekly_cost: Some(2000.0),
            available: true,
        },
    )
    .await?;
    trucks::create_transport(
        pool,
        TransportCreate {
            truck_type: "large".to_string(),
            capacity_tons: 20.0,
            cost_per_km: 1.25,
            max_hours_per_week: Some(40.0),
            fixed_weekly_cost: Some(2500.0),
            available: true,
        },
    )
    .await?;
    info!("Seeded 2 transports");
    Ok(())
}

/// Build an engine scenario from the stored records: every available
/// transport and every farm, plus the first slaughterhouse (engine
/// defaults when none is stored).
pub async fn scenario_from_db(
    pool: &SqlitePool,
) -> Result<(Scenario, Slaughterhouse), Box<dyn Error>> {
    let farm_records = farms::list_farms(pool, 0, 10_000).await?;
    let transport_records = trucks::list_transports(pool, 0, 1_000).await?;
    let slaughterhouse_records = slaughterhouses::list_slaughterhouses(pool, 0, 1).await?;

    let farms = farm_records
        .iter()
        .map(|r| FarmSpec {
            id: r.farm_id.clone(),
            lat: r.lat,
            lon: r.lon,
            inventory: r.inventory_pigs.max(0) as u32,
            avg_weight: r.avg_weight_kg,
        })
        .collect();

    let trucks = transport_records
        .iter()
        .filter(|r| r.available)
        .map(|r| TruckSpec {
            id: r.transport_id.clone(),
            capacity_tons: r.capacity_tons,
            class: if r.truck_type == "large" {
                TruckClass::Large
            } else {
                TruckClass::Small
            },
            cost_per_km: Some(r.cost_per_km),
        })
        .collect();

    let slaughterhouse = slaughterhouse_records
        .first()
        .map(|r| Slaughterhouse {
            lat: r.lat,
            lon: r.lon,
            daily_capacity: r.capacity_per_day.max(0) as u32,
            price_per_kg: r.price_per_kg.unwrap_or(PRICE_PER_KG),
        })
        .unwrap_or_default();

    Ok((Scenario { trucks, farms }, slaughterhouse))
}
