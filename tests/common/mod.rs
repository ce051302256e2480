#![allow(dead_code)]

use chrono::NaiveDate;
use petgroom::{config::AppConfig, db, models::NewAppointment, PersistenceGateway};

/// Gateway over a fresh in-memory store with the schema applied.
pub async fn gateway() -> PersistenceGateway {
    let config = AppConfig::from_lookup(|key| match key {
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        _ => None,
    });
    let pool = db::connect(&config).await.expect("open in-memory store");
    db::ensure_schema(&pool).await.expect("create schema");
    PersistenceGateway::new(pool)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn mochi() -> NewAppointment {
    NewAppointment {
        client_name: "Maria Santos".into(),
        contact: "0917 555 0101".into(),
        pet_name: "Mochi".into(),
        pet_breed: "Shih Tzu".into(),
        service: "FullGroom ₱600".into(),
        date: date(2026, 11, 3),
    }
}

pub fn bantay() -> NewAppointment {
    NewAppointment {
        client_name: "Jose Reyes".into(),
        contact: "jose@example.ph".into(),
        pet_name: "Bantay".into(),
        pet_breed: "Aspin".into(),
        service: "Vaccination ₱1000".into(),
        date: date(2026, 11, 4),
    }
}
