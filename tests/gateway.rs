mod common;

use assert_matches::assert_matches;
use petgroom::{
    config::AppConfig,
    db,
    models::{AppointmentKey, NewAppointment, NewPayment},
    pricing::PaymentStatus,
    GatewayError,
};
use rust_decimal::Decimal;

use common::{bantay, date, gateway, mochi};

async fn book(gateway: &petgroom::PersistenceGateway, values: &NewAppointment) -> bool {
    gateway
        .create_appointment(
            &values.client_name,
            &values.contact,
            &values.pet_name,
            &values.pet_breed,
            &values.service,
            values.date,
        )
        .await
}

fn key_of(values: &NewAppointment) -> AppointmentKey {
    AppointmentKey::new(values.client_name.clone(), values.contact.clone(), values.date)
}

#[tokio::test]
async fn created_appointment_is_listed() {
    let gateway = gateway().await;
    assert!(book(&gateway, &mochi()).await);

    let rows = gateway.list_appointments().await;
    assert_eq!(rows.len(), 1);
    assert!(rows[0].matches(&mochi()));
    assert!(!rows[0].id.is_empty());
}

#[tokio::test]
async fn listing_twice_returns_the_same_rows() {
    let gateway = gateway().await;
    assert!(book(&gateway, &mochi()).await);
    assert!(book(&gateway, &bantay()).await);

    let first = gateway.list_appointments().await;
    let second = gateway.list_appointments().await;
    assert_eq!(first, second);
    assert!(first[0].matches(&mochi()));
    assert!(first[1].matches(&bantay()));
}

#[tokio::test]
async fn blank_fields_are_not_stored() {
    let gateway = gateway().await;
    let mut values = mochi();
    values.pet_name = "  ".into();

    assert!(!book(&gateway, &values).await);
    assert_matches!(
        gateway.try_create_appointment(&values).await,
        Err(GatewayError::InvalidInput(_))
    );
    assert!(gateway.list_appointments().await.is_empty());
}

#[tokio::test]
async fn update_replaces_the_keyed_row() {
    let gateway = gateway().await;
    assert!(book(&gateway, &mochi()).await);
    assert!(book(&gateway, &bantay()).await);

    let mut changed = mochi();
    changed.service = "Trim Groom ₱300".into();
    changed.date = date(2026, 11, 10);
    assert!(gateway.update_appointment(&key_of(&mochi()), &changed).await);

    let rows = gateway.list_appointments().await;
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().any(|row| row.matches(&changed)));
    assert!(!rows.iter().any(|row| row.matches(&mochi())));
    assert!(rows.iter().any(|row| row.matches(&bantay())));
}

#[tokio::test]
async fn update_without_match_fails() {
    let gateway = gateway().await;
    assert!(book(&gateway, &mochi()).await);

    let stale = AppointmentKey::new("Maria Santos", "0917 555 0101", date(2026, 12, 25));
    assert!(!gateway.update_appointment(&stale, &bantay()).await);
    assert_matches!(
        gateway.try_update_appointment(&stale, &bantay()).await,
        Err(GatewayError::NoMatchingRow { entity: "appointment", .. })
    );
    assert!(gateway.list_appointments().await[0].matches(&mochi()));
}

#[tokio::test]
async fn natural_key_operations_touch_every_duplicate() {
    let gateway = gateway().await;
    let mut sibling = mochi();
    sibling.pet_name = "Mocha".into();
    assert!(book(&gateway, &mochi()).await);
    assert!(book(&gateway, &sibling).await);

    let mut changed = mochi();
    changed.pet_breed = "Lhasa Apso".into();
    let affected = gateway
        .try_update_appointment(&key_of(&mochi()), &changed)
        .await
        .unwrap();
    assert_eq!(affected, 2);
    assert!(gateway
        .list_appointments()
        .await
        .iter()
        .all(|row| row.matches(&changed)));

    let removed = gateway.try_delete_appointment(&key_of(&mochi())).await.unwrap();
    assert_eq!(removed, 2);
    assert!(gateway.list_appointments().await.is_empty());
}

#[tokio::test]
async fn surrogate_id_targets_one_duplicate() {
    let gateway = gateway().await;
    let first = gateway.try_create_appointment(&mochi()).await.unwrap();
    let second = gateway.try_create_appointment(&mochi()).await.unwrap();
    assert_ne!(first.id, second.id);

    let mut changed = mochi();
    changed.service = "Full Bath ₱200".into();
    gateway.update_appointment_by_id(&second.id, &changed).await.unwrap();

    assert!(gateway.fetch_appointment(&first.id).await.unwrap().matches(&mochi()));
    assert!(gateway.fetch_appointment(&second.id).await.unwrap().matches(&changed));

    gateway.delete_appointment_by_id(&first.id).await.unwrap();
    let rows = gateway.list_appointments().await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, second.id);

    assert_matches!(
        gateway.delete_appointment_by_id(&first.id).await,
        Err(GatewayError::NoMatchingRow { .. })
    );
    assert_matches!(
        gateway.fetch_appointment("missing").await,
        Err(GatewayError::NoMatchingRow { .. })
    );
}

#[tokio::test]
async fn delete_removes_only_the_keyed_rows() {
    let gateway = gateway().await;
    assert!(book(&gateway, &mochi()).await);
    assert!(book(&gateway, &bantay()).await);

    let m = mochi();
    assert!(gateway.delete_appointment(&m.client_name, &m.contact, m.date).await);
    let rows = gateway.list_appointments().await;
    assert_eq!(rows.len(), 1);
    assert!(rows[0].matches(&bantay()));

    assert!(!gateway.delete_appointment(&m.client_name, &m.contact, m.date).await);
}

#[tokio::test]
async fn payments_are_listed_and_deleted_by_exact_match() {
    let gateway = gateway().await;
    let downpayment = Decimal::new(300, 0);
    assert!(
        gateway
            .create_payment("Maria Santos", "0917 555 0101", downpayment, PaymentStatus::Downpayment)
            .await
    );
    assert!(
        gateway
            .create_payment("Jose Reyes", "jose@example.ph", Decimal::new(100_000, 2), PaymentStatus::Paid)
            .await
    );

    let payments = gateway.list_payments().await;
    assert_eq!(payments.len(), 2);
    assert_eq!(payments[0].total_paid, Decimal::new(30_000, 2));
    assert_eq!(payments[0].total_paid.to_string(), "300.00");
    assert_eq!(payments[0].status, PaymentStatus::Downpayment);

    assert!(
        !gateway
            .delete_payment("Maria Santos", "0917 555 0101", downpayment, PaymentStatus::Paid)
            .await
    );
    assert!(
        !gateway
            .delete_payment("Maria Santos", "0917 555 0101", Decimal::new(600, 0), PaymentStatus::Downpayment)
            .await
    );
    assert_eq!(gateway.list_payments().await.len(), 2);

    assert!(
        gateway
            .delete_payment("Maria Santos", "0917 555 0101", downpayment, PaymentStatus::Downpayment)
            .await
    );
    let remaining = gateway.list_payments().await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].client_name, "Jose Reyes");
}

#[tokio::test]
async fn negative_payments_are_refused() {
    let gateway = gateway().await;
    let values = NewPayment {
        client_name: "Maria Santos".into(),
        contact: "0917 555 0101".into(),
        total_paid: Decimal::new(-100, 0),
        status: PaymentStatus::Paid,
    };
    assert_matches!(
        gateway.try_create_payment(&values).await,
        Err(GatewayError::InvalidInput(_))
    );
    assert!(gateway.list_payments().await.is_empty());
}

#[tokio::test]
async fn duplicate_email_registration_fails() {
    let gateway = gateway().await;
    assert!(gateway.register_user("Ana Cruz", "ana@shop.ph", "groom-on").await);
    assert!(!gateway.register_user("Ana Dela Cruz", "ana@shop.ph", "other-pass").await);
    assert_matches!(
        gateway.try_register_user("Ana Dela Cruz", "ana@shop.ph", "other-pass").await,
        Err(GatewayError::ConstraintViolation(_))
    );

    assert!(gateway.validate_user("ana@shop.ph", "groom-on").await);
    assert!(!gateway.validate_user("ana@shop.ph", "other-pass").await);
    assert!(!gateway.validate_user("ana@shop.ph", "Groom-on").await);
    assert!(!gateway.validate_user("nobody@shop.ph", "groom-on").await);
}

#[tokio::test]
async fn passwords_are_not_stored_verbatim() {
    let gateway = gateway().await;
    let account = gateway
        .try_register_user("Ana Cruz", "ana@shop.ph", "groom-on")
        .await
        .unwrap();
    assert_eq!(account.email, "ana@shop.ph");

    let (stored,): (String,) = sqlx::query_as("SELECT password_hash FROM users WHERE email = ?")
        .bind("ana@shop.ph")
        .fetch_one(gateway.pool())
        .await
        .unwrap();
    assert_ne!(stored, "groom-on");
    assert!(stored.starts_with("$argon2"));

    let validated = gateway.try_validate_user("ana@shop.ph", "groom-on").await.unwrap();
    assert_eq!(validated.id, account.id);
    assert_matches!(
        gateway.try_validate_user("ana@shop.ph", "wrong").await,
        Err(GatewayError::InvalidCredentials)
    );
}

#[tokio::test]
async fn closed_store_fails_quietly() {
    let gateway = gateway().await;
    assert!(book(&gateway, &mochi()).await);
    gateway.close().await;

    assert!(gateway.list_appointments().await.is_empty());
    assert!(gateway.list_payments().await.is_empty());
    assert!(!book(&gateway, &bantay()).await);
    assert!(!gateway.validate_user("ana@shop.ph", "groom-on").await);
    assert_matches!(
        gateway.fetch_appointments().await,
        Err(GatewayError::Connectivity(_))
    );
}

#[tokio::test]
async fn seed_account_is_created_once() {
    let gateway = gateway().await;
    let config = AppConfig::from_lookup(|key| match key {
        "PETGROOM_SEED_EMAIL" => Some("desk@shop.ph".to_string()),
        "PETGROOM_SEED_PASSWORD" => Some("counter-pass".to_string()),
        _ => None,
    });

    db::seed_defaults(&gateway, &config).await.unwrap();
    db::seed_defaults(&gateway, &config).await.unwrap();

    assert!(gateway.user_exists("desk@shop.ph").await.unwrap());
    assert!(gateway.validate_user("desk@shop.ph", "counter-pass").await);
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(gateway.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
}
