use petgroom::{
    config::AppConfig,
    db,
    pricing::{format_peso, service_catalog},
    PersistenceGateway,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Startup error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let config = AppConfig::from_env();
    db::ensure_sqlite_dir(&config.database_url)?;

    let pool = db::connect(&config).await?;
    db::ensure_schema(&pool).await?;

    let gateway = PersistenceGateway::new(pool);
    db::seed_defaults(&gateway, &config).await?;
    log::info!("Opened pet grooming book at {}", config.database_url);

    println!("Services");
    for option in service_catalog() {
        println!("  {:<16} {:>12}", option.name, format_peso(option.price()));
    }

    let appointments = gateway.list_appointments().await;
    println!("Appointments ({})", appointments.len());
    for row in &appointments {
        println!(
            "  {}  {:<24} {:<16} {:<12} {:<16} {}",
            row.date, row.client_name, row.contact, row.pet_name, row.pet_breed, row.service
        );
    }

    let payments = gateway.list_payments().await;
    println!("Payments ({})", payments.len());
    for payment in &payments {
        println!(
            "  {:<24} {:<16} {:>12} {}",
            payment.client_name,
            payment.contact,
            format_peso(payment.total_paid),
            payment.status
        );
    }

    gateway.close().await;
    Ok(())
}
