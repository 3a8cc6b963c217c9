//! # Seed Data Generator
//!
//! Populates a database with a sample catalog and a few recorded sales for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p stockbook-db --bin seed
//!
//! # Specify database path
//! cargo run -p stockbook-db --bin seed -- --db ./data/stockbook.db
//!
//! # Seed more generated products
//! cargo run -p stockbook-db --bin seed -- --count 200
//! ```

use std::env;

use stockbook_core::{format_price, ProductDraft};
use stockbook_db::{Database, DbConfig};

/// Hand-written catalog entries inserted first, before any generated filler.
const SAMPLE_PRODUCTS: &[(&str, Option<&str>, f64, i64, i64)] = &[
    ("USB-C Cable 1m", Some("CAB-001"), 4.99, 40, 10),
    ("USB-C Cable 2m", Some("CAB-002"), 6.99, 25, 10),
    ("HDMI Cable", Some("CAB-010"), 8.50, 12, 5),
    ("Wireless Mouse", Some("MOU-001"), 19.99, 8, 5),
    ("Mechanical Keyboard", Some("KEY-001"), 79.00, 4, 3),
    ("Laptop Stand", Some("STA-001"), 32.50, 6, 2),
    ("Webcam 1080p", Some("CAM-001"), 45.00, 3, 4),
    ("Zip Ties 100pk", None, 2.50, 200, 50),
    ("Cleaning Cloth", None, 1.25, 90, 20),
    ("Power Strip", Some("PWR-001"), 14.99, 15, 5),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = 0;
    let mut db_path = String::from("./stockbook_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(0);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Stockbook Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Extra generated products beyond the samples (default: 0)");
                println!("  -d, --db <PATH>    Database file path (default: ./stockbook_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Stockbook Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding catalog...");

    let mut ids = Vec::new();
    for (name, sku, price, quantity, min_quantity) in SAMPLE_PRODUCTS {
        let mut draft = ProductDraft::new(*name)
            .price(*price)
            .quantity(*quantity)
            .min_quantity(*min_quantity);
        if let Some(sku) = sku {
            draft = draft.sku(*sku);
        }

        match db.products().create(&draft).await {
            Ok(product) => ids.push(product.id),
            Err(e) => eprintln!("Failed to insert {}: {}", name, e),
        }
    }

    for n in 0..count {
        let draft = ProductDraft::new(format!("Generated Item {:04}", n))
            .sku(format!("GEN-{:04}", n))
            .price(0.99 + (n * 17 % 800) as f64 / 100.0)
            .quantity((n % 101) as i64);

        if let Err(e) = db.products().create(&draft).await {
            eprintln!("Failed to insert GEN-{:04}: {}", n, e);
        }
    }

    println!("✓ Seeded {} products", db.products().count().await?);

    // A few sales so the reports have something to show.
    println!();
    println!("Recording sample sales...");

    let mut recorded = 0;
    for (i, id) in ids.iter().take(5).enumerate() {
        match db.sales().record_sale(*id, (i as i64 % 3) + 1).await {
            Ok(_) => recorded += 1,
            Err(e) => eprintln!("Failed to record sale for product {}: {}", id, e),
        }
    }
    println!("✓ Recorded {} sales", recorded);

    println!();
    println!("Low stock:");
    for product in db.reports().low_stock().await? {
        println!(
            "  {} - {} on hand (reorder at {})",
            product.name, product.quantity, product.min_quantity
        );
    }

    println!();
    println!("Daily sales totals:");
    for total in db.reports().daily_sales_totals().await? {
        println!("  {}: {}", total.day, format_price(total.total));
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
