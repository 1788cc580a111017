//! # Seed Data Generator
//!
//! Populates the database with a demo catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./stockpile.db with the demo catalog
//! cargo run -p stockpile-db --bin seed
//!
//! # Also register some demo sales
//! cargo run -p stockpile-db --bin seed -- --sales 20
//!
//! # Specify database path
//! cargo run -p stockpile-db --bin seed -- --db ./data/stockpile.db
//! ```
//!
//! Products are created with zero stock and then receive an inbound
//! "Opening stock" movement, so the movement ledger accounts for every unit.

use std::env;
use stockpile_core::{Money, MovementType, NewProduct, NewSale, NewStockMovement};
use stockpile_db::{Database, DbConfig};

/// Demo catalog: (name, category, price in cents, opening stock, minimum stock).
const CATALOG: &[(&str, &str, i64, i64, i64)] = &[
    ("Red Bull 250ml", "Energy Drink", 799, 48, 12),
    ("Red Bull 355ml", "Energy Drink", 999, 36, 12),
    ("Red Bull 473ml", "Energy Drink", 1199, 24, 8),
    ("Red Bull Sugarfree 250ml", "Sugar Free", 799, 30, 10),
    ("Red Bull Zero 250ml", "Sugar Free", 799, 6, 10),
    ("Red Bull Tropical Edition", "Editions", 899, 18, 6),
    ("Red Bull Watermelon Edition", "Editions", 899, 4, 6),
    ("Red Bull Coconut Berry Edition", "Editions", 899, 12, 6),
    ("Red Bull 4-Pack 250ml", "Packs", 2899, 10, 4),
    ("Red Bull 24-Pack 250ml", "Packs", 15999, 3, 2),
];

const CUSTOMERS: &[&str] = &["Ana", "Bruno", "Carla", "Diego", "Elisa"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut sales: usize = 0;
    let mut db_path = String::from("./stockpile.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--sales" | "-s" => {
                if i + 1 < args.len() {
                    sales = args[i + 1].parse().unwrap_or(0);
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
                println!("Stockpile Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -s, --sales <N>    Demo sales to register (default: 0)");
                println!("  -d, --db <PATH>    Database file path (default: ./stockpile.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Stockpile Seed Data Generator");
    println!("================================");
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
    println!("Creating catalog...");

    let mut product_ids = Vec::with_capacity(CATALOG.len());
    for (name, category, price_cents, opening_stock, min_stock) in CATALOG {
        let product = match db
            .products()
            .insert(NewProduct {
                name: name.to_string(),
                category: category.to_string(),
                price: Money::from_cents(*price_cents),
                min_stock: *min_stock,
                stock: 0,
            })
            .await
        {
            Ok(product) => product,
            Err(e) => {
                eprintln!("Failed to insert {}: {}", name, e);
                continue;
            }
        };

        db.movements()
            .create(NewStockMovement {
                product_id: product.id.clone(),
                movement_type: MovementType::Inbound,
                quantity: *opening_stock,
                reason: "Opening stock".to_string(),
            })
            .await?;

        println!("  {} ({}) × {}", product.name, product.price(), opening_stock);
        product_ids.push(product.id);
    }

    if sales > 0 && !product_ids.is_empty() {
        println!();
        println!("Registering {} demo sales...", sales);

        let mut registered = 0;
        for n in 0..sales {
            let result = db
                .sales()
                .create(NewSale {
                    product_id: product_ids[(n * 7) % product_ids.len()].clone(),
                    quantity: (n % 3) as i64 + 1,
                    customer_name: Some(CUSTOMERS[n % CUSTOMERS.len()].to_string()),
                })
                .await;

            match result {
                Ok(_) => registered += 1,
                Err(e) => eprintln!("  Skipped sale {}: {}", n + 1, e),
            }
        }
        println!("✓ Registered {} sales", registered);
    }

    let low_stock = db.products().low_stock().await?;
    println!();
    println!("✓ Seed complete! {} products, {} low on stock", product_ids.len(), low_stock.len());

    db.close().await;
    Ok(())
}
