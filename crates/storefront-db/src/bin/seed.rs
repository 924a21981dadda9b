//! # Seed Data Generator
//!
//! Fills the catalog with sample products for local development.
//!
//! ## Usage
//! ```bash
//! # Generate 100 products (default)
//! cargo run -p storefront-db --bin seed
//!
//! # Custom amount and database file
//! cargo run -p storefront-db --bin seed -- --db ./storefront.db --count 500
//! ```
//!
//! Each product gets a name built from a line and a variant, a price
//! between 4.99 and 89.99 and a stock level between 0 and 50. A catalog
//! that already has products is left alone.

use std::env;

use storefront_core::validation::validate_new_product;
use storefront_core::NewProduct;
use storefront_db::{Database, DbConfig, ProductStore};

/// Product lines with their base price in cents.
const LINES: &[(&str, i64)] = &[
    ("Ceramic Mug", 999),
    ("Cotton T-Shirt", 1999),
    ("Canvas Tote", 1499),
    ("Notebook", 699),
    ("Water Bottle", 2499),
    ("Desk Lamp", 4599),
    ("Wool Scarf", 2999),
    ("Phone Case", 1299),
    ("Backpack", 5999),
    ("Sticker Pack", 499),
];

/// Variants and their price addon in cents.
const VARIANTS: &[(&str, i64)] = &[
    ("Black", 0),
    ("White", 0),
    ("Navy", 200),
    ("Forest", 200),
    ("Limited Edition", 1500),
    ("Large", 800),
    ("Small", -100),
    ("Recycled", 300),
    ("Gift Set", 2500),
    ("Classic", 0),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 100;
    let mut db_path = String::from("./storefront.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if let Some(value) = args.get(i + 1) {
                    count = value.parse()?;
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if let Some(value) = args.get(i + 1) {
                    db_path = value.clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Storefront Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 100)");
                println!("  -d, --db <PATH>    Database file path (default: ./storefront.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => {
                eprintln!("Ignoring unknown argument: {}", other);
            }
        }
        i += 1;
    }

    println!("Storefront Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database, migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Catalog already has {} products, skipping seed.", existing);
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let products = db.products();
    let start = std::time::Instant::now();
    let mut generated = 0;

    for seed in 0..count {
        let product = generate_product(seed);
        validate_new_product(&product)?;

        if let Err(e) = products.create_product(&product).await {
            eprintln!("Failed to insert {}: {}", product.name, e);
            continue;
        }

        generated += 1;
        if generated % 50 == 0 {
            println!("  Generated {} products...", generated);
        }
    }

    println!();
    println!("✓ Generated {} products in {:?}", generated, start.elapsed());

    Ok(())
}

/// Builds the `seed`-th sample product.
///
/// Names cycle through every line/variant pair before repeating, after
/// which a batch number is appended.
fn generate_product(seed: usize) -> NewProduct {
    let (line, base_price) = LINES[seed % LINES.len()];
    let (variant, addon) = VARIANTS[(seed / LINES.len()) % VARIANTS.len()];
    let batch = seed / (LINES.len() * VARIANTS.len());

    let name = if batch == 0 {
        format!("{} {}", line, variant)
    } else {
        format!("{} {} #{}", line, variant, batch + 1)
    };

    NewProduct {
        description: format!("{} in {} finish.", line, variant.to_lowercase()),
        image: format!("https://picsum.photos/seed/storefront-{}/400/400", seed),
        name,
        price_cents: base_price + addon,
        quantity: ((seed * 7) % 51) as i64,
    }
}
