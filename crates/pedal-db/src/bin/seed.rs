//! # Seed Data Loader
//!
//! Populates the database with the sample bicycle-parts catalog and a demo
//! shopper account.
//!
//! ## Usage
//! ```bash
//! # Seed ./pedal_dev.db
//! cargo run -p pedal-db --bin seed
//!
//! # Specify database path and demo account
//! cargo run -p pedal-db --bin seed -- --db ./data/pedal.db --user rider@pedal.test
//! ```

use std::collections::BTreeMap;
use std::env;

use pedal_core::{Category, Money, ProductDraft};
use pedal_db::{Database, DbConfig};

/// (name, category, brand, price, original price, stock, featured, specs)
type SeedProduct = (
    &'static str,
    Category,
    &'static str,
    i64,
    Option<i64>,
    i64,
    bool,
    &'static [(&'static str, &'static str)],
);

const CATALOG: &[SeedProduct] = &[
    (
        "Fixie Urban Track 700c",
        Category::Fixie,
        "Pedal Works",
        3_450_000,
        Some(3_900_000),
        6,
        true,
        &[("Frame", "Hi-Ten Steel"), ("Wheel", "700c"), ("Gear", "46T x 16T")],
    ),
    (
        "Fixie Matte Black Pursuit",
        Category::Fixie,
        "Thrill",
        4_200_000,
        None,
        3,
        true,
        &[("Frame", "Chromoly 4130"), ("Wheel", "700c")],
    ),
    (
        "Velg Deep 50mm",
        Category::Velg,
        "Vuelta",
        850_000,
        Some(1_000_000),
        10,
        false,
        &[("Depth", "50mm"), ("Material", "Aluminium 6061"), ("Holes", "32H")],
    ),
    (
        "Velg Box Rim 30mm",
        Category::Velg,
        "Velocity",
        620_000,
        None,
        0,
        false,
        &[("Depth", "30mm"), ("Holes", "32H")],
    ),
    (
        "Ban Slick 700x23",
        Category::Ban,
        "Kenda",
        95_000,
        Some(120_000),
        25,
        false,
        &[("Size", "700x23c"), ("TPI", "60")],
    ),
    (
        "Ban Gumwall 700x28",
        Category::Ban,
        "Vittoria",
        210_000,
        None,
        14,
        true,
        &[("Size", "700x28c"), ("Sidewall", "Tan")],
    ),
    (
        "Gear Chainring 46T",
        Category::Gear,
        "Sugino",
        375_000,
        None,
        8,
        false,
        &[("Teeth", "46T"), ("BCD", "144mm")],
    ),
    (
        "Gear Cog 16T",
        Category::Gear,
        "Dura-Ace",
        180_000,
        None,
        20,
        false,
        &[("Teeth", "16T")],
    ),
    (
        "Frame Chromoly 52cm",
        Category::Frame,
        "Cinelli",
        2_750_000,
        Some(3_000_000),
        2,
        false,
        &[("Size", "52cm"), ("Material", "Chromoly 4130")],
    ),
    (
        "Saddle Slim Racing",
        Category::Saddle,
        "Selle Italia",
        320_000,
        None,
        12,
        false,
        &[("Rails", "Manganese"), ("Width", "135mm")],
    ),
    (
        "Stang Bullhorn 40cm",
        Category::Stang,
        "Nitto",
        275_000,
        None,
        9,
        false,
        &[("Width", "40cm"), ("Clamp", "25.4mm")],
    ),
    (
        "Stang Drop Bar 42cm",
        Category::Stang,
        "Deda",
        450_000,
        Some(500_000),
        0,
        false,
        &[("Width", "42cm"), ("Clamp", "31.8mm")],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./pedal_dev.db");
    let mut user_email = String::from("rider@pedal.test");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--user" | "-u" => {
                if i + 1 < args.len() {
                    user_email = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Pedal Storefront Seed Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>      Database file path (default: ./pedal_dev.db)");
                println!("  -u, --user <EMAIL>   Demo shopper email (default: rider@pedal.test)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🚲 Pedal Storefront Seed");
    println!("========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if db.users().find_by_email(&user_email).await?.is_none() {
        db.users().create(&user_email, "Demo Rider").await?;
        println!("✓ Created demo shopper {}", user_email);
    } else {
        println!("✓ Demo shopper {} already exists", user_email);
    }

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping catalog seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let mut inserted = 0;
    for entry in CATALOG {
        let draft = to_draft(entry);
        match db.products().insert(&draft).await {
            Ok(record) => {
                inserted += 1;
                println!(
                    "  + {:<28} {:>14}  [{}]",
                    record.product.name, record.product.price, record.product.category
                );
            }
            Err(e) => eprintln!("Failed to insert {}: {}", draft.name, e),
        }
    }

    println!();
    println!("✓ Seeded {} products", inserted);

    Ok(())
}

fn to_draft(entry: &SeedProduct) -> ProductDraft {
    let (name, category, brand, price, original, stock, featured, specs) = *entry;

    let specifications: BTreeMap<String, String> = specs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    ProductDraft {
        name: name.to_string(),
        description: format!("{} by {}", name, brand),
        price: Money::from_units(price),
        original_price: original.map(Money::from_units),
        stock,
        image: format!("/images/{}.jpg", name.to_lowercase().replace(' ', "-")),
        category,
        brand: brand.to_string(),
        featured,
        specifications,
    }
}
