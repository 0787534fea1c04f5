//! # Seed Data Generator
//!
//! Populates the database with a demo catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./vitrina_dev.db
//! cargo run -p vitrina-db --bin seed
//!
//! # Specify database path
//! cargo run -p vitrina-db --bin seed -- --db ./data/vitrina.db
//! ```
//!
//! ## Generated Data
//! - 4 stores (store 0 is the head office and stays hidden)
//! - Every model × color × size below, in both ALU layouts
//! - List price (level 1) plus sale levels 3 and 5
//! - Stock spread over the stores, some sizes left at zero
//! - A handful of promotions exercising AND/OR filters and season ranges

use chrono::{Days, Local};
use std::env;
use vitrina_core::{
    Benefit, Combinator, FilterCondition, Money, ProductAttributes, Promotion, Scalar, Store,
};
use vitrina_db::{Database, DbConfig};

const STORES: &[(i64, &str, &str)] = &[
    (0, "Casa Matriz", "B00"),
    (1, "Parque Arauco", "B01"),
    (2, "Costanera Center", "B02"),
    (3, "Mall Plaza Vespucio", "B03"),
];

/// (model, description, family, season, collection, list price in pesos)
const MODELS: &[(&str, &str, &str, &str, &str, i64)] = &[
    ("123456789", "CHAQUETA CUERO", "CHAQUETAS", "INV2024", "URBANA", 89_990),
    ("223456789", "CAMISA LINO", "CAMISAS", "VER2024", "RESORT", 29_990),
    ("32345678901", "ZAPATO DERBY", "CALZADO", "VER2025", "CLASICA", 59_990),
    ("42345678901", "PANTALON CHINO", "PANTALONES", "INV2023", "URBANA", 19_990),
];

const COLORS: &[(&str, &str)] = &[("RJO", "ROJO"), ("AZU", "AZUL"), ("NEG", "NEGRO")];

const APPAREL_SIZES: &[&str] = &["S", "M", "L", "XL"];
const SHOE_SIZES: &[&str] = &["38", "40", "42"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./vitrina_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Vitrina Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./vitrina_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Vitrina Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database, migrations applied");

    if !db.stores().list_active().await?.is_empty() {
        println!("⚠ Database already has stores");
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    for (store_no, name, warehouse) in STORES {
        let store = Store {
            store_no: *store_no,
            name: name.to_string(),
            address: None,
            warehouse: Some(warehouse.to_string()),
            sap_code: Some(format!("SAP{:03}", store_no)),
            brand: Some("ITALMOD".to_string()),
        };
        db.stores().upsert(&store, true).await?;
    }
    println!("✓ {} stores", STORES.len());

    let products = db.products();
    let mut generated = 0usize;

    for (model_idx, (model, description, family, season, collection, pesos)) in
        MODELS.iter().enumerate()
    {
        let sizes = if *family == "CALZADO" { SHOE_SIZES } else { APPAREL_SIZES };
        let list_price = Money::from_major_minor(*pesos, 0);

        for (color_idx, (color_code, color)) in COLORS.iter().enumerate() {
            for (size_idx, size) in sizes.iter().enumerate() {
                let alu = format!("{}{}{}", model, color_code, size);
                let product = ProductAttributes {
                    alu: alu.clone(),
                    description: Some(description.to_string()),
                    window: Some(format!("VITRINA {}", (b'A' + model_idx as u8) as char)),
                    season: Some(season.to_string()),
                    collection: Some(collection.to_string()),
                    family: Some(family.to_string()),
                    brand: Some("ITALMOD".to_string()),
                    model: Some(model.to_string()),
                    color: Some(color.to_string()),
                    size: Some(size.to_string()),
                    list_price: Some(list_price),
                };

                if let Err(e) = products.insert(&product).await {
                    eprintln!("Failed to insert {}: {}", alu, e);
                    continue;
                }

                products
                    .set_price(&alu, 3, Money::from_cents(list_price.cents() * 90 / 100))
                    .await?;
                products
                    .set_price(&alu, 5, Money::from_cents(list_price.cents() * 80 / 100))
                    .await?;

                for (store_no, _, _) in STORES.iter().skip(1) {
                    let seed = model_idx * 31 + color_idx * 7 + size_idx * 3 + *store_no as usize;
                    products.set_stock(*store_no, &alu, (seed % 6) as i64).await?;
                }

                generated += 1;
            }
        }
    }
    println!("✓ {} products with prices and stock", generated);

    let end = Local::now().date_naive().checked_add_days(Days::new(60));
    let all_stores = [1, 2, 3];
    let promotions = demo_promotions(end);
    for promotion in &promotions {
        db.promotions().insert(promotion, &all_stores).await?;
    }
    println!("✓ {} promotions", promotions.len());

    println!();
    println!("✓ Seed complete!");
    println!("  Try: GET /api/best-promotion/123456789RJOM/1");

    Ok(())
}

fn filter(column: &str, condition: &str, value: &str, operator: Combinator) -> FilterCondition {
    FilterCondition {
        column: column.to_string(),
        condition: condition.to_string(),
        value: Some(value.to_string()),
        operator,
        filter_text: Some(format!("{} {} {}", column, condition, value)),
    }
}

fn percent(value: f64) -> Benefit {
    Benefit {
        kind: "P%".to_string(),
        value: Some(Scalar::Number(value)),
        item_scope: None,
    }
}

fn demo_promotions(end_date: Option<chrono::NaiveDate>) -> Vec<Promotion> {
    let promotion = |id: i64, description: &str, filters, benefits, priority| Promotion {
        id,
        description: Some(description.to_string()),
        start_date: Local::now().date_naive().checked_sub_days(Days::new(7)),
        end_date,
        status: "Vigente".to_string(),
        filters,
        benefits,
        priority,
    };

    vec![
        promotion(
            100,
            "Rojos 25%",
            vec![filter("UDF12_VALUE", "=", "ROJO", Combinator::And)],
            vec![percent(25.0)],
            None,
        ),
        promotion(
            101,
            "Temporadas 2023-2024 al 30%",
            vec![
                filter("UDF10_VALUE", "=", "ITALMOD", Combinator::And),
                filter("UDF7_VALUE", "TEMPORADA", "2023-2024", Combinator::And),
            ],
            vec![percent(30.0)],
            None,
        ),
        promotion(
            102,
            "Calzado o Camisas 15% (prioritaria)",
            vec![
                filter("UDF9_VALUE", "=", "CALZADO", Combinator::Or),
                filter("UDF9_VALUE", "=", "CAMISAS", Combinator::Or),
            ],
            vec![percent(15.0)],
            Some(5),
        ),
        promotion(
            103,
            "Coleccion Urbana, temporada mayor a 2023",
            vec![
                filter("UDF8_VALUE", "Contains", "URB", Combinator::And),
                filter("UDF7_VALUE", "TEMPORADA_MAYOR", "2023", Combinator::And),
            ],
            vec![percent(20.0), percent(35.0)],
            None,
        ),
    ]
}
