//! # Bootstrap Data
//!
//! The documented default data set. Reads that find no stored record
//! return these and opportunistically persist them, so a fresh store
//! behaves like a stocked shop from the first query.

use chrono::{DateTime, Utc};
use microfarm_core::{
    Category, Difficulty, Equipment, Money, Product, ProductVariant, Review,
};

use crate::image::PLACEHOLDER_IMAGE;

fn unsplash(id: &str) -> String {
    format!("https://images.unsplash.com/{id}?auto=format&fit=crop&q=80&w=800")
}

fn date(timestamp: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(timestamp, 0).unwrap_or_default()
}

/// Default product catalog.
pub fn default_products() -> Vec<Product> {
    let product = |id: &str, name: &str, description: &str, price: i64| Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        details: String::new(),
        price: Money::from_units(price),
        old_price: None,
        is_hit: None,
        image: PLACEHOLDER_IMAGE.to_string(),
        category: Category::Kit,
        difficulty: None,
        growth_time: None,
        variants: None,
        dimensions: None,
        equipment_ids: Vec::new(),
    };

    let variant = |id: &str, name: &str, price: i64| ProductVariant {
        id: id.to_string(),
        name: name.to_string(),
        price: Money::from_units(price),
    };

    vec![
        Product {
            details: "Includes two reusable trays, four linen mats, and pea, radish, \
                      arugula and sunflower seeds. Growing guide included; harvest in \
                      seven days."
                .to_string(),
            old_price: Some(Money::from_units(1590)),
            is_hit: Some(true),
            image: unsplash("photo-1530836369250-ef72a3f5cda8"),
            difficulty: Some(Difficulty::Easy),
            growth_time: Some("7-10 days".to_string()),
            dimensions: Some("10 x 20 x 30 cm".to_string()),
            ..product(
                "kit-001",
                "Vitamin Starter Kit",
                "The ideal choice for beginners - everything needed for a first harvest.",
                1290,
            )
        },
        Product {
            details: "Advanced kit with coco substrate and a USB grow light. Amaranth, \
                      red basil and mustard for ambitious kitchen experiments."
                .to_string(),
            image: unsplash("photo-1556910103-1c02745a30bf"),
            difficulty: Some(Difficulty::Medium),
            growth_time: Some("10-14 days".to_string()),
            dimensions: Some("35 x 25 x 40 cm".to_string()),
            equipment_ids: vec!["eq-011".to_string(), "eq-008".to_string()],
            ..product(
                "kit-002",
                "Gourmet Pro Kit",
                "For those who want to experiment with rare flavors.",
                2450,
            )
        },
        Product {
            details: "A bamboo stand with wick-fed self-watering - leave the plants \
                      unattended for a week. Fits a Scandinavian interior."
                .to_string(),
            old_price: Some(Money::from_units(4500)),
            image: unsplash("photo-1585320806297-9794b3e4eeae"),
            difficulty: Some(Difficulty::Medium),
            growth_time: Some("7-12 days".to_string()),
            dimensions: Some("45 x 30 x 50 cm".to_string()),
            equipment_ids: vec![
                "eq-004".to_string(),
                "eq-011".to_string(),
                "eq-009".to_string(),
            ],
            ..product(
                "kit-004",
                "Smart Garden: Bamboo",
                "Premium kit with a bamboo stand and self-watering.",
                3890,
            )
        },
        Product {
            category: Category::Seeds,
            image: unsplash("photo-1627488193141-85d87f204c30"),
            variants: Some(vec![
                variant("50g", "50 g", 150),
                variant("100g", "100 g", 280),
                variant("500g", "500 g", 1200),
            ]),
            details: "High germination rate. Pea shoots are rich in plant protein and \
                      B vitamins."
                .to_string(),
            ..product(
                "seed-001",
                "Madras Pea Seeds",
                "Sweet, crunchy shoots with a light nutty flavor.",
                150,
            )
        },
        Product {
            category: Category::Seeds,
            image: unsplash("photo-1536638317175-d20351222244"),
            variants: Some(vec![variant("25g", "25 g", 180), variant("50g", "50 g", 320)]),
            details: "The queen of microgreens: an intense nutty-mustard flavor and a \
                      leader in iodine and iron content."
                .to_string(),
            ..product(
                "seed-002",
                "Indau Arugula Seeds",
                "Spicy, nutty, incredibly healthy.",
                180,
            )
        },
        Product {
            category: Category::Accessories,
            image: unsplash("photo-1596138252452-4500991e71d2"),
            details: "100% natural linen, 10 x 15 cm. Holds moisture well and lets the \
                      roots breathe - fast growth without the mess."
                .to_string(),
            ..product(
                "acc-001",
                "Linen Grow Mats (10 pcs)",
                "Ecologically clean growing substrate.",
                350,
            )
        },
    ]
}

/// Default equipment records.
pub fn default_equipment() -> Vec<Equipment> {
    let equipment = |id: &str,
                     name: &str,
                     price: i64,
                     purpose: &str,
                     description: &str,
                     image: &str,
                     consumption: &str,
                     rating: &str| Equipment {
        id: id.to_string(),
        name: name.to_string(),
        price: Money::from_units(price),
        purpose: purpose.to_string(),
        description: description.to_string(),
        image: unsplash(image),
        power_consumption: consumption.to_string(),
        power_rating: rating.to_string(),
    };

    vec![
        equipment(
            "eq-001",
            "SmartGrow Controller V2",
            2500,
            "Automation and control",
            "Central control hub. Wi-Fi and USB; drives light, watering and ventilation on a schedule or from sensors.",
            "photo-1553406830-ef2513450d76",
            "2 W",
            "N/A",
        ),
        equipment(
            "eq-002",
            "AirFlow 120 Fan",
            600,
            "Ventilation and air circulation",
            "Silent fan preventing mold and strengthening plant stems.",
            "photo-1575426193913-32d703e30321",
            "1.5 W",
            "1200 rpm",
        ),
        equipment(
            "eq-003",
            "Music Box \"Mozart\"",
            1800,
            "Acoustic stimulation",
            "Plays classical music and nature sounds to the trays.",
            "photo-1543783207-ec64e4d95325",
            "3 W",
            "5 W",
        ),
        equipment(
            "eq-004",
            "AquaPump Irrigation System",
            800,
            "Automatic watering",
            "Submersible pump with tubing for even root-zone watering.",
            "photo-1585320806297-9794b3e4eeae",
            "4 W",
            "200 l/h",
        ),
        equipment(
            "eq-005",
            "RootWarm Heat Mat",
            900,
            "Substrate heating",
            "Heating mat holding the root zone at optimal temperature; thermostat included.",
            "photo-1519681393784-d8e5b5a4570e",
            "10 W",
            "Max 30°C",
        ),
        equipment(
            "eq-006",
            "Li-Ion Battery Pack",
            1000,
            "Autonomous power",
            "Battery block for up to 48 hours of off-grid operation.",
            "photo-1619483878886-2f2e09f46d26",
            "N/A",
            "10000 mAh",
        ),
        equipment(
            "eq-007",
            "PowerGrid Adapter",
            500,
            "Mains power",
            "Reliable power adapter for wall-socket operation.",
            "photo-1561525140-c2a4cc68e4bd",
            "N/A",
            "12 V 5 A",
        ),
        equipment(
            "eq-008",
            "Indoor Temperature Sensor",
            300,
            "Climate monitoring",
            "High-precision air temperature sensor for the grow box.",
            "photo-1632053002928-4382b3a67e7e",
            "0.1 W",
            "N/A",
        ),
        equipment(
            "eq-009",
            "SoilSense Moisture Sensor",
            350,
            "Moisture monitoring",
            "Capacitive substrate moisture sensor, corrosion-free.",
            "photo-1586289883499-f11d28f26141",
            "0.1 W",
            "N/A",
        ),
        equipment(
            "eq-010",
            "LuxMeter Light Sensor",
            250,
            "Light level control",
            "Photoresistor that switches supplemental light on after dark.",
            "photo-1584534456162-c66a3e856713",
            "0.1 W",
            "N/A",
        ),
        equipment(
            "eq-011",
            "FullSpectrum LED Grow Light",
            1200,
            "Lighting",
            "Full-spectrum lamp for active photosynthesis; mimics sunlight.",
            "photo-1615485290382-441e4d049cb5",
            "15 W",
            "1200 lm",
        ),
        equipment(
            "eq-012",
            "EcoTime Timer-Dimmer",
            450,
            "Automation and control",
            "Simple light timer for setups without a controller.",
            "photo-1522120691812-dcdfb625f397",
            "0.5 W",
            "10 A",
        ),
    ]
}

/// Default reviews.
pub fn default_reviews() -> Vec<Review> {
    vec![
        Review {
            id: "rev-1".to_string(),
            user_id: "u-1".to_string(),
            user_name: "Anna Petrova".to_string(),
            product_id: None,
            rating: 5,
            comment: "Amazing kit! The peas were up in six days, the kids are thrilled."
                .to_string(),
            date: date(1_697_328_000), // 2023-10-15
        },
        Review {
            id: "rev-2".to_string(),
            user_id: "u-2".to_string(),
            user_name: "Dmitry S.".to_string(),
            product_id: None,
            rating: 4,
            comment: "Good quality, but delivery was a day late.".to_string(),
            date: date(1_698_883_200), // 2023-11-02
        },
        Review {
            id: "rev-3".to_string(),
            user_id: "u-3".to_string(),
            user_name: "Marina I.".to_string(),
            product_id: None,
            rating: 5,
            comment: "Wanted to try this for ages. The guide is very clear - everything \
                      worked on the first go. The arugula is outstanding."
                .to_string(),
            date: date(1_699_574_400), // 2023-11-10
        },
    ]
}
