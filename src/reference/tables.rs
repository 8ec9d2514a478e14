// ABOUTME: Static reference data: per-capita targets, conversions, yields, nutrition, menus
// ABOUTME: Values transcribed from the PNAE utensil/per-capita reference tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Merenda Ledger Project

//! Raw table rows behind the `reference` lookup API.
//!
//! Per-capita rows are `(Infantil, Fundamental, EJA)` raw grams per student.
//! Household rows give the gram weight of one kitchen measure of the *raw*
//! ingredient (tea cup of raw rice ≈ 180 g). Yield rows convert raw weight to
//! cooked weight so nutrition lookups against cooked-food tables line up.

use super::{HouseholdMeasure, MenuTemplate, NutritionFacts};
use crate::models::{IngredientCode, InventoryItem, StockUnit};
use uuid::Uuid;

/// Default category registry restored on reset
pub const DEFAULT_CATEGORIES: &[&str] = &["Cleaning", "Non-perishable", "Perishable"];

pub(super) fn per_capita_row(code: &str) -> Option<(f64, f64, f64)> {
    Some(match code {
        // Cereals, tubers, and derivatives
        "rice" => (20.0, 30.0, 40.0),
        "pasta" => (50.0, 60.0, 65.0),
        "bread" => (50.0, 50.0, 50.0),
        "crackers" => (30.0, 30.0, 30.0),
        "corn_flour" => (30.0, 40.0, 50.0),

        // Legumes and proteins
        "beans" => (15.0, 25.0, 30.0),
        "beef" => (100.0, 120.0, 140.0),
        "chicken" => (100.0, 120.0, 140.0),
        "fish" => (80.0, 100.0, 120.0),
        "eggs" => (50.0, 50.0, 100.0),

        // Dairy
        "powdered_milk" => (20.0, 25.0, 30.0),

        // Fruits (average edible portion)
        "banana" => (86.0, 86.0, 86.0),
        "apple" => (130.0, 130.0, 130.0),
        "watermelon" => (150.0, 200.0, 200.0),

        // Basic seasonings (per-student estimates)
        "oil" => (5.0, 5.0, 5.0),
        "salt" => (1.0, 2.0, 2.0),
        "sugar" => (10.0, 15.0, 15.0),

        _ => return None,
    })
}

pub(super) fn household_row(code: &str) -> Option<HouseholdMeasure> {
    let (unit_label, grams_per_unit) = match code {
        // Raw measures used for stock draw-down
        "rice" => ("cup(s)", 180.0),
        "beans" => ("cup(s)", 160.0),
        "corn_flour" => ("cup(s)", 130.0),
        "powdered_milk" => ("tbsp", 26.0),

        // Serving measures
        "oil" => ("tbsp", 15.0),
        "salt" => ("tsp", 5.0),
        "sugar" => ("tbsp", 15.0),

        // Units / portions (drives conversion for counted stock)
        "pasta" => ("500 g pack(s)", 500.0),
        "beef" => ("portion(s)", 120.0),
        "chicken" => ("piece(s)", 120.0),
        "fish" => ("fillet(s)", 100.0),
        "eggs" => ("unit(s)", 50.0),
        "banana" => ("unit(s)", 86.0),
        "apple" => ("unit(s)", 130.0),
        "bread" => ("unit(s)", 50.0),
        "crackers" => ("unit(s)", 5.0),

        _ => return None,
    };
    Some(HouseholdMeasure {
        unit_label,
        grams_per_unit,
    })
}

pub(super) fn yield_row(code: &str) -> Option<f64> {
    Some(match code {
        "rice" => 3.7,       // 30 g raw -> ~110 g cooked
        "beans" => 3.8,      // 25 g raw -> ~90 g cooked
        "pasta" => 2.5,
        "corn_flour" => 2.5, // couscous hydrates
        "powdered_milk" => 1.0,
        "beef" => 0.75,      // cooking weight loss
        "chicken" => 0.75,
        "fish" => 0.8,
        "eggs" => 1.0,
        "banana" => 1.0,
        "bread" => 1.0,
        "crackers" => 1.0,
        _ => return None,
    })
}

pub(super) fn nutrition_row(code: &str) -> Option<NutritionFacts> {
    let (kcal, protein_g, carbs_g, fat_g) = match code {
        "rice" => (128.0, 2.5, 28.1, 0.2),        // cooked
        "beans" => (76.0, 4.8, 13.6, 0.5),        // cooked
        "pasta" => (158.0, 5.8, 30.9, 0.9),       // cooked
        "corn_flour" => (113.0, 2.2, 25.3, 0.7),  // cooked couscous
        "bread" => (300.0, 8.0, 58.6, 3.1),
        "crackers" => (432.0, 10.1, 68.7, 14.4),
        "beef" => (200.0, 26.0, 0.0, 8.0),        // cooked, estimated
        "chicken" => (190.0, 29.0, 0.0, 7.0),     // cooked, estimated
        "fish" => (130.0, 20.0, 0.0, 4.0),        // cooked fillet
        "eggs" => (146.0, 13.0, 0.8, 10.0),
        "powdered_milk" => (497.0, 25.4, 39.2, 26.9),
        "banana" => (98.0, 1.3, 26.0, 0.1),
        "apple" => (56.0, 0.3, 14.0, 0.0),
        "oil" => (884.0, 0.0, 0.0, 100.0),
        "sugar" => (387.0, 0.0, 99.0, 0.0),
        "salt" => (0.0, 0.0, 0.0, 0.0),
        _ => return None,
    };
    Some(NutritionFacts {
        kcal,
        protein_g,
        carbs_g,
        fat_g,
        reference_grams: 100.0,
    })
}

const MENU_TEMPLATES: &[MenuTemplate] = &[
    MenuTemplate {
        id: "m1",
        name: "Basic (Rice, Beans and Beef)",
        ingredients: &["rice", "beans", "beef", "oil", "salt"],
    },
    MenuTemplate {
        id: "m2",
        name: "Chicken Rice (Galinhada)",
        ingredients: &["rice", "chicken", "oil", "salt"],
    },
    MenuTemplate {
        id: "m3",
        name: "Pasta with Beef",
        ingredients: &["pasta", "beef", "oil", "salt"],
    },
    MenuTemplate {
        id: "m4",
        name: "Fish with Rice",
        ingredients: &["rice", "fish", "oil", "salt"],
    },
    MenuTemplate {
        id: "m5",
        name: "Milk Porridge",
        ingredients: &["powdered_milk", "sugar"],
    },
    MenuTemplate {
        id: "m6",
        name: "Omelette with Rice",
        ingredients: &["rice", "eggs", "oil", "salt"],
    },
    MenuTemplate {
        id: "m7",
        name: "Snack: Fruit (Banana)",
        ingredients: &["banana"],
    },
    MenuTemplate {
        id: "m8",
        name: "Couscous with Egg",
        ingredients: &["corn_flour", "eggs", "oil", "salt"],
    },
];

/// All named menu templates
#[must_use]
pub fn menu_templates() -> &'static [MenuTemplate] {
    MENU_TEMPLATES
}

/// Kitchen utensil catalog offered by the planning checklist
#[must_use]
pub fn utensil_catalog() -> &'static [&'static str] {
    &[
        "Large industrial pot",
        "Medium pot",
        "Frying pan",
        "Ladle",
        "Skimmer",
        "Rice spoon",
        "Chef's knife",
        "Cutting board",
        "Blender",
        "Peeler",
        "Baking tray",
        "Plastic basin",
    ]
}

struct SeedRow {
    code: &'static str,
    name: &'static str,
    category: &'static str,
    unit: StockUnit,
    min_stock: f64,
    standard_measure: Option<&'static str>,
    measure_weight: Option<f64>,
}

const SEED_ROWS: &[SeedRow] = &[
    SeedRow {
        code: "rice",
        name: "Rice",
        category: "Non-perishable",
        unit: StockUnit::Kilogram,
        min_stock: 20.0,
        standard_measure: Some("cup(s)"),
        measure_weight: Some(180.0),
    },
    SeedRow {
        code: "beans",
        name: "Beans",
        category: "Non-perishable",
        unit: StockUnit::Kilogram,
        min_stock: 15.0,
        standard_measure: Some("cup(s)"),
        measure_weight: Some(160.0),
    },
    SeedRow {
        code: "pasta",
        name: "Pasta",
        category: "Non-perishable",
        unit: StockUnit::Kilogram,
        min_stock: 10.0,
        standard_measure: Some("500 g pack(s)"),
        measure_weight: Some(500.0),
    },
    SeedRow {
        code: "beef",
        name: "Beef",
        category: "Perishable",
        unit: StockUnit::Kilogram,
        min_stock: 10.0,
        standard_measure: None,
        measure_weight: None,
    },
    SeedRow {
        code: "chicken",
        name: "Chicken",
        category: "Perishable",
        unit: StockUnit::Kilogram,
        min_stock: 10.0,
        standard_measure: None,
        measure_weight: None,
    },
    SeedRow {
        code: "fish",
        name: "Fish",
        category: "Perishable",
        unit: StockUnit::Kilogram,
        min_stock: 5.0,
        standard_measure: None,
        measure_weight: None,
    },
    SeedRow {
        code: "powdered_milk",
        name: "Powdered Milk",
        category: "Non-perishable",
        unit: StockUnit::Kilogram,
        min_stock: 5.0,
        standard_measure: Some("tbsp"),
        measure_weight: Some(26.0),
    },
    SeedRow {
        code: "oil",
        name: "Oil",
        category: "Non-perishable",
        unit: StockUnit::Liter,
        min_stock: 5.0,
        standard_measure: Some("tbsp"),
        measure_weight: Some(15.0),
    },
    SeedRow {
        code: "salt",
        name: "Salt",
        category: "Non-perishable",
        unit: StockUnit::Kilogram,
        min_stock: 2.0,
        standard_measure: Some("tsp"),
        measure_weight: Some(5.0),
    },
    SeedRow {
        code: "eggs",
        name: "Eggs",
        category: "Perishable",
        unit: StockUnit::Unit,
        min_stock: 30.0,
        standard_measure: Some("unit(s)"),
        measure_weight: Some(50.0),
    },
    SeedRow {
        code: "banana",
        name: "Banana",
        category: "Perishable",
        unit: StockUnit::Kilogram,
        min_stock: 10.0,
        standard_measure: None,
        measure_weight: None,
    },
    SeedRow {
        code: "apple",
        name: "Apple",
        category: "Perishable",
        unit: StockUnit::Kilogram,
        min_stock: 10.0,
        standard_measure: None,
        measure_weight: None,
    },
    SeedRow {
        code: "sugar",
        name: "Sugar",
        category: "Non-perishable",
        unit: StockUnit::Kilogram,
        min_stock: 5.0,
        standard_measure: Some("tbsp"),
        measure_weight: Some(15.0),
    },
    SeedRow {
        code: "corn_flour",
        name: "Corn Flour",
        category: "Non-perishable",
        unit: StockUnit::Kilogram,
        min_stock: 5.0,
        standard_measure: Some("cup(s)"),
        measure_weight: Some(130.0),
    },
];

/// The fixed seed item list, with fresh ids and quantity zero.
///
/// Used at first startup and by `reset_to_seed`.
#[must_use]
pub fn seed_inventory() -> Vec<InventoryItem> {
    SEED_ROWS
        .iter()
        .map(|row| InventoryItem {
            id: Uuid::new_v4().to_string(),
            code: IngredientCode::new(row.code),
            name: row.name.to_owned(),
            category: row.category.to_owned(),
            quantity: 0.0,
            unit: row.unit,
            min_stock: row.min_stock,
            standard_measure: row.standard_measure.map(str::to_owned),
            measure_weight: row.measure_weight,
        })
        .collect()
}
