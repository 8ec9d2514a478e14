// ABOUTME: Reference table API for per-capita rules, conversions, yields, and nutrition
// ABOUTME: Pure lookup data keyed by ingredient code; no logic beyond table access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Merenda Ledger Project

//! # Reference Tables
//!
//! Static lookup data consumed by the planning engine: per-segment per-capita
//! gram targets, household-measure conversions, raw-to-cooked yield factors,
//! nutrition-per-100g facts, and named menu templates, plus the seed inventory
//! and default category set.
//!
//! Values follow the PNAE (Programa Nacional de Alimentação Escolar) per-capita
//! reference tables. Per-capita
//! targets are raw grams per student; nutrition facts for grains and meats are
//! stated for the cooked food, which is why the planner applies
//! [`yield_factor`] before the nutrition lookup.

mod tables;

pub use tables::{menu_templates, seed_inventory, utensil_catalog, DEFAULT_CATEGORIES};

use crate::models::{IngredientCode, Segment};

/// A kitchen-friendly display unit with its gram equivalent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HouseholdMeasure {
    /// Display label, e.g. "cup(s)" or "tbsp"
    pub unit_label: &'static str,
    /// Grams of the raw ingredient per one such measure
    pub grams_per_unit: f64,
}

/// Nutrition facts for a reference amount of the (cooked, where applicable) food
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutritionFacts {
    /// Energy in kcal per reference amount
    pub kcal: f64,
    /// Protein grams per reference amount
    pub protein_g: f64,
    /// Carbohydrate grams per reference amount
    pub carbs_g: f64,
    /// Fat grams per reference amount
    pub fat_g: f64,
    /// Reference amount in grams (usually 100)
    pub reference_grams: f64,
}

/// A named menu template: a fixed ordered list of ingredient codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuTemplate {
    /// Stable template id
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Ingredient codes, in serving order
    pub ingredients: &'static [&'static str],
}

/// Raw per-student gram target for an ingredient and segment.
///
/// Returns `None` for ingredients without a configured rule; the planner
/// treats that as a zero target.
#[must_use]
pub fn per_capita_grams(code: &IngredientCode, segment: Segment) -> Option<f64> {
    let (infantil, fundamental, eja) = tables::per_capita_row(code.as_str())?;
    Some(match segment {
        Segment::Infantil => infantil,
        Segment::Fundamental => fundamental,
        Segment::Eja => eja,
    })
}

/// Household-measure conversion for an ingredient, if configured
#[must_use]
pub fn household_measure(code: &IngredientCode) -> Option<HouseholdMeasure> {
    tables::household_row(code.as_str())
}

/// Raw-to-cooked yield multiplier; 1.0 for ingredients without an entry
#[must_use]
pub fn yield_factor(code: &IngredientCode) -> f64 {
    tables::yield_row(code.as_str()).unwrap_or(1.0)
}

/// Nutrition facts for an ingredient, if configured.
///
/// Absent ingredients contribute zero to nutrition estimates.
#[must_use]
pub fn nutrition_facts(code: &IngredientCode) -> Option<NutritionFacts> {
    tables::nutrition_row(code.as_str())
}

/// Find a menu template by id
#[must_use]
pub fn menu_template(id: &str) -> Option<&'static MenuTemplate> {
    menu_templates().iter().find(|m| m.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rice_per_capita_matches_pnae_table() {
        let rice = IngredientCode::new("rice");
        assert_eq!(per_capita_grams(&rice, Segment::Infantil), Some(20.0));
        assert_eq!(per_capita_grams(&rice, Segment::Fundamental), Some(30.0));
        assert_eq!(per_capita_grams(&rice, Segment::Eja), Some(40.0));
    }

    #[test]
    fn unknown_ingredient_has_no_rule() {
        let code = IngredientCode::new("caviar");
        assert_eq!(per_capita_grams(&code, Segment::Fundamental), None);
        assert_eq!(nutrition_facts(&code), None);
        assert!((yield_factor(&code) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn eggs_convert_at_fifty_grams_per_unit() {
        let eggs = IngredientCode::new("eggs");
        let measure = household_measure(&eggs).unwrap();
        assert!((measure.grams_per_unit - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn every_template_ingredient_resolves_to_a_seed_item() {
        let seed = seed_inventory();
        for template in menu_templates() {
            for code in template.ingredients {
                assert!(
                    seed.iter().any(|i| i.code.as_str() == *code),
                    "template {} references unknown ingredient {code}",
                    template.id
                );
            }
        }
    }

    #[test]
    fn seed_inventory_starts_at_zero_quantity() {
        for item in seed_inventory() {
            assert!(item.quantity.abs() < f64::EPSILON, "{} not zero", item.name);
        }
    }
}
