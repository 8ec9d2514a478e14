// ABOUTME: Meal planning engine: per-capita quantities, shortage status, nutrition
// ABOUTME: Plans are pure computations; confirm() is the only ledger write
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Merenda Ledger Project

//! # Planning Engine
//!
//! [`MealPlanner`] turns a menu selection, a student segment, and a headcount
//! into planned quantities per ingredient, checked against current stock.
//! Planning never mutates the ledger; [`MealPlanner::confirm`] records one
//! [`ConsumptionEvent`] for the whole plan, all-or-nothing.
//!
//! Shortages are not errors. A line whose required quantity exceeds current
//! stock carries [`LineStatus::Lack`]; the plan still computes fully so the
//! kitchen can see what is missing.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{AppError, AppResult};
use crate::ledger::LedgerStore;
use crate::models::{ConsumptionEvent, ConsumptionLine, InventoryItem, Segment, StockUnit};
use crate::reference;

/// Inputs to a plan computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Ids of the inventory items on the menu
    pub item_ids: Vec<String>,
    /// Student segment served
    pub segment: Segment,
    /// Number of students to plan for; must be positive
    pub student_count: u32,
    /// Meal-type label recorded on confirmation
    pub meal_type: String,
    /// Menu name recorded on confirmation (template name or "Custom menu")
    pub menu_name: String,
}

/// Stock sufficiency status of one planned line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStatus {
    /// Current stock covers the required quantity
    Ok,
    /// Required quantity exceeds current stock
    Lack,
}

/// One ingredient's computed plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedLine {
    /// Inventory item id
    pub item_id: String,
    /// Item display name
    pub item_name: String,
    /// Item unit of measure
    pub unit: StockUnit,
    /// Raw grams per student from the per-capita table (0 when unconfigured)
    pub per_student_grams: f64,
    /// Raw grams for the whole headcount
    pub total_raw_grams: f64,
    /// Quantity to draw from stock, in the item's unit
    pub quantity_needed: f64,
    /// Current stock at planning time, in the item's unit
    pub quantity_in_stock: f64,
    /// Sufficiency status
    pub status: LineStatus,
    /// Kitchen-friendly per-student amount, e.g. "0.2 cup(s)" or "30 g"
    pub per_student_display: String,
    /// Kitchen-friendly total amount, e.g. "3.00 kg" or "16.7 cup(s)"
    pub total_display: String,
}

/// Aggregate per-student nutrition estimate for a plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionTotals {
    /// Energy in kcal
    pub kcal: f64,
    /// Protein grams
    pub protein_g: f64,
    /// Carbohydrate grams
    pub carbs_g: f64,
    /// Fat grams
    pub fat_g: f64,
}

/// One entry of the kitchen utensil checklist; display-only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedUtensil {
    /// Utensil name
    pub name: String,
    /// Suggested count
    pub quantity: u32,
    /// Checked off as available by the kitchen
    pub available: bool,
}

/// A fully computed meal plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlan {
    /// Meal-type label
    pub meal_type: String,
    /// Menu name
    pub menu_name: String,
    /// Student segment
    pub segment: Segment,
    /// Headcount planned for
    pub student_count: u32,
    /// One line per selected ingredient, selection order
    pub lines: Vec<PlannedLine>,
    /// Per-student nutrition estimate across all lines
    pub nutrition_per_student: NutritionTotals,
    /// Utensil checklist
    pub utensils: Vec<PlannedUtensil>,
}

impl MealPlan {
    /// Whether every line has sufficient stock
    #[must_use]
    pub fn is_feasible(&self) -> bool {
        self.lines.iter().all(|l| l.status == LineStatus::Ok)
    }
}

/// Plans meals against a ledger store
pub struct MealPlanner<'a> {
    ledger: &'a mut LedgerStore,
}

impl<'a> MealPlanner<'a> {
    /// Create a planner over the given ledger
    pub fn new(ledger: &'a mut LedgerStore) -> Self {
        Self { ledger }
    }

    /// Compute a plan for the given request.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a zero headcount or empty selection,
    /// `ResourceNotFound` for an unknown item id, and `ConfigMissing` when a
    /// counted item has no gram-per-unit conversion anywhere.
    pub fn plan(&mut self, request: &PlanRequest) -> AppResult<MealPlan> {
        if request.student_count == 0 {
            return Err(AppError::invalid_input("student count must be positive"));
        }
        if request.item_ids.is_empty() {
            return Err(AppError::invalid_input("select at least one menu item"));
        }

        let mut lines = Vec::with_capacity(request.item_ids.len());
        let mut nutrition = NutritionTotals::default();
        for item_id in &request.item_ids {
            let item = self.ledger.item(item_id)?;
            let line = plan_line(&item, request.segment, request.student_count)?;
            accumulate_nutrition(&mut nutrition, &item, line.per_student_grams);
            lines.push(line);
        }

        debug!(
            segment = %request.segment,
            students = request.student_count,
            lines = lines.len(),
            "meal plan computed"
        );
        Ok(MealPlan {
            meal_type: request.meal_type.clone(),
            menu_name: request.menu_name.clone(),
            segment: request.segment,
            student_count: request.student_count,
            lines,
            nutrition_per_student: nutrition,
            utensils: reference::utensil_catalog()
                .iter()
                .map(|&name| PlannedUtensil {
                    name: name.to_owned(),
                    quantity: 1,
                    available: false,
                })
                .collect(),
        })
    }

    /// Merge a menu template into a selection of item ids.
    ///
    /// Template ingredients that resolve to an inventory item are appended
    /// unless already selected; nothing is ever removed. Returns the number
    /// of items added.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown template id or a storage
    /// error while reading the inventory.
    pub fn apply_template(
        &mut self,
        selection: &mut Vec<String>,
        template_id: &str,
    ) -> AppResult<usize> {
        let template = reference::menu_template(template_id)
            .ok_or_else(|| AppError::not_found(format!("menu template {template_id}")))?;
        let inventory = self.ledger.inventory()?;
        let mut added = 0;
        for code in template.ingredients {
            let Some(item) = inventory.iter().find(|i| i.code.as_str() == *code) else {
                continue;
            };
            if !selection.contains(&item.id) {
                selection.push(item.id.clone());
                added += 1;
            }
        }
        Ok(added)
    }

    /// Record the plan as one consumption event; all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns `StockUnderflow` while any line lacks stock, a validation error
    /// for an empty plan, and whatever `record_consumption` reports (the
    /// ledger re-checks sufficiency on the strict delta path).
    pub fn confirm(&mut self, plan: &MealPlan) -> AppResult<ConsumptionEvent> {
        if plan.lines.is_empty() {
            return Err(AppError::invalid_input("cannot confirm an empty plan"));
        }
        let lacking: Vec<&str> = plan
            .lines
            .iter()
            .filter(|l| l.status == LineStatus::Lack)
            .map(|l| l.item_name.as_str())
            .collect();
        if !lacking.is_empty() {
            return Err(AppError::stock_underflow(format!(
                "insufficient stock for: {}",
                lacking.join(", ")
            )));
        }

        // One line per planned ingredient; lines with no per-capita rule
        // record zero so history still shows the full menu
        let lines: Vec<ConsumptionLine> = plan
            .lines
            .iter()
            .map(|l| ConsumptionLine {
                item_id: l.item_id.clone(),
                item_name: l.item_name.clone(),
                quantity_consumed: l.quantity_needed,
            })
            .collect();

        let event = ConsumptionEvent {
            id: uuid::Uuid::new_v4().to_string(),
            date: chrono::Utc::now(),
            meal_type: plan.meal_type.clone(),
            menu_name: plan.menu_name.clone(),
            segment: plan.segment,
            student_count: plan.student_count,
            lines,
        };
        self.ledger.record_consumption(event.clone())?;
        Ok(event)
    }
}

/// Compute one planned line for an item
fn plan_line(item: &InventoryItem, segment: Segment, student_count: u32) -> AppResult<PlannedLine> {
    let per_student_grams =
        reference::per_capita_grams(&item.code, segment).unwrap_or(0.0);
    let total_raw_grams = per_student_grams * f64::from(student_count);

    let quantity_needed = if item.unit.is_counted() {
        let grams_per_unit = grams_per_counted_unit(item)?;
        total_raw_grams / grams_per_unit
    } else {
        // Kilogram, Liter, and Box all draw down in thousandths
        total_raw_grams / 1000.0
    };

    let status = if quantity_needed > item.quantity {
        LineStatus::Lack
    } else {
        LineStatus::Ok
    };

    Ok(PlannedLine {
        item_id: item.id.clone(),
        item_name: item.name.clone(),
        unit: item.unit,
        per_student_grams,
        total_raw_grams,
        quantity_needed,
        quantity_in_stock: item.quantity,
        status,
        per_student_display: household_display(item, per_student_grams),
        total_display: household_display(item, total_raw_grams),
    })
}

/// Gram weight of one counted unit: the item's own setting wins, then the
/// household table
fn grams_per_counted_unit(item: &InventoryItem) -> AppResult<f64> {
    let from_item = item.measure_weight.filter(|w| *w > 0.0);
    let from_table = reference::household_measure(&item.code)
        .map(|m| m.grams_per_unit)
        .filter(|w| *w > 0.0);
    from_item.or(from_table).ok_or_else(|| {
        AppError::config_missing(format!(
            "no gram weight configured for counted item '{}'",
            item.name
        ))
    })
}

/// Render a gram amount in the item's household measure when one is
/// configured, falling back to grams / kilograms
fn household_display(item: &InventoryItem, grams: f64) -> String {
    let measure = reference::household_measure(&item.code);
    let label = item
        .standard_measure
        .as_deref()
        .or_else(|| measure.map(|m| m.unit_label));
    let grams_per_unit = item
        .measure_weight
        .filter(|w| *w > 0.0)
        .or_else(|| measure.map(|m| m.grams_per_unit).filter(|w| *w > 0.0));

    if let (Some(label), Some(per_unit)) = (label, grams_per_unit) {
        return format!("{:.1} {label}", grams / per_unit);
    }
    if grams >= 1000.0 {
        format!("{:.2} kg", grams / 1000.0)
    } else {
        format!("{grams:.0} g")
    }
}

/// Fold one line's contribution into the per-student nutrition estimate.
///
/// The raw amount is scaled by the yield factor before the (cooked-basis)
/// nutrition lookup; ingredients without facts contribute nothing.
fn accumulate_nutrition(totals: &mut NutritionTotals, item: &InventoryItem, raw_grams: f64) {
    let Some(facts) = reference::nutrition_facts(&item.code) else {
        return;
    };
    let cooked_grams = raw_grams * reference::yield_factor(&item.code);
    let scale = cooked_grams / facts.reference_grams;
    totals.kcal += facts.kcal * scale;
    totals.protein_g += facts.protein_g * scale;
    totals.carbs_g += facts.carbs_g * scale;
    totals.fat_g += facts.fat_g * scale;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IngredientCode;

    fn rice_item(quantity: f64) -> InventoryItem {
        InventoryItem {
            id: "i-rice".into(),
            code: IngredientCode::new("rice"),
            name: "Rice".into(),
            category: "Non-perishable".into(),
            quantity,
            unit: StockUnit::Kilogram,
            min_stock: 20.0,
            standard_measure: Some("cup(s)".into()),
            measure_weight: Some(180.0),
        }
    }

    #[test]
    fn rice_for_a_hundred_fundamental_students_needs_three_kilos() {
        let line = plan_line(&rice_item(20.0), Segment::Fundamental, 100).unwrap();
        assert!((line.per_student_grams - 30.0).abs() < f64::EPSILON);
        assert!((line.quantity_needed - 3.0).abs() < 1e-9);
        assert_eq!(line.status, LineStatus::Ok);
    }

    #[test]
    fn shortage_flags_lack_without_failing() {
        let line = plan_line(&rice_item(1.0), Segment::Eja, 100).unwrap();
        assert!((line.quantity_needed - 4.0).abs() < 1e-9);
        assert_eq!(line.status, LineStatus::Lack);
    }

    #[test]
    fn counted_item_without_gram_weight_is_a_config_error() {
        let item = InventoryItem {
            id: "i-x".into(),
            code: IngredientCode::new("mystery_pods"),
            name: "Mystery Pods".into(),
            category: "Perishable".into(),
            quantity: 10.0,
            unit: StockUnit::Unit,
            min_stock: 0.0,
            standard_measure: None,
            measure_weight: None,
        };
        let err = plan_line(&item, Segment::Fundamental, 10).unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::ConfigMissing);
    }

    #[test]
    fn eggs_draw_down_in_units_of_fifty_grams() {
        let eggs = InventoryItem {
            id: "i-eggs".into(),
            code: IngredientCode::new("eggs"),
            name: "Eggs".into(),
            category: "Perishable".into(),
            quantity: 100.0,
            unit: StockUnit::Unit,
            min_stock: 30.0,
            standard_measure: Some("unit(s)".into()),
            measure_weight: Some(50.0),
        };
        let line = plan_line(&eggs, Segment::Fundamental, 100).unwrap();
        // 50 g per student, 100 students, 50 g per egg
        assert!((line.quantity_needed - 100.0).abs() < 1e-9);
    }

    #[test]
    fn household_display_prefers_the_configured_measure() {
        let item = rice_item(20.0);
        assert_eq!(household_display(&item, 3000.0), "16.7 cup(s)");
    }

    #[test]
    fn display_falls_back_to_grams_and_kilograms() {
        let mut item = rice_item(20.0);
        item.standard_measure = None;
        item.measure_weight = None;
        item.code = IngredientCode::new("unknown_thing");
        assert_eq!(household_display(&item, 30.0), "30 g");
        assert_eq!(household_display(&item, 3000.0), "3.00 kg");
    }

    #[test]
    fn rice_nutrition_scales_through_the_yield_factor() {
        let mut totals = NutritionTotals::default();
        accumulate_nutrition(&mut totals, &rice_item(20.0), 30.0);
        // 30 g raw * 3.7 yield = 111 g cooked; rice is 128 kcal / 100 g cooked
        assert!((totals.kcal - 142.08).abs() < 0.01);
    }
}
