// ABOUTME: Integration tests for the planning engine against a live ledger
// ABOUTME: Covers the per-capita pipeline, shortage handling, and confirmation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Merenda Ledger Project
#![allow(clippy::unwrap_used, clippy::panic)]

mod common;

use merenda_ledger::errors::ErrorCode;
use merenda_ledger::models::Segment;
use merenda_ledger::planning::{LineStatus, MealPlanner, PlanRequest};

use common::{days_ago, item_id, memory_ledger, receive_one, stock_of};

fn rice_plan(ledger: &mut merenda_ledger::ledger::LedgerStore, students: u32) -> PlanRequest {
    PlanRequest {
        item_ids: vec![item_id(ledger, "rice")],
        segment: Segment::Fundamental,
        student_count: students,
        meal_type: "Lunch".to_owned(),
        menu_name: "Custom menu".to_owned(),
    }
}

#[test]
fn rice_for_a_hundred_students_draws_three_kilos() {
    let mut ledger = memory_ledger();
    receive_one(&mut ledger, "rice", 20.0, days_ago(1), None);

    let request = rice_plan(&mut ledger, 100);
    let mut planner = MealPlanner::new(&mut ledger);
    let plan = planner.plan(&request).unwrap();

    let line = &plan.lines[0];
    assert!((line.per_student_grams - 30.0).abs() < f64::EPSILON);
    assert!((line.total_raw_grams - 3000.0).abs() < f64::EPSILON);
    assert!((line.quantity_needed - 3.0).abs() < 1e-9);
    assert_eq!(line.status, LineStatus::Ok);

    let event = planner.confirm(&plan).unwrap();
    assert_eq!(event.student_count, 100);
    assert!((event.lines[0].quantity_consumed - 3.0).abs() < 1e-9);
    assert!((stock_of(&mut ledger, "rice") - 17.0).abs() < 1e-9);
    assert_eq!(ledger.consumption_log().unwrap().len(), 1);
}

#[test]
fn confirmation_is_refused_while_any_line_lacks_stock() {
    let mut ledger = memory_ledger();
    receive_one(&mut ledger, "rice", 1.0, days_ago(1), None);

    let request = rice_plan(&mut ledger, 100);
    let mut planner = MealPlanner::new(&mut ledger);
    let plan = planner.plan(&request).unwrap();
    assert_eq!(plan.lines[0].status, LineStatus::Lack);
    assert!(!plan.is_feasible());

    let err = planner.confirm(&plan).unwrap_err();
    assert_eq!(err.code, ErrorCode::StockUnderflow);
    // Nothing recorded, nothing drawn down
    assert!(ledger.consumption_log().unwrap().is_empty());
    assert!((stock_of(&mut ledger, "rice") - 1.0).abs() < 1e-9);
}

#[test]
fn confirmed_events_keep_one_line_per_menu_ingredient() {
    let mut ledger = memory_ledger();
    receive_one(&mut ledger, "rice", 20.0, days_ago(1), None);
    // A kitchen-added ingredient with no per-capita rule plans zero
    let barley = ledger
        .add_item(
            merenda_ledger::models::NewItem {
                code: merenda_ledger::models::IngredientCode::new("hulled_barley"),
                name: "Hulled Barley".to_owned(),
                category: "Non-perishable".to_owned(),
                unit: merenda_ledger::models::StockUnit::Kilogram,
                min_stock: 0.0,
                standard_measure: None,
                measure_weight: None,
            },
            0.0,
        )
        .unwrap();

    let request = PlanRequest {
        item_ids: vec![item_id(&mut ledger, "rice"), barley.id.clone()],
        segment: Segment::Fundamental,
        student_count: 100,
        meal_type: "Lunch".to_owned(),
        menu_name: "Custom menu".to_owned(),
    };
    let mut planner = MealPlanner::new(&mut ledger);
    let plan = planner.plan(&request).unwrap();
    assert!(plan.is_feasible());

    let event = planner.confirm(&plan).unwrap();
    assert_eq!(event.lines.len(), 2);
    let barley_line = event
        .lines
        .iter()
        .find(|l| l.item_id == barley.id)
        .unwrap();
    assert!(barley_line.quantity_consumed.abs() < f64::EPSILON);
    // The zero line is in the recorded history too, and moved no stock
    assert_eq!(ledger.consumption_log().unwrap()[0].lines.len(), 2);
    assert!((stock_of(&mut ledger, "rice") - 17.0).abs() < 1e-9);
}

#[test]
fn planning_never_mutates_the_ledger() {
    let mut ledger = memory_ledger();
    receive_one(&mut ledger, "rice", 20.0, days_ago(1), None);
    let before = ledger.inventory().unwrap();

    let request = rice_plan(&mut ledger, 100);
    let mut planner = MealPlanner::new(&mut ledger);
    planner.plan(&request).unwrap();

    assert_eq!(ledger.inventory().unwrap(), before);
    assert!(ledger.consumption_log().unwrap().is_empty());
}

#[test]
fn counted_items_convert_through_their_gram_weight() {
    let mut ledger = memory_ledger();
    receive_one(&mut ledger, "eggs", 300.0, days_ago(1), None);

    let request = PlanRequest {
        item_ids: vec![item_id(&mut ledger, "eggs")],
        segment: Segment::Fundamental,
        student_count: 100,
        meal_type: "Lunch".to_owned(),
        menu_name: "Custom menu".to_owned(),
    };
    let mut planner = MealPlanner::new(&mut ledger);
    let plan = planner.plan(&request).unwrap();
    // 50 g per student at 50 g per egg -> one egg each
    assert!((plan.lines[0].quantity_needed - 100.0).abs() < 1e-9);
    assert_eq!(plan.lines[0].status, LineStatus::Ok);
}

#[test]
fn templates_merge_into_the_selection_without_duplicates() {
    let mut ledger = memory_ledger();
    let rice = item_id(&mut ledger, "rice");
    let mut selection = vec![rice.clone()];

    let mut planner = MealPlanner::new(&mut ledger);
    // m1 is rice, beans, beef, oil, salt; rice already selected
    let added = planner.apply_template(&mut selection, "m1").unwrap();
    assert_eq!(added, 4);
    assert_eq!(selection.len(), 5);
    assert_eq!(selection[0], rice);

    // Re-applying adds nothing
    let added = planner.apply_template(&mut selection, "m1").unwrap();
    assert_eq!(added, 0);
}

#[test]
fn unknown_template_is_not_found() {
    let mut ledger = memory_ledger();
    let mut planner = MealPlanner::new(&mut ledger);
    let err = planner.apply_template(&mut Vec::new(), "m99").unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[test]
fn zero_students_and_empty_selection_are_rejected() {
    let mut ledger = memory_ledger();
    let rice = item_id(&mut ledger, "rice");
    let mut planner = MealPlanner::new(&mut ledger);

    let err = planner
        .plan(&PlanRequest {
            item_ids: vec![rice],
            segment: Segment::Infantil,
            student_count: 0,
            meal_type: "Lunch".to_owned(),
            menu_name: "Custom menu".to_owned(),
        })
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    let err = planner
        .plan(&PlanRequest {
            item_ids: vec![],
            segment: Segment::Infantil,
            student_count: 50,
            meal_type: "Lunch".to_owned(),
            menu_name: "Custom menu".to_owned(),
        })
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[test]
fn nutrition_totals_accumulate_across_lines() {
    let mut ledger = memory_ledger();
    receive_one(&mut ledger, "rice", 50.0, days_ago(1), None);
    receive_one(&mut ledger, "beans", 50.0, days_ago(1), None);

    let request = PlanRequest {
        item_ids: vec![item_id(&mut ledger, "rice"), item_id(&mut ledger, "beans")],
        segment: Segment::Fundamental,
        student_count: 10,
        meal_type: "Lunch".to_owned(),
        menu_name: "Custom menu".to_owned(),
    };
    let mut planner = MealPlanner::new(&mut ledger);
    let plan = planner.plan(&request).unwrap();
    assert!(plan.nutrition_per_student.kcal > 0.0);
    assert!(plan.nutrition_per_student.protein_g > 0.0);
    // Utensil checklist rides along, unchecked
    assert!(!plan.utensils.is_empty());
    assert!(plan.utensils.iter().all(|u| !u.available));
}
