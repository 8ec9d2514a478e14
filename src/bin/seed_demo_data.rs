// ABOUTME: Seeds a storage directory with demo receiving and consumption history
// ABOUTME: Useful for trying the CLI and reports against realistic data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Merenda Ledger Project

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::{Duration, Months, Utc};
use clap::Parser;

use merenda_ledger::ledger::LedgerStore;
use merenda_ledger::models::{
    ConsumptionEvent, ConsumptionLine, QcCheck, ReceivingEvent, ReceivingLine, Segment,
};
use merenda_ledger::planning::{MealPlanner, PlanRequest};
use merenda_ledger::storage::FileStore;

#[derive(Parser)]
#[command(name = "seed-demo-data", version, about = "Seed demo ledger history")]
struct Cli {
    /// Storage directory to seed
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    merenda_ledger::logging::init_from_env()?;

    let cli = Cli::parse();
    let store = FileStore::open(&cli.data_dir)?;
    let mut ledger = LedgerStore::new(Box::new(store));
    ledger.reset_to_seed()?;

    let inventory = ledger.inventory()?;
    let find = |code: &str| -> Result<(String, String)> {
        inventory
            .iter()
            .find(|i| i.code.as_str() == code)
            .map(|i| (i.id.clone(), i.name.clone()))
            .ok_or_else(|| anyhow!("seed inventory is missing '{code}'"))
    };
    let line = |code: &str, qty: f64, expires_in_days: Option<i64>| -> Result<ReceivingLine> {
        let (item_id, item_name) = find(code)?;
        Ok(ReceivingLine {
            item_id,
            item_name,
            quantity_added: qty,
            expiration_date: expires_in_days
                .map(|d| (Utc::now() + Duration::days(d)).date_naive()),
        })
    };

    // Big monthly delivery, three weeks ago
    ledger.record_receiving(ReceivingEvent::new(
        Utc::now() - Duration::days(21),
        "Cooperativa Agricola Regional",
        "NF-4821",
        vec![
            line("rice", 60.0, Some(240))?,
            line("beans", 40.0, Some(200))?,
            line("pasta", 30.0, Some(150))?,
            line("oil", 12.0, Some(300))?,
            line("salt", 10.0, None)?,
            line("sugar", 15.0, Some(365))?,
        ],
        QcCheck {
            packaging_ok: true,
            temperature_ok: true,
            notes: None,
        },
    ))?;

    // Perishables last week, one batch expiring soon
    ledger.record_receiving(ReceivingEvent::new(
        Utc::now() - Duration::days(6),
        "Frigorifico Boa Mesa",
        "NF-5130",
        vec![
            line("beef", 25.0, Some(12))?,
            line("chicken", 20.0, Some(9))?,
            line("eggs", 180.0, Some(25))?,
        ],
        QcCheck {
            packaging_ok: true,
            temperature_ok: true,
            notes: Some("cold chain verified at delivery".to_owned()),
        },
    ))?;

    // An older delivery outside the expiration lookback
    let old_date = Utc::now()
        .checked_sub_months(Months::new(8))
        .ok_or_else(|| anyhow!("date arithmetic underflow"))?;
    ledger.record_receiving(ReceivingEvent::new(
        old_date,
        "Distribuidora Escolar",
        "NF-2019",
        vec![line("powdered_milk", 10.0, Some(-30))?],
        QcCheck {
            packaging_ok: true,
            temperature_ok: true,
            notes: None,
        },
    ))?;

    // A couple of served meals, backdated so history has some spread
    for (template, segment, students, days_ago) in [
        ("m1", Segment::Fundamental, 120_u32, 5_i64),
        ("m2", Segment::Infantil, 80, 2),
    ] {
        record_meal(&mut ledger, template, segment, students, days_ago)?;
    }

    println!("demo data seeded under {}", cli.data_dir.display());
    Ok(())
}

/// Plan a template meal and record it as a consumption event dated in the past
fn record_meal(
    ledger: &mut LedgerStore,
    template_id: &str,
    segment: Segment,
    students: u32,
    days_ago: i64,
) -> Result<()> {
    let mut planner = MealPlanner::new(ledger);
    let mut item_ids = Vec::new();
    planner.apply_template(&mut item_ids, template_id)?;
    let menu_name = merenda_ledger::reference::menu_template(template_id)
        .map_or_else(|| "Custom menu".to_owned(), |t| t.name.to_owned());
    let plan = planner.plan(&PlanRequest {
        item_ids,
        segment,
        student_count: students,
        meal_type: "Lunch".to_owned(),
        menu_name: menu_name.clone(),
    })?;

    let lines: Vec<ConsumptionLine> = plan
        .lines
        .iter()
        .map(|l| ConsumptionLine {
            item_id: l.item_id.clone(),
            item_name: l.item_name.clone(),
            quantity_consumed: l.quantity_needed,
        })
        .collect();
    ledger.record_consumption(ConsumptionEvent {
        id: uuid::Uuid::new_v4().to_string(),
        date: Utc::now() - Duration::days(days_ago),
        meal_type: "Lunch".to_owned(),
        menu_name,
        segment,
        student_count: students,
        lines,
    })?;
    Ok(())
}
