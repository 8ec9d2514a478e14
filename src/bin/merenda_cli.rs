// ABOUTME: Command-line interface for the merenda ledger
// ABOUTME: Inventory, receiving, planning, reports, backup, and AI insights
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Merenda Ledger Project

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, TimeZone, Utc};
use clap::{Parser, Subcommand};

use merenda_ledger::config::LedgerConfig;
use merenda_ledger::ledger::LedgerStore;
use merenda_ledger::llm::{GeminiProvider, InsightsClient};
use merenda_ledger::models::{
    IngredientCode, NewItem, QcCheck, ReceivingEvent, ReceivingLine, Segment, StockUnit,
};
use merenda_ledger::planning::{LineStatus, MealPlanner, PlanRequest};
use merenda_ledger::reporting::{
    balance_report, expiration_report, filter_consumption, filter_receiving, supplier_summary,
    LogFilter,
};
use merenda_ledger::storage::FileStore;

#[derive(Parser)]
#[command(name = "merenda-cli", version, about = "School cafeteria inventory ledger")]
struct Cli {
    /// Storage directory (overrides MERENDA_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List inventory items
    Inventory {
        /// Only items at or below their minimum stock
        #[arg(long)]
        low: bool,
    },
    /// Add a new inventory item
    AddItem {
        /// Stable ingredient code (e.g. rice)
        #[arg(long)]
        code: String,
        /// Display name
        #[arg(long)]
        name: String,
        /// Category label
        #[arg(long)]
        category: String,
        /// Unit: kg, liter, unit, pack, box
        #[arg(long)]
        unit: String,
        /// Low-stock threshold
        #[arg(long, default_value_t = 0.0)]
        min_stock: f64,
        /// Gram weight of one counted unit / household measure
        #[arg(long)]
        measure_weight: Option<f64>,
    },
    /// Record an inbound shipment
    Receive {
        /// Supplier name
        #[arg(long)]
        supplier: String,
        /// Invoice number
        #[arg(long)]
        invoice: String,
        /// Shipment line as CODE:QTY or CODE:QTY:YYYY-MM-DD (repeatable)
        #[arg(long = "line", required = true)]
        lines: Vec<String>,
        /// Packaging arrived damaged
        #[arg(long)]
        packaging_damaged: bool,
        /// Temperature out of range
        #[arg(long)]
        temperature_bad: bool,
        /// Inspection notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Compute a meal plan, optionally confirming it
    Plan {
        /// Menu template id (m1..m8); merged with --item selections
        #[arg(long)]
        template: Option<String>,
        /// Ingredient code to include (repeatable)
        #[arg(long = "item")]
        items: Vec<String>,
        /// Segment: infantil, fundamental, eja
        #[arg(long)]
        segment: String,
        /// Number of students
        #[arg(long)]
        students: u32,
        /// Meal-type label
        #[arg(long, default_value = "Lunch")]
        meal_type: String,
        /// Record the plan as a consumption event
        #[arg(long)]
        confirm: bool,
    },
    /// Period balance report
    Balance {
        /// Period start (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// Period end (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
    },
    /// Expiration report over recent shipments
    Expiration,
    /// Filtered receiving history with a supplier summary
    History {
        /// Earliest date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Latest date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Segment filter for consumption events
        #[arg(long)]
        segment: Option<String>,
        /// Text filter
        #[arg(long)]
        text: Option<String>,
        /// Show consumption events instead of receiving
        #[arg(long)]
        consumption: bool,
    },
    /// Export the full ledger state as JSON to stdout
    Export,
    /// Import a ledger backup; replaces all state
    Import {
        /// Backup JSON file
        file: PathBuf,
    },
    /// Reset to the seed inventory, wiping all history
    Reset {
        /// Skip the confirmation requirement
        #[arg(long)]
        yes: bool,
    },
    /// Ask the AI assistant about current stock
    Ask {
        /// Free-text question
        question: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    merenda_ledger::logging::init_from_env()?;

    let cli = Cli::parse();
    let config = LedgerConfig::from_env()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data_dir.clone());
    let store = FileStore::open(&data_dir)?;
    let mut ledger = LedgerStore::new(Box::new(store));

    match cli.command {
        Command::Inventory { low } => {
            for item in ledger.inventory()? {
                if low && !item.is_low_stock() {
                    continue;
                }
                println!(
                    "{:<8} {:<24} {:>10.2} {:<4} (min {:.2}){}",
                    item.code,
                    item.name,
                    item.quantity,
                    item.unit.label(),
                    item.min_stock,
                    if item.is_low_stock() { "  LOW" } else { "" }
                );
            }
        }
        Command::AddItem {
            code,
            name,
            category,
            unit,
            min_stock,
            measure_weight,
        } => {
            let item = ledger.add_item(
                NewItem {
                    code: IngredientCode::new(code),
                    name,
                    category,
                    unit: parse_unit(&unit)?,
                    min_stock,
                    standard_measure: None,
                    measure_weight,
                },
                0.0,
            )?;
            println!("added {} ({})", item.name, item.id);
        }
        Command::Receive {
            supplier,
            invoice,
            lines,
            packaging_damaged,
            temperature_bad,
            notes,
        } => {
            let lines = parse_receive_lines(&mut ledger, &lines)?;
            let event = ReceivingEvent::new(
                Utc::now(),
                supplier,
                invoice,
                lines,
                QcCheck {
                    packaging_ok: !packaging_damaged,
                    temperature_ok: !temperature_bad,
                    notes,
                },
            );
            let id = event.id.clone();
            ledger.record_receiving(event)?;
            println!("receiving event {id} recorded");
        }
        Command::Plan {
            template,
            items,
            segment,
            students,
            meal_type,
            confirm,
        } => {
            let segment = parse_segment(&segment)?;
            let mut item_ids = Vec::new();
            let mut menu_name = "Custom menu".to_owned();
            if let Some(template_id) = template {
                MealPlanner::new(&mut ledger).apply_template(&mut item_ids, &template_id)?;
                if let Some(t) = merenda_ledger::reference::menu_template(&template_id) {
                    menu_name = t.name.to_owned();
                }
            }
            for code in &items {
                let id = resolve_code(&mut ledger, code)?;
                if !item_ids.contains(&id) {
                    item_ids.push(id);
                }
            }
            let request = PlanRequest {
                item_ids,
                segment,
                student_count: students,
                meal_type,
                menu_name,
            };
            let mut planner = MealPlanner::new(&mut ledger);
            let plan = planner.plan(&request)?;
            for line in &plan.lines {
                println!(
                    "{:<24} {:>8.2} {:<4} of {:>8.2}  {:<4}  ({} / student)",
                    line.item_name,
                    line.quantity_needed,
                    line.unit.label(),
                    line.quantity_in_stock,
                    match line.status {
                        LineStatus::Ok => "ok",
                        LineStatus::Lack => "LACK",
                    },
                    line.per_student_display,
                );
            }
            let n = plan.nutrition_per_student;
            println!(
                "per student: {:.0} kcal, {:.1} g protein, {:.1} g carbs, {:.1} g fat",
                n.kcal, n.protein_g, n.carbs_g, n.fat_g
            );
            if confirm {
                let event = planner.confirm(&plan)?;
                println!("confirmed as consumption event {}", event.id);
            }
        }
        Command::Balance { start, end } => {
            let start = Utc
                .from_utc_datetime(&start.and_hms_opt(0, 0, 0).context("bad start date")?);
            let end =
                Utc.from_utc_datetime(&end.and_hms_opt(23, 59, 59).context("bad end date")?);
            for row in balance_report(&mut ledger, start, end)? {
                println!(
                    "{:<24} opening {:>8.2}  in {:>8.2}  out {:>8.2}  current {:>8.2} {}",
                    row.item_name, row.opening, row.in_period, row.out_period, row.current,
                    row.unit.label(),
                );
            }
        }
        Command::Expiration => {
            let today = Utc::now().date_naive();
            for row in expiration_report(&mut ledger, today)? {
                println!(
                    "{:<24} {:>8.2}  expires {}  ({:>4} days, {:?})  from {}",
                    row.item_name,
                    row.quantity,
                    row.expiration,
                    row.days_remaining,
                    row.status,
                    row.supplier,
                );
            }
        }
        Command::History {
            start,
            end,
            segment,
            text,
            consumption,
        } => {
            let filter = LogFilter {
                start,
                end,
                segment: segment.as_deref().map(parse_segment).transpose()?,
                text,
            };
            if consumption {
                let log = ledger.consumption_log()?;
                for event in filter_consumption(&log, &filter) {
                    println!(
                        "{}  {}  {} ({}, {} students, {} lines)",
                        event.date.date_naive(),
                        event.meal_type,
                        event.menu_name,
                        event.segment,
                        event.student_count,
                        event.lines.len(),
                    );
                }
            } else {
                let log = ledger.receiving_log()?;
                let hits = filter_receiving(&log, &filter);
                for event in &hits {
                    println!(
                        "{}  {}  invoice {} ({} lines)",
                        event.date.date_naive(),
                        event.supplier,
                        event.invoice_number,
                        event.lines.len(),
                    );
                }
                for s in supplier_summary(&hits) {
                    println!(
                        "supplier {}: {} events, {} lines",
                        s.supplier, s.event_count, s.line_count
                    );
                }
            }
        }
        Command::Export => {
            let backup = ledger.export_all()?;
            println!("{}", serde_json::to_string_pretty(&backup)?);
        }
        Command::Import { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let value: serde_json::Value = serde_json::from_str(&raw)?;
            ledger.import_all(value)?;
            println!("backup imported from {}", file.display());
        }
        Command::Reset { yes } => {
            if !yes {
                return Err(anyhow!("refusing to wipe history; pass --yes to confirm"));
            }
            ledger.reset_to_seed()?;
            println!("ledger reset to seed state");
        }
        Command::Ask { question } => {
            let Some(api_key) = config.gemini_api_key.clone() else {
                return Err(anyhow!("GEMINI_API_KEY is not set"));
            };
            let inventory = ledger.inventory()?;
            let client = InsightsClient::new(
                Box::new(GeminiProvider::new(api_key, config.llm_model.clone())),
                config.llm_timeout,
            );
            let reply = client.ask(&inventory, &question).await;
            println!("{}", reply.text);
        }
    }
    Ok(())
}

fn parse_unit(raw: &str) -> Result<StockUnit> {
    Ok(match raw.to_lowercase().as_str() {
        "kg" | "kilogram" => StockUnit::Kilogram,
        "l" | "liter" => StockUnit::Liter,
        "un" | "unit" => StockUnit::Unit,
        "pct" | "pack" => StockUnit::Pack,
        "cx" | "box" => StockUnit::Box,
        other => return Err(anyhow!("unknown unit '{other}'")),
    })
}

fn parse_segment(raw: &str) -> Result<Segment> {
    Ok(match raw.to_lowercase().as_str() {
        "infantil" => Segment::Infantil,
        "fundamental" => Segment::Fundamental,
        "eja" => Segment::Eja,
        other => return Err(anyhow!("unknown segment '{other}'")),
    })
}

/// Resolve an ingredient code to an inventory item id
fn resolve_code(ledger: &mut LedgerStore, code: &str) -> Result<String> {
    let inventory = ledger.inventory()?;
    inventory
        .iter()
        .find(|i| i.code.as_str() == code)
        .map(|i| i.id.clone())
        .ok_or_else(|| anyhow!("no inventory item with code '{code}'"))
}

/// Parse `CODE:QTY` or `CODE:QTY:YYYY-MM-DD` shipment lines
fn parse_receive_lines(ledger: &mut LedgerStore, raw: &[String]) -> Result<Vec<ReceivingLine>> {
    let mut lines = Vec::with_capacity(raw.len());
    for raw_line in raw {
        let mut parts = raw_line.splitn(3, ':');
        let code = parts.next().unwrap_or_default();
        let qty: f64 = parts
            .next()
            .ok_or_else(|| anyhow!("line '{raw_line}' is missing a quantity"))?
            .parse()
            .with_context(|| format!("bad quantity in line '{raw_line}'"))?;
        let expiration_date = parts
            .next()
            .map(|d| d.parse::<NaiveDate>())
            .transpose()
            .with_context(|| format!("bad expiration date in line '{raw_line}'"))?;

        let item_id = resolve_code(ledger, code)?;
        let item = ledger.item(&item_id)?;
        lines.push(ReceivingLine {
            item_id,
            item_name: item.name,
            quantity_added: qty,
            expiration_date,
        });
    }
    Ok(lines)
}
