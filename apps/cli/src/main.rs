#![deny(warnings)]

//! Headless CLI: load a scenario, advance it, print each report as JSON.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use sim_core::{Product, ProductId, ProductStatus, SimConfig};
use sim_runtime::{GameState, Simulation, TracingSink};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Args {
    scenario: Option<String>,
    config: Option<String>,
    months: Option<i64>,
    cycles: u32,
    bonus: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        cycles: 1,
        ..Default::default()
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--scenario" => args.scenario = it.next(),
            "--config" => args.config = it.next(),
            "--months" => {
                let raw = it.next().context("--months needs a value")?;
                args.months = Some(raw.parse().with_context(|| format!("bad --months {raw}"))?);
            }
            "--cycles" => {
                let raw = it.next().context("--cycles needs a value")?;
                args.cycles = raw.parse().with_context(|| format!("bad --cycles {raw}"))?;
            }
            "--bonus" => args.bonus = true,
            other => warn!(arg = other, "ignoring unknown argument"),
        }
    }
    Ok(args)
}

/// A small company with one product, used when no scenario is given.
fn demo_state(cfg: &SimConfig) -> Result<GameState> {
    let mut state = GameState::new_game(&cfg.economy)?;
    state.workforce.factory_count = 5;
    state.workforce.employee_count = 1000;
    state
        .company
        .set_capital(Decimal::new(1_000_000, 0), cfg.economy.valuation_multiplier)?;
    state.products.insert(Product {
        id: ProductId("gizmo".into()),
        name: "Gizmo".into(),
        status: ProductStatus::Active,
        unit_cost: Decimal::new(10, 0),
        selling_price: Decimal::new(25, 0),
        complexity: Decimal::new(50, 0),
        inventory: 0,
        production_level: Decimal::new(50, 0),
        market_demand: Decimal::new(50, 0),
        marketing_spend_per_unit: Decimal::new(5, 0),
    })?;
    Ok(state)
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;
    info!(?args, "starting CLI");

    let config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            SimConfig::from_yaml_str(&text)?
        }
        None => SimConfig::default(),
    };
    let state = match &args.scenario {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            GameState::from_yaml_str(&text, &config.economy)?
        }
        None => demo_state(&config)?,
    };

    let sim = Simulation::new(config, state)?.with_sink(TracingSink);
    for cycle in 1..=args.cycles {
        let report = sim.advance_months(args.months)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        if report.is_bankrupt() {
            warn!(cycle, "stopping: company is bankrupt");
            break;
        }
        if args.bonus {
            let outcome = sim.distribute_bonus()?;
            info!(cycle, ?outcome, "bonus");
        }
    }

    let snap = sim.snapshot()?;
    info!(
        month = snap.player.month,
        age = snap.player.age,
        capital = %snap.company.capital,
        net_worth = %snap.player.net_worth,
        "done"
    );
    Ok(())
}
