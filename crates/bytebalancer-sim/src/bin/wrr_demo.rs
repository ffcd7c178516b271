use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use bytebalancer_core::CursorPolicy;
use bytebalancer_sim::alloc::{LossyAllocator, RbBudgetAllocator};
use bytebalancer_sim::runner::run_scenario_with;
use bytebalancer_sim::scenario::Scenario;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(true)
        .compact()
        .init();

    let mut args = std::env::args().skip(1);
    let mut config_path = None;
    let mut slots = None;
    let mut budget = None;
    let mut loss_rate = 0.0f64;
    let mut seed = 0u64;
    let mut policy = CursorPolicy::AnySuccess;
    let mut json = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config_path = Some(args.next().context("Missing --config value")?);
            }
            "--slots" => {
                slots = Some(args.next().context("Missing --slots value")?.parse()?);
            }
            "--budget" => {
                budget = Some(args.next().context("Missing --budget value")?.parse()?);
            }
            "--loss" => {
                loss_rate = args.next().context("Missing --loss value")?.parse()?;
            }
            "--seed" => {
                seed = args.next().context("Missing --seed value")?.parse()?;
            }
            "--granted-only" => {
                policy = CursorPolicy::GrantedOnly;
            }
            "--json" => {
                json = true;
            }
            _ => {}
        }
    }

    let mut scenario = match config_path {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read scenario {}", path))?;
            Scenario::from_toml_str(&raw).map_err(anyhow::Error::msg)?
        }
        None => Scenario::default(),
    };
    if let Some(slots) = slots {
        scenario.slots = slots;
    }
    if let Some(budget) = budget {
        scenario.rb_budget = budget;
    }

    tracing::info!(
        slots = scenario.slots,
        rb_budget = scenario.rb_budget,
        ues = scenario.ues.len(),
        ?policy,
        loss_rate,
        "starting WRR slot loop"
    );

    let rb_budget = scenario.rb_budget;
    let reports = if loss_rate > 0.0 {
        run_scenario_with(&scenario, policy, |slot| {
            let rng = StdRng::seed_from_u64(seed.wrapping_add(slot as u64));
            LossyAllocator::new(rb_budget, loss_rate, rng)
        })
    } else {
        // Avoid the RNG entirely on the lossless path so runs are
        // reproducible without a seed.
        run_scenario_with(&scenario, policy, |_| RbBudgetAllocator::new(rb_budget))
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            for grant in &report.grants {
                if grant.attempts > 0 {
                    tracing::info!(
                        slot = report.slot,
                        ue_id = grant.ue_id,
                        attempts = grant.attempts,
                        successes = grant.successes,
                        "grants"
                    );
                }
            }
        }
    }

    Ok(())
}
