//! Evaluation campaign demo
//!
//! Runs the whole pipeline against a real tool checkout: N trials per
//! project, log extraction, per-project aggregation, and a coverage
//! comparison chart against previously aggregated baseline results.
//!
//! Run with: cargo run --example evaluate -- <tool-dir> <results-dir>

use std::path::PathBuf;

use anyhow::{bail, Context};
use tracing_subscriber::EnvFilter;

use evobench::campaign::{Campaign, CampaignPlan};
use evobench::coverage;
use evobench::invoke::ToolCommand;
use evobench::layout::{ArtifactKind, ProjectLayout};
use evobench::plot::{BarGroup, ComparativePlotter};
use evobench::table::Table;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(tool_dir), Some(results_dir)) = (args.next(), args.next()) else {
        bail!("usage: evaluate <tool-dir> <results-dir>");
    };
    let tool_dir = PathBuf::from(tool_dir);
    let results_dir = PathBuf::from(results_dir);

    let plan = CampaignPlan {
        projects: vec!["FruitCatcher.sb3".to_owned(), "SpaceJunk.sb3".to_owned()],
        trials: 10,
    };

    let runner = ToolCommand::new("node", tool_dir.join("servant/servant.js"))
        .config(tool_dir.join("config/surviveNeuroevolution.json"))
        .harness(tool_dir.join("web/dist/index.html"))
        .acceleration(10)
        .test_generation(true)
        .live_log(true)
        .console_forwarded(true)
        .headless(true);

    let campaign = Campaign::new(&results_dir, tool_dir.join("testProjects"), plan.clone(), runner)
        .with_test_export(tool_dir.join("tests.js"));
    let records = campaign.run().context("campaign failed")?;
    println!("completed {} trials", records.len());

    // Summarize merged coverage per project and compare against a random
    // baseline aggregated into <results-dir>/Random earlier.
    let mut categories = Vec::new();
    let mut evolved = Vec::new();
    let mut random = Vec::new();
    for project_file in &plan.projects {
        let name = evobench::layout::project_name(project_file);
        let layout = ProjectLayout::new(&results_dir, name);
        let merged = Table::from_csv_path(layout.merged_csv(ArtifactKind::Coverage))
            .with_context(|| format!("no merged coverage for {name}"))?;
        let summary = coverage::summarize(&merged)?;
        println!(
            "{name}: {:.1}% coverage, {}/{} blocks, full coverage after {:.1}s",
            summary.best_coverage_pct,
            summary.covered_blocks,
            summary.total_blocks,
            summary.time_to_full_secs
        );
        categories.push(name.to_owned());
        evolved.push(summary.best_coverage_pct);

        let baseline_layout = ProjectLayout::new(results_dir.join("Random"), name);
        let baseline = Table::from_csv_path(baseline_layout.merged_csv(ArtifactKind::Coverage))
            .with_context(|| format!("no baseline coverage for {name}"))?;
        random.push(coverage::summarize(&baseline)?.best_coverage_pct);
    }

    let totals = coverage::campaign_totals(
        &plan
            .projects
            .iter()
            .map(|project_file| {
                let name = evobench::layout::project_name(project_file);
                let layout = ProjectLayout::new(&results_dir, name);
                let merged = Table::from_csv_path(layout.merged_csv(ArtifactKind::Coverage))?;
                coverage::summarize(&merged)
            })
            .collect::<evobench::Result<Vec<_>>>()?,
    );
    println!(
        "campaign: {}/{} blocks, mean coverage {:.1}%",
        totals.covered_blocks, totals.total_blocks, totals.mean_coverage_pct
    );

    let plotter = ComparativePlotter::new(results_dir.join("Plots"));
    let chart = plotter.grouped_bars(
        "CoveragePlot",
        "Projects",
        "Coverage in %",
        &categories,
        &BarGroup {
            label: "Evolved".to_owned(),
            values: evolved,
        },
        &BarGroup {
            label: "Random".to_owned(),
            values: random,
        },
    )?;
    println!("coverage chart written to {}", chart.display());

    Ok(())
}
