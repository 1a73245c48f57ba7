//! Triangle Prep CLI
//!
//! Command-line interface for flooring loss records and building current-year views

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use triangle_prep::{
    premium::load_premium,
    records::{load_records, write_records},
    FloorAdjuster, FloorSummary, Parameters, TriangleBuilder,
};

#[derive(Parser, Debug)]
#[command(name = "triangle_prep", version, about = "Loss triangle data preparation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Floor zero loss, reserve, expense and premium cells to one
    Floor {
        /// Loss development records (CSV)
        #[arg(long)]
        records: PathBuf,

        /// Where to write the adjusted records (CSV)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Process rows on all cores
        #[arg(long)]
        parallel: bool,
    },

    /// Build the current-year triangle view for one accounting year
    CurrentYear {
        /// Loss development records (CSV)
        #[arg(long)]
        records: PathBuf,

        /// Premium reference table (CSV)
        #[arg(long)]
        premium: PathBuf,

        /// Target accounting year
        #[arg(long)]
        year: i64,

        #[command(flatten)]
        params: ParamArgs,

        /// Floor the records before building the view
        #[arg(long)]
        floor: bool,

        /// Where to write the view (JSON); stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct ParamArgs {
    /// Parameters file (JSON); overrides the individual flags
    #[arg(long)]
    params: Option<PathBuf>,

    /// Line of business for the premium basis
    #[arg(long)]
    lob: Option<String>,

    /// Earliest origin period modeled
    #[arg(long)]
    first_origin: Option<i64>,

    /// Months per origin step in the development age
    #[arg(long, default_value_t = triangle_prep::params::DEFAULT_ORIGIN_STEP_MONTHS)]
    origin_step_months: i64,
}

impl ParamArgs {
    fn resolve(&self) -> Result<Parameters> {
        if let Some(path) = &self.params {
            return Parameters::from_json_path(path)
                .with_context(|| format!("reading parameters from {}", path.display()));
        }

        match (&self.lob, self.first_origin) {
            (Some(lob), Some(first_origin)) => {
                Ok(Parameters::new(lob.clone(), first_origin).with_origin_step_months(self.origin_step_months))
            }
            _ => bail!("either --params or both --lob and --first-origin are required"),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Floor { records, output, parallel } => run_floor(records, output, parallel),
        Command::CurrentYear { records, premium, year, params, floor, output } => {
            run_current_year(records, premium, year, &params, floor, output)
        }
    }
}

fn adjuster(parallel: bool) -> FloorAdjuster {
    if parallel {
        FloorAdjuster::parallel()
    } else {
        FloorAdjuster::new()
    }
}

fn print_summary(summary: &FloorSummary) {
    println!("Floor summary ({} rows):", summary.rows);
    println!("  Paid loss floored:      {}", summary.paid_loss_floored);
    println!("  Case reserve floored:   {}", summary.case_reserve_floored);
    println!("  Paid expense floored:   {}", summary.paid_expense_floored);
    println!("  Premium floored:        {}", summary.premium_floored);
    println!("  Reserve compensations:  {}", summary.case_reserve_compensations);
    println!("  Non-positive reserves:  {}", summary.non_positive_case_reserves);
}

fn run_floor(records_path: PathBuf, output: Option<PathBuf>, parallel: bool) -> Result<()> {
    let records = load_records(&records_path)
        .with_context(|| format!("loading records from {}", records_path.display()))?;

    let floor_adjuster = adjuster(parallel);
    log::info!(
        "Flooring {} ({})",
        records_path.display(),
        if floor_adjuster.is_parallel() { "parallel" } else { "serial" }
    );
    let outcome = floor_adjuster.apply(&records)?;
    print_summary(&outcome.summary);

    if let Some(path) = output {
        write_records(&outcome.records, &path)
            .with_context(|| format!("writing records to {}", path.display()))?;
        println!("\nAdjusted records written to: {}", path.display());
    }

    Ok(())
}

fn run_current_year(
    records_path: PathBuf,
    premium_path: PathBuf,
    year: i64,
    param_args: &ParamArgs,
    floor: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let params = param_args.resolve()?;

    let mut records = load_records(&records_path)
        .with_context(|| format!("loading records from {}", records_path.display()))?;
    let premium = load_premium(&premium_path)
        .with_context(|| format!("loading premium from {}", premium_path.display()))?;

    // summary goes to the log here; stdout may carry the JSON view
    if floor {
        records = FloorAdjuster::new().apply(&records)?.records;
    }

    let view = TriangleBuilder::new(&params)
        .build(&records, &premium, year)
        .with_context(|| format!("building current-year view for {}", year))?;

    let json = serde_json::to_string_pretty(&view)?;
    match output {
        Some(path) => {
            std::fs::write(&path, json).with_context(|| format!("writing view to {}", path.display()))?;
            eprintln!(
                "Current-year view for {} ({} origins, {} cells, earned premium {:.2}) written to: {}",
                year,
                view.origin_count,
                view.cells.len(),
                view.current_year_earned_premium,
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}
