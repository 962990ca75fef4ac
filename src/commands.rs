//! Command dispatch
//!
//! Turns a parsed [`Cli`] plus loaded records into the rendered output for
//! the chosen subcommand.

use crate::aggregation::{
    monthly_total, percent_contribution_per_day, pivot_service_by_date, region_breakdown,
    service_breakdown,
};
use crate::cli::{Cli, Command};
use crate::error::Result;
use crate::output::get_formatter;
use crate::pipeline::Analysis;
use crate::types::BillingRecord;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

/// Render the output of `cli`'s subcommand over `records`.
pub fn run(cli: &Cli, records: &[BillingRecord]) -> Result<String> {
    let formatter = get_formatter(cli.json);
    let command = cli.command();
    info!("Running {:?} command", command);

    let output = match command {
        Command::Anomalies => {
            let mut analysis = Analysis::run(records, cli.threshold)?;
            match cli.explain_seed {
                Some(seed) => analysis.explain(&mut StdRng::seed_from_u64(seed)),
                None => analysis.explain(&mut rand::thread_rng()),
            }
            formatter.format_report(&analysis.report)
        }
        Command::Daily => {
            let analysis = Analysis::run(records, cli.threshold)?;
            formatter.format_daily(&analysis.scored, &analysis.totals)
        }
        Command::Services => formatter.format_breakdown("Service", &service_breakdown(records)),
        Command::Regions => formatter.format_breakdown("Region", &region_breakdown(records)),
        Command::Monthly => formatter.format_monthly(&monthly_total(records)),
        Command::Pivot => formatter.format_pivot(&pivot_service_by_date(records)),
        Command::Contribution => {
            formatter.format_contribution(&percent_contribution_per_day(records))
        }
    };

    Ok(output)
}
