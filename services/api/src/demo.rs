use crate::infra::fixture_service;
use chrono::{Local, NaiveDateTime};
use civiclens::compliance::{
    Agency, AgencyCsvImporter, BuildingId, PortfolioQuery, PortfolioReportView,
    RawViolationRecord, WindowSpec,
};
use civiclens::error::AppError;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Anchor timestamp for the demo reports (YYYY-MM-DD or
    /// YYYY-MM-DDTHH:MM:SS). Defaults to now.
    #[arg(long, value_parser = crate::infra::parse_anchor)]
    pub(crate) as_of: Option<NaiveDateTime>,
    /// Include the per-agency breakdown for every building.
    #[arg(long)]
    pub(crate) breakdown: bool,
}

#[derive(Args, Debug)]
pub(crate) struct PortfolioReportArgs {
    /// Window length in days; omit both window flags for lifetime totals
    #[arg(long)]
    pub(crate) window_days: Option<u32>,
    /// Window length in calendar months
    #[arg(long, conflicts_with = "window_days")]
    pub(crate) window_months: Option<u32>,
    /// Restrict the report to a single building id
    #[arg(long)]
    pub(crate) building: Option<String>,
    /// Anchor timestamp for the window (defaults to now)
    #[arg(long, value_parser = crate::infra::parse_anchor)]
    pub(crate) as_of: Option<NaiveDateTime>,
    /// Building-permit CSV extract to report over
    #[arg(long)]
    pub(crate) permits_csv: Option<PathBuf>,
    /// Sanitation-violation CSV extract to report over
    #[arg(long)]
    pub(crate) sanitation_csv: Option<PathBuf>,
    /// Housing-violation CSV extract to report over
    #[arg(long)]
    pub(crate) housing_csv: Option<PathBuf>,
    /// Emissions-filing CSV extract to report over
    #[arg(long)]
    pub(crate) emissions_csv: Option<PathBuf>,
    /// Print the per-agency breakdown for every building
    #[arg(long)]
    pub(crate) breakdown: bool,
}

pub(crate) fn run_portfolio_report(args: PortfolioReportArgs) -> Result<(), AppError> {
    let PortfolioReportArgs {
        window_days,
        window_months,
        building,
        as_of,
        permits_csv,
        sanitation_csv,
        housing_csv,
        emissions_csv,
        breakdown,
    } = args;

    let as_of = as_of.unwrap_or_else(|| Local::now().naive_local());
    let window = window_spec(window_days, window_months);
    let scope = building.map(BuildingId::new);

    let extracts = [
        (Agency::Permit, permits_csv),
        (Agency::SanitationViolation, sanitation_csv),
        (Agency::HousingViolation, housing_csv),
        (Agency::EmissionsFiling, emissions_csv),
    ];

    let mut records: Vec<RawViolationRecord> = Vec::new();
    let mut imported = false;
    for (agency, path) in extracts {
        if let Some(path) = path {
            records.extend(AgencyCsvImporter::from_path(agency, path)?);
            imported = true;
        }
    }

    let service = fixture_service(as_of);
    let query = PortfolioQuery {
        window,
        scope,
        as_of: Some(as_of),
    };

    let report = if imported {
        service.portfolio_report_for_records(records, &query)?
    } else {
        service.portfolio_report(&query)?
    };

    render_portfolio_report(&report, imported, breakdown);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { as_of, breakdown } = args;

    let as_of = as_of.unwrap_or_else(|| Local::now().naive_local());
    let service = fixture_service(as_of);

    println!("Compliance pipeline demo");

    let windowed = service.portfolio_report(&PortfolioQuery {
        window: Some(WindowSpec::Days(30)),
        scope: None,
        as_of: Some(as_of),
    })?;
    println!();
    render_portfolio_report(&windowed, false, breakdown);

    let lifetime = service.portfolio_report(&PortfolioQuery {
        window: None,
        scope: None,
        as_of: Some(as_of),
    })?;
    println!();
    render_portfolio_report(&lifetime, false, breakdown);

    let outside = lifetime
        .portfolio
        .total_records
        .saturating_sub(windowed.portfolio.total_records);
    if outside > 0 {
        println!(
            "\n{outside} records fall outside the window or carry no usable date; they count in lifetime totals only"
        );
    }

    let building = BuildingId::new("bld-0412");
    match service.building_report(&building, Some(WindowSpec::Days(90)), Some(as_of))? {
        Some(view) => {
            println!("\nDrill-down: {} over the last 90 days", view.name);
            println!(
                "- {} active of {} records | score {:.2}",
                view.active, view.total, view.compliance_score
            );
            for entry in &view.by_agency {
                println!(
                    "  - {}: {} active of {}",
                    entry.agency_label, entry.active, entry.total
                );
            }
        }
        None => println!("\nDrill-down building missing from the directory"),
    }

    Ok(())
}

fn window_spec(days: Option<u32>, months: Option<u32>) -> Option<WindowSpec> {
    match (days, months) {
        (Some(days), _) => Some(WindowSpec::Days(days)),
        (None, Some(months)) => Some(WindowSpec::Months(months)),
        (None, None) => None,
    }
}

pub(crate) fn render_portfolio_report(
    report: &PortfolioReportView,
    imported: bool,
    breakdown: bool,
) {
    println!("Portfolio compliance report");
    println!("Window: {} (anchored {})", report.window_label, report.as_of);

    if imported {
        println!("Data source: agency CSV extracts");
    } else {
        println!("Data source: fixture portfolio (no extracts provided)");
    }

    println!(
        "\nPortfolio: {} buildings | {} active of {} records | compliance score {:.2}",
        report.portfolio.buildings,
        report.portfolio.total_active,
        report.portfolio.total_records,
        report.portfolio.compliance_score
    );

    if report.buildings.is_empty() {
        println!("\nNo buildings with records in range");
        return;
    }

    println!("\nBuildings by active violations");
    for view in &report.buildings {
        println!(
            "- {} | {} ({}) | {} active of {} | score {:.2}",
            view.building_id, view.name, view.address, view.active, view.total,
            view.compliance_score
        );
        if breakdown {
            for entry in &view.by_agency {
                println!(
                    "    {}: {} active of {}",
                    entry.agency_label, entry.active, entry.total
                );
            }
        }
    }
}
