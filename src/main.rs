// Entry point and high-level CLI flow.
//
// The binary is a thin host around the engine:
// - ingest the CSV and print load diagnostics,
// - apply the selected filters,
// - compute the metrics snapshot and the four groupings,
// - preview each table and export everything to files.
use clap::Parser;
use std::error::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ride_report::filter::{distinct_values, filter_records, FilterCriteria};
use ride_report::groupings::{
    cancellation_reasons, daily_activity, payment_method_distribution, top_routes,
    vehicle_type_distribution,
};
use ride_report::metrics::compute_metrics;
use ride_report::normalize::normalize;
use ride_report::output::{preview_table, ReportDir};
use ride_report::util::{format_int, format_number};
use ride_report::{ingest, types::CleanRecord};

#[derive(Parser)]
#[command(name = "ride_report")]
#[command(about = "Clean a ride bookings CSV and generate aggregate reports", long_about = None)]
struct Cli {
    /// Path to the bookings CSV export
    input: String,

    /// Vehicle type to filter on ("all" for no constraint)
    #[arg(long, default_value = "all")]
    vehicle_type: String,

    /// Payment method to filter on ("all" for no constraint)
    #[arg(long, default_value = "all")]
    payment_method: String,

    /// Inclusive start date, YYYY-MM-DD
    #[arg(long, default_value = "")]
    start_date: String,

    /// Inclusive end date, YYYY-MM-DD
    #[arg(long, default_value = "")]
    end_date: String,

    /// Directory for generated report files
    #[arg(short, long, default_value = "reports")]
    out_dir: String,

    /// Print the available filter values and exit
    #[arg(long, default_value_t = false)]
    list_filters: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let (headers, rows) = ingest::read_csv(&cli.input)?;
    let (records, load_report) = normalize(&headers, &rows);
    println!(
        "Processing dataset... ({} rows loaded, {} kept)",
        format_int(load_report.total_rows as i64),
        format_int(load_report.kept_rows as i64)
    );
    if load_report.dropped_rows > 0 {
        println!(
            "Note: {} blank rows dropped (no booking id).\n",
            format_int(load_report.dropped_rows as i64)
        );
    } else {
        println!();
    }

    if cli.list_filters {
        print_filter_options(&records);
        return Ok(());
    }

    let criteria = FilterCriteria {
        vehicle_type: FilterCriteria::selection(&cli.vehicle_type),
        payment_method: FilterCriteria::selection(&cli.payment_method),
        date_start: FilterCriteria::date_bound(&cli.start_date),
        date_end: FilterCriteria::date_bound(&cli.end_date),
    };
    let filtered = filter_records(&records, &criteria);
    info!(
        total = records.len(),
        filtered = filtered.len(),
        "applied filters"
    );

    let metrics = compute_metrics(&filtered);
    println!("Summary Metrics");
    println!(
        "  Total bookings:      {}",
        format_int(metrics.total_bookings as i64)
    );
    println!(
        "  Completed rides:     {} ({}% completion)",
        format_int(metrics.completed_rides as i64),
        metrics.completion_rate
    );
    println!(
        "  Cancellations:       {} by customer, {} by driver ({}% of bookings)",
        format_int(metrics.cancelled_by_customer as i64),
        format_int(metrics.cancelled_by_driver as i64),
        metrics.cancellation_rate
    );
    println!(
        "  Incomplete rides:    {}",
        format_int(metrics.incomplete_rides as i64)
    );
    println!(
        "  No driver found:     {}",
        format_int(metrics.no_driver_found as i64)
    );
    println!(
        "  Total revenue:       {}",
        format_number(metrics.total_revenue, 2)
    );
    println!(
        "  Avg ride distance:   {} km",
        format_number(metrics.avg_ride_distance, 1)
    );
    println!(
        "  Avg driver rating:   {}/5",
        format_number(metrics.avg_driver_rating, 2)
    );
    println!(
        "  Avg customer rating: {}/5\n",
        format_number(metrics.avg_customer_rating, 2)
    );

    let out = ReportDir::new(&cli.out_dir)?;

    let vehicles = vehicle_type_distribution(&filtered);
    let path = out.write_csv("vehicle_types.csv", &vehicles)?;
    preview_table("Vehicle Type Distribution", &vehicles, 5, &path);

    let payments = payment_method_distribution(&filtered);
    let path = out.write_csv("payment_methods.csv", &payments)?;
    preview_table("Payment Method Distribution", &payments, 5, &path);

    let daily = daily_activity(&filtered);
    let path = out.write_csv("daily_activity.csv", &daily)?;
    preview_table("Daily Activity (last 30 dates)", &daily, 5, &path);

    let routes = top_routes(&filtered);
    let path = out.write_csv("top_routes.csv", &routes)?;
    preview_table("Top Routes", &routes, 5, &path);

    let reasons = cancellation_reasons(&filtered);
    let path = out.write_csv("cancellation_reasons.csv", &reasons)?;
    preview_table("Cancellation Reasons", &reasons, 8, &path);

    let breakdown = metrics.status_breakdown();
    let path = out.write_csv("status_breakdown.csv", &breakdown)?;
    preview_table("Ride Status Breakdown", &breakdown, 5, &path);

    let path = out.write_json("metrics.json", &metrics)?;
    println!("Metrics snapshot written to {}", path.display());

    Ok(())
}

fn print_filter_options(records: &[CleanRecord]) {
    println!("Vehicle types:");
    for v in distinct_values(records, |r| &r.vehicle_type) {
        println!("  {}", v);
    }
    println!("Payment methods:");
    for p in distinct_values(records, |r| &r.payment_method) {
        println!("  {}", p);
    }
}
