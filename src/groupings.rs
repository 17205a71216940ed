use crate::types::{CategoryCount, CleanRecord, DailyActivityRow, ReasonRow, RouteRow};
use std::collections::HashMap;

const COMPLETED: &str = "completed";
const CANCELLED_BY_CUSTOMER: &str = "cancelled by customer";
const CANCELLED_BY_DRIVER: &str = "cancelled by driver";

/// Most recent distinct dates kept in the daily series.
const DAILY_WINDOW: usize = 30;
/// Busiest routes kept.
const TOP_ROUTES: usize = 10;
/// Most frequent cancellation reasons kept.
const TOP_REASONS: usize = 8;

pub fn vehicle_type_distribution(records: &[CleanRecord]) -> Vec<CategoryCount> {
    category_counts(records, |r| &r.vehicle_type)
}

pub fn payment_method_distribution(records: &[CleanRecord]) -> Vec<CategoryCount> {
    category_counts(records, |r| &r.payment_method)
}

fn category_counts<F>(records: &[CleanRecord], field: F) -> Vec<CategoryCount>
where
    F: Fn(&CleanRecord) -> &str,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for r in records {
        let value = field(r);
        let key = if value.is_empty() { "Unknown" } else { value };
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }
    let mut rows: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(name, count)| CategoryCount { name, count })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    rows
}

/// Per-date activity, ascending by date, truncated to the most recent
/// [`DAILY_WINDOW`] distinct dates. Rows without a date are skipped, revenue
/// accrues on completed rides only, and per-bucket revenue is rounded to a
/// whole amount.
pub fn daily_activity(records: &[CleanRecord]) -> Vec<DailyActivityRow> {
    #[derive(Default)]
    struct Acc {
        bookings: usize,
        completed: usize,
        cancelled: usize,
        revenue: f64,
    }
    let mut map: HashMap<String, Acc> = HashMap::new();
    for r in records {
        if r.date.is_empty() {
            continue;
        }
        let e = map.entry(r.date.clone()).or_default();
        e.bookings += 1;
        if r.status_is(COMPLETED) {
            e.completed += 1;
            e.revenue += r.booking_value;
        }
        if r.status_is(CANCELLED_BY_CUSTOMER) || r.status_is(CANCELLED_BY_DRIVER) {
            e.cancelled += 1;
        }
    }
    let mut days: Vec<(String, Acc)> = map.into_iter().collect();
    days.sort_by(|a, b| a.0.cmp(&b.0));
    let skip = days.len().saturating_sub(DAILY_WINDOW);
    days.into_iter()
        .skip(skip)
        .map(|(date, acc)| DailyActivityRow {
            date,
            bookings: acc.bookings,
            completed: acc.completed,
            cancelled: acc.cancelled,
            revenue: acc.revenue.round() as i64,
        })
        .collect()
}

/// Busiest pickup→drop pairs, by booking count. A route only exists when both
/// endpoints are present; revenue sums over every matching row regardless of
/// status.
pub fn top_routes(records: &[CleanRecord]) -> Vec<RouteRow> {
    #[derive(Default)]
    struct Acc {
        count: usize,
        revenue: f64,
    }
    let mut map: HashMap<String, Acc> = HashMap::new();
    for r in records {
        if r.pickup_location.is_empty() || r.drop_location.is_empty() {
            continue;
        }
        let key = format!("{} → {}", r.pickup_location, r.drop_location);
        let e = map.entry(key).or_default();
        e.count += 1;
        e.revenue += r.booking_value;
    }
    let mut rows: Vec<(String, Acc)> = map.into_iter().collect();
    rows.sort_by(|a, b| b.1.count.cmp(&a.1.count).then_with(|| a.0.cmp(&b.0)));
    rows.truncate(TOP_ROUTES);
    rows.into_iter()
        .map(|(route, acc)| RouteRow {
            route,
            count: acc.count,
            revenue: acc.revenue.round() as i64,
        })
        .collect()
}

/// Cancellation reasons merged across the customer-given and driver-given
/// fields into one key space; a row can contribute to both.
pub fn cancellation_reasons(records: &[CleanRecord]) -> Vec<ReasonRow> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for r in records {
        if !r.customer_cancel_reason.is_empty() {
            *counts.entry(r.customer_cancel_reason.clone()).or_insert(0) += 1;
        }
        if !r.driver_cancel_reason.is_empty() {
            *counts.entry(r.driver_cancel_reason.clone()).or_insert(0) += 1;
        }
    }
    let mut rows: Vec<ReasonRow> = counts
        .into_iter()
        .map(|(reason, count)| ReasonRow { reason, count })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.reason.cmp(&b.reason)));
    rows.truncate(TOP_REASONS);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> CleanRecord {
        CleanRecord {
            booking_id: id.to_string(),
            ..CleanRecord::default()
        }
    }

    #[test]
    fn category_counts_bucket_absent_values_as_unknown() {
        let mut a = record("CNR1");
        a.vehicle_type = "Auto".to_string();
        let mut b = record("CNR2");
        b.vehicle_type = "Auto".to_string();
        let c = record("CNR3");

        let rows = vehicle_type_distribution(&[a, b, c]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Auto");
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[1].name, "Unknown");
        assert_eq!(rows[1].count, 1);
    }

    #[test]
    fn daily_activity_aggregates_one_bucket_per_date() {
        let mut done = record("CNR1");
        done.date = "2024-03-01".to_string();
        done.status = "Completed".to_string();
        done.booking_value = 100.4;
        let mut cancelled = record("CNR2");
        cancelled.date = "2024-03-01".to_string();
        cancelled.status = "Cancelled by Driver".to_string();
        cancelled.booking_value = 900.0;
        let mut dateless = record("CNR3");
        dateless.status = "Completed".to_string();

        let rows = daily_activity(&[done, cancelled, dateless]);
        assert_eq!(rows.len(), 1);
        let day = &rows[0];
        assert_eq!(day.date, "2024-03-01");
        assert_eq!(day.bookings, 2);
        assert_eq!(day.completed, 1);
        assert_eq!(day.cancelled, 1);
        // Cancelled revenue is excluded, then the bucket rounds to whole.
        assert_eq!(day.revenue, 100);
    }

    #[test]
    fn daily_activity_keeps_the_most_recent_window_ascending() {
        let mut records = Vec::new();
        for day in 1..=40 {
            let mut r = record(&format!("CNR{day}"));
            r.date = if day <= 31 {
                format!("2024-01-{day:02}")
            } else {
                format!("2024-02-{:02}", day - 31)
            };
            r.status = "Completed".to_string();
            records.push(r);
        }
        let rows = daily_activity(&records);
        assert_eq!(rows.len(), 30);
        assert_eq!(rows[0].date, "2024-01-11");
        assert_eq!(rows[29].date, "2024-02-09");
        assert!(rows.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn routes_require_both_endpoints() {
        let mut full = record("CNR1");
        full.pickup_location = "Saket".to_string();
        full.drop_location = "Dwarka".to_string();
        full.booking_value = 250.0;
        let mut missing_drop = record("CNR2");
        missing_drop.pickup_location = "Saket".to_string();

        let rows = top_routes(&[full, missing_drop]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].route, "Saket → Dwarka");
        assert_eq!(rows[0].count, 1);
        assert_eq!(rows[0].revenue, 250);
    }

    #[test]
    fn route_revenue_ignores_status() {
        let mut done = record("CNR1");
        done.pickup_location = "A".to_string();
        done.drop_location = "B".to_string();
        done.status = "Completed".to_string();
        done.booking_value = 100.0;
        let mut cancelled = record("CNR2");
        cancelled.pickup_location = "A".to_string();
        cancelled.drop_location = "B".to_string();
        cancelled.status = "Cancelled by Customer".to_string();
        cancelled.booking_value = 50.0;

        let rows = top_routes(&[done, cancelled]);
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[0].revenue, 150);
    }

    #[test]
    fn top_routes_truncates_to_ten_by_count() {
        let mut records = Vec::new();
        for i in 0..12 {
            // Route i appears (12 - i) times.
            for n in 0..(12 - i) {
                let mut r = record(&format!("CNR{i}-{n}"));
                r.pickup_location = format!("P{i:02}");
                r.drop_location = "X".to_string();
                records.push(r);
            }
        }
        let rows = top_routes(&records);
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].route, "P00 → X");
        assert_eq!(rows[0].count, 12);
        assert!(rows.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn reason_counts_merge_both_sources() {
        let mut both = record("CNR1");
        both.customer_cancel_reason = "Driver not moving".to_string();
        both.driver_cancel_reason = "Customer unreachable".to_string();
        let mut customer_only = record("CNR2");
        customer_only.customer_cancel_reason = "Driver not moving".to_string();

        let rows = cancellation_reasons(&[both, customer_only]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].reason, "Driver not moving");
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[1].reason, "Customer unreachable");
        assert_eq!(rows[1].count, 1);
    }

    #[test]
    fn reasons_truncate_to_eight_with_top_count_first() {
        let mut records = Vec::new();
        for _ in 0..10 {
            let mut r = record("CNRa");
            r.customer_cancel_reason = "A".to_string();
            records.push(r);
        }
        for _ in 0..7 {
            let mut r = record("CNRb");
            r.driver_cancel_reason = "B".to_string();
            records.push(r);
        }
        for reason in ["C", "D", "E", "F", "G", "H", "I", "J"] {
            let mut r = record("CNRx");
            r.customer_cancel_reason = reason.to_string();
            records.push(r);
        }

        let rows = cancellation_reasons(&records);
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].reason, "A");
        assert_eq!(rows[0].count, 10);
        assert_eq!(rows[1].reason, "B");
        assert_eq!(rows[1].count, 7);
    }

    #[test]
    fn empty_input_yields_empty_groupings() {
        let none: Vec<CleanRecord> = Vec::new();
        assert!(vehicle_type_distribution(&none).is_empty());
        assert!(payment_method_distribution(&none).is_empty());
        assert!(daily_activity(&none).is_empty());
        assert!(top_routes(&none).is_empty());
        assert!(cancellation_reasons(&none).is_empty());
    }
}
