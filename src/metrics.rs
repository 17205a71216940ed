use crate::types::{CleanRecord, MetricsSnapshot, StatusCount};
use crate::util::{average, round2};

const COMPLETED: &str = "completed";
const CANCELLED_BY_CUSTOMER: &str = "cancelled by customer";
const CANCELLED_BY_DRIVER: &str = "cancelled by driver";
const INCOMPLETE: &str = "incomplete";
const NO_DRIVER_FOUND: &str = "no driver found";

/// Compute the summary snapshot for one filtered view.
///
/// Cancellations and incomplete rides arrive through two channels: the status
/// string and a per-row numeric counter. The reported count is the maximum of
/// the status-derived count and the sum of positive counters, which tolerates
/// either encoding without double counting rows that carry both.
pub fn compute_metrics(records: &[CleanRecord]) -> MetricsSnapshot {
    if records.is_empty() {
        return MetricsSnapshot::default();
    }

    let total_bookings = records.len();
    let completed: Vec<&CleanRecord> = records
        .iter()
        .filter(|r| r.status_is(COMPLETED))
        .collect();
    let completed_rides = completed.len();

    let cancelled_by_customer = reconcile(
        status_count(records, CANCELLED_BY_CUSTOMER),
        counter_sum(records, |r| r.cancelled_by_customer),
    );
    let cancelled_by_driver = reconcile(
        status_count(records, CANCELLED_BY_DRIVER),
        counter_sum(records, |r| r.cancelled_by_driver),
    );
    let incomplete_rides = reconcile(
        status_count(records, INCOMPLETE),
        counter_sum(records, |r| r.incomplete_rides),
    );
    let no_driver_found = status_count(records, NO_DRIVER_FOUND);

    // Revenue and distance only accrue on completed rides.
    let total_revenue: f64 = completed.iter().map(|r| r.booking_value).sum();
    let total_distance: f64 = completed.iter().map(|r| r.ride_distance).sum();
    let avg_ride_distance = if completed_rides > 0 {
        total_distance / completed_rides as f64
    } else {
        0.0
    };

    // A rating of 0 is the absent sentinel and stays out of both the sum and
    // the count; so does anything outside (0, 5].
    let driver_ratings: Vec<f64> = completed
        .iter()
        .map(|r| r.driver_rating)
        .filter(|v| *v > 0.0 && *v <= 5.0)
        .collect();
    let customer_ratings: Vec<f64> = completed
        .iter()
        .map(|r| r.customer_rating)
        .filter(|v| *v > 0.0 && *v <= 5.0)
        .collect();

    MetricsSnapshot {
        total_bookings,
        completed_rides,
        cancelled_by_customer: cancelled_by_customer.round() as u64,
        cancelled_by_driver: cancelled_by_driver.round() as u64,
        incomplete_rides: incomplete_rides.round() as u64,
        no_driver_found,
        total_revenue: round2(total_revenue),
        avg_ride_distance,
        avg_driver_rating: average(&driver_ratings),
        avg_customer_rating: average(&customer_ratings),
        completion_rate: rate(completed_rides as f64, total_bookings),
        // The rate sees the unrounded reconciled counts.
        cancellation_rate: rate(cancelled_by_customer + cancelled_by_driver, total_bookings),
    }
}

impl MetricsSnapshot {
    /// Ride outcomes as (status, count) pairs with zero-valued entries
    /// dropped. Feeds the status distribution view.
    pub fn status_breakdown(&self) -> Vec<StatusCount> {
        [
            ("Completed", self.completed_rides as u64),
            ("Customer Cancelled", self.cancelled_by_customer),
            ("Driver Cancelled", self.cancelled_by_driver),
            ("Incomplete", self.incomplete_rides),
            ("No Driver Found", self.no_driver_found as u64),
        ]
        .into_iter()
        .filter(|(_, rides)| *rides > 0)
        .map(|(status, rides)| StatusCount {
            status: status.to_string(),
            rides,
        })
        .collect()
    }
}

fn status_count(records: &[CleanRecord], expected: &str) -> usize {
    records.iter().filter(|r| r.status_is(expected)).count()
}

/// Sum of the positive per-row counter values; zeros are the absent sentinel.
fn counter_sum<F>(records: &[CleanRecord], counter: F) -> f64
where
    F: Fn(&CleanRecord) -> f64,
{
    records
        .iter()
        .map(|r| counter(r))
        .filter(|v| *v > 0.0)
        .sum()
}

fn reconcile(from_status: usize, from_counters: f64) -> f64 {
    (from_status as f64).max(from_counters)
}

fn rate(part: f64, total: usize) -> String {
    if total == 0 {
        "0.0".to_string()
    } else {
        format!("{:.1}", part / total as f64 * 100.0)
    }
}
