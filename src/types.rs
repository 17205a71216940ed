use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tabled::Tabled;

/// A single cell as delivered by the CSV tokenizer: either missing, already
/// typed as a number, or a raw string. The normalizer is responsible for
/// turning these into the typed fields of [`CleanRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Number(f64),
    Text(String),
}

/// One untyped row keyed by the original (possibly whitespace-padded)
/// column headers.
pub type RawRow = HashMap<String, RawValue>;

/// A fully typed booking row. Text fields use the empty string as the
/// canonical "absent" value; numeric fields are always finite, with `0`
/// standing in for anything absent or unparsable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanRecord {
    pub booking_id: String,
    /// Normalized to `YYYY-MM-DD` when the cell matched a recognized date
    /// format, so date-range filtering can compare lexicographically.
    pub date: String,
    pub time: String,
    pub status: String,
    pub customer_id: String,
    pub vehicle_type: String,
    pub pickup_location: String,
    pub drop_location: String,
    pub customer_cancel_reason: String,
    pub driver_cancel_reason: String,
    pub incomplete_reason: String,
    pub payment_method: String,
    pub avg_vtat: f64,
    pub avg_ctat: f64,
    pub cancelled_by_customer: f64,
    pub cancelled_by_driver: f64,
    pub incomplete_rides: f64,
    pub booking_value: f64,
    pub ride_distance: f64,
    pub driver_rating: f64,
    pub customer_rating: f64,
    /// Columns the schema does not declare pass through untouched.
    pub extra: BTreeMap<String, RawValue>,
}

impl CleanRecord {
    /// Case-insensitive status comparison; an empty status never matches.
    pub fn status_is(&self, expected: &str) -> bool {
        !self.status.is_empty() && self.status.eq_ignore_ascii_case(expected)
    }
}

/// Scalar summary statistics for one filtered view. Counts for outcomes that
/// the input encodes redundantly (status string vs. per-row numeric counter)
/// hold the reconciled max-of-two value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub total_bookings: usize,
    pub completed_rides: usize,
    pub cancelled_by_customer: u64,
    pub cancelled_by_driver: u64,
    pub incomplete_rides: u64,
    pub no_driver_found: usize,
    pub total_revenue: f64,
    pub avg_ride_distance: f64,
    pub avg_driver_rating: f64,
    pub avg_customer_rating: f64,
    pub completion_rate: String,
    pub cancellation_rate: String,
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        MetricsSnapshot {
            total_bookings: 0,
            completed_rides: 0,
            cancelled_by_customer: 0,
            cancelled_by_driver: 0,
            incomplete_rides: 0,
            no_driver_found: 0,
            total_revenue: 0.0,
            avg_ride_distance: 0.0,
            avg_driver_rating: 0.0,
            avg_customer_rating: 0.0,
            completion_rate: "0.0".to_string(),
            cancellation_rate: "0.0".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct CategoryCount {
    #[serde(rename = "Name")]
    #[tabled(rename = "Name")]
    pub name: String,
    #[serde(rename = "Bookings")]
    #[tabled(rename = "Bookings")]
    pub count: usize,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct DailyActivityRow {
    #[serde(rename = "Date")]
    #[tabled(rename = "Date")]
    pub date: String,
    #[serde(rename = "Bookings")]
    #[tabled(rename = "Bookings")]
    pub bookings: usize,
    #[serde(rename = "Completed")]
    #[tabled(rename = "Completed")]
    pub completed: usize,
    #[serde(rename = "Cancelled")]
    #[tabled(rename = "Cancelled")]
    pub cancelled: usize,
    #[serde(rename = "Revenue")]
    #[tabled(rename = "Revenue")]
    pub revenue: i64,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct RouteRow {
    #[serde(rename = "Route")]
    #[tabled(rename = "Route")]
    pub route: String,
    #[serde(rename = "Bookings")]
    #[tabled(rename = "Bookings")]
    pub count: usize,
    #[serde(rename = "Revenue")]
    #[tabled(rename = "Revenue")]
    pub revenue: i64,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct ReasonRow {
    #[serde(rename = "Reason")]
    #[tabled(rename = "Reason")]
    pub reason: String,
    #[serde(rename = "Count")]
    #[tabled(rename = "Count")]
    pub count: usize,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct StatusCount {
    #[serde(rename = "Status")]
    #[tabled(rename = "Status")]
    pub status: String,
    #[serde(rename = "Rides")]
    #[tabled(rename = "Rides")]
    pub rides: u64,
}
