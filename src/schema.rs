// Static column schema for the bookings export.
//
// Column handling is data-driven: the normalizer looks each trimmed header
// up here once and applies the coercion for its kind. Headers not in the
// table are advisory pass-through, not an error.
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const DATE: &str = "Date";
pub const TIME: &str = "Time";
pub const BOOKING_ID: &str = "Booking ID";
pub const BOOKING_STATUS: &str = "Booking Status";
pub const CUSTOMER_ID: &str = "Customer ID";
pub const VEHICLE_TYPE: &str = "Vehicle Type";
pub const PICKUP_LOCATION: &str = "Pickup Location";
pub const DROP_LOCATION: &str = "Drop Location";
pub const CUSTOMER_CANCEL_REASON: &str = "Reason for cancelling by Customer";
pub const DRIVER_CANCEL_REASON: &str = "Driver Cancellation Reason";
pub const INCOMPLETE_REASON: &str = "Incomplete Rides Reason";
pub const PAYMENT_METHOD: &str = "Payment Method";
pub const AVG_VTAT: &str = "Avg VTAT";
pub const AVG_CTAT: &str = "Avg CTAT";
pub const CANCELLED_BY_CUSTOMER: &str = "Cancelled Rides by Customer";
pub const CANCELLED_BY_DRIVER: &str = "Cancelled Rides by Driver";
pub const INCOMPLETE_RIDES: &str = "Incomplete Rides";
pub const BOOKING_VALUE: &str = "Booking Value";
pub const RIDE_DISTANCE: &str = "Ride Distance";
pub const DRIVER_RATINGS: &str = "Driver Ratings";
pub const CUSTOMER_RATING: &str = "Customer Rating";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Trimmed string; `""`, `"null"` and `"NaN"` collapse to empty.
    Text,
    /// Finite `f64`; anything absent or unparsable becomes `0`.
    Numeric,
}

static SCHEMA: Lazy<HashMap<&'static str, FieldKind>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for name in [
        DATE,
        TIME,
        BOOKING_ID,
        BOOKING_STATUS,
        CUSTOMER_ID,
        VEHICLE_TYPE,
        PICKUP_LOCATION,
        DROP_LOCATION,
        CUSTOMER_CANCEL_REASON,
        DRIVER_CANCEL_REASON,
        INCOMPLETE_REASON,
        PAYMENT_METHOD,
    ] {
        m.insert(name, FieldKind::Text);
    }
    for name in [
        AVG_VTAT,
        AVG_CTAT,
        CANCELLED_BY_CUSTOMER,
        CANCELLED_BY_DRIVER,
        INCOMPLETE_RIDES,
        BOOKING_VALUE,
        RIDE_DISTANCE,
        DRIVER_RATINGS,
        CUSTOMER_RATING,
    ] {
        m.insert(name, FieldKind::Numeric);
    }
    m
});

/// Kind of a declared column, or `None` for columns the schema does not know.
pub fn field_kind(name: &str) -> Option<FieldKind> {
    SCHEMA.get(name).copied()
}
