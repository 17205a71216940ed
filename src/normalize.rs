use crate::schema::{self, FieldKind};
use crate::types::{CleanRecord, RawRow, RawValue};
use crate::util::{normalize_date, parse_f64_safe};
use tracing::debug;

/// Row accounting for one normalization pass.
#[derive(Debug, Clone)]
pub struct NormalizeReport {
    pub total_rows: usize,
    pub kept_rows: usize,
    pub dropped_rows: usize,
}

/// Turn untyped rows into typed records.
///
/// Headers are trimmed once and the trimmed name decides the field; the cell
/// itself is still read under the original header, which is how exports with
/// padded header rows keep working. Coercion is total: no input, however
/// malformed, makes this function fail. Rows that end up without a booking id
/// are blank trailers and are dropped.
pub fn normalize(headers: &[String], rows: &[RawRow]) -> (Vec<CleanRecord>, NormalizeReport) {
    let trimmed: Vec<&str> = headers.iter().map(|h| h.trim()).collect();
    let mut records: Vec<CleanRecord> = Vec::with_capacity(rows.len());
    let mut dropped_rows = 0usize;

    for row in rows {
        let mut rec = CleanRecord::default();
        for (original, name) in headers.iter().zip(trimmed.iter()) {
            let raw = unquote_value(row.get(original));
            match schema::field_kind(name) {
                Some(FieldKind::Text) => assign_text(&mut rec, name, coerce_text(&raw)),
                Some(FieldKind::Numeric) => assign_number(&mut rec, name, coerce_number(&raw)),
                None => {
                    rec.extra.insert((*name).to_string(), raw);
                }
            }
        }
        rec.date = normalize_date(&rec.date);
        if rec.booking_id.is_empty() {
            dropped_rows += 1;
            continue;
        }
        records.push(rec);
    }

    let report = NormalizeReport {
        total_rows: rows.len(),
        kept_rows: records.len(),
        dropped_rows,
    };
    debug!(
        total = report.total_rows,
        kept = report.kept_rows,
        dropped = report.dropped_rows,
        "normalized rows"
    );
    (records, report)
}

/// Strip one layer of enclosing quotes (single or double, independently at
/// either end) and unescape `\"` sequences. Applied to every string cell
/// before coercion, declared column or not.
fn unquote(s: &str) -> String {
    let mut out = s;
    if out.starts_with('"') || out.starts_with('\'') {
        out = &out[1..];
    }
    if out.ends_with('"') || out.ends_with('\'') {
        out = &out[..out.len() - 1];
    }
    out.replace("\\\"", "\"")
}

fn unquote_value(raw: Option<&RawValue>) -> RawValue {
    match raw {
        None | Some(RawValue::Null) => RawValue::Null,
        Some(RawValue::Number(n)) => RawValue::Number(*n),
        Some(RawValue::Text(s)) => RawValue::Text(unquote(s)),
    }
}

/// Text coercion: trimmed string, with `""`/`"null"`/`"NaN"` (and numeric
/// zero from a dynamically typed tokenizer) collapsing to the empty string.
fn coerce_text(raw: &RawValue) -> String {
    match raw {
        RawValue::Null => String::new(),
        RawValue::Number(n) => number_to_text(*n),
        RawValue::Text(s) => {
            if s.is_empty() || s == "null" || s == "NaN" {
                String::new()
            } else {
                s.trim().to_string()
            }
        }
    }
}

fn number_to_text(n: f64) -> String {
    if n == 0.0 || n.is_nan() {
        return String::new();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Numeric coercion: a finite `f64`, with `0` for anything absent, sentinel,
/// unparsable, or non-finite. A genuine zero and a parse failure are
/// indistinguishable after this point.
fn coerce_number(raw: &RawValue) -> f64 {
    match raw {
        RawValue::Null => 0.0,
        RawValue::Number(n) => {
            if n.is_finite() {
                *n
            } else {
                0.0
            }
        }
        RawValue::Text(s) => {
            if s.is_empty() || s == "null" {
                return 0.0;
            }
            match parse_f64_safe(Some(s)) {
                Some(v) if v.is_finite() => v,
                _ => 0.0,
            }
        }
    }
}

fn assign_text(rec: &mut CleanRecord, name: &str, value: String) {
    match name {
        schema::DATE => rec.date = value,
        schema::TIME => rec.time = value,
        schema::BOOKING_ID => rec.booking_id = value,
        schema::BOOKING_STATUS => rec.status = value,
        schema::CUSTOMER_ID => rec.customer_id = value,
        schema::VEHICLE_TYPE => rec.vehicle_type = value,
        schema::PICKUP_LOCATION => rec.pickup_location = value,
        schema::DROP_LOCATION => rec.drop_location = value,
        schema::CUSTOMER_CANCEL_REASON => rec.customer_cancel_reason = value,
        schema::DRIVER_CANCEL_REASON => rec.driver_cancel_reason = value,
        schema::INCOMPLETE_REASON => rec.incomplete_reason = value,
        schema::PAYMENT_METHOD => rec.payment_method = value,
        _ => {}
    }
}

fn assign_number(rec: &mut CleanRecord, name: &str, value: f64) {
    match name {
        schema::AVG_VTAT => rec.avg_vtat = value,
        schema::AVG_CTAT => rec.avg_ctat = value,
        schema::CANCELLED_BY_CUSTOMER => rec.cancelled_by_customer = value,
        schema::CANCELLED_BY_DRIVER => rec.cancelled_by_driver = value,
        schema::INCOMPLETE_RIDES => rec.incomplete_rides = value,
        schema::BOOKING_VALUE => rec.booking_value = value,
        schema::RIDE_DISTANCE => rec.ride_distance = value,
        schema::DRIVER_RATINGS => rec.driver_rating = value,
        schema::CUSTOMER_RATING => rec.customer_rating = value,
        _ => {}
    }
}
