use crate::types::CleanRecord;
use std::collections::BTreeSet;

/// User-selected view constraints. `None` on any dimension means "all".
/// Date bounds are inclusive ISO date strings compared lexicographically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub vehicle_type: Option<String>,
    pub payment_method: Option<String>,
    pub date_start: Option<String>,
    pub date_end: Option<String>,
}

impl FilterCriteria {
    /// Interpret a dropdown-style selection: empty or `"all"` (any case)
    /// means unconstrained.
    pub fn selection(raw: &str) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            None
        } else {
            Some(raw.to_string())
        }
    }

    /// Interpret a date-bound input: empty means the bound is open.
    pub fn date_bound(raw: &str) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty() {
            None
        } else {
            Some(raw.to_string())
        }
    }

    pub fn matches(&self, r: &CleanRecord) -> bool {
        let vehicle_ok = self
            .vehicle_type
            .as_deref()
            .map_or(true, |v| r.vehicle_type == v);
        let payment_ok = self
            .payment_method
            .as_deref()
            .map_or(true, |p| r.payment_method == p);
        let date_ok = self.date_start.as_deref().map_or(true, |s| r.date.as_str() >= s)
            && self.date_end.as_deref().map_or(true, |e| r.date.as_str() <= e);
        vehicle_ok && payment_ok && date_ok
    }
}

/// Apply the criteria conjunction, preserving relative record order.
pub fn filter_records(records: &[CleanRecord], criteria: &FilterCriteria) -> Vec<CleanRecord> {
    records
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect()
}

/// Distinct non-empty values of one field, sorted. Drives the filter
/// dropdowns, which are populated from the unfiltered record set.
pub fn distinct_values<F>(records: &[CleanRecord], field: F) -> Vec<String>
where
    F: Fn(&CleanRecord) -> &str,
{
    let set: BTreeSet<&str> = records
        .iter()
        .map(|r| field(r))
        .filter(|v| !v.is_empty())
        .collect();
    set.into_iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, vehicle: &str, payment: &str, date: &str) -> CleanRecord {
        CleanRecord {
            booking_id: id.to_string(),
            vehicle_type: vehicle.to_string(),
            payment_method: payment.to_string(),
            date: date.to_string(),
            ..CleanRecord::default()
        }
    }

    fn sample() -> Vec<CleanRecord> {
        vec![
            record("CNR1", "Auto", "UPI", "2024-03-01"),
            record("CNR2", "Go Sedan", "Cash", "2024-03-02"),
            record("CNR3", "Auto", "Cash", "2024-03-03"),
            record("CNR4", "Bike", "UPI", ""),
        ]
    }

    #[test]
    fn selection_treats_all_as_unconstrained() {
        assert_eq!(FilterCriteria::selection("all"), None);
        assert_eq!(FilterCriteria::selection("ALL"), None);
        assert_eq!(FilterCriteria::selection(""), None);
        assert_eq!(FilterCriteria::selection("Auto"), Some("Auto".to_string()));
    }

    #[test]
    fn no_criteria_keeps_everything_in_order() {
        let records = sample();
        let out = filter_records(&records, &FilterCriteria::default());
        assert_eq!(out, records);
    }

    #[test]
    fn vehicle_equality_is_exact() {
        let records = sample();
        let criteria = FilterCriteria {
            vehicle_type: Some("Auto".to_string()),
            ..FilterCriteria::default()
        };
        let out = filter_records(&records, &criteria);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.vehicle_type == "Auto"));

        let criteria = FilterCriteria {
            vehicle_type: Some("auto".to_string()),
            ..FilterCriteria::default()
        };
        assert!(filter_records(&records, &criteria).is_empty());
    }

    #[test]
    fn criteria_conjunction() {
        let records = sample();
        let criteria = FilterCriteria {
            vehicle_type: Some("Auto".to_string()),
            payment_method: Some("Cash".to_string()),
            ..FilterCriteria::default()
        };
        let out = filter_records(&records, &criteria);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].booking_id, "CNR3");
    }

    #[test]
    fn date_range_is_inclusive_and_per_bound() {
        let records = sample();
        let criteria = FilterCriteria {
            date_start: Some("2024-03-02".to_string()),
            date_end: Some("2024-03-03".to_string()),
            ..FilterCriteria::default()
        };
        let out = filter_records(&records, &criteria);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].booking_id, "CNR2");
        assert_eq!(out[1].booking_id, "CNR3");

        // A record without a date fails any set lower bound.
        let criteria = FilterCriteria {
            date_start: Some("2024-01-01".to_string()),
            ..FilterCriteria::default()
        };
        let out = filter_records(&records, &criteria);
        assert!(out.iter().all(|r| !r.date.is_empty()));

        // But an open range admits it.
        let out = filter_records(&records, &FilterCriteria::default());
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn empty_result_is_valid() {
        let records = sample();
        let criteria = FilterCriteria {
            vehicle_type: Some("Helicopter".to_string()),
            ..FilterCriteria::default()
        };
        assert!(filter_records(&records, &criteria).is_empty());
    }

    #[test]
    fn distinct_values_skips_absent_and_sorts() {
        let records = sample();
        let vehicles = distinct_values(&records, |r| &r.vehicle_type);
        assert_eq!(vehicles, vec!["Auto", "Bike", "Go Sedan"]);

        let none: Vec<CleanRecord> = Vec::new();
        assert!(distinct_values(&none, |r| &r.vehicle_type).is_empty());
    }
}
