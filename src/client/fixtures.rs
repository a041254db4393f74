//! Test fixtures for permit records
//!
//! Import via `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};

use super::PermitRecord;

/// Builder for test `PermitRecord` instances with sensible defaults.
///
/// # Example
/// ```ignore
/// let permit = PermitBuilder::new("BP2024-00001")
///     .status("Issued Permit")
///     .cost(250_000.0)
///     .community("BELTLINE")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct PermitBuilder {
    record: PermitRecord,
}

impl PermitBuilder {
    pub fn new(permit_num: impl Into<String>) -> Self {
        Self {
            record: PermitRecord {
                permit_num: permit_num.into(),
                status: "Issued Permit".to_string(),
                applied_date: None,
                issued_date: None,
                completed_date: None,
                permit_type: "Residential Improvement Project".to_string(),
                permit_type_mapped: "Residential".to_string(),
                permit_class: String::new(),
                permit_class_group: String::new(),
                permit_class_mapped: String::new(),
                work_class: "Alteration".to_string(),
                work_class_group: String::new(),
                work_class_mapped: String::new(),
                description: String::new(),
                applicant_name: None,
                contractor_name: None,
                estimated_cost: 0.0,
                housing_units: 0,
                total_sqft: None,
                address: String::new(),
                community_code: String::new(),
                community_name: None,
                latitude: 51.0447,
                longitude: -114.0719,
            },
        }
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.record.status = status.into();
        self
    }

    pub fn permit_type(mut self, permit_type: impl Into<String>) -> Self {
        self.record.permit_type = permit_type.into();
        self
    }

    pub fn work_class(mut self, work_class: impl Into<String>) -> Self {
        self.record.work_class = work_class.into();
        self
    }

    pub fn cost(mut self, cost: f64) -> Self {
        self.record.estimated_cost = cost;
        self
    }

    pub fn community(mut self, name: impl Into<String>) -> Self {
        self.record.community_name = Some(name.into());
        self
    }

    pub fn contractor(mut self, name: impl Into<String>) -> Self {
        self.record.contractor_name = Some(name.into());
        self
    }

    pub fn applied(mut self, at: DateTime<Utc>) -> Self {
        self.record.applied_date = Some(at);
        self
    }

    /// Applied `days` before `now`
    pub fn applied_days_before(self, now: DateTime<Utc>, days: i64) -> Self {
        self.applied(now - Duration::days(days))
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.record.address = address.into();
        self
    }

    pub fn build(self) -> PermitRecord {
        self.record
    }
}

/// A fixed reference instant for date-window tests
pub fn reference_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-06-15T12:00:00Z")
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
