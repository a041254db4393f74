//! Permit display models

use serde::Serialize;
use tabled::Tabled;

use crate::client::PermitRecord;
use crate::output::formatters::{format_currency, format_currency_full, format_date, truncate};

const NAME_WIDTH: usize = 28;

/// One permit row for table output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PermitDisplay {
    #[tabled(rename = "PERMIT")]
    pub permit_num: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "TYPE")]
    pub permit_type: String,

    #[tabled(rename = "WORK CLASS")]
    pub work_class: String,

    #[tabled(rename = "COMMUNITY")]
    pub community: String,

    #[tabled(rename = "CONTRACTOR")]
    pub contractor: String,

    #[tabled(rename = "COST")]
    pub cost: String,

    #[tabled(rename = "APPLIED")]
    pub applied: String,
}

impl From<&PermitRecord> for PermitDisplay {
    fn from(permit: &PermitRecord) -> Self {
        Self {
            permit_num: permit.permit_num.clone(),
            status: permit.status.clone(),
            permit_type: truncate(&permit.permit_type, NAME_WIDTH),
            work_class: permit.work_class.clone(),
            community: truncate(permit.community_name.as_deref().unwrap_or("-"), NAME_WIDTH),
            contractor: truncate(permit.contractor_name.as_deref().unwrap_or("-"), NAME_WIDTH),
            cost: format_currency(permit.estimated_cost),
            applied: format_date(permit.applied_date),
        }
    }
}

/// Label/value view of a single permit for `permits get`
pub struct PermitDetail<'a>(pub &'a PermitRecord);

impl PermitDetail<'_> {
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let p = self.0;
        let or_dash = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };

        vec![
            ("Permit", p.permit_num.clone()),
            ("Status", p.status.clone()),
            ("Type", or_dash(&p.permit_type)),
            ("Class", or_dash(&p.permit_class_mapped)),
            ("Work class", or_dash(&p.work_class)),
            ("Description", or_dash(&p.description)),
            ("Address", or_dash(&p.address)),
            ("Community", p.community_name.clone().unwrap_or_else(|| "-".to_string())),
            ("Contractor", p.contractor_name.clone().unwrap_or_else(|| "-".to_string())),
            ("Applicant", p.applicant_name.clone().unwrap_or_else(|| "-".to_string())),
            ("Estimated cost", format_currency_full(p.estimated_cost)),
            ("Housing units", p.housing_units.to_string()),
            ("Applied", format_date(p.applied_date)),
            ("Issued", format_date(p.issued_date)),
            ("Completed", format_date(p.completed_date)),
            ("Location", format!("{:.5}, {:.5}", p.latitude, p.longitude)),
        ]
    }
}
