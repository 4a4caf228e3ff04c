//! Lead types
//!
//! Every form on the public site ends up as a row in the
//! `contact_submissions` table. Sell-your-car and pre-approval submissions
//! are told apart from plain contact messages by the prefix of their
//! `message` column, and carry the full form payload as JSON in `notes`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Message prefix identifying a sell-your-car request
pub const SELL_REQUEST_PREFIX: &str = "Sell Your Car Request:";

/// Message prefix identifying a financing pre-approval application
pub const PRE_APPROVAL_PREFIX: &str = "Pre-Approval Application";

/// Key under which admin notes are kept when `notes` holds a JSON payload
pub const ADMIN_NOTES_KEY: &str = "_adminNotes";

/// Workflow status of a lead in the back office
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Processed,
    Converted,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Processed => "processed",
            Self::Converted => "converted",
        }
    }
}

impl TryFrom<String> for LeadStatus {
    type Error = SharedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "new" => Ok(Self::New),
            "contacted" => Ok(Self::Contacted),
            "processed" => Ok(Self::Processed),
            "converted" => Ok(Self::Converted),
            _ => Err(SharedError::invalid_value("lead status", value)),
        }
    }
}

/// Which form produced a lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeadKind {
    Contact,
    SellRequest,
    PreApproval,
}

impl LeadKind {
    pub fn of_message(message: &str) -> Self {
        if message.starts_with(SELL_REQUEST_PREFIX) {
            Self::SellRequest
        } else if message.starts_with(PRE_APPROVAL_PREFIX) {
            Self::PreApproval
        } else {
            Self::Contact
        }
    }
}

/// A stored lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Lead {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub notes: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    pub fn kind(&self) -> LeadKind {
        LeadKind::of_message(&self.message)
    }

    /// Admin notes, whether stored as plain text or embedded in a JSON payload
    pub fn admin_notes(&self) -> Option<String> {
        let notes = self.notes.as_deref()?;
        match serde_json::from_str::<serde_json::Value>(notes) {
            Ok(serde_json::Value::Object(map)) => map
                .get(ADMIN_NOTES_KEY)
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            _ => Some(notes.to_string()).filter(|s| !s.is_empty()),
        }
    }
}

/// Compute the new `notes` column after an admin edits their notes
///
/// Form payloads stored as a JSON object keep their data and gain an
/// `_adminNotes` key; plain-text notes are replaced outright.
pub fn merge_admin_notes(existing: Option<&str>, admin_notes: &str) -> Option<String> {
    let admin_notes = admin_notes.trim();
    if let Some(existing) = existing {
        if let Ok(serde_json::Value::Object(mut map)) = serde_json::from_str::<serde_json::Value>(existing) {
            map.insert(ADMIN_NOTES_KEY.to_string(), serde_json::Value::String(admin_notes.to_string()));
            return Some(serde_json::Value::Object(map).to_string());
        }
    }
    if admin_notes.is_empty() {
        None
    } else {
        Some(admin_notes.to_string())
    }
}

/// A lead ready to insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub notes: Option<String>,
}

/// Admin edit of a lead
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LeadUpdate {
    pub status: LeadStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

fn required(field: &str, value: &str, label: &str, max: usize) -> Result<String, SharedError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SharedError::validation(field, format!("{label} is required")));
    }
    if value.chars().count() > max {
        return Err(SharedError::validation(
            field,
            format!("{label} must be less than {max} characters"),
        ));
    }
    Ok(value.to_string())
}

fn validate_email(value: &str) -> Result<String, SharedError> {
    let email = value.trim();
    let valid = email.len() <= 255
        && !email.contains(char::is_whitespace)
        && email.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() >= 2
                && domain.split('.').all(|part| !part.is_empty())
        });
    if valid {
        Ok(email.to_string())
    } else {
        Err(SharedError::validation("email", "Invalid email address"))
    }
}

fn validate_phone(value: &str) -> Result<String, SharedError> {
    let phone = value.trim();
    if phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit()) {
        Ok(phone.to_string())
    } else {
        Err(SharedError::validation("phone", "Phone number must be exactly 10 digits"))
    }
}

/// Contact page form
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
}

impl ContactForm {
    pub fn into_lead(self) -> Result<NewLead, SharedError> {
        let name = required("name", &self.name, "Name", 100)?;
        let email = validate_email(&self.email)?;
        let phone = match self.phone.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => Some(validate_phone(p)?),
            _ => None,
        };
        let message = required("message", &self.message, "Message", 1000)?;
        Ok(NewLead { name, email, phone, message, notes: None })
    }
}

/// Sell-your-car wizard payload
///
/// Condition answers arrive as the strings `"true"`/`"false"` the wizard's
/// radio groups produce.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellRequestForm {
    pub year: String,
    pub make: String,
    pub model: String,
    #[serde(default)]
    pub vin: Option<String>,
    pub city: String,
    pub province: String,
    pub odometer: String,
    pub transmission: String,
    pub exterior_color: String,
    pub interior_color: String,
    pub keys: String,
    pub exterior_damage: String,
    pub interior_damage: String,
    pub accident_claims: String,
    pub smoked_in: String,
    pub windshield_crack: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl SellRequestForm {
    pub fn vehicle_label(&self) -> String {
        format!("{} {} {}", self.year.trim(), self.make.trim(), self.model.trim())
    }

    pub fn into_lead(self) -> Result<NewLead, SharedError> {
        for (field, value) in [
            ("year", &self.year),
            ("make", &self.make),
            ("model", &self.model),
            ("city", &self.city),
            ("province", &self.province),
        ] {
            required(field, value, "Vehicle details", 100)?;
        }
        for (field, value) in [
            ("odometer", &self.odometer),
            ("exteriorColor", &self.exterior_color),
            ("interiorColor", &self.interior_color),
            ("transmission", &self.transmission),
        ] {
            required(field, value, "Vehicle specs", 100)?;
        }
        for (field, value) in [
            ("exteriorDamage", &self.exterior_damage),
            ("interiorDamage", &self.interior_damage),
            ("accidentClaims", &self.accident_claims),
            ("smokedIn", &self.smoked_in),
            ("windshieldCrack", &self.windshield_crack),
            ("keys", &self.keys),
        ] {
            required(field, value, "Condition answer", 20)?;
        }
        let first = required("firstName", &self.first_name, "First name", 100)?;
        let last = required("lastName", &self.last_name, "Last name", 100)?;
        let email = validate_email(&self.email)?;
        let phone = required("phone", &self.phone, "Phone", 30)?;

        let notes = serde_json::to_string(&self)?;
        Ok(NewLead {
            name: format!("{first} {last}"),
            email,
            phone: Some(phone),
            message: format!("{SELL_REQUEST_PREFIX} {}", self.vehicle_label()),
            notes: Some(notes),
        })
    }
}

/// Years and months at the current address
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TimeAtAddress {
    #[serde(default)]
    pub years: u32,
    #[serde(default)]
    pub months: u32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Housing {
    #[serde(default)]
    pub rent_or_own: Option<String>,
    #[serde(default)]
    pub monthly_payment: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub years_employed: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeDetails {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub annual_income: Option<String>,
    #[serde(default)]
    pub monthly_income: Option<String>,
    #[serde(default)]
    pub hourly_wage: Option<String>,
    #[serde(default)]
    pub hours_per_week: Option<String>,
}

impl IncomeDetails {
    /// Gross income as the applicant stated it
    pub fn summary(&self) -> String {
        let non_empty = |v: &Option<String>| v.as_deref().filter(|s| !s.trim().is_empty()).map(str::to_string);
        non_empty(&self.annual_income)
            .or_else(|| non_empty(&self.monthly_income))
            .or_else(|| {
                non_empty(&self.hourly_wage).map(|wage| {
                    let hours = self.hours_per_week.as_deref().unwrap_or("?");
                    format!("{wage}/hr ({hours} hrs/wk)")
                })
            })
            .unwrap_or_else(|| "N/A".to_string())
    }
}

/// Financing pre-approval application
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreApprovalForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub time_at_address: Option<TimeAtAddress>,
    #[serde(default)]
    pub housing: Option<Housing>,
    #[serde(default)]
    pub employment_status: Option<String>,
    #[serde(default)]
    pub employer_details: Option<EmployerDetails>,
    #[serde(default)]
    pub income_details: Option<IncomeDetails>,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub trade_in: Option<String>,
    #[serde(default)]
    pub credit_rating: Option<String>,
}

impl PreApprovalForm {
    pub fn into_lead(self) -> Result<NewLead, SharedError> {
        let first = required("firstName", &self.first_name, "First name", 100)?;
        let last = required("lastName", &self.last_name, "Last name", 100)?;
        let email = validate_email(&self.email)?;
        let phone = validate_phone(&self.phone)?;
        let notes = serde_json::to_string(&self)?;
        Ok(NewLead {
            name: format!("{first} {last}"),
            email,
            phone: Some(phone),
            message: format!("{PRE_APPROVAL_PREFIX}: {first} {last}"),
            notes: Some(notes),
        })
    }
}
