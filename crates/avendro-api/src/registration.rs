//! Registration payloads
//!
//! Field names match what the backend serializers accept. `validate()`
//! enforces the same required-field rules the registration forms do before
//! anything is sent; the backend remains the authority.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Per-field problems found before submitting a form
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("{} field(s) need attention", .0.len())]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn require(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.insert(field, "This field is required.");
        }
    }

    fn require_opt(&mut self, field: &str, value: Option<&str>) {
        self.require(field, value.unwrap_or_default());
    }

    pub(crate) fn check_email(&mut self, email: &str) {
        self.require("email", email);
        if !email.trim().is_empty() && !email.contains('@') {
            self.insert("email", "Enter a valid email address.");
        }
    }

    fn check_account(&mut self, email: &str, username: &str, password: &str, confirm: &str) {
        self.check_email(email);
        self.require("username", username);
        self.require("password", password);
        self.require("password_confirm", confirm);
        if !password.is_empty() && password != confirm {
            self.insert("password_confirm", "Passwords don't match.");
        }
    }

    pub(crate) fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
    Separated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
    Unemployed,
    Student,
    Retired,
}

impl EmploymentStatus {
    /// Employer name, job title and monthly income must be given
    pub fn requires_employer(&self) -> bool {
        matches!(self, EmploymentStatus::Employed | EmploymentStatus::SelfEmployed)
    }

    /// A free-text source of income must be given
    pub fn requires_income_source(&self) -> bool {
        !self.requires_employer()
    }
}

/// Philippine administrative regions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Ncr,
    Car,
    Region1,
    Region2,
    Region3,
    Region4a,
    Region4b,
    Region5,
    Region6,
    Region7,
    Region8,
    Region9,
    Region10,
    Region11,
    Region12,
    Region13,
    Barmm,
}

impl Region {
    pub const ALL: [Region; 17] = [
        Region::Ncr,
        Region::Car,
        Region::Region1,
        Region::Region2,
        Region::Region3,
        Region::Region4a,
        Region::Region4b,
        Region::Region5,
        Region::Region6,
        Region::Region7,
        Region::Region8,
        Region::Region9,
        Region::Region10,
        Region::Region11,
        Region::Region12,
        Region::Region13,
        Region::Barmm,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Region::Ncr => "National Capital Region (NCR)",
            Region::Car => "Cordillera Administrative Region (CAR)",
            Region::Region1 => "Ilocos Region (Region I)",
            Region::Region2 => "Cagayan Valley (Region II)",
            Region::Region3 => "Central Luzon (Region III)",
            Region::Region4a => "CALABARZON (Region IV-A)",
            Region::Region4b => "MIMAROPA (Region IV-B)",
            Region::Region5 => "Bicol Region (Region V)",
            Region::Region6 => "Western Visayas (Region VI)",
            Region::Region7 => "Central Visayas (Region VII)",
            Region::Region8 => "Eastern Visayas (Region VIII)",
            Region::Region9 => "Zamboanga Peninsula (Region IX)",
            Region::Region10 => "Northern Mindanao (Region X)",
            Region::Region11 => "Davao Region (Region XI)",
            Region::Region12 => "SOCCSKSARGEN (Region XII)",
            Region::Region13 => "Caraga (Region XIII)",
            Region::Barmm => "Bangsamoro Autonomous Region in Muslim Mindanao (BARMM)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowerRegistrationRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub password_confirm: String,

    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<MaritalStatus>,
    pub phone_number: String,

    pub current_street: String,
    pub current_barangay: String,
    pub current_city: String,
    #[serde(default)]
    pub current_region: Region,

    pub permanent_street: String,
    pub permanent_barangay: String,
    pub permanent_city: String,
    #[serde(default)]
    pub permanent_region: Region,

    pub employment_status: EmploymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    /// Decimal amount as entered, e.g. `"35000.00"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_of_income: Option<String>,

    pub bank_name: String,
    pub bank_account_number: String,
    pub bank_account_name: String,
}

impl BorrowerRegistrationRequest {
    /// "Permanent address is the same as current address"
    pub fn copy_current_to_permanent(&mut self) {
        self.permanent_street = self.current_street.clone();
        self.permanent_barangay = self.current_barangay.clone();
        self.permanent_city = self.current_city.clone();
        self.permanent_region = self.current_region;
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.check_account(
            &self.email,
            &self.username,
            &self.password,
            &self.password_confirm,
        );

        errors.require("first_name", &self.first_name);
        errors.require("last_name", &self.last_name);
        errors.require("phone_number", &self.phone_number);

        errors.require("current_street", &self.current_street);
        errors.require("current_barangay", &self.current_barangay);
        errors.require("current_city", &self.current_city);
        errors.require("permanent_street", &self.permanent_street);
        errors.require("permanent_barangay", &self.permanent_barangay);
        errors.require("permanent_city", &self.permanent_city);

        if self.employment_status.requires_employer() {
            errors.require_opt("company_name", self.company_name.as_deref());
            errors.require_opt("job_title", self.job_title.as_deref());
            errors.require_opt("monthly_income", self.monthly_income.as_deref());
            if let Some(income) = self.monthly_income.as_deref().map(str::trim) {
                if !income.is_empty() && !is_non_negative_amount(income) {
                    errors.insert("monthly_income", "Enter a valid amount.");
                }
            }
        }
        if self.employment_status.requires_income_source() {
            errors.require_opt("source_of_income", self.source_of_income.as_deref());
        }

        errors.require("bank_name", &self.bank_name);
        errors.require("bank_account_number", &self.bank_account_number);
        errors.require("bank_account_name", &self.bank_account_name);

        errors.into_result()
    }
}

/// Optional lending terms a company can declare when it signs up
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LendingPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_loan_amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_loan_amount: Option<String>,
    /// Percent per year, e.g. `"18.5"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_interest_rate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_term_months: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRegistrationRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub password_confirm: String,

    pub company_name: String,
    pub company_registration_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_identification_number: Option<String>,

    /// Contact person
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(flatten)]
    pub lending_policy: LendingPolicy,
}

impl CompanyRegistrationRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.check_account(
            &self.email,
            &self.username,
            &self.password,
            &self.password_confirm,
        );
        errors.require("company_name", &self.company_name);
        errors.require(
            "company_registration_number",
            &self.company_registration_number,
        );

        let policy = &self.lending_policy;
        for (field, value) in [
            ("min_loan_amount", &policy.min_loan_amount),
            ("max_loan_amount", &policy.max_loan_amount),
            ("annual_interest_rate", &policy.annual_interest_rate),
        ] {
            if let Some(value) = value.as_deref() {
                if !is_non_negative_amount(value.trim()) {
                    errors.insert(field, "Enter a valid amount.");
                }
            }
        }

        if let (Some(min), Some(max)) = (
            policy.min_loan_amount.as_deref().and_then(parse_amount),
            policy.max_loan_amount.as_deref().and_then(parse_amount),
        ) {
            if min > max {
                errors.insert(
                    "max_loan_amount",
                    "Maximum loan amount must not be below the minimum.",
                );
            }
        }

        errors.into_result()
    }
}

fn parse_amount(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn is_non_negative_amount(value: &str) -> bool {
    parse_amount(value).is_some_and(|v| v >= 0.0)
}
