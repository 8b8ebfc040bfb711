/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub summary: String,
}

/// The user's brokerage account, from `GET /v1/user/account`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountDetails {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub discretionary: bool,
    #[serde(default)]
    pub non_professional: bool,
    pub account_type: String,
}

/// Applicant details submitted when opening an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountApplicant {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub email: String,
    pub birthday: String,
    #[serde(rename = "ssn_last_4")]
    pub ssn_last_4: String,
    pub birth_country: String,
    pub citizenship_country: String,
    pub mobile: String,
    pub mobile_device: String,
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "line_1", default, skip_serializing_if = "Option::is_none")]
    pub line_1: Option<String>,
    #[serde(rename = "line_2", default, skip_serializing_if = "Option::is_none")]
    pub line_2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}
