//! Registrar JSON schemas.
//!
//! These mirror the registrar's payloads field for field. Mapping into the
//! host's names happens in `core`, never here.

use crate::domain::model::HolderHandle;
use serde::{Deserialize, Deserializer};

/// Availability code meaning "free to register".
pub const AVAILABLE_CODE: i64 = 210;

/// Delete status meaning the domain has been cancelled.
pub const CANCELLED_STATUS: &str = "cancelled";

/// Most endpoints wrap their payload as `{"results": ...}`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub results: T,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityResponse {
    pub code: i64,
}

/// Domain entry as the listing reads it (`paid_until`, plain dates).
#[derive(Debug, Clone, Deserialize)]
pub struct ListedDomain {
    pub description: String,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub is_external: bool,
    #[serde(default)]
    pub paid_until: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Domain entry as the sync reads it. The registrar spells the expiry
/// `paid_untill` here and sends an ISO-8601 timestamp.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncedDomain {
    pub description: String,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub is_external: bool,
    #[serde(default)]
    pub paid_untill: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Holder {
    pub holder_id: HolderHandle,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default)]
    pub city: String,
    pub country_id: u64,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedHolder {
    pub holder_id: HolderHandle,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Country {
    pub id: u64,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Extension {
    pub id: u64,
    pub extension: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteResult {
    pub status: String,
}

/// Holder fields submitted to the add and edit endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolderForm {
    pub company: Option<String>,
    pub firstname: String,
    pub lastname: String,
    pub phone_number: String,
    pub street: String,
    pub zipcode: String,
    pub city: String,
    pub country_id: u64,
    pub email: String,
    /// Marks holders created through this module.
    pub from_module: bool,
}

impl HolderForm {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(11);
        if let Some(company) = &self.company {
            pairs.push(("company", company.clone()));
        }
        pairs.push(("firstname", self.firstname.clone()));
        pairs.push(("lastname", self.lastname.clone()));
        pairs.push(("phone_number", self.phone_number.clone()));
        pairs.push(("street", self.street.clone()));
        pairs.push(("zipcode", self.zipcode.clone()));
        pairs.push(("city", self.city.clone()));
        pairs.push(("country_id", self.country_id.to_string()));
        pairs.push(("email", self.email.clone()));
        if self.from_module {
            pairs.push(("module", "1".to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderForm {
    pub domain: String,
    pub extension_id: u64,
    pub holder_id: HolderHandle,
    pub year: u32,
    pub auth_code: Option<String>,
}

impl OrderForm {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("domain", self.domain.clone()),
            ("extension_id", self.extension_id.to_string()),
            ("holder_id", self.holder_id.to_string()),
            ("year", self.year.to_string()),
        ];
        if let Some(code) = &self.auth_code {
            pairs.push(("authcode", code.clone()));
        }
        pairs
    }
}

/// The registrar sends flags as `true`/`false` or `1`/`0`.
fn flexible_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Number(i64),
        Text(String),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Bool(flag) => flag,
        Raw::Number(n) => n != 0,
        Raw::Text(text) => matches!(text.as_str(), "1" | "true"),
        Raw::Null(()) => false,
    })
}
