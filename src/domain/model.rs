use crate::utils::dates::host_date;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Contact role a holder plays on a domain. Not stored on the holder itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Admin,
    Tech,
}

impl Role {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Tech => "tech",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Opaque holder identifier issued by the registrar.
///
/// The registrar sends it as a JSON number, older payloads as a string; both
/// are accepted and kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct HolderHandle(String);

impl HolderHandle {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HolderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for HolderHandle {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for HolderHandle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(id) => Ok(Self::from(id)),
            Raw::Text(text) => Ok(Self(text)),
        }
    }
}

/// WHOIS contact fields as the host application names them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactDetails {
    #[serde(default)]
    pub company_name: String,
    pub initials: String,
    #[serde(rename = "SurName")]
    pub surname: String,
    pub address: String,
    pub zip_code: String,
    pub city: String,
    /// ISO 3166 alpha-2 code.
    pub country: String,
    pub phone_number: String,
    pub email_address: String,
}

/// One role of the host's WHOIS object, together with the handles the host
/// already stored for it, keyed by adapter name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoisContact {
    #[serde(flatten)]
    pub details: ContactDetails,
    #[serde(default, rename = "RegistrarHandles")]
    pub registrar_handles: HashMap<String, HolderHandle>,
}

impl WhoisContact {
    pub fn new(details: ContactDetails) -> Self {
        Self {
            details,
            registrar_handles: HashMap::new(),
        }
    }

    pub fn cached_handle(&self, adapter_key: &str) -> Option<&HolderHandle> {
        self.registrar_handles.get(adapter_key)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Whois {
    #[serde(default)]
    pub owner: WhoisContact,
    #[serde(default)]
    pub admin: WhoisContact,
    #[serde(default)]
    pub tech: WhoisContact,
}

impl Whois {
    pub fn with_owner(details: ContactDetails) -> Self {
        Self {
            owner: WhoisContact::new(details),
            ..Default::default()
        }
    }

    pub fn contact(&self, role: Role) -> &WhoisContact {
        match role {
            Role::Owner => &self.owner,
            Role::Admin => &self.admin,
            Role::Tech => &self.tech,
        }
    }
}

impl From<ContactDetails> for Whois {
    fn from(details: ContactDetails) -> Self {
        Whois::with_owner(details)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainDates {
    #[serde(with = "host_date")]
    pub expiration_date: NaiveDate,
    #[serde(with = "host_date")]
    pub registration_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSummary {
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "Information")]
    pub information: DomainDates,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncInformation {
    #[serde(with = "host_date")]
    pub expiration_date: NaiveDate,
}

/// Reconciliation result for one requested domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "Status", rename_all = "lowercase")]
pub enum SyncStatus {
    Success {
        #[serde(rename = "Information")]
        information: SyncInformation,
    },
    Error {
        #[serde(rename = "Error_msg")]
        message: String,
    },
}

impl SyncStatus {
    pub const NOT_FOUND: &'static str = "Domain not found";
    pub const NOT_INVOICED: &'static str = "Domain not invoiced yet";

    pub fn success(expiration_date: NaiveDate) -> Self {
        Self::Success {
            information: SyncInformation { expiration_date },
        }
    }

    pub fn not_found() -> Self {
        Self::Error {
            message: Self::NOT_FOUND.to_string(),
        }
    }

    pub fn not_invoiced() -> Self {
        Self::Error {
            message: Self::NOT_INVOICED.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// A listing that keeps "nothing there" apart from "could not ask".
///
/// Both `Empty` and `FetchFailed` are still reported to the host as a
/// failure; the tag only makes the difference visible to Rust callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing<T> {
    Found(Vec<T>),
    Empty,
    FetchFailed,
}

impl<T> Listing<T> {
    pub fn from_items(items: Vec<T>) -> Self {
        if items.is_empty() {
            Self::Empty
        } else {
            Self::Found(items)
        }
    }

    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::Found(_))
    }

    pub fn items(&self) -> &[T] {
        match self {
            Self::Found(items) => items,
            Self::Empty | Self::FetchFailed => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactLookup {
    Found(ContactDetails),
    NotFound,
    FetchFailed,
}

impl ContactLookup {
    /// Mirrors the host contract: a miss yields a record with unset fields.
    pub fn into_details(self) -> ContactDetails {
        match self {
            Self::Found(details) => details,
            Self::NotFound | Self::FetchFailed => ContactDetails::default(),
        }
    }

    pub fn found(&self) -> Option<&ContactDetails> {
        match self {
            Self::Found(details) => Some(details),
            Self::NotFound | Self::FetchFailed => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSummary {
    #[serde(rename = "Handle")]
    pub handle: HolderHandle,
    #[serde(flatten)]
    pub details: ContactDetails,
}

/// Which contract operations actually reach the registrar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub availability_check: bool,
    pub registration: bool,
    pub transfer: bool,
    pub deletion: bool,
    pub domain_listing: bool,
    pub domain_information: bool,
    pub locking: bool,
    pub auto_renew: bool,
    pub transfer_token: bool,
    pub direct_whois_update: bool,
    pub registrar_whois: bool,
    pub contact_management: bool,
    pub nameserver_update: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInformation {
    pub name: String,
    pub api_version: String,
    pub date: String,
    pub version: String,
    pub developer: String,
}
