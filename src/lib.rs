pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::TomlConfig;
pub use crate::core::{adapter::RegistrarAdapter, reply::Reply};
pub use domain::model::{
    Capabilities, ContactDetails, ContactLookup, ContactSummary, DomainSummary, HolderHandle,
    Listing, Role, SyncStatus, VersionInformation, Whois, WhoisContact,
};
pub use domain::ports::{Registrar, RegistrarSettings};
pub use utils::error::{AdapterError, Result};
