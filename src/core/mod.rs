pub mod adapter;
pub mod handles;
pub mod lookup;
pub mod orders;
pub mod reply;

pub use crate::domain::model::{
    ContactDetails, ContactLookup, ContactSummary, DomainSummary, HolderHandle, Listing, Role,
    SyncStatus, Whois, WhoisContact,
};
pub use crate::domain::ports::{Registrar, RegistrarSettings};
pub use crate::utils::error::Result;
pub use adapter::RegistrarAdapter;
pub use reply::Reply;
