use crate::core::reply::Reply;
use crate::domain::model::{
    Capabilities, ContactLookup, ContactSummary, DomainSummary, HolderHandle,
    Listing, Role, SyncStatus, Whois,
};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};

/// Where the adapter gets its credentials and endpoint from.
pub trait RegistrarSettings: Send + Sync {
    fn base_url(&self) -> &str;
    fn access_token(&self) -> &str;
    fn username(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    /// Key under which the host caches holder handles for this adapter.
    fn handle_key(&self) -> &str;
}

/// The fixed plugin contract the host application drives.
///
/// Every call returns its own [`Reply`]; failures are reported as the
/// operation's failure value plus human-readable errors on the reply.
#[async_trait]
pub trait Registrar: Send + Sync {
    async fn check_availability(&self, domain: &str) -> Reply<bool>;

    async fn register(&mut self, domain: &str, whois: &Whois) -> Reply<bool>;

    async fn transfer(&mut self, domain: &str, whois: &Whois, auth_code: &str) -> Reply<bool>;

    async fn delete_domain(&self, domain: &str) -> Reply<bool>;

    async fn domain_info(&self, domain: &str) -> Reply<Option<DomainSummary>>;

    async fn list_domains(&self) -> Reply<Listing<DomainSummary>>;

    async fn lock_domain(&self, domain: &str, lock: bool) -> Reply<bool>;

    async fn set_auto_renew(&self, domain: &str, auto_renew: bool) -> Reply<bool>;

    async fn transfer_token(&self, domain: &str) -> Reply<Option<String>>;

    async fn update_whois_direct(&self, domain: &str, whois: &Whois) -> Reply<bool>;

    async fn whois_from_registrar(&self, domain: &str) -> Reply<Option<BTreeMap<Role, HolderHandle>>>;

    async fn sync_domain_status(
        &self,
        domains: &BTreeSet<String>,
    ) -> Reply<BTreeMap<String, SyncStatus>>;

    async fn create_contact(&self, whois: &Whois, role: Role) -> Reply<Option<HolderHandle>>;

    async fn update_contact(&self, handle: &HolderHandle, whois: &Whois, role: Role) -> Reply<bool>;

    async fn contact(&self, handle: &HolderHandle) -> Reply<ContactLookup>;

    async fn find_contact_handle(&self, whois: &Whois, role: Role) -> Reply<Option<HolderHandle>>;

    async fn list_contacts(&self, email: Option<&str>) -> Reply<Vec<ContactSummary>>;

    async fn update_nameservers(&self, domain: &str, nameservers: &[String]) -> Reply<bool>;

    fn capabilities(&self) -> Capabilities;
}
