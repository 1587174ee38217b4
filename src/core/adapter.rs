use crate::adapters::wire::{
    Holder, HolderForm, ListedDomain, SyncedDomain, AVAILABLE_CODE, CANCELLED_STATUS,
};
use crate::adapters::{RegistrarApi, DEFAULT_BASE_URL};
use crate::core::lookup;
use crate::core::orders;
use crate::core::reply::Reply;
use crate::domain::model::{
    Capabilities, ContactDetails, ContactLookup, ContactSummary, DomainDates, DomainSummary,
    HolderHandle, Listing, Role, SyncStatus, VersionInformation, Whois,
};
use crate::domain::ports::{Registrar, RegistrarSettings};
use crate::utils::dates;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

/// Registration period the host starts from and returns to after an order.
pub const DEFAULT_PERIOD: u32 = 1;

pub const DEFAULT_HANDLE_KEY: &str = "registrar-adapter";

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

const RELEASE_DATE: &str = "2026-10-18";

pub struct RegistrarAdapter {
    api: RegistrarApi,
    username: String,
    handle_key: String,
    /// Registration period requested by the host, in years.
    pub period: u32,
}

impl RegistrarAdapter {
    pub fn new(access_token: &str) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, access_token)
    }

    pub fn with_base_url(base_url: &str, access_token: &str) -> Result<Self> {
        let api = RegistrarApi::new(
            base_url,
            access_token,
            Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        )?;
        Ok(Self::from_api(api))
    }

    pub fn from_settings<S: RegistrarSettings>(settings: &S) -> Result<Self> {
        let api = RegistrarApi::new(
            settings.base_url(),
            settings.access_token(),
            Duration::from_secs(settings.timeout_seconds()),
        )?;

        Ok(Self {
            username: settings.username().to_string(),
            handle_key: settings.handle_key().to_string(),
            ..Self::from_api(api)
        })
    }

    pub fn from_api(api: RegistrarApi) -> Self {
        Self {
            api,
            username: String::new(),
            handle_key: DEFAULT_HANDLE_KEY.to_string(),
            period: DEFAULT_PERIOD,
        }
    }

    pub fn with_handle_key(mut self, handle_key: &str) -> Self {
        self.handle_key = handle_key.to_string();
        self
    }

    /// Kept for the host contract; authentication only uses the token.
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn handle_key(&self) -> &str {
        &self.handle_key
    }

    pub fn version_information() -> VersionInformation {
        VersionInformation {
            name: "Registrar adapter".to_string(),
            api_version: "2".to_string(),
            date: RELEASE_DATE.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            developer: env!("CARGO_PKG_AUTHORS").to_string(),
        }
    }

    async fn order(
        &mut self,
        domain: &str,
        whois: &Whois,
        auth_code: Option<&str>,
        action: &str,
    ) -> Reply<bool> {
        let mut reply = Reply::new(false);

        match reply.absorb(self.resolve_handle(whois, Role::Owner).await) {
            Some(owner) => {
                reply.value = orders::place_order(&self.api, domain, &owner, auth_code).await;
            }
            None => reply.error(format!("No owner contact given for domain {}", domain)),
        }

        if reply.value {
            self.period = DEFAULT_PERIOD;
            reply.success(format!("The domain {} has been {}", domain, action));
        } else {
            reply.error(format!("The domain {} could not be {}", domain, action));
        }
        reply
    }

    /// Edit form: every field is sent, an empty company clears it.
    fn holder_form(details: &ContactDetails, country_id: u64) -> HolderForm {
        HolderForm {
            company: Some(details.company_name.clone()),
            firstname: details.initials.clone(),
            lastname: details.surname.clone(),
            phone_number: details.phone_number.clone(),
            street: details.address.clone(),
            zipcode: details.zip_code.clone(),
            city: details.city.clone(),
            country_id,
            email: details.email_address.clone(),
            from_module: false,
        }
    }

    /// Create form: omits an empty company and marks the holder as module-created.
    fn new_holder_form(details: &ContactDetails, country_id: u64) -> HolderForm {
        let company = Some(details.company_name.clone()).filter(|c| !c.trim().is_empty());
        HolderForm {
            company,
            from_module: true,
            ..Self::holder_form(details, country_id)
        }
    }

    fn holder_details(holder: &Holder, country_code: &str) -> ContactDetails {
        ContactDetails {
            company_name: holder.company.clone().unwrap_or_default(),
            initials: holder.firstname.clone(),
            surname: holder.lastname.clone(),
            address: holder.street.clone(),
            zip_code: holder.zipcode.clone(),
            city: holder.city.clone(),
            country: country_code.to_string(),
            phone_number: holder.phone_number.clone(),
            email_address: holder.email.clone(),
        }
    }

    fn summarize(domain: &ListedDomain) -> Option<DomainSummary> {
        let expiration_date = dates::parse_listing_date(domain.paid_until.as_deref()?)?;
        let registration_date = dates::parse_listing_date(domain.start_date.as_deref()?)?;

        Some(DomainSummary {
            domain: domain.description.clone(),
            information: DomainDates {
                expiration_date,
                registration_date,
            },
        })
    }

    fn sync_status(domain: &SyncedDomain, reply: &mut Reply<BTreeMap<String, SyncStatus>>) -> SyncStatus {
        let paid_untill = domain.paid_untill.as_deref().unwrap_or("").trim();
        if paid_untill.is_empty() {
            return SyncStatus::not_invoiced();
        }

        match dates::parse_timestamp(paid_untill) {
            Some(expires) => SyncStatus::success(expires),
            None => {
                reply.warning(format!(
                    "Unreadable expiration date '{}' for {}",
                    paid_untill, domain.description
                ));
                SyncStatus::not_invoiced()
            }
        }
    }
}

#[async_trait]
impl Registrar for RegistrarAdapter {
    async fn check_availability(&self, domain: &str) -> Reply<bool> {
        match self.api.availability_code(domain).await {
            Ok(code) => {
                tracing::debug!("Availability code for {}: {}", domain, code);
                Reply::new(code == AVAILABLE_CODE)
            }
            Err(e) => {
                tracing::warn!("Availability check for {} failed: {}", domain, e);
                Reply::new(false)
            }
        }
    }

    async fn register(&mut self, domain: &str, whois: &Whois) -> Reply<bool> {
        self.order(domain, whois, None, "registered").await
    }

    async fn transfer(&mut self, domain: &str, whois: &Whois, auth_code: &str) -> Reply<bool> {
        self.order(domain, whois, Some(auth_code), "transferred").await
    }

    async fn delete_domain(&self, domain: &str) -> Reply<bool> {
        let mut reply = Reply::new(false);

        match self.api.delete_domain(domain).await {
            Ok(status) if status == CANCELLED_STATUS => {
                tracing::info!("Domain {} cancelled", domain);
                reply.value = true;
                reply.success(format!("The domain {} has been deleted", domain));
            }
            Ok(status) => tracing::debug!("Delete of {} left status {}", domain, status),
            Err(e) => tracing::warn!("Delete of {} failed: {}", domain, e),
        }
        reply
    }

    async fn domain_info(&self, _domain: &str) -> Reply<Option<DomainSummary>> {
        Reply::unsupported(None, "Fetching information for a single domain is not supported")
    }

    async fn list_domains(&self) -> Reply<Listing<DomainSummary>> {
        let mut reply = Reply::new(Listing::FetchFailed);

        match self.api.domains::<ListedDomain>().await {
            Ok(domains) => {
                let mut summaries = Vec::with_capacity(domains.len());
                for domain in domains.iter().filter(|d| !d.is_external) {
                    match Self::summarize(domain) {
                        Some(summary) => summaries.push(summary),
                        None => reply.warning(format!(
                            "Skipping {}: missing or unreadable dates",
                            domain.description
                        )),
                    }
                }
                tracing::debug!("Listed {} managed domains", summaries.len());
                reply.value = Listing::from_items(summaries);
            }
            Err(e) => tracing::warn!("Domain list unavailable: {}", e),
        }

        if reply.value.is_failure() {
            reply.error("Could not retrieve domains");
        }
        reply
    }

    async fn lock_domain(&self, _domain: &str, _lock: bool) -> Reply<bool> {
        Reply::unsupported(false, "Locking and unlocking domains is not supported")
    }

    async fn set_auto_renew(&self, _domain: &str, _auto_renew: bool) -> Reply<bool> {
        Reply::unsupported(false, "Changing the auto renew status is not supported")
    }

    async fn transfer_token(&self, _domain: &str) -> Reply<Option<String>> {
        Reply::unsupported(None, "Fetching the transfer token is not supported")
    }

    async fn update_whois_direct(&self, _domain: &str, _whois: &Whois) -> Reply<bool> {
        Reply::unsupported(false, "Updating the domain WHOIS directly is not supported")
    }

    async fn whois_from_registrar(&self, _domain: &str) -> Reply<Option<BTreeMap<Role, HolderHandle>>> {
        Reply::unsupported(None, "Fetching domain handles from the registrar is not supported")
    }

    async fn sync_domain_status(
        &self,
        domains: &BTreeSet<String>,
    ) -> Reply<BTreeMap<String, SyncStatus>> {
        let mut reply = Reply::new(BTreeMap::new());
        let mut statuses = BTreeMap::new();

        match self.api.domains::<SyncedDomain>().await {
            Ok(fetched) => {
                for domain in fetched.iter().filter(|d| !d.is_external) {
                    if domains.contains(&domain.description) && !statuses.contains_key(&domain.description) {
                        let status = Self::sync_status(domain, &mut reply);
                        statuses.insert(domain.description.clone(), status);
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Domain list unavailable for sync: {}", e);
                reply.warning("Could not retrieve domains from the registrar");
            }
        }

        for requested in domains {
            statuses
                .entry(requested.clone())
                .or_insert_with(SyncStatus::not_found);
        }

        reply.value = statuses;
        reply
    }

    async fn create_contact(&self, whois: &Whois, role: Role) -> Reply<Option<HolderHandle>> {
        let mut reply = Reply::new(None);
        let details = &whois.contact(role).details;

        let Some(country_id) = lookup::resolve_country_id(&self.api, &details.country).await else {
            reply.error(format!("Country code {} could not be resolved", details.country));
            return reply;
        };

        let form = Self::new_holder_form(details, country_id);
        match self.api.create_holder(&form).await {
            Ok(handle) => {
                tracing::info!("Created {} contact {}", role, handle);
                reply.success(format!("Contact {} has been created", handle));
                reply.value = Some(handle);
            }
            Err(e) => {
                tracing::warn!("Creating {} contact failed: {}", role, e);
                reply.error("Could not create contact");
            }
        }
        reply
    }

    async fn update_contact(&self, handle: &HolderHandle, whois: &Whois, role: Role) -> Reply<bool> {
        let mut reply = Reply::new(false);
        let details = &whois.contact(role).details;

        let Some(country_id) = lookup::resolve_country_id(&self.api, &details.country).await else {
            reply.error(format!("Country code {} could not be resolved", details.country));
            return reply;
        };

        let form = Self::holder_form(details, country_id);
        match self.api.update_holder(handle, &form).await {
            Ok(()) => {
                reply.value = true;
                reply.success(format!("Contact {} has been updated", handle));
            }
            Err(e) => {
                tracing::warn!("Updating contact {} failed: {}", handle, e);
                reply.error("Could not update contact");
            }
        }
        reply
    }

    async fn contact(&self, handle: &HolderHandle) -> Reply<ContactLookup> {
        let mut reply = Reply::new(ContactLookup::FetchFailed);

        let holders = match self.api.holders().await {
            Ok(holders) => holders,
            Err(e) => {
                tracing::warn!("Holder list unavailable: {}", e);
                reply.error("Contact could not be retrieved");
                return reply;
            }
        };
        let Some(countries) = lookup::fetch_countries(&self.api).await else {
            reply.error("Contact could not be retrieved");
            return reply;
        };

        let found = lookup::first_match(&holders, |holder| holder.holder_id == *handle)
            .and_then(|holder| {
                lookup::country_by_id(&countries, holder.country_id)
                    .map(|country| Self::holder_details(holder, &country.code))
            });

        match found {
            Some(details) => reply.value = ContactLookup::Found(details),
            None => {
                reply.value = ContactLookup::NotFound;
                reply.error("Contact could not be retrieved");
            }
        }
        reply
    }

    async fn find_contact_handle(&self, whois: &Whois, role: Role) -> Reply<Option<HolderHandle>> {
        let email = whois.contact(role).details.email_address.trim();
        if email.is_empty() {
            return Reply::new(None);
        }

        let listed = self.list_contacts(Some(email)).await;
        let handle = listed.value.first().map(|contact| contact.handle.clone());
        listed.with_value(handle)
    }

    async fn list_contacts(&self, email: Option<&str>) -> Reply<Vec<ContactSummary>> {
        let mut reply = Reply::new(Vec::new());
        let email = email.map(str::trim).filter(|e| !e.is_empty());

        let holders = match self.api.holders().await {
            Ok(holders) => holders,
            Err(e) => {
                tracing::warn!("Holder list unavailable: {}", e);
                reply.warning("Could not retrieve contacts");
                return reply;
            }
        };
        let countries = lookup::fetch_countries(&self.api).await.unwrap_or_default();

        for holder in &holders {
            let Some(country) = lookup::country_by_id(&countries, holder.country_id) else {
                continue;
            };

            let summary = ContactSummary {
                handle: holder.holder_id.clone(),
                details: Self::holder_details(holder, &country.code),
            };

            match email {
                Some(wanted) => {
                    if holder.email.trim() == wanted {
                        reply.value.push(summary);
                        break;
                    }
                }
                None => reply.value.push(summary),
            }
        }
        reply
    }

    async fn update_nameservers(&self, domain: &str, nameservers: &[String]) -> Reply<bool> {
        tracing::debug!(
            "Nameserver update for {} ({} servers) is not forwarded",
            domain,
            nameservers.len()
        );
        let mut reply = Reply::new(true);
        reply.warning("Nameserver updates are not forwarded to the registrar");
        reply
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            availability_check: true,
            registration: true,
            transfer: true,
            deletion: true,
            domain_listing: true,
            domain_information: false,
            locking: false,
            auto_renew: false,
            transfer_token: false,
            direct_whois_update: false,
            registrar_whois: false,
            contact_management: true,
            nameserver_update: false,
        }
    }
}
