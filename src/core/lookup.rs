//! Reference-data lookups (countries, extensions).
//!
//! Lists are tiny and refetched per operation, so a linear scan is all that
//! is needed. The first match wins when the registrar returns duplicates.

use crate::adapters::wire::{Country, Extension};
use crate::adapters::RegistrarApi;

pub fn first_match<T, F>(items: &[T], predicate: F) -> Option<&T>
where
    F: Fn(&T) -> bool,
{
    items.iter().find(|&item| predicate(item))
}

pub fn country_by_code<'a>(countries: &'a [Country], code: &str) -> Option<&'a Country> {
    let code = code.trim();
    if code.is_empty() {
        return None;
    }
    first_match(countries, |country| country.code.eq_ignore_ascii_case(code))
}

pub fn country_by_id(countries: &[Country], id: u64) -> Option<&Country> {
    first_match(countries, |country| country.id == id)
}

pub fn extension_by_suffix<'a>(extensions: &'a [Extension], suffix: &str) -> Option<&'a Extension> {
    let wanted = suffix.trim().trim_start_matches('.');
    if wanted.is_empty() {
        return None;
    }
    first_match(extensions, |ext| {
        ext.extension.trim().trim_start_matches('.').eq_ignore_ascii_case(wanted)
    })
}

/// Fetches countries; `None` means the registrar could not be asked.
pub async fn fetch_countries(api: &RegistrarApi) -> Option<Vec<Country>> {
    match api.countries().await {
        Ok(countries) => Some(countries),
        Err(e) => {
            tracing::warn!("Country list unavailable: {}", e);
            None
        }
    }
}

pub async fn fetch_extensions(api: &RegistrarApi) -> Vec<Extension> {
    match api.extensions().await {
        Ok(extensions) => extensions,
        Err(e) => {
            tracing::warn!("Extension list unavailable: {}", e);
            Vec::new()
        }
    }
}

/// Resolves an ISO code to the registrar's country id in one round trip.
pub async fn resolve_country_id(api: &RegistrarApi, code: &str) -> Option<u64> {
    let countries = fetch_countries(api).await?;
    country_by_code(&countries, code).map(|country| country.id)
}

pub async fn resolve_extension_id(api: &RegistrarApi, suffix: &str) -> Option<u64> {
    let extensions = fetch_extensions(api).await;
    extension_by_suffix(&extensions, suffix).map(|ext| ext.id)
}
