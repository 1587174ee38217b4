use crate::adapters::wire::OrderForm;
use crate::adapters::RegistrarApi;
use crate::core::lookup;
use crate::domain::model::HolderHandle;

/// Orders always run for one year; renewals happen registrar-side.
pub const ORDER_YEARS: u32 = 1;

/// Splits `example.co.uk` into `("example", "co.uk")` at the first dot.
pub fn split_domain(fqdn: &str) -> Option<(&str, &str)> {
    let (label, suffix) = fqdn.trim().split_once('.')?;
    if label.is_empty() || suffix.is_empty() {
        return None;
    }
    Some((label, suffix))
}

/// Submits a registration (or, with an auth code, a transfer) order.
///
/// Returns `false` without contacting the order endpoint when the suffix is
/// not a known extension. An order counts as placed on HTTP 200 alone.
pub async fn place_order(
    api: &RegistrarApi,
    fqdn: &str,
    holder: &HolderHandle,
    auth_code: Option<&str>,
) -> bool {
    let Some((label, suffix)) = split_domain(fqdn) else {
        tracing::debug!("{} has no suffix, not ordering", fqdn);
        return false;
    };

    let Some(extension_id) = lookup::resolve_extension_id(api, suffix).await else {
        tracing::debug!("Extension {} is not offered, not ordering {}", suffix, fqdn);
        return false;
    };

    let order = OrderForm {
        domain: label.to_string(),
        extension_id,
        holder_id: holder.clone(),
        year: ORDER_YEARS,
        auth_code: auth_code
            .filter(|code| !code.trim().is_empty())
            .map(str::to_string),
    };

    match api.place_order(&order).await {
        Ok(()) => {
            tracing::info!("Order placed for {} (holder {})", fqdn, holder);
            true
        }
        Err(e) => {
            tracing::warn!("Order for {} failed: {}", fqdn, e);
            false
        }
    }
}
