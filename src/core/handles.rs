use crate::core::adapter::RegistrarAdapter;
use crate::core::reply::Reply;
use crate::domain::model::{HolderHandle, Role, Whois};
use crate::domain::ports::Registrar;

impl RegistrarAdapter {
    /// Finds a usable holder handle for `role`.
    ///
    /// Order of preference: the handle the host cached for this adapter, an
    /// existing holder with the role's email address, a freshly created
    /// holder. Handles obtained from the registrar are reported in
    /// `Reply::handles` so the host can cache them. Without a cached handle
    /// or an email address there is nothing to resolve.
    pub async fn resolve_handle(&self, whois: &Whois, role: Role) -> Reply<Option<HolderHandle>> {
        let contact = whois.contact(role);

        if let Some(cached) = contact.cached_handle(self.handle_key()) {
            tracing::debug!("Using cached {} handle {}", role, cached);
            return Reply::new(Some(cached.clone()));
        }

        let mut reply = Reply::new(None);
        if contact.details.email_address.trim().is_empty() {
            return reply;
        }

        let mut handle = reply.absorb(self.find_contact_handle(whois, role).await);
        if handle.is_none() {
            handle = reply.absorb(self.create_contact(whois, role).await);
        }

        if let Some(resolved) = &handle {
            reply.handles.insert(role, resolved.clone());
        }
        reply.value = handle;
        reply
    }
}
