// Adapters layer: the registrar's REST surface and its wire schemas.

pub mod http;
pub mod wire;

pub use http::{RegistrarApi, DEFAULT_BASE_URL};
