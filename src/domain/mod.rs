// Domain layer: host-facing models and ports (the plugin contract and settings).

pub mod model;
pub mod ports;
