// Domain layer: trip models and ports (interfaces). No HTTP or web details here.

pub mod model;
pub mod ports;
