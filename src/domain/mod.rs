// Domain layer: value types and the ports the core drives.

pub mod model;
pub mod ports;
