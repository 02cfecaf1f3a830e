// Domain layer: list-view value types and ports. No I/O here.

pub mod model;
pub mod ports;
