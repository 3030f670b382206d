// Domain layer: the connection contract shared with the host framework and the driver port.

pub mod model;
pub mod ports;
