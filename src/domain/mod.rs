// Domain layer: customer records, prediction results and ports (interfaces).

pub mod customer;
pub mod model;
pub mod ports;
