// Domain layer: request/response models and the ports the flows talk through.

pub mod model;
pub mod ports;
