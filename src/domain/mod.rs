// Domain layer: Autotask record shapes and the port the handler depends on.

pub mod model;
pub mod ports;
