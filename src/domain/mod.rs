// Domain layer: listing entities, the price-ordered store and the ports the pipeline depends on.

pub mod genre;
pub mod listing;
pub mod model;
pub mod ports;
pub mod property;
