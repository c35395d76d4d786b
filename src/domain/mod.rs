// Domain layer: record types, the output column layout and the ports the
// enricher talks through.

pub mod model;
pub mod ports;
