// Domain layer: phone number model and ports (interfaces). No HTTP or library types here.

pub mod model;
pub mod ports;
