// Domain layer: the practitioner entity, inbound payload validation, paging types and the
// repository port. Storage mechanics live under `adapters`.

pub mod model;
pub mod page;
pub mod payload;
pub mod ports;
pub mod projection;
