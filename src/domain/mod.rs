// Domain layer: catalog model and ports. No I/O here; files and the console
// stay behind the adapters in storage/ and app/.

pub mod catalog;
pub mod model;
pub mod ports;
