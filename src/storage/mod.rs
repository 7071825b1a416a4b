// Storage adapters: concrete FileManager implementations.

pub mod csv;
