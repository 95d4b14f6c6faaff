// Adapters layer: concrete implementations of the domain ports (local filesystem, HTTP).

pub mod http;
pub mod storage;
