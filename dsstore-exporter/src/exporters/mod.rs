pub mod exporter;
pub mod ndjson;
pub mod txt;
