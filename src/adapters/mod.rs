// Adapters layer: concrete implementations for external systems (file storage, record codecs).

pub mod csv_records;
pub mod storage;
