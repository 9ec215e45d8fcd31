pub mod ingest;
pub mod lookup;
