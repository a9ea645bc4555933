pub mod ingest;
pub mod moderate;
pub mod resize;
