pub mod ingest;
pub mod response;
pub mod routes;
pub mod state;
