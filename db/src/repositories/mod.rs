pub mod memory;
pub mod mongo;
pub mod repository;

pub use memory::InMemoryMeasurementRepository;
pub use mongo::MongoMeasurementRepository;
pub use repository::MeasurementRepository;
