pub mod ports;
pub mod postgres;
pub mod repositories;

pub use ports::tours::TourRepository;
pub use postgres::PostgresDatabase;
pub use repositories::tours::PostgresTourRepository;
