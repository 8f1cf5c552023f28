pub mod executor;
pub mod params;
pub mod row;

pub use executor::PgExecutor;
