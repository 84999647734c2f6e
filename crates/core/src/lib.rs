pub mod buckets;
pub mod error;
pub mod histogram;
pub mod scheme;
pub mod summary;

pub type Result<T> = std::result::Result<T, error::Error>;
pub use error::Error;
pub use histogram::Histogram;
pub use summary::Summary;
