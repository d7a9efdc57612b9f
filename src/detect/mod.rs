pub mod aggregate;
pub mod backend;
pub mod backends;
pub mod result;

pub use aggregate::aggregate;
pub use backend::DetectorBackend;
pub use backends::stub::StubBackend;
pub use result::Detection;
