pub mod config;
pub mod error;
pub mod lenient;
pub mod predictions;
pub mod prices;
pub mod sources;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::*;
pub use error::*;
pub use predictions::*;
pub use prices::*;
pub use sources::predictor;
