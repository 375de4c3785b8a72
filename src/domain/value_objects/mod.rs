pub mod credentials;
pub mod thresholds;

pub use credentials::Credentials;
pub use thresholds::Thresholds;
