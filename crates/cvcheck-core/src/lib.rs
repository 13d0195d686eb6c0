pub mod error;
pub mod preferences;
pub mod results;
pub mod router;
pub mod upload;
