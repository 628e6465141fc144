pub mod defaults;
pub mod loader;

pub use loader::{BracketRecord, ConfigLoader, ConfigLoaderError, YearParamsRecord};
