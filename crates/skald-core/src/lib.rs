pub mod config;
pub mod paths;
pub mod types;
pub mod window;

pub use config::SkaldConfig;
pub use paths::SkaldPaths;
pub use types::*;
pub use window::TimeWindow;
