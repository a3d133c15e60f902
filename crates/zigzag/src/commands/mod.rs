pub mod completion;
pub mod config;
pub mod layout;
pub mod progress;
pub mod version;
