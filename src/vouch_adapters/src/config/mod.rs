pub mod settings;

pub use settings::{AllowedOrigins, AuthServiceSetting};
