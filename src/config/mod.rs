//! Application configuration loading

mod app_config;

pub use app_config::{
    AppConfig, LlmConfig, LogFormat, LoggingConfig, PipelineConfig, SearchConfig, ServerConfig,
};
