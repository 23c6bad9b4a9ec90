pub mod config;
pub mod normalization;
pub mod pipeline;
pub mod providers;
pub mod resolver;
pub mod tracing;

pub mod util {
    pub mod env;
}
