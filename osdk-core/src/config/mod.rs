mod build_config;
mod toolchain;

pub use build_config::{BuildConfig, BuildPaths, FlagFiles};
pub use toolchain::{ToolchainConfig, CROSS_COMPILE_PREFIX};
