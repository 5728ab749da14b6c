//! 日志初始化

use tracing_subscriber::EnvFilter;

/// 初始化 tracing 输出
///
/// 优先使用 `RUST_LOG`；未设置时默认 `info`，`VERBOSE_LOGGING=true` 时为 `debug`。
/// 重复调用是安全的（测试里会多次调用）。
pub fn init() {
    let verbose = std::env::var("VERBOSE_LOGGING")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);
    let default_level = if verbose { "debug" } else { "info" };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
