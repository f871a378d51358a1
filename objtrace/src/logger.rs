use log::LevelFilter;

/// Install the global logger. `level` replaces the default level from `RUST_LOG`; per-module
/// directives in `RUST_LOG` still apply.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_target(false)
        .init();
}
