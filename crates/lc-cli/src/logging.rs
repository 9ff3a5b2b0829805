//! Logger setup for the binary.

/// Install `env_logger` on stderr.
///
/// The default level is `info` (`debug` with `--verbose`); `RUST_LOG`
/// overrides both. Only the first call in a process takes effect.
pub(crate) fn init(verbose: bool) {
    static ONCE: std::sync::Once = std::sync::Once::new();

    ONCE.call_once(|| {
        let default_level = if verbose { "debug" } else { "info" };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .format_timestamp(None)
            .format_target(verbose)
            .init();
    });
}
