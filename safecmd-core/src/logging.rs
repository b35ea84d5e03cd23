/// Initialise `env_logger` for binaries.
///
/// `RUST_LOG` wins when set; otherwise the level is `debug` with `verbose`
/// and `info` without. Calling this twice is harmless.
pub fn init(verbose: bool) {
    let mut builder = if std::env::var_os("RUST_LOG").is_some() {
        env_logger::Builder::from_default_env()
    } else {
        let level = if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        let mut builder = env_logger::Builder::new();
        builder.filter_level(level);
        builder
    };
    builder.target(env_logger::Target::Stderr);
    let _ = builder.try_init();
}
