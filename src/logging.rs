use tracing_subscriber::EnvFilter;

/// ログ出力を初期化
///
/// `RUST_LOG` が指定されていればそれを優先する。
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "warn,job_tracker=debug,job_tracker_common=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // テストなどで二重に初期化された場合は無視する
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
