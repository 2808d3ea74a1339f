/// Install a stderr `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise this crate logs at `info`, or `debug`
/// when `verbose` is on. Safe to call more than once.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "youtube_video_url=debug"
    } else {
        "youtube_video_url=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| fallback.into());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
