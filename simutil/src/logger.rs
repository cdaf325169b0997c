/// Intercept messages using the `log` crate and print them to STDERR, defaulting to `info`.
/// Override with `RUST_LOG`. Safe to call more than once; only the first call installs anything.
pub fn setup() {
    use env_logger::{Builder, Env};
    if Builder::from_env(Env::default().default_filter_or("info"))
        .try_init()
        .is_err()
    {
        log::debug!("Logger was already set up");
    }
}
