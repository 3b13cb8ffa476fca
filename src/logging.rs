// src/logging.rs

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber. `RUST_LOG` wins over `default_directives`
/// when set. Fails instead of panicking if a global subscriber exists.
pub fn init_tracing(default_directives: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber already installed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_an_error_not_a_panic() {
        // another test may have installed one first, so only the
        // second attempt is guaranteed to find a subscriber in place
        if init_tracing("headlight_control=debug").is_ok() {
            assert!(tracing::dispatcher::has_been_set());
        }
        assert!(init_tracing("headlight_control=debug").is_err());
    }
}
