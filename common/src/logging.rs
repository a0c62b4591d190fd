use tracing::Level;

/// Installs the global `tracing` subscriber. Output goes to stderr; stdout is
/// left untouched for the packaging process that invokes these tools.
///
/// Returns false if a subscriber was already installed.
pub fn init(level: Level) -> bool {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).is_ok()
}

/// Parses a level name (`error`, `warn`, `info`, `debug`, `trace`), any case.
pub fn parse_level(name: &str) -> Option<Level> {
    name.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_level_names() {
        assert_eq!(parse_level("warn"), Some(Level::WARN));
        assert_eq!(parse_level(" DEBUG "), Some(Level::DEBUG));
        assert_eq!(parse_level("loud"), None);
    }
}
