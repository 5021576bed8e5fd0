//! Connection string normalization

/// Port used when the connection string does not name one.
pub const DEFAULT_PORT: u16 = 18098;

/// Normalize a `host` or `host:port` connection string into `host:port`.
///
/// The string is split on `:`. A single segment gets [`DEFAULT_PORT`]
/// appended; anything else is rejoined unchanged. The host is not
/// validated here, a malformed one fails later at dial time.
pub fn normalize_address(connection_string: &str) -> String {
    let port = DEFAULT_PORT.to_string();
    let mut pieces: Vec<&str> = connection_string.split(':').collect();
    if pieces.len() == 1 {
        pieces.push(&port);
    }
    pieces.join(":")
}
