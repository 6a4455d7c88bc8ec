use crate::Token;

/// Receiver of token events from [`scan`](crate::scan).
///
/// Sinks are called once per token, in input order. They cannot fail; a sink
/// that wants to end the scan early overrides [`should_stop`], which the
/// scanner consults after every event.
///
/// Closures taking a [`Token`] are sinks:
///
/// ```rust
/// use jsonspan::{TokenKind, scan};
///
/// let mut keys = 0;
/// scan(br#"{"a":1,"b":2}"#, &mut |t: jsonspan::Token<'_>| {
///     if t.kind == TokenKind::Key {
///         keys += 1;
///     }
/// })
/// .unwrap();
/// assert_eq!(keys, 2);
/// ```
///
/// [`should_stop`]: EventSink::should_stop
pub trait EventSink {
    /// Receives one token.
    fn event(&mut self, token: Token<'_>);

    /// Whether the scanner should halt after the event just delivered.
    ///
    /// When this returns `true`, [`scan`](crate::scan) returns `Ok` with the
    /// number of bytes consumed so far. The default never stops.
    fn should_stop(&self) -> bool {
        false
    }
}

impl<F> EventSink for F
where
    F: FnMut(Token<'_>),
{
    fn event(&mut self, token: Token<'_>) {
        self(token);
    }
}

/// A sink that discards every event; used for validation-only scans.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn event(&mut self, _token: Token<'_>) {}
}
