/// Length of the longest JSON number lexeme at the start of `bytes`:
/// `-?digits(.digits)?([eE][+-]?digits)?`.
///
/// A fraction or exponent without digits is not part of the lexeme, so `1.`
/// yields 1 and leaves the `.` for the caller to reject. Returns `None` when
/// no digits follow the optional sign.
pub(crate) fn lexeme_len(bytes: &[u8]) -> Option<usize> {
    let digits_from = |from: usize| {
        bytes
            .get(from..)
            .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
    };

    let mut len = usize::from(bytes.first() == Some(&b'-'));
    let int = digits_from(len);
    if int == 0 {
        return None;
    }
    len += int;

    if bytes.get(len) == Some(&b'.') {
        let frac = digits_from(len + 1);
        if frac > 0 {
            len += 1 + frac;
        }
    }

    if matches!(bytes.get(len), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(len + 1), Some(b'+' | b'-')));
        let exp = digits_from(len + 1 + sign);
        if exp > 0 {
            len += 1 + sign + exp;
        }
    }

    Some(len)
}

/// Parses a number lexeme with the locale-independent `f64` parser.
pub(crate) fn parse_f64(lexeme: &[u8]) -> Option<f64> {
    core::str::from_utf8(lexeme).ok()?.parse().ok()
}
