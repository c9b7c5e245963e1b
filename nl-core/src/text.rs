//! Validação de intervalos fornecidos pelo chamador.
//!
//! Todos os offsets do crate são em bytes, semiabertos (`start..end`), e precisam
//! cair em fronteiras de escalar Unicode. Intervalos inválidos nunca são
//! ajustados silenciosamente.

use std::ops::Range;

use crate::error::{NlError, Result};

/// Confere se `range` está dentro de `text` e em fronteiras de `char`.
pub fn check_range(text: &str, range: Range<usize>) -> Result<Range<usize>> {
    let valid = range.start <= range.end
        && range.end <= text.len()
        && text.is_char_boundary(range.start)
        && text.is_char_boundary(range.end);

    if valid {
        Ok(range)
    } else {
        Err(NlError::InvalidRange {
            start: range.start,
            end: range.end,
            len: text.len(),
        })
    }
}

/// Fatia `text` por um intervalo já validado por [`check_range`].
pub fn slice(text: &str, range: Range<usize>) -> Result<&str> {
    let range = check_range(text, range)?;
    Ok(&text[range])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_full_and_empty_ranges() {
        assert_eq!(check_range("abc", 0..3).unwrap(), 0..3);
        assert_eq!(check_range("abc", 3..3).unwrap(), 3..3);
        assert_eq!(check_range("", 0..0).unwrap(), 0..0);
    }

    #[test]
    fn test_rejects_out_of_bounds() {
        let err = check_range("abc", 1..4).unwrap_err();
        assert!(matches!(err, NlError::InvalidRange { start: 1, end: 4, len: 3 }));
    }

    #[test]
    fn test_rejects_reversed_range() {
        #[allow(clippy::reversed_empty_ranges)]
        let range = 2..1;
        assert!(check_range("abc", range).is_err());
    }

    #[test]
    fn test_rejects_split_scalar() {
        // "é" ocupa 2 bytes
        assert!(check_range("é", 0..1).is_err());
        assert_eq!(slice("éa", 2..3).unwrap(), "a");
    }
}
