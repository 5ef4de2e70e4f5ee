//! Backslash escape resolution for string literals

use crate::logging::{codes, Code};

/// Problems found while resolving escapes; none of them stop categorization
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EscapeError {
    #[error("Unknown escape sequence '\\{character}'")]
    UnknownEscape {
        character: char,
        /// Byte offset of the backslash within the quoted token
        offset: usize,
    },

    #[error("String literal ends with a lone backslash")]
    DanglingEscape { offset: usize },
}

impl EscapeError {
    pub fn error_code(&self) -> Code {
        match self {
            EscapeError::UnknownEscape { .. } => codes::lexical::UNKNOWN_ESCAPE,
            EscapeError::DanglingEscape { .. } => codes::lexical::DANGLING_ESCAPE,
        }
    }

    pub fn offset(&self) -> usize {
        match self {
            EscapeError::UnknownEscape { offset, .. } | EscapeError::DanglingEscape { offset } => {
                *offset
            }
        }
    }

    /// Source text the diagnostic points at
    pub fn sequence(&self) -> String {
        match self {
            EscapeError::UnknownEscape { character, .. } => format!("\\{}", character),
            EscapeError::DanglingEscape { .. } => "\\".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EscapeResolution {
    pub value: String,
    pub diagnostics: Vec<EscapeError>,
}

impl EscapeResolution {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Character produced by `\c`, if `c` is a known escape
pub fn escape_char(c: char) -> Option<char> {
    match c {
        '"' => Some('"'),
        '\\' => Some('\\'),
        '\'' => Some('\''),
        't' => Some('\t'),
        'n' => Some('\n'),
        _ => None,
    }
}

/// True if `content` is a complete quoted literal: `"` at both ends, length >= 2
pub fn is_quoted(content: &str) -> bool {
    content.len() >= 2 && content.starts_with('"') && content.ends_with('"')
}

/// Strip the delimiting quotes and resolve escapes.
///
/// Unknown escapes contribute nothing to the value. Callers must pass content
/// for which [`is_quoted`] holds; anything else resolves to itself.
pub fn resolve_escapes(quoted: &str) -> EscapeResolution {
    if !is_quoted(quoted) {
        return EscapeResolution {
            value: quoted.to_string(),
            diagnostics: Vec::new(),
        };
    }

    let inner = &quoted[1..quoted.len() - 1];
    let mut resolution = EscapeResolution {
        value: String::with_capacity(inner.len()),
        diagnostics: Vec::new(),
    };

    let mut chars = inner.char_indices();
    while let Some((index, ch)) = chars.next() {
        if ch != '\\' {
            resolution.value.push(ch);
            continue;
        }

        let offset = index + 1;
        match chars.next() {
            Some((_, next)) => match escape_char(next) {
                Some(resolved) => resolution.value.push(resolved),
                None => resolution.diagnostics.push(EscapeError::UnknownEscape {
                    character: next,
                    offset,
                }),
            },
            None => resolution
                .diagnostics
                .push(EscapeError::DanglingEscape { offset }),
        }
    }

    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_plain_string() {
        let resolution = resolve_escapes("\"hello world\"");
        assert_eq!(resolution.value, "hello world");
        assert!(resolution.is_clean());
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(resolve_escapes("\"\"").value, "");
    }

    #[test]
    fn test_escape_table() {
        let resolution = resolve_escapes(r#""q\" b\\ s\' t\t n\n""#);
        assert_eq!(resolution.value, "q\" b\\ s' t\t n\n");
        assert!(resolution.is_clean());
    }

    #[test]
    fn test_escaped_quote_in_middle() {
        assert_eq!(resolve_escapes(r#""hi \" there""#).value, "hi \" there");
    }

    #[test]
    fn test_unknown_escape_is_dropped() {
        let resolution = resolve_escapes(r#""a\qb""#);

        assert_eq!(resolution.value, "ab");
        assert_eq!(
            resolution.diagnostics,
            vec![EscapeError::UnknownEscape {
                character: 'q',
                offset: 2
            }]
        );
        assert_eq!(resolution.diagnostics[0].sequence(), "\\q");
        assert_eq!(
            resolution.diagnostics[0].error_code(),
            codes::lexical::UNKNOWN_ESCAPE
        );
    }

    #[test]
    fn test_processing_continues_after_unknown_escape() {
        let resolution = resolve_escapes(r#""\x\y\n""#);
        assert_eq!(resolution.value, "\n");
        assert_eq!(resolution.diagnostics.len(), 2);
    }

    #[test]
    fn test_dangling_backslash() {
        // Only reachable from lenient scanning of an unterminated literal
        let resolution = resolve_escapes("\"ab\\\"");
        assert_eq!(resolution.value, "ab");
        assert_matches!(
            resolution.diagnostics.as_slice(),
            [EscapeError::DanglingEscape { offset: 3 }]
        );
    }

    #[test]
    fn test_is_quoted() {
        assert!(is_quoted("\"\""));
        assert!(is_quoted("\"x\""));
        assert!(!is_quoted("\""));
        assert!(!is_quoted("\"x"));
        assert!(!is_quoted("x\""));
    }

    #[test]
    fn test_unquoted_input_passes_through() {
        let resolution = resolve_escapes("abc");
        assert_eq!(resolution.value, "abc");
        assert!(resolution.is_clean());
    }
}
