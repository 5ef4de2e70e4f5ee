//! Per-line view of a token sequence

use super::token::{ClassifiedToken, RawToken};
use serde::Serialize;
use std::collections::HashMap;

/// Anything that knows which source line it starts on
pub trait Located {
    fn line(&self) -> u32;
}

impl Located for RawToken {
    fn line(&self) -> u32 {
        RawToken::line(self)
    }
}

impl Located for ClassifiedToken {
    fn line(&self) -> u32 {
        ClassifiedToken::line(self)
    }
}

impl<T: Located> Located for &T {
    fn line(&self) -> u32 {
        (**self).line()
    }
}

/// Tokens that start on one source line, in scan order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineGroup<T> {
    pub line: u32,
    pub tokens: Vec<T>,
}

impl<T> LineGroup<T> {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Partition `tokens` by starting line.
///
/// Groups appear in the order their line is first seen and keep the relative
/// order of their tokens. Lines without tokens get no group.
pub fn group_by_line<T, I>(tokens: I) -> Vec<LineGroup<T>>
where
    T: Located,
    I: IntoIterator<Item = T>,
{
    let mut groups: Vec<LineGroup<T>> = Vec::new();
    let mut index_of: HashMap<u32, usize> = HashMap::new();

    for token in tokens {
        let line = token.line();
        match index_of.get(&line) {
            Some(&index) => groups[index].tokens.push(token),
            None => {
                index_of.insert(line, groups.len());
                groups.push(LineGroup {
                    line,
                    tokens: vec![token],
                });
            }
        }
    }

    groups
}
