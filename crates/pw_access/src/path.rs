//! Path expressions: parsing `name.sub[key].leaf` into elements.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use thiserror::Error;

// -----------------------------------------------------------------------------
// PathElement

/// A single step of a path expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
    /// `name` or `.name`: a record field, or a pseudo property
    /// such as `length` on a container.
    PropertyName(Box<str>),
    /// `[key]`: an index, a map key or a set member. The text between
    /// the brackets is kept raw and converted during resolution.
    Subscript(Box<str>),
}

impl PathElement {
    /// Returns the raw text of the element.
    #[inline]
    pub fn text(&self) -> &str {
        match self {
            Self::PropertyName(name) | Self::Subscript(name) => name,
        }
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PropertyName(name) => write!(f, ".{name}"),
            Self::Subscript(key) => write!(f, "[{key}]"),
        }
    }
}

/// A [`PathElement`] with its byte offset in the source path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OffsetElement {
    pub element: PathElement,
    pub offset: usize,
}

// -----------------------------------------------------------------------------
// ParseError

/// The reason a path expression was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unmatched `[`")]
    UnclosedBracket,
    #[error("empty property name after `.`")]
    EmptyPropertyName,
    #[error("expected `.` or `[` after `]`")]
    MissingSeparator,
}

/// A malformed path expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Encountered an error at offset {offset} while parsing `{path}`: {kind}")]
pub struct ParseError {
    /// Byte offset of the offending character.
    pub offset: usize,
    pub path: Box<str>,
    pub kind: ParseErrorKind,
}

// -----------------------------------------------------------------------------
// PathExpression

/// A parsed path expression.
///
/// Grammar:
///
/// - `.name` addresses a property, the leading name may omit the dot.
/// - `[key]` addresses an element of a container. Brackets do not nest,
///   the key ends at the first `]`.
/// - The empty path addresses the root value itself.
///
/// ```
/// use pw_access::path::{PathElement, PathExpression};
///
/// let path = PathExpression::parse("servers[2].ports[http]").unwrap();
/// let elements: Vec<_> = path.iter().map(|e| e.element.to_string()).collect();
/// assert_eq!(elements, [".servers", "[2]", ".ports", "[http]"]);
///
/// let err = PathExpression::parse("a[1").unwrap_err();
/// assert_eq!(err.offset, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathExpression {
    source: Box<str>,
    elements: Box<[OffsetElement]>,
}

#[inline]
fn next_delimiter(path: &str, from: usize) -> usize {
    path[from..]
        .find(['.', '['])
        .map_or(path.len(), |pos| from + pos)
}

impl PathExpression {
    /// Parses a path expression.
    pub fn parse(path: &str) -> Result<Self, ParseError> {
        let fail = |offset, kind| ParseError {
            offset,
            path: path.into(),
            kind,
        };

        let mut elements = Vec::new();

        let first = next_delimiter(path, 0);
        if first > 0 || path.is_empty() {
            elements.push(OffsetElement {
                element: PathElement::PropertyName(path[..first].into()),
                offset: 0,
            });
        }

        let bytes = path.as_bytes();
        let mut pos = first;
        while pos < path.len() {
            match bytes[pos] {
                b'.' => {
                    let end = next_delimiter(path, pos + 1);
                    if end == pos + 1 {
                        return Err(fail(pos, ParseErrorKind::EmptyPropertyName));
                    }
                    elements.push(OffsetElement {
                        element: PathElement::PropertyName(path[pos + 1..end].into()),
                        offset: pos,
                    });
                    pos = end;
                }
                b'[' => {
                    let Some(len) = path[pos + 1..].find(']') else {
                        return Err(fail(pos, ParseErrorKind::UnclosedBracket));
                    };
                    elements.push(OffsetElement {
                        element: PathElement::Subscript(path[pos + 1..pos + 1 + len].into()),
                        offset: pos,
                    });
                    pos += len + 2;
                }
                _ => return Err(fail(pos, ParseErrorKind::MissingSeparator)),
            }
        }

        Ok(Self {
            source: path.into(),
            elements: elements.into_boxed_slice(),
        })
    }

    /// Returns the original path text.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn elements(&self) -> &[OffsetElement] {
        &self.elements
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, OffsetElement> {
        self.elements.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` for the empty path, which addresses the root value.
    pub fn is_root(&self) -> bool {
        matches!(
            &*self.elements,
            [OffsetElement { element: PathElement::PropertyName(name), .. }] if name.is_empty()
        )
    }
}

impl FromStr for PathExpression {
    type Err = ParseError;

    #[inline]
    fn from_str(path: &str) -> Result<Self, Self::Err> {
        Self::parse(path)
    }
}

impl fmt::Display for PathExpression {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{ParseErrorKind, PathElement, PathExpression};
    use alloc::{string::ToString, vec::Vec};

    fn elements(path: &str) -> Vec<(PathElement, usize)> {
        PathExpression::parse(path)
            .unwrap()
            .iter()
            .map(|e| (e.element.clone(), e.offset))
            .collect()
    }

    fn name(text: &str) -> PathElement {
        PathElement::PropertyName(text.into())
    }

    fn subscript(text: &str) -> PathElement {
        PathElement::Subscript(text.into())
    }

    #[test]
    fn parse_mixed_path() {
        assert_eq!(
            elements("a.b[2].c"),
            [(name("a"), 0), (name("b"), 1), (subscript("2"), 3), (name("c"), 6)]
        );
    }

    #[test]
    fn leading_dot_and_subscript() {
        assert_eq!(elements(".a"), [(name("a"), 0)]);
        assert_eq!(elements("[x].y"), [(subscript("x"), 0), (name("y"), 3)]);
        assert_eq!(elements("m[a.b]"), [(name("m"), 0), (subscript("a.b"), 1)]);
        assert_eq!(elements("s[]"), [(name("s"), 0), (subscript(""), 1)]);
    }

    #[test]
    fn empty_path_is_root() {
        let path = PathExpression::parse("").unwrap();
        assert!(path.is_root());
        assert_eq!(path.len(), 1);
        assert!(!PathExpression::parse("a").unwrap().is_root());
    }

    #[test]
    fn malformed_paths() {
        let err = PathExpression::parse("a[1").unwrap_err();
        assert_eq!((err.offset, err.kind), (1, ParseErrorKind::UnclosedBracket));
        assert_eq!(
            err.to_string(),
            "Encountered an error at offset 1 while parsing `a[1`: unmatched `[`"
        );

        let err = PathExpression::parse("a.").unwrap_err();
        assert_eq!((err.offset, err.kind), (1, ParseErrorKind::EmptyPropertyName));

        let err = PathExpression::parse("a..b").unwrap_err();
        assert_eq!(err.offset, 1);

        let err = PathExpression::parse("a[0]b").unwrap_err();
        assert_eq!((err.offset, err.kind), (4, ParseErrorKind::MissingSeparator));

        // Brackets do not nest: the key ends at the first `]`.
        let err = PathExpression::parse("a[b[c]]").unwrap_err();
        assert_eq!(err.offset, 6);
    }

    #[test]
    fn display_keeps_source() {
        let path: PathExpression = "x[1].y".parse().unwrap();
        assert_eq!(path.to_string(), "x[1].y");
    }
}
