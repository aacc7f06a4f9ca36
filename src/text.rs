//! Newline segmentation for multi-line alignment input.
//!
//! Alignment operates on borrowed slices of the caller's text, so there is
//! no intermediate line buffer and no upper bound on line length.

/// Lazily split `text` into newline-delimited segments.
///
/// A trailing newline terminates the final segment rather than opening an
/// empty one: `"a\n"` yields `["a"]`. Interior empty lines survive, so
/// `"a\n\nb"` yields `["a", "", "b"]`. Empty input yields nothing.
pub fn line_segments(text: &str) -> LineSegments<'_> {
    LineSegments { rest: Some(text) }
}

/// Iterator returned by [`line_segments`].
#[derive(Debug, Clone)]
pub struct LineSegments<'a> {
    rest: Option<&'a str>,
}

impl<'a> Iterator for LineSegments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.rest.take()?;
        if rest.is_empty() {
            return None;
        }
        match rest.find('\n') {
            Some(at) => {
                self.rest = Some(&rest[at + 1..]);
                Some(&rest[..at])
            }
            None => Some(rest),
        }
    }
}
