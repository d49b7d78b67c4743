use smallvec::SmallVec;

/// Segments before spilling to the heap. Most paths are `controller/action/arg`.
pub const MAX_INLINE_SEGMENTS: usize = 8;

/// A request path split into segments.
///
/// `[0]` is the controller, `[1]` the action, `[2..]` positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath {
    segments: SmallVec<[String; MAX_INLINE_SEGMENTS]>,
}

impl ParsedPath {
    /// Drop the `?` suffix, trim one leading and one trailing `/`, and split on `/`.
    ///
    /// The empty path parses to a single empty segment.
    #[must_use]
    pub fn parse(raw_path: &str) -> Self {
        let path = raw_path
            .split_once('?')
            .map_or(raw_path, |(path, _query)| path);
        let path = path.strip_prefix('/').unwrap_or(path);
        let path = path.strip_suffix('/').unwrap_or(path);
        Self {
            segments: path.split('/').map(str::to_string).collect(),
        }
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The controller segment, or `None` when it is empty.
    #[must_use]
    pub fn controller(&self) -> Option<&str> {
        self.segments
            .first()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// The action segment, or `None` when absent or empty.
    #[must_use]
    pub fn action(&self) -> Option<&str> {
        self.segments
            .get(1)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Segments from `index` onwards; empty when the path is shorter.
    #[must_use]
    pub fn args_from(&self, index: usize) -> &[String] {
        self.segments.get(index..).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root() {
        for raw in ["", "/", "//", "/?page=2"] {
            let parsed = ParsedPath::parse(raw);
            assert_eq!(parsed.controller(), None, "{raw}");
            assert!(parsed.args_from(1).is_empty(), "{raw}");
        }
    }

    #[test]
    fn test_parse_segments() {
        let parsed = ParsedPath::parse("/blog/show/42/?x=1");
        assert_eq!(parsed.controller(), Some("blog"));
        assert_eq!(parsed.action(), Some("show"));
        assert_eq!(parsed.args_from(2), &["42".to_string()]);
        assert_eq!(parsed.args_from(1), &["show".to_string(), "42".to_string()]);
        assert!(parsed.args_from(3).is_empty());
        assert!(parsed.args_from(10).is_empty());
    }

    #[test]
    fn test_only_one_separator_trimmed() {
        let parsed = ParsedPath::parse("//blog//");
        assert_eq!(parsed.segments(), &["", "blog", ""]);
        assert_eq!(parsed.controller(), None);
    }

    #[test]
    fn test_empty_action_segment() {
        let parsed = ParsedPath::parse("blog//7");
        assert_eq!(parsed.action(), None);
        assert_eq!(parsed.args_from(1), &["".to_string(), "7".to_string()]);
    }
}
