//! Paths into nested raw data.
//!
//! A path is a sequence of segments. Each segment is either a key (objects) or
//! an index (arrays).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single segment in a path.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seg {
    /// Object key
    Key(String),
    /// Array index
    Index(usize),
}

impl Seg {
    /// Get the key if this is a key segment.
    #[inline]
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Seg::Key(k) => Some(k),
            Seg::Index(_) => None,
        }
    }

    /// Object key used when this segment addresses an object.
    ///
    /// Index segments address objects through their decimal form.
    pub fn object_key(&self) -> String {
        match self {
            Seg::Key(k) => k.clone(),
            Seg::Index(i) => i.to_string(),
        }
    }
}

impl fmt::Display for Seg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seg::Key(k) => write!(f, ".{}", k),
            Seg::Index(i) => write!(f, "[{}]", i),
        }
    }
}

impl From<String> for Seg {
    fn from(s: String) -> Self {
        Seg::Key(s)
    }
}

impl From<&str> for Seg {
    fn from(s: &str) -> Self {
        Seg::Key(s.to_owned())
    }
}

impl From<usize> for Seg {
    fn from(i: usize) -> Self {
        Seg::Index(i)
    }
}

/// A complete path into raw data.
///
/// # Examples
///
/// ```
/// use recordkit::Path;
///
/// let path = Path::root().key("address").key("city");
/// assert_eq!(path.len(), 2);
/// assert_eq!(path.to_string(), "$.address.city");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Path(Vec<Seg>);

impl Path {
    /// Create an empty path (root).
    #[inline]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Append a key segment and return self (builder pattern).
    #[inline]
    pub fn key(mut self, k: impl Into<String>) -> Self {
        self.0.push(Seg::Key(k.into()));
        self
    }

    /// Append an index segment and return self (builder pattern).
    #[inline]
    pub fn index(mut self, i: usize) -> Self {
        self.0.push(Seg::Index(i));
        self
    }

    /// Push a segment onto the path.
    #[inline]
    pub fn push(&mut self, seg: Seg) {
        self.0.push(seg);
    }

    #[inline]
    pub fn segments(&self) -> &[Seg] {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn first(&self) -> Option<&Seg> {
        self.0.first()
    }

    /// The first `len` segments.
    pub fn prefix(&self, len: usize) -> Path {
        Path(self.0[..len.min(self.0.len())].to_vec())
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Seg> {
        self.0.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for seg in &self.0 {
            write!(f, "{}", seg)?;
        }
        Ok(())
    }
}

/// Parses dotted paths: `"address.city"`, `"tags.0"`.
///
/// Canonical decimals (`0`, `12`, never `007`) become indexes; any other
/// segment is a key. Empty segments are skipped, so `""` parses to the root
/// path.
impl FromStr for Path {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.split('.')
            .filter(|part| !part.is_empty())
            .map(|part| match part.parse::<usize>() {
                Ok(i) if is_canonical_index(part) => Seg::Index(i),
                _ => Seg::Key(part.to_owned()),
            })
            .collect())
    }
}

fn is_canonical_index(part: &str) -> bool {
    let digits = part.bytes().all(|b| b.is_ascii_digit());
    digits && (part == "0" || !part.starts_with('0'))
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(path) => path,
            Err(never) => match never {},
        }
    }
}

impl From<Vec<Seg>> for Path {
    fn from(segments: Vec<Seg>) -> Self {
        Path(segments)
    }
}

impl FromIterator<Seg> for Path {
    fn from_iter<I: IntoIterator<Item = Seg>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Seg;
    type IntoIter = std::slice::Iter<'a, Seg>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::ops::Index<usize> for Path {
    type Output = Seg;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// Construct a `Path` from a sequence of segments.
///
/// ```
/// use recordkit::path;
///
/// // String literals become key segments, numbers become indexes
/// let p = path!("tags", 0);
/// assert_eq!(p.len(), 2);
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::Path::root()
    };
    ($($seg:expr),+ $(,)?) => {{
        let mut p = $crate::Path::root();
        $(
            p.push($crate::Seg::from($seg));
        )+
        p
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_construction() {
        let path = Path::root().key("users").index(0).key("name");
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], Seg::Key("users".into()));
        assert_eq!(path[1], Seg::Index(0));
        assert_eq!(path.to_string(), "$.users[0].name");
    }

    #[test]
    fn test_path_macro() {
        let p = crate::path!("foo", 2, "bar");
        assert_eq!(p, Path::root().key("foo").index(2).key("bar"));
        assert!(crate::path!().is_empty());
    }

    #[test]
    fn test_parse_dotted() {
        let p: Path = "address.lines.1".parse().unwrap();
        assert_eq!(p, Path::root().key("address").key("lines").index(1));
        assert!(Path::from("").is_empty());
        assert_eq!(Path::from("a..b"), Path::root().key("a").key("b"));
        assert_eq!(Path::from("+1"), Path::root().key("+1"));
    }

    #[test]
    fn test_parse_leading_zero_is_key() {
        assert_eq!(
            "meta.007".parse::<Path>().unwrap(),
            Path::root().key("meta").key("007")
        );
        assert_eq!(Path::from("tags.0"), Path::root().key("tags").index(0));
        assert_eq!(Path::from("tags.00"), Path::root().key("tags").key("00"));
        assert_eq!(Path::from("tags.10"), Path::root().key("tags").index(10));
    }

    #[test]
    fn test_prefix() {
        let p = Path::from("a.b.c");
        assert_eq!(p.prefix(2), Path::from("a.b"));
        assert_eq!(p.prefix(9), p);
    }
}
