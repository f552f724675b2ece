//! Query predicates

use std::fmt;

/// A single query predicate, rendered in Prismic's bracket syntax
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `[at(path, "value")]`
    At { path: String, value: String },
}

impl Predicate {
    /// Exact-match predicate
    pub fn at(path: impl Into<String>, value: impl Into<String>) -> Self {
        Predicate::At {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Render a predicate list into the `q` query parameter
    pub fn join(predicates: &[Predicate]) -> String {
        let inner: String = predicates.iter().map(|p| p.to_string()).collect();
        format!("[{}]", inner)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::At { path, value } => {
                let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
                write!(f, "[at({}, \"{}\")]", path, escaped)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_predicate() {
        let p = Predicate::at("document.type", "posts");
        assert_eq!(p.to_string(), r#"[at(document.type, "posts")]"#);
    }

    #[test]
    fn test_join() {
        let q = Predicate::join(&[
            Predicate::at("document.type", "posts"),
            Predicate::at("my.posts.uid", "hello"),
        ]);
        assert_eq!(
            q,
            r#"[[at(document.type, "posts")][at(my.posts.uid, "hello")]]"#
        );
    }

    #[test]
    fn test_quotes_are_escaped() {
        let p = Predicate::at("my.posts.uid", r#"a"b"#);
        assert_eq!(p.to_string(), r#"[at(my.posts.uid, "a\"b")]"#);
    }
}
