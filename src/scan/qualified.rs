//! Resolution of scope-qualified identifiers (`NS::Class::method`).

/// A qualified name split into its `::` segments.
///
/// Only the first two qualifiers are surfaced as namespace and class; deeper
/// chains such as `NS::Outer::Inner::method` collapse to `class_name = Outer`.
/// The full chain stays available through `segments()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    segments: Vec<String>,
}

impl QualifiedName {
    /// Split `text` on `::`.
    ///
    /// Returns None for unscoped names or when any segment is empty.
    pub fn parse(text: &str) -> Option<Self> {
        let segments: Vec<String> = text.split("::").map(|s| s.trim().to_string()).collect();
        if segments.len() < 2 || segments.iter().any(|s| s.is_empty()) {
            return None;
        }
        Some(Self { segments })
    }

    /// The simple function name (last segment).
    pub fn name(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    pub fn namespace(&self) -> Option<&str> {
        if self.segments.len() >= 3 {
            Some(&self.segments[0])
        } else {
            None
        }
    }

    pub fn class_name(&self) -> Option<&str> {
        match self.segments.len() {
            2 => Some(&self.segments[0]),
            n if n >= 3 => Some(&self.segments[1]),
            _ => None,
        }
    }

    /// Every segment, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Every segment except the simple name.
    pub fn qualifiers(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_segments() {
        let q = QualifiedName::parse("NS::Cls::method").unwrap();
        assert_eq!(q.namespace(), Some("NS"));
        assert_eq!(q.class_name(), Some("Cls"));
        assert_eq!(q.name(), "method");
        assert_eq!(q.segments().len(), 3);
    }

    #[test]
    fn test_two_segments() {
        let q = QualifiedName::parse("Cls::method").unwrap();
        assert_eq!(q.namespace(), None);
        assert_eq!(q.class_name(), Some("Cls"));
        assert_eq!(q.name(), "method");
    }

    #[test]
    fn test_deep_nesting_collapses() {
        let q = QualifiedName::parse("NS::Outer::Inner::method").unwrap();
        assert_eq!(q.namespace(), Some("NS"));
        assert_eq!(q.class_name(), Some("Outer"));
        assert_eq!(q.name(), "method");
        assert_eq!(q.qualifiers(), ["NS", "Outer", "Inner"]);
        assert_eq!(q.segments(), ["NS", "Outer", "Inner", "method"]);
    }

    #[test]
    fn test_spacing_and_templates() {
        let q = QualifiedName::parse("Stack<T> :: push").unwrap();
        assert_eq!(q.class_name(), Some("Stack<T>"));
        assert_eq!(q.name(), "push");
    }

    #[test]
    fn test_rejects_unscoped() {
        assert!(QualifiedName::parse("main").is_none());
        assert!(QualifiedName::parse("::main").is_none());
        assert!(QualifiedName::parse("Foo::").is_none());
    }
}
