//! Parsing of raw parameter lists into (name, type) pairs.

use lazy_static::lazy_static;
use regex::Regex;

use super::Parameter;

/// Name used when a parameter has no isolable identifier.
pub const PLACEHOLDER_NAME: &str = "param";

/// The single token meaning "no parameters".
const NO_PARAMETERS: &str = "void";

lazy_static! {
    /// Type text, trailing identifier, optional default clause.
    static ref NAMED_PARAMETER: Regex =
        Regex::new(r"^(.+?)\s*\b([A-Za-z_]\w*)\s*(?:=.*)?$").unwrap();
}

/// Parameters in declaration order, plus the segments that fell back to
/// the placeholder name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterList {
    pub parameters: Vec<Parameter>,
    pub malformed: Vec<String>,
}

impl ParameterList {
    pub fn is_degraded(&self) -> bool {
        !self.malformed.is_empty()
    }
}

/// Parse the text between a definition's parentheses.
///
/// Commas are treated as separators regardless of nesting, so template
/// arguments such as `std::map<K, V>` split incorrectly.
pub fn parse_parameters(raw: &str) -> ParameterList {
    let mut list = ParameterList::default();
    let raw = raw.trim();
    if raw.is_empty() || raw == NO_PARAMETERS {
        return list;
    }

    for segment in raw.split(',').map(str::trim) {
        if segment.is_empty() || segment == NO_PARAMETERS {
            continue;
        }
        match NAMED_PARAMETER.captures(segment) {
            Some(caps) => list.parameters.push(Parameter::new(&caps[2], caps[1].trim())),
            None => {
                list.parameters.push(Parameter::new(PLACEHOLDER_NAME, segment));
                list.malformed.push(segment.to_string());
            }
        }
    }

    list
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_parameters_in_order() {
        let list = parse_parameters("int x, double y");
        assert_eq!(
            list.parameters,
            vec![Parameter::new("x", "int"), Parameter::new("y", "double")]
        );
        assert!(!list.is_degraded());
    }

    #[test]
    fn test_empty_and_void() {
        assert!(parse_parameters("").parameters.is_empty());
        assert!(parse_parameters("   ").parameters.is_empty());
        assert!(parse_parameters("void").parameters.is_empty());
        assert!(parse_parameters(" void ").parameters.is_empty());
    }

    #[test]
    fn test_references_pointers_and_qualified_types() {
        let list = parse_parameters("const Foo& o, int *p, std::vector<int> v, char** argv");
        assert_eq!(
            list.parameters,
            vec![
                Parameter::new("o", "const Foo&"),
                Parameter::new("p", "int *"),
                Parameter::new("v", "std::vector<int>"),
                Parameter::new("argv", "char**"),
            ]
        );
    }

    #[test]
    fn test_default_values_are_dropped() {
        let list = parse_parameters("int depth = 3, const std::string& label = \"root\"");
        assert_eq!(
            list.parameters,
            vec![
                Parameter::new("depth", "int"),
                Parameter::new("label", "const std::string&"),
            ]
        );
    }

    #[test]
    fn test_unnamed_parameters_use_placeholder() {
        let list = parse_parameters("int, double y, ...");
        assert_eq!(
            list.parameters,
            vec![
                Parameter::new(PLACEHOLDER_NAME, "int"),
                Parameter::new("y", "double"),
                Parameter::new(PLACEHOLDER_NAME, "..."),
            ]
        );
        assert_eq!(list.malformed, vec!["int".to_string(), "...".to_string()]);
        assert!(list.is_degraded());
    }
}
