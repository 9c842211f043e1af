//! User-agent stylesheet.
//!
//! Default presentation for common elements, written in the grammar the
//! parser supports: one selector per rule, single-word values, percentages
//! for relative font sizes. These rules always come first in the cascade's
//! concatenation order, so a page rule of equal specificity overrides them.

use std::sync::OnceLock;

use crate::parser::{Rule, parse_stylesheet};

/// Default CSS rules for HTML elements.
const UA_CSS: &str = r"
/* Links */
a { color: blue; }

/* Phrasing content */
b { font-weight: bold; }
strong { font-weight: bold; }
i { font-style: italic; }
em { font-style: italic; }
cite { font-style: italic; }
small { font-size: 80%; }
big { font-size: 120%; }
code { font-family: monospace; }
pre { font-family: monospace; background-color: #eeeeee; }

/* Headings */
h1 { font-size: 200%; font-weight: bold; }
h2 { font-size: 150%; font-weight: bold; }
h3 { font-size: 117%; font-weight: bold; }
h4 { font-weight: bold; }
h5 { font-size: 83%; font-weight: bold; }
h6 { font-size: 67%; font-weight: bold; }

/* Form controls */
input { font-size: 16px; background-color: lightblue; }
button { background-color: orange; }
";

/// Return the parsed UA rules, parsing only once.
pub fn ua_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| parse_stylesheet(UA_CSS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_rule_parses() {
        // One rule per non-comment, non-blank line.
        let expected = UA_CSS
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with("/*"))
            .count();
        assert_eq!(ua_rules().len(), expected);
    }

    #[test]
    fn test_heading_rule() {
        let h1 = ua_rules()
            .iter()
            .find(|rule| rule.selector.to_string() == "h1")
            .unwrap();
        assert_eq!(h1.declarations["font-size"], "200%");
        assert_eq!(h1.declarations["font-weight"], "bold");
    }
}
