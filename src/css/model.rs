//! Selector AST: SelectorList, Selector, CompoundSelector, attribute matchers.

/// Attribute comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrOperator {
    /// `[name=value]`
    Equals,
    /// `[name^=value]`
    Prefix,
    /// `[name$=value]`
    Suffix,
    /// `[name*=value]`
    Substring,
}

/// An attribute selector such as `[href]` or `[href^="#"]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    pub name: String,
    /// `None` for a bare presence test.
    pub matcher: Option<(AttrOperator, String)>,
}

impl AttributeSelector {
    /// Test an attribute value (`None` when the attribute is absent).
    ///
    /// Prefix, suffix and substring tests against an empty string never
    /// match.
    pub fn matches(&self, value: Option<&str>) -> bool {
        let Some(value) = value else {
            return false;
        };
        match &self.matcher {
            None => true,
            Some((AttrOperator::Equals, expected)) => value == expected,
            Some((_, expected)) if expected.is_empty() => false,
            Some((AttrOperator::Prefix, expected)) => value.starts_with(expected.as_str()),
            Some((AttrOperator::Suffix, expected)) => value.ends_with(expected.as_str()),
            Some((AttrOperator::Substring, expected)) => value.contains(expected.as_str()),
        }
    }
}

/// A single simple selector.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// Type selector: matches the tag name (e.g. `section`).
    Type(String),
    /// Universal selector: `*`.
    Universal,
    /// Class selector: `.classname`.
    Class(String),
    /// ID selector: `#id`.
    Id(String),
    /// Attribute selector: `[name op "value"]`.
    Attribute(AttributeSelector),
}

/// A combinator between compound selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Descendant combinator (whitespace): `A B`.
    Descendant,
    /// Child combinator: `A > B`.
    Child,
}

/// A sequence of simple selectors without combinators, e.g. `a.active[href]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

/// One element in a selector chain.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorPart {
    Compound(CompoundSelector),
    Combinator(Combinator),
}

/// A complex selector: compound selectors joined by combinators.
///
/// `.nav-menu li a` has parts `Compound(.nav-menu)`, `Combinator(Descendant)`,
/// `Compound(li)`, `Combinator(Descendant)`, `Compound(a)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selector {
    /// Alternating compound selectors and combinators.
    /// Always starts and ends with a `SelectorPart::Compound`.
    pub parts: Vec<SelectorPart>,
}

/// A comma-separated selector group, e.g. `.hero, nav, .cta-button`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectorList {
    pub selectors: Vec<Selector>,
}

impl SelectorList {
    /// Whether the list holds no selectors.
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Number of comma-separated selectors.
    pub fn len(&self) -> usize {
        self.selectors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(op: AttrOperator, value: &str) -> AttributeSelector {
        AttributeSelector {
            name: "href".into(),
            matcher: Some((op, value.into())),
        }
    }

    #[test]
    fn presence_test() {
        let sel = AttributeSelector {
            name: "href".into(),
            matcher: None,
        };
        assert!(sel.matches(Some("")));
        assert!(!sel.matches(None));
    }

    #[test]
    fn operators() {
        assert!(attr(AttrOperator::Equals, "#top").matches(Some("#top")));
        assert!(!attr(AttrOperator::Equals, "#top").matches(Some("#top2")));
        assert!(attr(AttrOperator::Prefix, "#").matches(Some("#about")));
        assert!(!attr(AttrOperator::Prefix, "#").matches(Some("/about")));
        assert!(attr(AttrOperator::Suffix, ".pdf").matches(Some("cv.pdf")));
        assert!(attr(AttrOperator::Substring, "mail").matches(Some("mailto:x")));
    }

    #[test]
    fn empty_operand_never_matches_partial_operators() {
        assert!(!attr(AttrOperator::Prefix, "").matches(Some("#x")));
        assert!(!attr(AttrOperator::Suffix, "").matches(Some("#x")));
        assert!(!attr(AttrOperator::Substring, "").matches(Some("#x")));
        assert!(attr(AttrOperator::Equals, "").matches(Some("")));
    }

    #[test]
    fn selector_list_len() {
        let list = SelectorList {
            selectors: vec![Selector::default(), Selector::default()],
        };
        assert_eq!(list.len(), 2);
        assert!(!list.is_empty());
        assert!(SelectorList::default().is_empty());
    }

    #[test]
    fn combinator_variants() {
        assert_ne!(Combinator::Descendant, Combinator::Child);
    }
}
