//! Feature tree model
//!
//! The generic in-memory representation of a parsed payload. A node is
//! either a leaf attribute holding a raw lexical value, or a complex feature
//! holding an ordered list of child attributes. Document order of children
//! is significant; mappers rely on positional semantics for some types.
//!
//! Trees are built once by [`crate::builder::FeatureTreeBuilder`], consumed
//! by one conversion pass, and never mutated afterwards.

/// A node of the feature tree
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    /// Leaf attribute with a scalar lexical value
    Simple(SimpleAttribute),
    /// Branch with typed, ordered child attributes
    Complex(ComplexFeature),
}

/// Leaf attribute
///
/// `value` is the raw lexical form from the document; numeric and temporal
/// parsing is deferred to mappers, since interpretation is type-specific.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleAttribute {
    pub type_name: String,
    pub local_name: String,
    pub value: String,
}

/// Complex feature with ordered children
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexFeature {
    pub type_name: String,
    pub local_name: String,
    children: Vec<Attribute>,
}

impl Attribute {
    /// The resolved type name of this node
    pub fn type_name(&self) -> &str {
        match self {
            Attribute::Simple(s) => &s.type_name,
            Attribute::Complex(c) => &c.type_name,
        }
    }

    /// The element local name of this node
    pub fn local_name(&self) -> &str {
        match self {
            Attribute::Simple(s) => &s.local_name,
            Attribute::Complex(c) => &c.local_name,
        }
    }

    /// Get as complex feature if this is a branch
    pub fn as_complex(&self) -> Option<&ComplexFeature> {
        match self {
            Attribute::Complex(c) => Some(c),
            _ => None,
        }
    }

    /// Get as leaf attribute if this is a leaf
    pub fn as_simple(&self) -> Option<&SimpleAttribute> {
        match self {
            Attribute::Simple(s) => Some(s),
            _ => None,
        }
    }

    /// Get the leaf value if this is a leaf
    pub fn value(&self) -> Option<&str> {
        match self {
            Attribute::Simple(s) => Some(&s.value),
            _ => None,
        }
    }

    /// Lexical value of this node
    ///
    /// For a leaf, its value. For an attribute-bearing leaf element (which
    /// the builder represents as a complex node), the self-named
    /// character-data child.
    pub fn lexical_value(&self) -> Option<&str> {
        match self {
            Attribute::Simple(s) => Some(&s.value),
            Attribute::Complex(c) => c.lexical_value(),
        }
    }
}

impl SimpleAttribute {
    /// Create a leaf attribute
    pub fn new(
        type_name: impl Into<String>,
        local_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            local_name: local_name.into(),
            value: value.into(),
        }
    }
}

impl ComplexFeature {
    /// Create a complex feature with the given children
    ///
    /// Children are frozen at construction; the builder finalizes a node
    /// only once all of its children are complete.
    pub fn new(
        type_name: impl Into<String>,
        local_name: impl Into<String>,
        children: Vec<Attribute>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            local_name: local_name.into(),
            children,
        }
    }

    /// Children in document order
    pub fn children(&self) -> &[Attribute] {
        &self.children
    }

    /// First child whose type name matches, in document order
    ///
    /// Non-recursive.
    pub fn find_first_child(&self, type_name: &str) -> Option<&Attribute> {
        self.children.iter().find(|c| c.type_name() == type_name)
    }

    /// All children whose type name matches, in document order
    ///
    /// Non-recursive.
    pub fn find_children(&self, type_name: &str) -> Vec<&Attribute> {
        self.children
            .iter()
            .filter(|c| c.type_name() == type_name)
            .collect()
    }

    /// First child whose local name matches, in document order
    pub fn find_first_by_local(&self, local_name: &str) -> Option<&Attribute> {
        self.children.iter().find(|c| c.local_name() == local_name)
    }

    /// Lexical value of the first matching leaf child
    pub fn child_value(&self, type_name: &str) -> Option<&str> {
        self.find_first_child(type_name).and_then(|c| c.value())
    }

    /// Lexical value of the first leaf child with the given local name
    pub fn child_value_by_local(&self, local_name: &str) -> Option<&str> {
        self.find_first_by_local(local_name).and_then(|c| c.value())
    }

    /// Character data of an attribute-bearing leaf element
    ///
    /// The builder stores such text as a self-named leaf child; see
    /// [`Attribute::lexical_value`].
    pub fn lexical_value(&self) -> Option<&str> {
        self.child_value_by_local(&self.local_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_feature() -> ComplexFeature {
        ComplexFeature::new(
            "TimePeriodType",
            "TimePeriod",
            vec![
                Attribute::Simple(SimpleAttribute::new("id", "id", "tp1")),
                Attribute::Simple(SimpleAttribute::new(
                    "TimePositionType",
                    "beginPosition",
                    "2020-01-01",
                )),
                Attribute::Simple(SimpleAttribute::new(
                    "TimePositionType",
                    "endPosition",
                    "2020-01-02",
                )),
            ],
        )
    }

    #[test]
    fn test_find_first_child_document_order() {
        let feature = sample_feature();
        let first = feature.find_first_child("TimePositionType").unwrap();
        assert_eq!(first.local_name(), "beginPosition");
        assert_eq!(first.value(), Some("2020-01-01"));
    }

    #[test]
    fn test_find_children_all_matches_in_order() {
        let feature = sample_feature();
        let matches = feature.find_children("TimePositionType");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].local_name(), "beginPosition");
        assert_eq!(matches[1].local_name(), "endPosition");
    }

    #[test]
    fn test_lookups_idempotent() {
        let feature = sample_feature();
        let a = feature.find_children("TimePositionType");
        let b = feature.find_children("TimePositionType");
        assert_eq!(a, b);
        assert_eq!(
            feature.find_first_child("missing").is_none(),
            feature.find_first_child("missing").is_none()
        );
    }

    #[test]
    fn test_child_value_by_local() {
        let feature = sample_feature();
        assert_eq!(feature.child_value_by_local("endPosition"), Some("2020-01-02"));
        assert_eq!(feature.child_value_by_local("absent"), None);
    }
}
