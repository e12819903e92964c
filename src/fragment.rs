//! Output units produced by the capability mappers.
//!
//! A fragment is a logical tag, an ordered attribute list and either text or
//! child fragments. Namespace prefixes and the concrete byte encoding belong
//! to the writer (see `xml`).

use crate::model::Capability;
use std::fmt;

/// Logical tag identity of a fragment.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Tag {
    IdShort,
    Category,
    Description,
    LangString,
    ModelType,
    Identification,
    Administration,
    Version,
    Revision,
    EmbeddedDataSpecification,
    DataSpecification,
    SemanticId,
    Keys,
    Key,
    ModelingKind,
    Qualifier,
    Qualifiers,
    Formula,
    DependsOnRefs,
    Reference,
    Type,
    ValueType,
    Value,
    ValueId,
}

impl Tag {
    /// Local element name in the external schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::IdShort => "idShort",
            Tag::Category => "category",
            Tag::Description => "description",
            Tag::LangString => "langString",
            Tag::ModelType => "modelType",
            Tag::Identification => "identification",
            Tag::Administration => "administration",
            Tag::Version => "version",
            Tag::Revision => "revision",
            Tag::EmbeddedDataSpecification => "embeddedDataSpecification",
            Tag::DataSpecification => "dataSpecification",
            Tag::SemanticId => "semanticId",
            Tag::Keys => "keys",
            Tag::Key => "key",
            Tag::ModelingKind => "modelingKind",
            Tag::Qualifier => "qualifier",
            Tag::Qualifiers => "qualifiers",
            Tag::Formula => "formula",
            Tag::DependsOnRefs => "dependsOnRefs",
            Tag::Reference => "reference",
            Tag::Type => "type",
            Tag::ValueType => "valueType",
            Tag::Value => "value",
            Tag::ValueId => "valueId",
        }
    }

    /// Capability that contributes this tag at the top level of an entity's
    /// fragment list. Nested tags have no origin of their own.
    pub fn origin(&self) -> Option<Capability> {
        match self {
            Tag::IdShort | Tag::Category | Tag::Description | Tag::ModelType => {
                Some(Capability::Referable)
            }
            Tag::Identification | Tag::Administration => Some(Capability::Identifiable),
            Tag::EmbeddedDataSpecification => Some(Capability::HasDataSpecification),
            Tag::SemanticId => Some(Capability::HasSemantics),
            Tag::ModelingKind => Some(Capability::HasKind),
            Tag::Qualifier => Some(Capability::Qualifiable),
            _ => None,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Content {
    Text(String),
    Children(Vec<Fragment>),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fragment {
    pub tag: Tag,
    pub attributes: Vec<(&'static str, String)>,
    pub content: Content,
}

impl Fragment {
    pub fn text(tag: Tag, text: impl Into<String>) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            content: Content::Text(text.into()),
        }
    }

    pub fn parent(tag: Tag, children: Vec<Fragment>) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            content: Content::Children(children),
        }
    }

    pub fn with_attribute(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn text_content(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn children(&self) -> &[Fragment] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_expose_content() {
        let fragment = Fragment::text(Tag::Identification, "urn:x").with_attribute("idType", "IRI");
        assert_eq!(fragment.attribute("idType"), Some("IRI"));
        assert_eq!(fragment.attribute("lang"), None);
        assert_eq!(fragment.text_content(), Some("urn:x"));
        assert!(fragment.children().is_empty());

        let parent = Fragment::parent(Tag::Administration, vec![Fragment::text(Tag::Version, "1")]);
        assert_eq!(parent.text_content(), None);
        assert_eq!(parent.children().len(), 1);
    }

    #[test]
    fn nested_tags_have_no_origin() {
        assert_eq!(Tag::ModelType.origin(), Some(Capability::Referable));
        assert_eq!(Tag::Qualifier.origin(), Some(Capability::Qualifiable));
        assert_eq!(Tag::Version.origin(), None);
        assert_eq!(Tag::Key.origin(), None);
    }
}
