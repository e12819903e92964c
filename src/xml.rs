//! XML writer for composed fragments and whole element documents.
//!
//! This is the collaborator that owns tag naming (namespace prefix) and the
//! walk over child entities. Documents are rendered in two phases: every
//! entity is composed first, then bytes are written, so an entity that fails
//! never leaves partial output behind. Whether a failing entity aborts the
//! document or is skipped is the caller's [`ErrorPolicy`]. Problems the
//! writer itself detects (a prefix that is not an XML name, text XML 1.0
//! cannot carry) always fail the whole call.

use crate::compose::Composer;
use crate::error::{SerializeError, UnknownTokenError, describe};
use crate::fragment::{Content, Fragment};
use crate::model::Entity;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

/// Namespace of the AAS v2.0 XML schema.
pub const AAS_NAMESPACE: &str = "http://www.admin-shell.io/aas/2/0";
pub const DEFAULT_PREFIX: &str = "aas";

const ROOT_ELEMENT: &str = "aasenv";
const CHILDREN_ELEMENT: &str = "submodelElements";
const CHILD_WRAPPER_ELEMENT: &str = "submodelElement";

/// What to do with a top-level entity whose composition fails.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ErrorPolicy {
    #[default]
    Abort,
    Skip,
}

impl ErrorPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorPolicy::Abort => "abort",
            ErrorPolicy::Skip => "skip",
        }
    }
}

impl FromStr for ErrorPolicy {
    type Err = UnknownTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "abort" => Ok(ErrorPolicy::Abort),
            "skip" => Ok(ErrorPolicy::Skip),
            other => Err(UnknownTokenError::new("ErrorPolicy", other)),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct XmlOptions {
    /// Namespace prefix for every element; empty writes unprefixed names
    /// under a default namespace.
    pub prefix: String,
    pub namespace: String,
    /// Spaces per nesting level; zero writes everything on one line.
    pub indent: usize,
    pub on_error: ErrorPolicy,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            namespace: AAS_NAMESPACE.to_string(),
            indent: 2,
            on_error: ErrorPolicy::Abort,
        }
    }
}

impl XmlOptions {
    /// Reject a prefix that would not produce a well-formed qualified name.
    pub fn validate(&self) -> Result<(), XmlError> {
        if self.prefix.is_empty() || (is_ncname(&self.prefix) && self.prefix != "xmlns") {
            Ok(())
        } else {
            Err(XmlError::InvalidPrefix(self.prefix.clone()))
        }
    }

    fn qualified(&self, local: &str) -> String {
        if self.prefix.is_empty() {
            local.to_string()
        } else {
            format!("{}:{local}", self.prefix)
        }
    }

    fn namespace_attribute(&self) -> String {
        if self.prefix.is_empty() {
            "xmlns".to_string()
        } else {
            format!("xmlns:{}", self.prefix)
        }
    }
}

#[derive(Debug, Error)]
pub enum XmlError {
    #[error(transparent)]
    Serialize(#[from] SerializeError),
    #[error("failed to write XML: {0}")]
    Write(#[from] quick_xml::Error),
    #[error("XML output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("namespace prefix '{0}' is not a valid XML name")]
    InvalidPrefix(String),
    #[error("{tag} contains U+{code:04X}, which XML 1.0 does not allow{}", describe(.entity))]
    InvalidCharacter {
        tag: &'static str,
        code: u32,
        entity: Option<String>,
    },
}

/// NCName: an XML name without colons.
fn is_ncname(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '\u{B7}'))
}

/// XML 1.0 `Char` production. Surrogates cannot occur in a `char`.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

/// Top-level entity left out of a document under [`ErrorPolicy::Skip`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SkippedEntity {
    /// Position of the entity in the input slice.
    pub index: usize,
    pub error: SerializeError,
}

#[derive(Clone, Debug)]
pub struct RenderedDocument {
    pub xml: String,
    pub rendered: usize,
    pub skipped: Vec<SkippedEntity>,
}

/// Write a bare fragment sequence, e.g. the output of `compose::serialize`.
pub fn render_fragments(fragments: &[Fragment], options: &XmlOptions) -> Result<String, XmlError> {
    options.validate()?;
    let mut out = FragmentWriter::new(options);
    for fragment in fragments {
        out.fragment(fragment)?;
    }
    out.finish()
}

/// Render an `aasenv` document holding every entity that composes.
pub fn render_document<E: Entity>(
    entities: &[E],
    options: &XmlOptions,
) -> Result<RenderedDocument, XmlError> {
    render_document_with(&Composer::default(), entities, options)
}

pub fn render_document_with<E: Entity>(
    composer: &Composer<'_>,
    entities: &[E],
    options: &XmlOptions,
) -> Result<RenderedDocument, XmlError> {
    options.validate()?;
    let mut planned = Vec::with_capacity(entities.len());
    let mut skipped = Vec::new();
    for (index, entity) in entities.iter().enumerate() {
        match plan(composer, entity) {
            Ok(node) => planned.push(node),
            Err(error) => match options.on_error {
                ErrorPolicy::Abort => return Err(error.into()),
                ErrorPolicy::Skip => {
                    warn!(index, error = %error, "skipping entity");
                    skipped.push(SkippedEntity { index, error });
                }
            },
        }
    }

    let mut out = FragmentWriter::new(options);
    out.check_chars("xmlns", &options.namespace)?;
    out.declaration()?;
    let root = options.qualified(ROOT_ELEMENT);
    let mut start = BytesStart::new(root.clone());
    start.push_attribute((options.namespace_attribute().as_str(), options.namespace.as_str()));
    out.write(Event::Start(start))?;
    for node in &planned {
        out.node(node)?;
    }
    out.write(Event::End(BytesEnd::new(root)))?;

    debug!(
        rendered = planned.len(),
        skipped = skipped.len(),
        "rendered document"
    );
    Ok(RenderedDocument {
        xml: out.finish()?,
        rendered: planned.len(),
        skipped,
    })
}

/// An entity composed ahead of writing.
struct PlannedEntity {
    label: Option<String>,
    element: String,
    fragments: Vec<Fragment>,
    children: Vec<PlannedEntity>,
}

fn plan(composer: &Composer<'_>, entity: &dyn Entity) -> Result<PlannedEntity, SerializeError> {
    let fragments = composer.serialize(entity)?;
    let element = composer.registry().resolve(entity)?.element_name();
    let children = entity
        .children()
        .into_iter()
        .map(|child| plan(composer, child))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PlannedEntity {
        label: entity.label(),
        element,
        fragments,
        children,
    })
}

struct FragmentWriter<'o> {
    writer: Writer<Vec<u8>>,
    options: &'o XmlOptions,
    /// Label of the entity being written, for diagnostics.
    entity: Option<String>,
}

impl<'o> FragmentWriter<'o> {
    fn new(options: &'o XmlOptions) -> Self {
        let writer = if options.indent > 0 {
            Writer::new_with_indent(Vec::new(), b' ', options.indent)
        } else {
            Writer::new(Vec::new())
        };
        Self {
            writer,
            options,
            entity: None,
        }
    }

    fn write(&mut self, event: Event<'_>) -> Result<(), XmlError> {
        self.writer.write_event(event)?;
        Ok(())
    }

    fn declaration(&mut self) -> Result<(), XmlError> {
        self.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
    }

    fn node(&mut self, node: &PlannedEntity) -> Result<(), XmlError> {
        let outer = std::mem::replace(&mut self.entity, node.label.clone());
        let name = self.options.qualified(&node.element);
        self.write(Event::Start(BytesStart::new(name.clone())))?;
        for fragment in &node.fragments {
            self.fragment(fragment)?;
        }
        if !node.children.is_empty() {
            let container = self.options.qualified(CHILDREN_ELEMENT);
            let wrapper = self.options.qualified(CHILD_WRAPPER_ELEMENT);
            self.write(Event::Start(BytesStart::new(container.clone())))?;
            for child in &node.children {
                self.write(Event::Start(BytesStart::new(wrapper.clone())))?;
                self.node(child)?;
                self.write(Event::End(BytesEnd::new(wrapper.clone())))?;
            }
            self.write(Event::End(BytesEnd::new(container)))?;
        }
        self.write(Event::End(BytesEnd::new(name)))?;
        self.entity = outer;
        Ok(())
    }

    fn check_chars(&self, tag: &'static str, value: &str) -> Result<(), XmlError> {
        match value.chars().find(|c| !is_xml_char(*c)) {
            Some(c) => Err(XmlError::InvalidCharacter {
                tag,
                code: u32::from(c),
                entity: self.entity.clone(),
            }),
            None => Ok(()),
        }
    }

    fn fragment(&mut self, fragment: &Fragment) -> Result<(), XmlError> {
        let name = self.options.qualified(fragment.tag.as_str());
        let mut start = BytesStart::new(name.clone());
        for (key, value) in &fragment.attributes {
            self.check_chars(fragment.tag.as_str(), value)?;
            start.push_attribute((*key, value.as_str()));
        }
        match &fragment.content {
            Content::Children(children) if children.is_empty() => self.write(Event::Empty(start)),
            Content::Text(text) => {
                self.check_chars(fragment.tag.as_str(), text)?;
                self.write(Event::Start(start))?;
                self.write(Event::Text(BytesText::new(text)))?;
                self.write(Event::End(BytesEnd::new(name)))
            }
            Content::Children(children) => {
                self.write(Event::Start(start))?;
                for child in children {
                    self.fragment(child)?;
                }
                self.write(Event::End(BytesEnd::new(name)))
            }
        }
    }

    fn finish(self) -> Result<String, XmlError> {
        Ok(String::from_utf8(self.writer.into_inner())?)
    }
}
