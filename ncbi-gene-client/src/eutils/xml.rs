//! XML (`retmode=xml`) body parsing
//!
//! E-utilities XML documents are small, so the body is read into a minimal
//! element tree with `quick_xml::Reader` and then folded into [`FieldMap`]s.
//! Two ESummary layouts exist and both are accepted:
//! - version 2.0: `<DocumentSummarySet><DocumentSummary uid="..">` with one
//!   element per field
//! - version 1.0: `<DocSum><Id>..</Id><Item Name=".." Type="..">` items

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{FieldMap, FieldValue, SummaryDocuments, check_summary_messages, ensure_not_html};
use crate::error::{ParseError, Result};

/// One element of a parsed document
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    fn from_start(start: &BytesStart) -> std::result::Result<Self, ParseError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();

        for attr in start.attributes() {
            let attr = attr.map_err(|e| ParseError::Xml(e.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| ParseError::Xml(e.to_string()))?
                .into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            text: String::new(),
            children: Vec::new(),
        })
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    fn trimmed_text(&self) -> String {
        self.text.trim().to_string()
    }
}

/// Parse a complete XML document into its root element
///
/// Truncated documents (elements still open at end of input), mismatched
/// tags, text outside the root and documents without a root are errors.
pub(crate) fn parse_document(xml: &str) -> std::result::Result<XmlElement, ParseError> {
    ensure_not_html(xml)?;

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                if root.is_some() {
                    return Err(ParseError::Xml("content after root element".to_string()));
                }
                stack.push(XmlElement::from_start(e)?);
            }
            Ok(Event::Empty(ref e)) => {
                let element = XmlElement::from_start(e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ParseError::Xml("unbalanced closing tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().map_err(|err| ParseError::Xml(err.to_string()))?;
                match stack.last_mut() {
                    Some(current) => current.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => {
                        return Err(ParseError::UnexpectedFormat(format!(
                            "text outside of an XML element: {}",
                            text.chars().take(80).collect::<String>()
                        )));
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ParseError::Xml(format!(
                    "error at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            // Declaration, DOCTYPE, comments and processing instructions
            Ok(_) => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ParseError::Xml(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }

    let root = root.ok_or_else(|| ParseError::Xml("document has no root element".to_string()))?;
    if root.name.eq_ignore_ascii_case("html") {
        return Err(ParseError::UnexpectedFormat(
            "received an HTML page instead of an E-utilities document".to_string(),
        ));
    }
    Ok(root)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> std::result::Result<(), ParseError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(ParseError::Xml("multiple root elements".to_string())),
    }
    Ok(())
}

/// Fold child elements into fields keyed by lower-cased tag name
fn element_fields(element: &XmlElement) -> FieldMap {
    let mut fields = FieldMap::new();
    for child in &element.children {
        fields.push(&child.name, element_value(child));
    }
    fields
}

fn element_value(element: &XmlElement) -> FieldValue {
    if element.children.is_empty() {
        FieldValue::Text(element.trimmed_text())
    } else {
        FieldValue::Record(element_fields(element))
    }
}

/// Fold version 1.0 `<Item Name=".." Type="..">` children into fields
fn item_fields(element: &XmlElement) -> FieldMap {
    let mut fields = FieldMap::new();
    for item in element.children_named("Item") {
        let Some(name) = item.attr("Name") else {
            continue;
        };
        let value = match item.attr("Type") {
            Some("List") => FieldValue::List(
                item.children_named("Item")
                    .map(|nested| {
                        if nested.children.is_empty() {
                            FieldValue::Text(nested.trimmed_text())
                        } else {
                            FieldValue::Record(item_fields(nested))
                        }
                    })
                    .collect(),
            ),
            Some("Structure") => FieldValue::Record(item_fields(item)),
            _ => FieldValue::Text(item.trimmed_text()),
        };
        fields.push(name, value);
    }
    fields
}

fn expect_root(root: &XmlElement, name: &str) -> std::result::Result<(), ParseError> {
    if root.name == name {
        Ok(())
    } else {
        Err(ParseError::MissingElement(format!(
            "{name} (found <{}>)",
            root.name
        )))
    }
}

/// Fields of an `<eSearchResult>` document
pub(crate) fn esearch_fields(body: &str) -> Result<FieldMap> {
    let root = parse_document(body)?;
    expect_root(&root, "eSearchResult")?;
    Ok(element_fields(&root))
}

/// Records of an `<eSummaryResult>` document, in document order
pub(crate) fn esummary_documents(body: &str) -> Result<SummaryDocuments> {
    let root = parse_document(body)?;
    expect_root(&root, "eSummaryResult")?;

    let messages: Vec<String> = root
        .children_named("ERROR")
        .map(XmlElement::trimmed_text)
        .collect();
    check_summary_messages(&messages)?;

    let mut documents = SummaryDocuments::default();

    for set in root.children_named("DocumentSummarySet") {
        for summary in set.children_named("DocumentSummary") {
            let uid = summary.attr("uid").unwrap_or_default().to_string();
            if summary.child("error").is_some() {
                documents.missing.push(uid);
                continue;
            }
            let mut fields = element_fields(summary);
            fields.insert("uid", uid);
            documents.records.push(fields);
        }
    }

    for docsum in root.children_named("DocSum") {
        let uid = docsum.child("Id").map(XmlElement::trimmed_text).unwrap_or_default();
        let mut fields = item_fields(docsum);
        if fields.contains_key("error") {
            documents.missing.push(uid);
            continue;
        }
        fields.insert("uid", uid);
        documents.records.push(fields);
    }

    Ok(documents)
}
