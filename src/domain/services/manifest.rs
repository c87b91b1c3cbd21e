//! Manifest Generator
//!
//! Serializes an `ArtifactSet` into a package descriptor and parses one back.
//! Generation is pure and deterministic: equal sets give byte-identical output.

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::domain::entities::ArtifactSet;
use crate::error::{DeltaError, DeltaResult};

/// Namespace of the package descriptor schema
pub const PACKAGE_NAMESPACE: &str = "http://soap.sforce.com/2006/04/metadata";

/// File name of the additive descriptor
pub const PACKAGE_FILE: &str = "package.xml";

/// File name of the destructive descriptor
pub const DESTRUCTIVE_FILE: &str = "destructiveChanges.xml";

const ROOT_ELEMENT: &str = "Package";

/// A serialized manifest. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    api_version: String,
    xml: String,
}

impl PackageDescriptor {
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn as_str(&self) -> &str {
        &self.xml
    }

    pub fn into_string(self) -> String {
        self.xml
    }
}

/// Contents recovered from a descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedManifest {
    pub artifacts: ArtifactSet,
    pub api_version: Option<String>,
}

/// Build the descriptor for `set`.
pub fn generate(set: &ArtifactSet, api_version: &str) -> PackageDescriptor {
    let mut xml = String::with_capacity(128 + set.len() * 40);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!(
        "<{} xmlns=\"{}\">\n",
        ROOT_ELEMENT, PACKAGE_NAMESPACE
    ));

    for (type_name, members) in set.types() {
        xml.push_str("    <types>\n");
        for member in members {
            xml.push_str(&format!("        <members>{}</members>\n", escape(member.as_str())));
        }
        xml.push_str(&format!("        <name>{}</name>\n", escape(type_name)));
        xml.push_str("    </types>\n");
    }

    xml.push_str(&format!("    <version>{}</version>\n", escape(api_version)));
    xml.push_str(&format!("</{}>\n", ROOT_ELEMENT));

    PackageDescriptor {
        api_version: api_version.to_string(),
        xml,
    }
}

/// Parse a descriptor back into `(type, member)` pairs.
pub fn parse(xml: &str) -> DeltaResult<ParsedManifest> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut parsed = ParsedManifest::default();
    let mut stack: Vec<String> = Vec::new();
    let mut members: Vec<String> = Vec::new();
    let mut type_name: Option<String> = None;
    let mut saw_root = false;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                return Err(DeltaError::malformed(format!(
                    "at byte {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
        };

        match event {
            Event::Start(start) => {
                let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                if stack.is_empty() {
                    if name != ROOT_ELEMENT {
                        return Err(DeltaError::malformed(format!(
                            "unexpected root element <{}>",
                            name
                        )));
                    }
                    saw_root = true;
                }
                if stack.len() == 1 && name == "types" {
                    members.clear();
                    type_name = None;
                }
                stack.push(name);
            }
            Event::Text(text) => {
                let value = text
                    .unescape()
                    .map_err(|e| DeltaError::malformed(e.to_string()))?
                    .into_owned();
                let path: Vec<&str> = stack.iter().map(String::as_str).collect();
                match path.as_slice() {
                    [_, "types", "members"] => members.push(value),
                    [_, "types", "name"] => type_name = Some(value),
                    [_, "version"] => parsed.api_version = Some(value),
                    _ => {}
                }
            }
            Event::End(_) => {
                let closed = stack.pop();
                if stack.len() == 1 && closed.as_deref() == Some("types") {
                    let Some(name) = type_name.take() else {
                        return Err(DeltaError::malformed("<types> element without <name>"));
                    };
                    for member in members.drain(..) {
                        parsed.artifacts.insert_member(&name, &member);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(DeltaError::malformed("missing <Package> root element"));
    }
    if !stack.is_empty() {
        return Err(DeltaError::malformed("unexpected end of document"));
    }
    Ok(parsed)
}
