//! Diagnostic parsing
//!
//! Failed validations report free text. Each line is matched against an
//! ordered table of rules; the first rule that matches decides the inferred
//! artifact type and member. The order is part of the contract: reordering
//! rules changes classification outcomes.
//!
//! Lines no rule recognizes are normal and are kept verbatim by the caller.

use regex::{Captures, Regex};

use crate::domain::value_objects::ArtifactRef;

/// How a rule determines the artifact type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExtractor {
    /// Always this type
    Fixed(String),
    /// Taken from a named capture group
    Group(String),
}

/// How a rule determines the member name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameExtractor {
    /// Taken from a named capture group
    Group(String),
    /// `"{parent}.{child}"` built from two capture groups
    Qualified { parent: String, child: String },
}

#[derive(Debug, Clone)]
pub struct DiagnosticRule {
    name: String,
    pattern: Regex,
    type_extractor: TypeExtractor,
    name_extractor: NameExtractor,
}

impl DiagnosticRule {
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        type_extractor: TypeExtractor,
        name_extractor: NameExtractor,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            pattern: Regex::new(pattern)?,
            type_extractor,
            name_extractor,
        })
    }

    /// Rule with a fixed type and the member in the `name` group
    pub fn fixed(name: &str, pattern: &str, type_name: &str) -> Result<Self, regex::Error> {
        Self::new(
            name,
            pattern,
            TypeExtractor::Fixed(type_name.to_string()),
            NameExtractor::Group("name".into()),
        )
    }

    /// Rule with type and member in the `type` and `name` groups
    pub fn captured(name: &str, pattern: &str) -> Result<Self, regex::Error> {
        Self::new(
            name,
            pattern,
            TypeExtractor::Group("type".into()),
            NameExtractor::Group("name".into()),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply the rule to one line
    pub fn extract(&self, line: &str) -> Option<ArtifactRef> {
        let caps = self.pattern.captures(line)?;

        let type_name = match &self.type_extractor {
            TypeExtractor::Fixed(t) => t.clone(),
            TypeExtractor::Group(g) => group(&caps, g)?,
        };
        let member = match &self.name_extractor {
            NameExtractor::Group(g) => group(&caps, g)?,
            NameExtractor::Qualified { parent, child } => {
                format!("{}.{}", group(&caps, parent)?, group(&caps, child)?)
            }
        };

        Some(ArtifactRef::new(type_name, member))
    }
}

fn group(caps: &Captures<'_>, name: &str) -> Option<String> {
    caps.name(name)
        .map(|m| m.as_str().trim().trim_matches('\'').to_string())
        .filter(|s| !s.is_empty())
}

/// A line recognized by a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMatch {
    pub rule: String,
    pub artifact: ArtifactRef,
    pub line: String,
}

/// Result of running every diagnostic of a failed validation through the table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDiagnostics {
    pub matched: Vec<DiagnosticMatch>,
    pub unmatched: Vec<String>,
}

/// Ordered rule table
#[derive(Debug, Clone)]
pub struct DiagnosticRules {
    rules: Vec<DiagnosticRule>,
}

impl DiagnosticRules {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The built-in table, in precedence order
    pub fn builtin() -> Self {
        let rules = [
            DiagnosticRule::captured(
                "companion-missing",
                r"An object '(?P<name>[^']+)' of type (?P<type>\w+) was named in package\.xml, but was not found in zipped directory",
            ),
            DiagnosticRule::fixed(
                "application-not-found",
                r"(?i)no CustomApplication named (?P<name>.+?) found",
                "CustomApplication",
            ),
            DiagnosticRule::fixed(
                "unknown-user-permission",
                r"(?i)Unknown user permission:\s*(?P<name>\w+)",
                "UserPermission",
            ),
            DiagnosticRule::fixed(
                "unknown-permission",
                r"(?i)Unknown permission[:\s]+'?(?P<name>\w+)'?",
                "UserPermission",
            ),
            DiagnosticRule::captured(
                "entity-not-found",
                r"Entity of type '(?P<type>\w+)' named '(?P<name>[^']+)' cannot be found",
            ),
            DiagnosticRule::captured(
                "named-component-not-found",
                r"no (?P<type>[A-Z]\w*) named (?P<name>.+?) found",
            ),
            DiagnosticRule::new(
                "field-for-sobject",
                r"Invalid field:?\s+(?P<field>\w+) for SObject (?P<object>\w+)",
                TypeExtractor::Fixed("CustomField".into()),
                NameExtractor::Qualified {
                    parent: "object".into(),
                    child: "field".into(),
                },
            ),
            DiagnosticRule::fixed(
                "field-does-not-exist",
                r"Field (?P<name>\w+\.\w+) does not exist",
                "CustomField",
            ),
            DiagnosticRule::fixed(
                "object-not-supported",
                r"sObject type '(?P<name>\w+)' is not supported",
                "CustomObject",
            ),
            DiagnosticRule::fixed(
                "layout-not-found",
                r"(?i)\blayout[:\s]+'?(?P<name>[^'\n]+?)'?\s+(?:was\s+)?not found",
                "Layout",
            ),
            DiagnosticRule::fixed(
                "record-type-not-found",
                r"(?i)\brecord\s?type[:\s]+'?(?P<name>[\w.]+)'?\s+(?:was\s+)?not found",
                "RecordType",
            ),
            DiagnosticRule::fixed(
                "trigger-not-found",
                r"(?i)\btrigger[:\s]+'?(?P<name>\w+)'?\s+(?:was\s+)?not found",
                "ApexTrigger",
            ),
            DiagnosticRule::fixed("invalid-type", r"Invalid type: (?P<name>[\w.]+)", "ApexClass"),
            DiagnosticRule::fixed(
                "class-not-found",
                r"(?i)\b(?:apex\s+)?class[:\s]+'?(?P<name>\w+)'?\s+(?:was\s+)?not found",
                "ApexClass",
            ),
        ];

        Self {
            rules: rules
                .into_iter()
                .map(|rule| rule.expect("built-in diagnostic pattern compiles"))
                .collect(),
        }
    }

    /// Append a rule; it is consulted after every existing rule
    pub fn push(&mut self, rule: DiagnosticRule) {
        self.rules.push(rule);
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(DiagnosticRule::name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule that recognizes `line`
    pub fn match_line(&self, line: &str) -> Option<DiagnosticMatch> {
        self.rules.iter().find_map(|rule| {
            rule.extract(line).map(|artifact| DiagnosticMatch {
                rule: rule.name().to_string(),
                artifact,
                line: line.to_string(),
            })
        })
    }

    /// Run every line of every diagnostic through the table
    pub fn parse<S: AsRef<str>>(&self, diagnostics: &[S]) -> ParsedDiagnostics {
        let mut parsed = ParsedDiagnostics::default();
        for line in diagnostics
            .iter()
            .flat_map(|d| d.as_ref().lines())
            .map(str::trim)
            .filter(|l| !l.is_empty())
        {
            match self.match_line(line) {
                Some(matched) => parsed.matched.push(matched),
                None => parsed.unmatched.push(line.to_string()),
            }
        }
        parsed
    }
}

impl Default for DiagnosticRules {
    fn default() -> Self {
        Self::builtin()
    }
}
