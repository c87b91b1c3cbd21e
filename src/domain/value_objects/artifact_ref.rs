//! Artifact reference value object

use std::fmt;

use serde::{Deserialize, Serialize};

/// The atomic addressable unit of configuration: a `(type, member)` pair.
///
/// Nested artifacts carry a dotted qualifier (`Account.Region__c`), folder
/// based ones a slash (`SalesReports/Pipeline`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArtifactRef {
    #[serde(rename = "type")]
    type_name: String,
    member: String,
}

impl ArtifactRef {
    pub fn new(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            member: member.into(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn member(&self) -> &str {
        &self.member
    }

    /// Parent part of a `Parent.Child` member
    pub fn parent(&self) -> Option<&str> {
        self.member.split_once('.').map(|(parent, _)| parent)
    }

    /// Child part of a `Parent.Child` member
    pub fn child(&self) -> Option<&str> {
        self.member.split_once('.').map(|(_, child)| child)
    }
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.type_name, self.member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_value() {
        assert_eq!(
            ArtifactRef::new("ApexClass", "Foo"),
            ArtifactRef::new(String::from("ApexClass"), String::from("Foo"))
        );
        assert_ne!(
            ArtifactRef::new("ApexClass", "Foo"),
            ArtifactRef::new("ApexTrigger", "Foo")
        );
    }

    #[test]
    fn parent_and_child_split_on_first_dot() {
        let field = ArtifactRef::new("CustomField", "Account.Region__c");
        assert_eq!(field.parent(), Some("Account"));
        assert_eq!(field.child(), Some("Region__c"));
    }

    #[test]
    fn undotted_member_has_no_parent() {
        let class = ArtifactRef::new("ApexClass", "Foo");
        assert_eq!(class.parent(), None);
        assert_eq!(class.child(), None);
    }

    #[test]
    fn ordering_is_type_then_member() {
        let mut refs = vec![
            ArtifactRef::new("Layout", "A"),
            ArtifactRef::new("ApexClass", "Z"),
            ArtifactRef::new("ApexClass", "B"),
        ];
        refs.sort();
        assert_eq!(refs[0], ArtifactRef::new("ApexClass", "B"));
        assert_eq!(refs[2], ArtifactRef::new("Layout", "A"));
    }

    #[test]
    fn display_joins_with_colon() {
        assert_eq!(ArtifactRef::new("ApexClass", "Foo").to_string(), "ApexClass:Foo");
    }
}
