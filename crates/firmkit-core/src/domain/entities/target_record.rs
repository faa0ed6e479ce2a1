use serde::Serialize;
use std::fmt;

use crate::domain::{entities::common::RelativePath, error::DomainError};

/// One registry line: a target name and its attribute values.
///
/// The first attribute is the target's root path; anything after it is
/// free-form metadata carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetRecord {
    pub name: String,
    pub attributes: Vec<String>,
}

impl TargetRecord {
    pub fn new(name: impl Into<String>, root: &RelativePath) -> Self {
        Self {
            name: name.into(),
            attributes: vec![root.to_list_entry()],
        }
    }

    /// Parse a registry line.
    ///
    /// Blank lines yield `None`. A key without any value is malformed.
    pub fn parse(line: &str, file: &str, line_no: usize) -> Result<Option<Self>, DomainError> {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(None);
        };
        let attributes: Vec<String> = tokens.map(str::to_string).collect();
        if attributes.is_empty() {
            return Err(DomainError::MalformedEntry {
                file: file.to_string(),
                line: line_no,
                content: line.to_string(),
            });
        }
        Ok(Some(Self {
            name: name.to_string(),
            attributes,
        }))
    }

    pub fn root(&self) -> &str {
        self.attributes.first().map_or(".", String::as_str)
    }

    pub fn root_path(&self) -> Result<RelativePath, DomainError> {
        RelativePath::try_new(self.root())
    }

    pub fn metadata(&self) -> &[String] {
        self.attributes.get(1..).unwrap_or_default()
    }

    /// The line as written to the registry file.
    pub fn to_line(&self) -> String {
        let mut line = self.name.clone();
        for attr in &self.attributes {
            line.push(' ');
            line.push_str(attr);
        }
        line
    }
}

impl fmt::Display for TargetRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_attributes() {
        let rec = TargetRecord::parse("Sensor  Drivers/Sensor\tv2", "reg", 1)
            .unwrap()
            .unwrap();
        assert_eq!(rec.name, "Sensor");
        assert_eq!(rec.root(), "Drivers/Sensor");
        assert_eq!(rec.metadata(), &["v2".to_string()]);
    }

    #[test]
    fn blank_line_is_skipped() {
        assert_eq!(TargetRecord::parse("   ", "reg", 3).unwrap(), None);
    }

    #[test]
    fn key_without_value_is_malformed() {
        let err = TargetRecord::parse("Sensor", "reg", 7).unwrap_err();
        assert!(matches!(err, DomainError::MalformedEntry { line: 7, .. }));
    }

    #[test]
    fn line_round_trips_through_display() {
        let root = RelativePath::try_new("Drivers/Sensor").unwrap();
        assert_eq!(TargetRecord::new("Sensor", &root).to_string(), "Sensor Drivers/Sensor");
    }
}
