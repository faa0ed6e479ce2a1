use crate::domain::{
    entities::{ProjectLayout, ScaffoldRequest, TargetRecord, common::RelativePath},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_request(request: &ScaffoldRequest) -> Result<(), DomainError> {
        request.validate().map(|_| ())
    }

    /// A record the registry may hold: valid name and a relative root.
    pub fn validate_record(record: &TargetRecord) -> Result<(), DomainError> {
        if record.name.is_empty() || record.name.contains(char::is_whitespace) {
            return Err(DomainError::InvalidModuleName {
                name: record.name.clone(),
                reason: "target names are single tokens".into(),
            });
        }
        let root = record.root_path()?;
        if root.as_str().contains(char::is_whitespace) {
            return Err(DomainError::WhitespaceInPath {
                path: root.as_str().to_string(),
            });
        }
        Ok(())
    }

    /// Layout values that end up inside list-file names.
    pub fn validate_layout(layout: &ProjectLayout) -> Result<(), DomainError> {
        for (key, value) in [
            ("source_extension", &layout.source_extension),
            ("header_extension", &layout.header_extension),
            ("test_prefix", &layout.test_prefix),
            ("firmware_target", &layout.firmware_target),
        ] {
            if value.is_empty()
                || value.contains(['/', '\\', '.'])
                || value.contains(char::is_whitespace)
            {
                return Err(DomainError::InvalidLayoutValue {
                    key: key.into(),
                    value: value.clone(),
                    reason: "must be a non-empty single name".into(),
                });
            }
        }
        for object in &layout.platform_objects {
            RelativePath::try_new(object)?;
        }
        Ok(())
    }
}
