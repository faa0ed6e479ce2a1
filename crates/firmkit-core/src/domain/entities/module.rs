//! Scaffolding request and the file layout of one module.

use crate::domain::{
    entities::{
        common::RelativePath,
        layout::ProjectLayout,
        tag_mapping::{TagMapping, class_name, header_guard},
    },
    error::DomainError,
    value_objects::{GenerationMode, ModePolicy, TemplateKind, TemplateVariable},
};

/// What the user asked to generate.
///
/// `module` is optional here so a missing name surfaces as a domain
/// validation error rather than an argument-parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldRequest {
    pub module: Option<String>,
    pub path: Option<String>,
    pub namespace: Option<String>,
    pub author: Option<String>,
    pub email: Option<String>,
    pub mode: GenerationMode,
}

impl ScaffoldRequest {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: Some(module.into()),
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Validate the module name and path.
    pub fn validate(&self) -> Result<(&str, RelativePath), DomainError> {
        let module = self
            .module
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or(DomainError::MissingModuleName)?;

        validate_module_name(module)?;

        let root = match self.path.as_deref() {
            Some(p) => RelativePath::try_new(p)?,
            None => RelativePath::root(),
        };
        if root.as_str().contains(char::is_whitespace) {
            return Err(DomainError::WhitespaceInPath {
                path: root.as_str().to_string(),
            });
        }

        Ok((module, root))
    }

    /// Build the tag mapping for this request.
    ///
    /// `DATE`/`YEAR` are added by the caller from its clock so one run shares
    /// a single date.
    pub fn tag_mapping(&self, layout: &ProjectLayout) -> Result<TagMapping, DomainError> {
        let (module, root) = self.validate()?;

        let mut tags = TagMapping::new()
            .with(TemplateVariable::Module, module)?
            .with(TemplateVariable::Path, root.as_str())?
            .with(
                TemplateVariable::HeaderGuard,
                header_guard(module, &layout.header_extension),
            )?
            .with(TemplateVariable::Class, class_name(module))?;

        let optional = [
            (TemplateVariable::Namespace, &self.namespace),
            (TemplateVariable::Author, &self.author),
            (TemplateVariable::Email, &self.email),
        ];
        for (variable, value) in optional {
            if let Some(value) = value {
                tags.insert(variable, value.as_str())?;
            }
        }

        Ok(tags)
    }
}

fn validate_module_name(name: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidModuleName {
        name: name.into(),
        reason: reason.into(),
    };

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid(
            "only letters, digits and underscores are allowed",
        ));
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid("name cannot start with a digit"));
    }
    Ok(())
}

/// Every path derived for one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleLayout {
    pub module: String,
    pub root: RelativePath,
    pub policy: ModePolicy,
    pub implementation: RelativePath,
    pub header: RelativePath,
    pub test: RelativePath,
    pub sources_dir: RelativePath,
    pub include_dir: RelativePath,
}

impl ModuleLayout {
    pub fn new(
        module: impl Into<String>,
        root: RelativePath,
        mode: GenerationMode,
        layout: &ProjectLayout,
    ) -> Result<Self, DomainError> {
        let module = module.into();
        let src = &layout.source_extension;
        let hdr = &layout.header_extension;

        Ok(Self {
            implementation: root.join(format!("sources/{module}.{src}"))?,
            header: root.join(format!("include/{module}.{hdr}"))?,
            test: layout.test_source(&root, &module)?,
            sources_dir: root.join("sources")?,
            include_dir: root.join("include")?,
            policy: mode.policy(),
            module,
            root,
        })
    }

    /// Derive the layout for a validated request.
    pub fn for_request(request: &ScaffoldRequest, layout: &ProjectLayout) -> Result<Self, DomainError> {
        let (module, root) = request.validate()?;
        Self::new(module, root, request.mode, layout)
    }

    /// Target path of a generated file.
    pub fn file(&self, kind: TemplateKind) -> &RelativePath {
        match kind {
            TemplateKind::Source => &self.implementation,
            TemplateKind::Header => &self.header,
            TemplateKind::UnitTest => &self.test,
        }
    }

    /// Files this module's policy generates, with their template kind.
    pub fn generated_files(&self) -> Vec<(TemplateKind, &RelativePath)> {
        self.policy
            .template_kinds()
            .into_iter()
            .map(|kind| (kind, self.file(kind)))
            .collect()
    }

    /// Files whose existence turns creation into an overwrite.
    ///
    /// Only the implementation and header count; a lone test file does not.
    pub fn guarded_files(&self) -> Vec<&RelativePath> {
        let mut files = Vec::with_capacity(2);
        if self.policy.implementation {
            files.push(&self.implementation);
        }
        if self.policy.header {
            files.push(&self.header);
        }
        files
    }
}
