//! Keyword substitution for module templates.
//!
//! A [`TagMapping`] maps [`TemplateVariable`]s to replacement text and
//! renders template bodies by plain textual replacement of `<__NAME__>`
//! tokens.
//!
//! ## Substitution order
//!
//! Tags are applied one at a time in `TemplateVariable` declaration order
//! (`MODULE`, `NAMESPACE`, `AUTHOR`, `EMAIL`, `PATH`, `HEADERGUARD`, `CLASS`,
//! `DATE`, `YEAR`). Each pass replaces every occurrence in the text produced
//! by the previous pass.
//!
//! Values are checked on insertion and may not contain a `<__NAME__>` token
//! themselves, so no pass can introduce text a later pass would rewrite.
//!
//! ## Unresolved tags
//!
//! A token with no mapping entry (unknown name, or a known variable that was
//! not supplied, such as `<__EMAIL__>` without `--email`) is left verbatim.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::domain::{
    error::DomainError,
    value_objects::{TemplateVariable, tag_token},
};

/// Replacement text per template variable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMapping {
    /// `BTreeMap` keyed by the enum so iteration follows declaration order.
    values: BTreeMap<TemplateVariable, String>,
}

impl TagMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, rejecting values that embed a tag token.
    pub fn insert(
        &mut self,
        variable: TemplateVariable,
        value: impl Into<String>,
    ) -> Result<(), DomainError> {
        let value = value.into();
        if !find_tags(&value).is_empty() {
            return Err(DomainError::TagValueContainsTag {
                tag: variable.token(),
                value,
            });
        }
        self.values.insert(variable, value);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(
        mut self,
        variable: TemplateVariable,
        value: impl Into<String>,
    ) -> Result<Self, DomainError> {
        self.insert(variable, value)?;
        Ok(self)
    }

    /// Add the `DATE` (`DD Mon YYYY`) and `YEAR` tags for `date`.
    pub fn with_date(self, date: NaiveDate) -> Result<Self, DomainError> {
        self.with(TemplateVariable::Date, date.format("%d %b %Y").to_string())?
            .with(TemplateVariable::Year, format!("{:04}", date.year()))
    }

    pub fn get(&self, variable: TemplateVariable) -> Option<&str> {
        self.values.get(&variable).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(token, value)` pairs in substitution order.
    pub fn iter(&self) -> impl Iterator<Item = (TemplateVariable, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Replace every mapped tag in `template`.
    pub fn render(&self, template: &str) -> String {
        let mut result = template.to_string();
        for (variable, value) in &self.values {
            result = result.replace(&variable.token(), value);
        }
        result
    }

    /// Tokens still present in `text`, in order of first appearance.
    ///
    /// Applied to rendered output this lists the passthrough tags.
    pub fn unresolved(text: &str) -> Vec<String> {
        let mut seen = Vec::new();
        for name in find_tags(text) {
            let token = tag_token(name);
            if !seen.contains(&token) {
                seen.push(token);
            }
        }
        seen
    }
}

/// Header-guard token: `SENSOR_HPP_` for `Sensor` with an `hpp` header.
pub fn header_guard(module: &str, header_extension: &str) -> String {
    let suffix = if header_extension.eq_ignore_ascii_case("h") {
        "_H_"
    } else {
        "_HPP_"
    };
    format!("{}{}", module.to_uppercase(), suffix)
}

/// Class-name token: last run of letters after splitting on anything else.
///
/// `ASch_Queue` → `Queue`. A trailing non-letter yields an empty class name,
/// matching a split that ends on a delimiter.
pub fn class_name(module: &str) -> String {
    module
        .split(|c: char| !c.is_ascii_alphabetic())
        .next_back()
        .unwrap_or_default()
        .to_string()
}

/// Names of every `<__NAME__>` token in `text`.
///
/// A name is one or more ASCII uppercase letters, digits or underscores that
/// does not itself end in `_` (the closing `__>` is consumed greedily).
fn find_tags(text: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find("<__") {
        let after = &rest[start + 3..];
        let name_len = after
            .find(|c: char| !(c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'))
            .unwrap_or(after.len());
        let candidate = &after[..name_len];
        if after[name_len..].starts_with('>') && candidate.len() > 2 && candidate.ends_with("__") {
            let name = &candidate[..candidate.len() - 2];
            if !name.is_empty() && !name.ends_with('_') {
                names.push(name);
            }
        }
        rest = &rest[start + 3..];
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> TagMapping {
        TagMapping::new()
            .with(TemplateVariable::Module, "Sensor")
            .unwrap()
            .with(TemplateVariable::Namespace, "Drivers")
            .unwrap()
    }

    #[test]
    fn replaces_every_occurrence() {
        let out = mapping().render("<__MODULE__>::<__MODULE__> in <__NAMESPACE__>");
        assert_eq!(out, "Sensor::Sensor in Drivers");
    }

    #[test]
    fn unknown_tags_pass_through() {
        let out = mapping().render("<__MODULE__> by <__AUTHOR__> <__CUSTOM__>");
        assert_eq!(out, "Sensor by <__AUTHOR__> <__CUSTOM__>");
        assert_eq!(
            TagMapping::unresolved(&out),
            vec!["<__AUTHOR__>".to_string(), "<__CUSTOM__>".to_string()]
        );
    }

    #[test]
    fn non_tag_text_is_untouched() {
        let text = "#include <stdio.h>\n<__ not a tag __>\n< __MODULE__ >";
        assert_eq!(mapping().render(text), text);
    }

    #[test]
    fn value_with_tag_token_is_rejected() {
        let err = TagMapping::new()
            .with(TemplateVariable::Author, "evil <__MODULE__>")
            .unwrap_err();
        assert!(matches!(err, DomainError::TagValueContainsTag { .. }));
    }

    #[test]
    fn date_tags_use_day_month_year() {
        let date = NaiveDate::from_ymd_opt(2018, 8, 5).unwrap();
        let m = TagMapping::new().with_date(date).unwrap();
        assert_eq!(m.get(TemplateVariable::Date), Some("05 Aug 2018"));
        assert_eq!(m.get(TemplateVariable::Year), Some("2018"));
    }

    #[test]
    fn header_guard_suffix_follows_extension() {
        assert_eq!(header_guard("Sensor", "hpp"), "SENSOR_HPP_");
        assert_eq!(header_guard("ASch_Utils", "h"), "ASCH_UTILS_H_");
    }

    #[test]
    fn class_name_takes_last_letter_run() {
        assert_eq!(class_name("ASch_Queue"), "Queue");
        assert_eq!(class_name("Sensor"), "Sensor");
        assert_eq!(class_name("Hal2Gpio"), "Gpio");
        assert_eq!(class_name("Queue_"), "");
    }

    #[test]
    fn find_tags_handles_adjacent_tokens() {
        assert_eq!(find_tags("<__A__><__B_C__>"), vec!["A", "B_C"]);
        assert!(find_tags("<____>").is_empty());
    }
}
