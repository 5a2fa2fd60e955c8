//! Submission Types
//!
//! This module defines the data carried by an abstract submission as it moves
//! between the HTTP boundary, the service, and the store.
//!
//! # Types
//!
//! - `AbstractType` - The kind of abstract (technical paper or poster)
//! - `SubmissionFields` - The nine business fields, all required at creation
//! - `SubmissionPatch` - A partial set of business fields used by edits
//! - `SubmissionView` - What the edit form sees: fields plus identity
//!
//! # Wire Format
//!
//! All types use the camelCase names of the submission form
//! (`submitterName`, `abstractTitle`, ...). The sequential identifier is
//! serialized as `uniqueID`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::shared::error::SharedError;

/// Required fields in canonical form order
pub const REQUIRED_FIELDS: [&str; 9] = [
    "submitterName",
    "submitterEmail",
    "abstractTitle",
    "abstractType",
    "theme",
    "company",
    "discipline",
    "authorNames",
    "abstractContent",
];

/// Kind of abstract being submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AbstractType {
    /// Full technical paper presentation
    TechnicalPaper,
    /// Poster session entry
    Poster,
}

impl AbstractType {
    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TechnicalPaper => "technical-paper",
            Self::Poster => "poster",
        }
    }
}

impl fmt::Display for AbstractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AbstractType {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "technical-paper" => Ok(Self::TechnicalPaper),
            "poster" => Ok(Self::Poster),
            other => Err(SharedError::validation(
                "abstractType",
                format!("expected 'technical-paper' or 'poster', got '{}'", other),
            )),
        }
    }
}

/// The business fields of a submission
///
/// Every field is a non-empty string when built through
/// [`SubmissionFields::from_json`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionFields {
    pub submitter_name: String,
    pub submitter_email: String,
    pub abstract_title: String,
    pub abstract_type: AbstractType,
    /// Constrained by `abstract_type` in the form, not checked here
    pub theme: String,
    pub company: String,
    pub discipline: String,
    pub author_names: String,
    pub abstract_content: String,
}

/// Look up `name` and return it if it is a string with visible content
fn non_blank<'a>(object: Option<&'a Map<String, Value>>, name: &str) -> Option<&'a str> {
    object
        .and_then(|o| o.get(name))
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

impl SubmissionFields {
    /// Extract the required fields from an already-sanitized JSON body
    ///
    /// A field counts as missing when it is absent, not a string, or blank.
    /// All missing fields are reported together. Values are kept as
    /// submitted; trimming is only used for the blank check.
    ///
    /// # Errors
    ///
    /// * `SharedError::MissingFields` - one or more required fields missing
    /// * `SharedError::ValidationError` - `abstractType` is not a known kind
    pub fn from_json(value: &Value) -> Result<Self, SharedError> {
        let object = value.as_object();

        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|name| non_blank(object, name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(SharedError::missing(missing));
        }

        let text = |name: &str| non_blank(object, name).map(str::to_owned).unwrap_or_default();

        Ok(Self {
            submitter_name: text("submitterName"),
            submitter_email: text("submitterEmail"),
            abstract_title: text("abstractTitle"),
            abstract_type: text("abstractType").parse()?,
            theme: text("theme"),
            company: text("company"),
            discipline: text("discipline"),
            author_names: text("authorNames"),
            abstract_content: text("abstractContent"),
        })
    }
}

/// Partial update of the business fields
///
/// `None` leaves the stored value untouched. Identity fields have no slot
/// here, so an edit can never reach them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitter_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitter_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abstract_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abstract_type: Option<AbstractType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discipline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_names: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abstract_content: Option<String>,
}

impl SubmissionPatch {
    /// Build a patch from an already-sanitized `updatedData` object
    ///
    /// Unknown keys (including `uniqueID` and `createdAt`) are ignored.
    /// JSON `null` is treated the same as an absent key.
    ///
    /// # Errors
    ///
    /// * `SharedError::ValidationError` - not an object, a known field holds a
    ///   non-string or blank value, an unknown `abstractType`, or no known
    ///   field present at all
    pub fn from_json(value: &Value) -> Result<Self, SharedError> {
        let Some(object) = value.as_object() else {
            return Err(SharedError::validation("updatedData", "must be a JSON object"));
        };

        let mut invalid: Vec<&'static str> = Vec::new();
        let mut text = |name: &'static str| -> Option<String> {
            match object.get(name) {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
                Some(_) => {
                    invalid.push(name);
                    None
                }
            }
        };

        let abstract_type = text("abstractType");
        let mut patch = Self {
            submitter_name: text("submitterName"),
            submitter_email: text("submitterEmail"),
            abstract_title: text("abstractTitle"),
            abstract_type: None,
            theme: text("theme"),
            company: text("company"),
            discipline: text("discipline"),
            author_names: text("authorNames"),
            abstract_content: text("abstractContent"),
        };

        if !invalid.is_empty() {
            return Err(SharedError::validation(
                invalid.join(", "),
                "must be a non-empty string",
            ));
        }

        patch.abstract_type = abstract_type.map(|raw| raw.parse()).transpose()?;

        if patch.is_empty() {
            return Err(SharedError::validation(
                "updatedData",
                "contains no editable fields",
            ));
        }

        Ok(patch)
    }

    /// True when the patch would change nothing
    pub fn is_empty(&self) -> bool {
        self.submitter_name.is_none()
            && self.submitter_email.is_none()
            && self.abstract_title.is_none()
            && self.abstract_type.is_none()
            && self.theme.is_none()
            && self.company.is_none()
            && self.discipline.is_none()
            && self.author_names.is_none()
            && self.abstract_content.is_none()
    }

    /// Merge the patch into `fields`
    pub fn apply_to(&self, fields: &mut SubmissionFields) {
        fn merge(target: &mut String, value: &Option<String>) {
            if let Some(value) = value {
                target.clone_from(value);
            }
        }

        merge(&mut fields.submitter_name, &self.submitter_name);
        merge(&mut fields.submitter_email, &self.submitter_email);
        merge(&mut fields.abstract_title, &self.abstract_title);
        if let Some(kind) = self.abstract_type {
            fields.abstract_type = kind;
        }
        merge(&mut fields.theme, &self.theme);
        merge(&mut fields.company, &self.company);
        merge(&mut fields.discipline, &self.discipline);
        merge(&mut fields.author_names, &self.author_names);
        merge(&mut fields.abstract_content, &self.abstract_content);
    }
}

/// Submission as presented to the edit form
///
/// Carries the business fields plus the identity a client needs to post an
/// edit back. Storage metadata (row id, last-modified time) is not exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionView {
    #[serde(rename = "uniqueID")]
    pub unique_id: i64,
    #[serde(flatten)]
    pub fields: SubmissionFields,
    pub created_at: DateTime<Utc>,
}
