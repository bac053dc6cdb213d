//! Argument shapes accepted by the tools.

use super::patch::LinePatch;
use serde::Deserialize;
use std::fmt;

/// Arguments naming an optional endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct VaultArgs {
    pub vault: Option<String>,
}

/// Arguments naming a required endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct NamedVaultArgs {
    pub vault: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AddVaultArgs {
    pub name: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub display_name: Option<String>,
    #[serde(default)]
    pub set_as_active: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct ContentArgs {
    pub content: String,
    pub vault: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PatchArgs {
    #[serde(flatten)]
    pub patch: LinePatch,
    pub vault: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PathArgs {
    pub path: String,
    pub vault: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PathContentArgs {
    pub path: String,
    pub content: String,
    pub vault: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PathPatchArgs {
    pub path: String,
    #[serde(flatten)]
    pub patch: LinePatch,
    pub vault: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DirectoryArgs {
    #[serde(default)]
    pub path: String,
    pub vault: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(super) enum QueryType {
    #[default]
    Dataview,
    JsonLogic,
}

impl QueryType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dataview => "dataview",
            Self::JsonLogic => "jsonlogic",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SearchArgs {
    pub query: String,
    #[serde(default)]
    pub query_type: QueryType,
    pub vault: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SimpleSearchArgs {
    pub query: String,
    pub context_length: Option<u32>,
    pub vault: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(super) enum Period {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Period {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct PeriodicArgs {
    pub period: Period,
    pub date: Option<String>,
    pub vault: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PeriodicContentArgs {
    pub period: Period,
    pub content: String,
    pub date: Option<String>,
    pub vault: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(super) enum PatchOperation {
    Append,
    Prepend,
    Replace,
}

impl PatchOperation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Append => "append",
            Self::Prepend => "prepend",
            Self::Replace => "replace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(super) enum TargetType {
    Heading,
    Block,
    Frontmatter,
}

impl TargetType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Block => "block",
            Self::Frontmatter => "frontmatter",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PeriodicPatchArgs {
    pub period: Period,
    pub operation: PatchOperation,
    pub target_type: TargetType,
    pub target: String,
    pub content: String,
    pub create_target_if_missing: Option<bool>,
    pub date: Option<String>,
    pub vault: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ExecuteCommandArgs {
    pub command_id: String,
    pub vault: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct OpenFileArgs {
    pub path: String,
    pub new_leaf: Option<bool>,
    pub vault: Option<String>,
}
