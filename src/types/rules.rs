//! Repository rulesets and the tagged rule union.
//!
//! A rule travels as `{"type": "<tag>", "parameters": {...}}` where the shape
//! of `parameters` depends on the tag. [`RepositoryRule`] picks the shape from
//! the tag on decode and writes the tag back on encode.

use crate::codec::Timestamp;
use crate::errors::{GitHubError, GitHubErrorKind, GitHubResult};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Discriminator of a [`RepositoryRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleType {
    Creation,
    Update,
    Deletion,
    RequiredLinearHistory,
    MergeQueue,
    RequiredDeployments,
    RequiredSignatures,
    PullRequest,
    RequiredStatusChecks,
    NonFastForward,
    CommitMessagePattern,
    CommitAuthorEmailPattern,
    CommitterEmailPattern,
    BranchNamePattern,
    TagNamePattern,
    FilePathRestriction,
    MaxFilePathLength,
    FileExtensionRestriction,
    MaxFileSize,
    Workflows,
    CodeScanning,
}

impl RuleType {
    /// Every known rule type.
    pub const ALL: [RuleType; 21] = [
        Self::Creation,
        Self::Update,
        Self::Deletion,
        Self::RequiredLinearHistory,
        Self::MergeQueue,
        Self::RequiredDeployments,
        Self::RequiredSignatures,
        Self::PullRequest,
        Self::RequiredStatusChecks,
        Self::NonFastForward,
        Self::CommitMessagePattern,
        Self::CommitAuthorEmailPattern,
        Self::CommitterEmailPattern,
        Self::BranchNamePattern,
        Self::TagNamePattern,
        Self::FilePathRestriction,
        Self::MaxFilePathLength,
        Self::FileExtensionRestriction,
        Self::MaxFileSize,
        Self::Workflows,
        Self::CodeScanning,
    ];

    /// Wire name of the rule type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Creation => "creation",
            Self::Update => "update",
            Self::Deletion => "deletion",
            Self::RequiredLinearHistory => "required_linear_history",
            Self::MergeQueue => "merge_queue",
            Self::RequiredDeployments => "required_deployments",
            Self::RequiredSignatures => "required_signatures",
            Self::PullRequest => "pull_request",
            Self::RequiredStatusChecks => "required_status_checks",
            Self::NonFastForward => "non_fast_forward",
            Self::CommitMessagePattern => "commit_message_pattern",
            Self::CommitAuthorEmailPattern => "commit_author_email_pattern",
            Self::CommitterEmailPattern => "committer_email_pattern",
            Self::BranchNamePattern => "branch_name_pattern",
            Self::TagNamePattern => "tag_name_pattern",
            Self::FilePathRestriction => "file_path_restriction",
            Self::MaxFilePathLength => "max_file_path_length",
            Self::FileExtensionRestriction => "file_extension_restriction",
            Self::MaxFileSize => "max_file_size",
            Self::Workflows => "workflows",
            Self::CodeScanning => "code_scanning",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleType {
    type Err = GitHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| unknown_rule_type(s))
    }
}

impl Serialize for RuleType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RuleType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|e: GitHubError| de::Error::custom(e.message()))
    }
}

fn unknown_rule_type(tag: &str) -> GitHubError {
    GitHubError::new(
        GitHubErrorKind::UnknownDiscriminator,
        format!("unknown rule type {:?}", tag),
    )
}

/// Parameters of the `update` rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRuleParameters {
    pub update_allows_fetch_and_merge: bool,
}

/// How the merge queue groups pull requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MergeGroupingStrategy {
    /// Every entry in the group must pass checks.
    Allgreen,
    /// Only the head entry must pass checks.
    Headgreen,
}

/// Merge method used by the merge queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MergeQueueMergeMethod {
    Merge,
    Squash,
    Rebase,
}

/// Parameters of the `merge_queue` rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeQueueRuleParameters {
    pub check_response_timeout_minutes: u32,
    pub grouping_strategy: MergeGroupingStrategy,
    pub max_entries_to_build: u32,
    pub max_entries_to_merge: u32,
    pub merge_method: MergeQueueMergeMethod,
    pub min_entries_to_merge: u32,
    pub min_entries_to_merge_wait_minutes: u32,
}

/// Parameters of the `required_deployments` rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredDeploymentsRuleParameters {
    pub required_deployment_environments: Vec<String>,
}

/// Parameters of the `pull_request` rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRuleParameters {
    /// Merge methods allowed for pull requests (merge, squash, rebase).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_merge_methods: Option<Vec<String>>,
    pub dismiss_stale_reviews_on_push: bool,
    pub require_code_owner_review: bool,
    pub require_last_push_approval: bool,
    pub required_approving_review_count: u32,
    pub required_review_thread_resolution: bool,
}

/// One required status check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRequiredStatusCheck {
    /// Status check context name.
    pub context: String,
    /// App that must provide the check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration_id: Option<i64>,
}

/// Parameters of the `required_status_checks` rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredStatusChecksRuleParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub do_not_enforce_on_create: Option<bool>,
    pub required_status_checks: Vec<RuleRequiredStatusCheck>,
    pub strict_required_status_checks_policy: bool,
}

/// Operator of a pattern rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternOperator {
    StartsWith,
    EndsWith,
    Contains,
    Regex,
}

/// Parameters shared by every `*_pattern` rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRuleParameters {
    /// Display name of the rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Invert the match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negate: Option<bool>,
    pub operator: PatternOperator,
    pub pattern: String,
}

/// Parameters of the `file_path_restriction` rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePathRestrictionRuleParameters {
    pub restricted_file_paths: Vec<String>,
}

/// Parameters of the `max_file_path_length` rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxFilePathLengthRuleParameters {
    pub max_file_path_length: u32,
}

/// Parameters of the `file_extension_restriction` rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileExtensionRestrictionRuleParameters {
    pub restricted_file_extensions: Vec<String>,
}

/// Parameters of the `max_file_size` rule, in megabytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxFileSizeRuleParameters {
    pub max_file_size: u64,
}

/// A workflow that must pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleWorkflow {
    /// Path to the workflow file.
    pub path: String,
    /// Branch or tag of the workflow file.
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
    /// Repository holding the workflow file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_id: Option<i64>,
    /// Commit SHA of the workflow file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

/// Parameters of the `workflows` rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowsRuleParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub do_not_enforce_on_create: Option<bool>,
    pub workflows: Vec<RuleWorkflow>,
}

/// A code scanning tool and the thresholds that block a push.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCodeScanningTool {
    /// none, errors, errors_and_warnings, all.
    pub alert_severity_threshold: String,
    /// none, critical, high_or_higher, medium_or_higher, all.
    pub security_alerts_threshold: String,
    /// Tool name, e.g. `CodeQL`.
    pub tool: String,
}

/// Parameters of the `code_scanning` rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeScanningRuleParameters {
    pub code_scanning_tools: Vec<RuleCodeScanningTool>,
}

/// A single rule inside a ruleset.
#[derive(Debug, Clone, PartialEq)]
pub enum RepositoryRule {
    Creation,
    /// Parameters are optional for this rule.
    Update(Option<UpdateRuleParameters>),
    Deletion,
    RequiredLinearHistory,
    MergeQueue(MergeQueueRuleParameters),
    RequiredDeployments(RequiredDeploymentsRuleParameters),
    RequiredSignatures,
    PullRequest(PullRequestRuleParameters),
    RequiredStatusChecks(RequiredStatusChecksRuleParameters),
    NonFastForward,
    CommitMessagePattern(PatternRuleParameters),
    CommitAuthorEmailPattern(PatternRuleParameters),
    CommitterEmailPattern(PatternRuleParameters),
    BranchNamePattern(PatternRuleParameters),
    TagNamePattern(PatternRuleParameters),
    FilePathRestriction(FilePathRestrictionRuleParameters),
    MaxFilePathLength(MaxFilePathLengthRuleParameters),
    FileExtensionRestriction(FileExtensionRestrictionRuleParameters),
    MaxFileSize(MaxFileSizeRuleParameters),
    Workflows(WorkflowsRuleParameters),
    CodeScanning(CodeScanningRuleParameters),
}

impl RepositoryRule {
    /// Returns the discriminator of this rule.
    pub fn rule_type(&self) -> RuleType {
        match self {
            Self::Creation => RuleType::Creation,
            Self::Update(_) => RuleType::Update,
            Self::Deletion => RuleType::Deletion,
            Self::RequiredLinearHistory => RuleType::RequiredLinearHistory,
            Self::MergeQueue(_) => RuleType::MergeQueue,
            Self::RequiredDeployments(_) => RuleType::RequiredDeployments,
            Self::RequiredSignatures => RuleType::RequiredSignatures,
            Self::PullRequest(_) => RuleType::PullRequest,
            Self::RequiredStatusChecks(_) => RuleType::RequiredStatusChecks,
            Self::NonFastForward => RuleType::NonFastForward,
            Self::CommitMessagePattern(_) => RuleType::CommitMessagePattern,
            Self::CommitAuthorEmailPattern(_) => RuleType::CommitAuthorEmailPattern,
            Self::CommitterEmailPattern(_) => RuleType::CommitterEmailPattern,
            Self::BranchNamePattern(_) => RuleType::BranchNamePattern,
            Self::TagNamePattern(_) => RuleType::TagNamePattern,
            Self::FilePathRestriction(_) => RuleType::FilePathRestriction,
            Self::MaxFilePathLength(_) => RuleType::MaxFilePathLength,
            Self::FileExtensionRestriction(_) => RuleType::FileExtensionRestriction,
            Self::MaxFileSize(_) => RuleType::MaxFileSize,
            Self::Workflows(_) => RuleType::Workflows,
            Self::CodeScanning(_) => RuleType::CodeScanning,
        }
    }

    /// Decodes a rule from a JSON value.
    ///
    /// Unlike the `Deserialize` impl, an unknown tag is reported with
    /// [`GitHubErrorKind::UnknownDiscriminator`].
    pub fn from_value(value: Value) -> GitHubResult<Self> {
        let raw: RawRule = serde_json::from_value(value).map_err(|e| {
            GitHubError::deserialization(format!("Invalid rule: {}", e)).with_cause(e)
        })?;
        let rule_type: RuleType = raw.rule_type.parse()?;
        Self::from_parts(rule_type, raw.parameters).map_err(|e| {
            GitHubError::deserialization(format!("Invalid {} rule: {}", rule_type, e)).with_cause(e)
        })
    }

    fn from_parts(rule_type: RuleType, parameters: Option<Value>) -> Result<Self, serde_json::Error> {
        fn required<T: DeserializeOwned>(
            rule_type: RuleType,
            parameters: Option<Value>,
        ) -> Result<T, serde_json::Error> {
            match parameters {
                Some(value) if !value.is_null() => serde_json::from_value(value),
                _ => Err(de::Error::custom(format!(
                    "rule {:?} requires parameters",
                    rule_type.as_str()
                ))),
            }
        }

        let rule = match rule_type {
            RuleType::Creation => Self::Creation,
            RuleType::Update => match parameters {
                Some(value) if !value.is_null() => Self::Update(Some(serde_json::from_value(value)?)),
                _ => Self::Update(None),
            },
            RuleType::Deletion => Self::Deletion,
            RuleType::RequiredLinearHistory => Self::RequiredLinearHistory,
            RuleType::MergeQueue => Self::MergeQueue(required(rule_type, parameters)?),
            RuleType::RequiredDeployments => Self::RequiredDeployments(required(rule_type, parameters)?),
            RuleType::RequiredSignatures => Self::RequiredSignatures,
            RuleType::PullRequest => Self::PullRequest(required(rule_type, parameters)?),
            RuleType::RequiredStatusChecks => {
                Self::RequiredStatusChecks(required(rule_type, parameters)?)
            }
            RuleType::NonFastForward => Self::NonFastForward,
            RuleType::CommitMessagePattern => {
                Self::CommitMessagePattern(required(rule_type, parameters)?)
            }
            RuleType::CommitAuthorEmailPattern => {
                Self::CommitAuthorEmailPattern(required(rule_type, parameters)?)
            }
            RuleType::CommitterEmailPattern => {
                Self::CommitterEmailPattern(required(rule_type, parameters)?)
            }
            RuleType::BranchNamePattern => Self::BranchNamePattern(required(rule_type, parameters)?),
            RuleType::TagNamePattern => Self::TagNamePattern(required(rule_type, parameters)?),
            RuleType::FilePathRestriction => {
                Self::FilePathRestriction(required(rule_type, parameters)?)
            }
            RuleType::MaxFilePathLength => Self::MaxFilePathLength(required(rule_type, parameters)?),
            RuleType::FileExtensionRestriction => {
                Self::FileExtensionRestriction(required(rule_type, parameters)?)
            }
            RuleType::MaxFileSize => Self::MaxFileSize(required(rule_type, parameters)?),
            RuleType::Workflows => Self::Workflows(required(rule_type, parameters)?),
            RuleType::CodeScanning => Self::CodeScanning(required(rule_type, parameters)?),
        };
        Ok(rule)
    }
}

/// Wire shape before the tag is interpreted.
#[derive(Deserialize)]
struct RawRule {
    #[serde(rename = "type")]
    rule_type: String,
    #[serde(default)]
    parameters: Option<Value>,
}

impl Serialize for RepositoryRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.rule_type().as_str())?;
        match self {
            Self::Creation
            | Self::Deletion
            | Self::RequiredLinearHistory
            | Self::RequiredSignatures
            | Self::NonFastForward
            | Self::Update(None) => {}
            Self::Update(Some(p)) => map.serialize_entry("parameters", p)?,
            Self::MergeQueue(p) => map.serialize_entry("parameters", p)?,
            Self::RequiredDeployments(p) => map.serialize_entry("parameters", p)?,
            Self::PullRequest(p) => map.serialize_entry("parameters", p)?,
            Self::RequiredStatusChecks(p) => map.serialize_entry("parameters", p)?,
            Self::CommitMessagePattern(p)
            | Self::CommitAuthorEmailPattern(p)
            | Self::CommitterEmailPattern(p)
            | Self::BranchNamePattern(p)
            | Self::TagNamePattern(p) => map.serialize_entry("parameters", p)?,
            Self::FilePathRestriction(p) => map.serialize_entry("parameters", p)?,
            Self::MaxFilePathLength(p) => map.serialize_entry("parameters", p)?,
            Self::FileExtensionRestriction(p) => map.serialize_entry("parameters", p)?,
            Self::MaxFileSize(p) => map.serialize_entry("parameters", p)?,
            Self::Workflows(p) => map.serialize_entry("parameters", p)?,
            Self::CodeScanning(p) => map.serialize_entry("parameters", p)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RepositoryRule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawRule::deserialize(deserializer)?;
        let rule_type: RuleType = raw
            .rule_type
            .parse()
            .map_err(|e: GitHubError| de::Error::custom(e.message()))?;
        Self::from_parts(rule_type, raw.parameters).map_err(|e| {
            de::Error::custom(format!("invalid parameters for rule {:?}: {}", rule_type.as_str(), e))
        })
    }
}

/// What a ruleset applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RulesetTarget {
    Branch,
    Tag,
    Push,
    Repository,
}

/// Owner type of a ruleset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RulesetSourceType {
    Repository,
    Organization,
    Enterprise,
}

/// Enforcement level of a ruleset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RulesetEnforcement {
    Disabled,
    Active,
    /// Evaluate without enforcing (enterprise only).
    Evaluate,
}

/// An actor allowed to bypass a ruleset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BypassActor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<i64>,
    /// Integration, OrganizationAdmin, RepositoryRole, Team or DeployKey.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_type: Option<String>,
    /// always or pull_request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bypass_mode: Option<String>,
}

/// Hypermedia link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetLink {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Links of a ruleset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetLinks {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<RulesetLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<RulesetLink>,
}

/// Ref name patterns a ruleset applies to (`~DEFAULT_BRANCH`, `~ALL`, globs).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetRefConditionParameters {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

/// Repository name patterns an organization ruleset applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetRepositoryNamesConditionParameters {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protected: Option<bool>,
}

/// Repository IDs an organization ruleset applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetRepositoryIdsConditionParameters {
    pub repository_ids: Vec<i64>,
}

/// Custom property match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetRepositoryPropertyTarget {
    pub name: String,
    pub property_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Custom property conditions of an organization ruleset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetRepositoryPropertyConditionParameters {
    pub include: Vec<RulesetRepositoryPropertyTarget>,
    pub exclude: Vec<RulesetRepositoryPropertyTarget>,
}

/// Conditions selecting the refs and repositories a ruleset applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetConditions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<RulesetRefConditionParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_name: Option<RulesetRepositoryNamesConditionParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_id: Option<RulesetRepositoryIdsConditionParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_property: Option<RulesetRepositoryPropertyConditionParameters>,
}

/// A repository or organization ruleset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryRuleset {
    /// Ruleset ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Ruleset name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<RulesetTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<RulesetSourceType>,
    /// Owner name (`owner/repo` or the organization login).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforcement: Option<RulesetEnforcement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bypass_actors: Option<Vec<BypassActor>>,
    /// always, pull_requests_only or never.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_user_can_bypass: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<RulesetLinks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<RulesetConditions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<RepositoryRule>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

/// A rule that applies to a branch, with the ruleset it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchRule {
    #[serde(flatten)]
    pub rule: RepositoryRule,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ruleset_source_type: Option<RulesetSourceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ruleset_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ruleset_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    fn pattern() -> Value {
        json!({"name": "prefix", "negate": false, "operator": "starts_with", "pattern": "feat"})
    }

    #[test_case(json!({"type": "creation"}) ; "creation")]
    #[test_case(json!({"type": "update"}) ; "update without parameters")]
    #[test_case(json!({"type": "update", "parameters": {"update_allows_fetch_and_merge": true}}) ; "update")]
    #[test_case(json!({"type": "deletion"}) ; "deletion")]
    #[test_case(json!({"type": "required_linear_history"}) ; "required_linear_history")]
    #[test_case(json!({"type": "merge_queue", "parameters": {
        "check_response_timeout_minutes": 10,
        "grouping_strategy": "ALLGREEN",
        "max_entries_to_build": 5,
        "max_entries_to_merge": 5,
        "merge_method": "SQUASH",
        "min_entries_to_merge": 1,
        "min_entries_to_merge_wait_minutes": 5
    }}) ; "merge_queue")]
    #[test_case(json!({"type": "required_deployments", "parameters": {"required_deployment_environments": ["staging"]}}) ; "required_deployments")]
    #[test_case(json!({"type": "required_signatures"}) ; "required_signatures")]
    #[test_case(json!({"type": "pull_request", "parameters": {
        "allowed_merge_methods": ["squash"],
        "dismiss_stale_reviews_on_push": true,
        "require_code_owner_review": false,
        "require_last_push_approval": false,
        "required_approving_review_count": 2,
        "required_review_thread_resolution": true
    }}) ; "pull_request")]
    #[test_case(json!({"type": "required_status_checks", "parameters": {
        "do_not_enforce_on_create": true,
        "required_status_checks": [{"context": "ci"}, {"context": "lint", "integration_id": 15368}],
        "strict_required_status_checks_policy": false
    }}) ; "required_status_checks")]
    #[test_case(json!({"type": "non_fast_forward"}) ; "non_fast_forward")]
    #[test_case(json!({"type": "commit_message_pattern", "parameters": pattern()}) ; "commit_message_pattern")]
    #[test_case(json!({"type": "commit_author_email_pattern", "parameters": pattern()}) ; "commit_author_email_pattern")]
    #[test_case(json!({"type": "committer_email_pattern", "parameters": pattern()}) ; "committer_email_pattern")]
    #[test_case(json!({"type": "branch_name_pattern", "parameters": pattern()}) ; "branch_name_pattern")]
    #[test_case(json!({"type": "tag_name_pattern", "parameters": {"operator": "regex", "pattern": "^v\\d+"}}) ; "tag_name_pattern")]
    #[test_case(json!({"type": "file_path_restriction", "parameters": {"restricted_file_paths": [".github/workflows/*"]}}) ; "file_path_restriction")]
    #[test_case(json!({"type": "max_file_path_length", "parameters": {"max_file_path_length": 255}}) ; "max_file_path_length")]
    #[test_case(json!({"type": "file_extension_restriction", "parameters": {"restricted_file_extensions": [".exe"]}}) ; "file_extension_restriction")]
    #[test_case(json!({"type": "max_file_size", "parameters": {"max_file_size": 100}}) ; "max_file_size")]
    #[test_case(json!({"type": "workflows", "parameters": {
        "workflows": [{"path": ".github/workflows/ci.yml", "ref": "main", "repository_id": 1, "sha": "abc"}]
    }}) ; "workflows")]
    #[test_case(json!({"type": "code_scanning", "parameters": {
        "code_scanning_tools": [{"alert_severity_threshold": "errors", "security_alerts_threshold": "high_or_higher", "tool": "CodeQL"}]
    }}) ; "code_scanning")]
    fn test_rule_round_trip(value: Value) {
        let rule: RepositoryRule = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(rule.rule_type().as_str(), value["type"].as_str().unwrap());
        assert_eq!(serde_json::to_value(&rule).unwrap(), value);
    }

    #[test]
    fn test_every_rule_type_parses_back() {
        for rule_type in RuleType::ALL {
            assert_eq!(rule_type.as_str().parse::<RuleType>().unwrap(), rule_type);
        }
    }

    #[test]
    fn test_unknown_rule_type_is_rejected() {
        let err = serde_json::from_value::<RepositoryRule>(json!({"type": "something_new"})).unwrap_err();
        assert!(err.to_string().contains("something_new"));

        let err = RepositoryRule::from_value(json!({"type": "something_new"})).unwrap_err();
        assert_eq!(*err.kind(), GitHubErrorKind::UnknownDiscriminator);
        assert!(err.message().contains("something_new"));
    }

    #[test]
    fn test_missing_parameters_are_rejected() {
        let err = serde_json::from_value::<RepositoryRule>(json!({"type": "max_file_size"})).unwrap_err();
        assert!(err.to_string().contains("requires parameters"));

        assert!(serde_json::from_value::<RepositoryRule>(
            json!({"type": "pull_request", "parameters": null})
        )
        .is_err());
    }

    #[test]
    fn test_wrong_parameter_type_is_rejected() {
        let result = serde_json::from_value::<RepositoryRule>(json!({
            "type": "max_file_path_length",
            "parameters": {"max_file_path_length": "long"}
        }));
        assert!(result.is_err());

        let err = RepositoryRule::from_value(json!({
            "type": "update",
            "parameters": {"update_allows_fetch_and_merge": "yes"}
        }))
        .unwrap_err();
        assert_eq!(*err.kind(), GitHubErrorKind::DeserializationError);
    }

    #[test]
    fn test_update_with_null_parameters() {
        let rule: RepositoryRule =
            serde_json::from_value(json!({"type": "update", "parameters": null})).unwrap();
        assert_eq!(rule, RepositoryRule::Update(None));
        assert_eq!(serde_json::to_value(&rule).unwrap(), json!({"type": "update"}));
    }

    #[test]
    fn test_ruleset_round_trip() {
        let value = json!({
            "id": 42,
            "name": "main protection",
            "target": "branch",
            "source_type": "Repository",
            "source": "octo/repo",
            "enforcement": "active",
            "bypass_actors": [{"actor_id": 5, "actor_type": "Team", "bypass_mode": "always"}],
            "_links": {"self": {"href": "https://api.github.com/repos/octo/repo/rulesets/42"}},
            "conditions": {"ref_name": {"include": ["~DEFAULT_BRANCH"], "exclude": []}},
            "rules": [
                {"type": "deletion"},
                {"type": "required_signatures"},
                {"type": "branch_name_pattern", "parameters": {"operator": "contains", "pattern": "x"}}
            ],
            "created_at": "2024-05-01T10:00:00Z"
        });

        let ruleset: RepositoryRuleset = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(ruleset.rules.as_ref().map(Vec::len), Some(3));
        assert_eq!(ruleset.enforcement, Some(RulesetEnforcement::Active));
        assert_eq!(serde_json::to_value(&ruleset).unwrap(), value);
    }

    #[test]
    fn test_branch_rule_flattens_rule() {
        let value = json!({
            "type": "required_deployments",
            "parameters": {"required_deployment_environments": ["prod"]},
            "ruleset_source_type": "Organization",
            "ruleset_source": "octo",
            "ruleset_id": 7
        });

        let rule: BranchRule = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(rule.rule.rule_type(), RuleType::RequiredDeployments);
        assert_eq!(rule.ruleset_id, Some(7));
        assert_eq!(serde_json::to_value(&rule).unwrap(), value);
    }
}
