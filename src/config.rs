//! Stack configuration.
//!
//! Every fixed value the stack embeds (domain suffix, allowed source IP,
//! hosted zone, price class, geo denylist, asset directory) is a named
//! configuration field with a default, loadable from a TOML file. Only the
//! group identifier has no default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StackError};
use crate::regions;
use crate::resources::{validate_bucket_name, validate_ipv4_cidr, VALID_PRICE_CLASSES};

pub const DEFAULT_DOMAIN_SUFFIX: &str = "cloud-ha.com";
pub const DEFAULT_REGION: &str = "eu-north-1";
pub const DEFAULT_ALLOWED_SOURCE_IP: &str = "79.133.25.93/32";
pub const DEFAULT_HOSTED_ZONE_ID: &str = "Z0413857YT73A0A8FRFF";
pub const DEFAULT_HOSTED_ZONE_NAME: &str = "cloud-ha.com";
pub const DEFAULT_ASSET_DIR: &str = "./website";
pub const DEFAULT_PRICE_CLASS: &str = "PriceClass_100";
pub const DEFAULT_INDEX_DOCUMENT: &str = "index.html";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackConfig {
    /// Group identifier; prefixes the bucket name, record name and exports
    pub group: String,

    /// Domain the site is served under; the bucket is named `{group}.{domain_suffix}`
    #[serde(default = "default_domain_suffix")]
    pub domain_suffix: String,

    /// Region the bucket website endpoint lives in
    #[serde(default = "default_region")]
    pub region: String,

    /// The only source address allowed to read bucket objects (CIDR)
    #[serde(default = "default_allowed_source_ip")]
    pub allowed_source_ip: String,

    /// Id of the existing hosted zone records are created in
    #[serde(default = "default_hosted_zone_id")]
    pub hosted_zone_id: String,

    /// Name of that hosted zone
    #[serde(default = "default_hosted_zone_name")]
    pub hosted_zone_name: String,

    /// Local directory whose contents are synced into the bucket
    #[serde(default = "default_asset_dir")]
    pub asset_dir: PathBuf,

    /// CloudFront price class tier
    #[serde(default = "default_price_class")]
    pub price_class: String,

    /// Country codes the distribution refuses to serve
    #[serde(default = "default_geo_denylist")]
    pub geo_denylist: Vec<String>,

    /// CloudFormation stack name; defaults to `{group}-website`
    #[serde(default)]
    pub stack_name: Option<String>,

    /// Website index document
    #[serde(default = "default_index_document")]
    pub index_document: String,
}

fn default_domain_suffix() -> String {
    DEFAULT_DOMAIN_SUFFIX.to_string()
}
fn default_region() -> String {
    DEFAULT_REGION.to_string()
}
fn default_allowed_source_ip() -> String {
    DEFAULT_ALLOWED_SOURCE_IP.to_string()
}
fn default_hosted_zone_id() -> String {
    DEFAULT_HOSTED_ZONE_ID.to_string()
}
fn default_hosted_zone_name() -> String {
    DEFAULT_HOSTED_ZONE_NAME.to_string()
}
fn default_asset_dir() -> PathBuf {
    PathBuf::from(DEFAULT_ASSET_DIR)
}
fn default_price_class() -> String {
    DEFAULT_PRICE_CLASS.to_string()
}
fn default_geo_denylist() -> Vec<String> {
    vec!["CN".to_string()]
}
fn default_index_document() -> String {
    DEFAULT_INDEX_DOCUMENT.to_string()
}

impl StackConfig {
    /// All defaults for the given group.
    pub fn for_group<S: Into<String>>(group: S) -> Self {
        Self {
            group: group.into(),
            domain_suffix: default_domain_suffix(),
            region: default_region(),
            allowed_source_ip: default_allowed_source_ip(),
            hosted_zone_id: default_hosted_zone_id(),
            hosted_zone_name: default_hosted_zone_name(),
            asset_dir: default_asset_dir(),
            price_class: default_price_class(),
            geo_denylist: default_geo_denylist(),
            stack_name: None,
            index_document: default_index_document(),
        }
    }

    /// Load configuration from a TOML file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StackError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let raw = std::fs::read_to_string(path)?;
        let config: StackConfig = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// The fully-qualified site name, also the bucket name.
    pub fn site_fqdn(&self) -> String {
        format!("{}.{}", self.group, self.domain_suffix)
    }

    /// Export name for the website URL output.
    pub fn url_export_name(&self) -> String {
        format!("{}-assignment2-url", self.group)
    }

    pub fn effective_stack_name(&self) -> String {
        match &self.stack_name {
            Some(name) => name.clone(),
            None => format!("{}-website", self.group),
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_group_name(&self.group)?;
        if self.domain_suffix.is_empty() {
            return Err(StackError::InvalidConfig {
                message: "domain_suffix must not be empty".into(),
            });
        }
        validate_bucket_name(&self.site_fqdn())?;
        if !regions::is_valid_region(&self.region) {
            return Err(StackError::UnknownRegion(self.region.clone()));
        }
        validate_ipv4_cidr(&self.allowed_source_ip)?;
        if self.hosted_zone_id.is_empty() || self.hosted_zone_name.is_empty() {
            return Err(StackError::InvalidConfig {
                message: "hosted_zone_id and hosted_zone_name must reference an existing zone".into(),
            });
        }
        if !VALID_PRICE_CLASSES.contains(&self.price_class.as_str()) {
            return Err(StackError::InvalidConfig {
                message: format!(
                    "unknown price class '{}', must be one of {:?}",
                    self.price_class, VALID_PRICE_CLASSES
                ),
            });
        }
        for code in &self.geo_denylist {
            if code.len() != 2 || !code.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(StackError::InvalidCountryCode(code.clone()));
            }
        }
        if self.index_document.is_empty() {
            return Err(StackError::InvalidConfig {
                message: "index_document must not be empty".into(),
            });
        }
        Ok(())
    }
}

/// Group names end up as DNS labels and bucket name prefixes: lowercase
/// alphanumerics and hyphens, starting and ending with an alphanumeric.
pub fn validate_group_name(group: &str) -> Result<()> {
    let invalid = |message: &str| StackError::InvalidGroupName {
        name: group.to_string(),
        message: message.to_string(),
    };
    if group.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if !group.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return Err(invalid("may only contain lowercase letters, digits and hyphens"));
    }
    let first = group.chars().next().unwrap_or('-');
    let last = group.chars().last().unwrap_or('-');
    if !first.is_ascii_alphanumeric() || !last.is_ascii_alphanumeric() {
        return Err(invalid("must start and end with a letter or digit"));
    }
    Ok(())
}
