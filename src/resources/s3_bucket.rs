use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, StackError};
use crate::template::CfnResource;

#[derive(Debug, Clone, Serialize)]
pub struct WebsiteConfiguration {
    #[serde(rename = "IndexDocument")]
    pub index_document: String,
    #[serde(rename = "ErrorDocument", skip_serializing_if = "Option::is_none")]
    pub error_document: Option<String>,
}

/// An S3 bucket configured for static website hosting. Public read stays
/// off; object access is granted exclusively through the bucket policy.
#[derive(Debug, Clone, Serialize)]
pub struct S3Bucket {
    #[serde(rename = "BucketName")]
    pub bucket_name: String,
    #[serde(rename = "AccessControl")]
    pub access_control: String,
    #[serde(rename = "WebsiteConfiguration", skip_serializing_if = "Option::is_none")]
    pub website_configuration: Option<WebsiteConfiguration>,
}

impl S3Bucket {
    pub fn website<S: Into<String>>(bucket_name: S, index_document: S) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            access_control: "Private".into(),
            website_configuration: Some(WebsiteConfiguration {
                index_document: index_document.into(),
                error_document: None,
            }),
        }
    }
}

impl CfnResource for S3Bucket {
    fn type_string(&self) -> &'static str {
        "AWS::S3::Bucket"
    }

    fn properties(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    fn validate(&self) -> Result<()> {
        validate_bucket_name(&self.bucket_name)
    }
}

/// Bucket names must be 3-63 characters of lowercase alphanumerics, dots
/// and hyphens, starting and ending with an alphanumeric.
pub fn validate_bucket_name(name: &str) -> Result<()> {
    let invalid = |message: &str| StackError::InvalidConfig {
        message: format!("bucket name '{name}' {message}"),
    };
    if name.len() < 3 || name.len() > 63 {
        return Err(invalid("must be between 3 and 63 characters"));
    }
    if !name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-') {
        return Err(invalid("may only contain lowercase letters, digits, dots and hyphens"));
    }
    let first = name.chars().next().unwrap_or('.');
    let last = name.chars().last().unwrap_or('.');
    if !first.is_ascii_alphanumeric() || !last.is_ascii_alphanumeric() {
        return Err(invalid("must start and end with a letter or digit"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn website_bucket_properties() {
        let bucket = S3Bucket::website("team1.cloud-ha.com", "index.html");
        let props = bucket.properties().unwrap();
        assert_eq!(props["BucketName"], "team1.cloud-ha.com");
        assert_eq!(props["AccessControl"], "Private");
        assert_eq!(props["WebsiteConfiguration"]["IndexDocument"], "index.html");
        assert!(props["WebsiteConfiguration"].get("ErrorDocument").is_none());
    }

    #[test]
    fn bucket_name_rules() {
        assert!(validate_bucket_name("team1.cloud-ha.com").is_ok());
        assert!(validate_bucket_name("ab").is_err());
        assert!(validate_bucket_name("Team1.cloud-ha.com").is_err());
        assert!(validate_bucket_name(".starts-with-dot").is_err());
        assert!(validate_bucket_name(&"a".repeat(64)).is_err());
    }
}
