use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{Result, StackError};
use crate::template::{get_ref, sub, CfnResource};

pub const POLICY_DOCUMENT_VERSION: &str = "2012-10-17";

#[derive(Debug, Clone, Serialize)]
pub struct PolicyStatement {
    #[serde(rename = "Effect")]
    pub effect: String,
    #[serde(rename = "Principal")]
    pub principal: Value,
    #[serde(rename = "Action")]
    pub action: Vec<String>,
    #[serde(rename = "Resource")]
    pub resource: Vec<Value>,
    #[serde(rename = "Condition", skip_serializing_if = "Option::is_none")]
    pub condition: Option<Value>,
}

/// A bucket policy attached 1:1 to a bucket. Statements may only grant
/// access to resources under the bound bucket's ARN.
#[derive(Debug, Clone)]
pub struct BucketPolicy {
    pub bucket_logical_id: String,
    pub statements: Vec<PolicyStatement>,
}

impl BucketPolicy {
    /// The single statement this stack needs: allow `s3:GetObject` on every
    /// object in the bucket for any principal, conditioned on the request
    /// source IP. Anything not matching the condition is implicitly denied
    /// by the resource policy's default-deny semantics.
    pub fn ip_allow_read(bucket_logical_id: &str, source_ip_cidr: &str) -> Self {
        let objects_arn = format!("arn:aws:s3:::${{{bucket_logical_id}}}/*");
        Self {
            bucket_logical_id: bucket_logical_id.to_string(),
            statements: vec![PolicyStatement {
                effect: "Allow".into(),
                principal: Value::String("*".into()),
                action: vec!["s3:GetObject".into()],
                resource: vec![sub(&objects_arn)],
                condition: Some(json!({
                    "IpAddress": { "aws:SourceIp": source_ip_cidr }
                })),
            }],
        }
    }
}

impl CfnResource for BucketPolicy {
    fn type_string(&self) -> &'static str {
        "AWS::S3::BucketPolicy"
    }

    fn properties(&self) -> Result<Value> {
        Ok(json!({
            "Bucket": get_ref(&self.bucket_logical_id),
            "PolicyDocument": {
                "Version": POLICY_DOCUMENT_VERSION,
                "Statement": serde_json::to_value(&self.statements)?,
            }
        }))
    }

    fn validate(&self) -> Result<()> {
        if self.statements.is_empty() {
            return Err(StackError::InvalidConfig {
                message: "bucket policy must carry at least one statement".into(),
            });
        }
        let bucket_arn_prefix = format!("arn:aws:s3:::${{{}}}", self.bucket_logical_id);
        for statement in &self.statements {
            for resource in &statement.resource {
                let arn = resource
                    .get("Fn::Sub")
                    .and_then(Value::as_str)
                    .or_else(|| resource.as_str());
                match arn {
                    Some(arn) if arn.starts_with(&bucket_arn_prefix) => {}
                    _ => {
                        return Err(StackError::InvalidConfig {
                            message: format!(
                                "policy statement references a resource outside bucket '{}'",
                                self.bucket_logical_id
                            ),
                        });
                    }
                }
            }
            if let Some(condition) = &statement.condition {
                if let Some(ip) = condition
                    .pointer("/IpAddress/aws:SourceIp")
                    .and_then(Value::as_str)
                {
                    validate_ipv4_cidr(ip)?;
                }
            }
        }
        Ok(())
    }
}

/// Accepts `a.b.c.d/nn` with in-range octets and prefix. Leading zeros
/// are rejected; AWS treats octets like `010` as ambiguous.
pub fn validate_ipv4_cidr(cidr: &str) -> Result<()> {
    let err = || StackError::InvalidSourceIp(cidr.to_string());
    let no_leading_zero = |part: &str| part.len() == 1 || !part.starts_with('0');
    let (addr, prefix) = cidr.split_once('/').ok_or_else(err)?;
    let octets: Vec<&str> = addr.split('.').collect();
    if octets.len() != 4 {
        return Err(err());
    }
    for octet in octets {
        if octet.is_empty() || !no_leading_zero(octet) || octet.parse::<u8>().is_err() {
            return Err(err());
        }
    }
    match prefix.parse::<u8>() {
        Ok(p) if p <= 32 && no_leading_zero(prefix) => Ok(()),
        _ => Err(err()),
    }
}
