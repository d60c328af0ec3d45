use serde_json::{json, Value};

use crate::error::{Result, StackError};
use crate::template::{select_website_host, CfnResource};

/// Managed CachingOptimized cache policy.
pub const CACHING_OPTIMIZED_POLICY_ID: &str = "658327ea-f89d-4fab-a63d-7e88639e58f6";

pub const VALID_PRICE_CLASSES: &[&str] = &["PriceClass_100", "PriceClass_200", "PriceClass_All"];

#[derive(Debug, Clone)]
pub struct Origin {
    pub id: String,
    pub domain_name: Value,
    pub origin_protocol_policy: String,
    pub http_port: u16,
    pub https_port: u16,
}

impl Default for Origin {
    fn default() -> Self {
        Self {
            id: "default-origin".into(),
            domain_name: Value::Null,
            origin_protocol_policy: "http-only".into(),
            http_port: 80,
            https_port: 443,
        }
    }
}

/// A CloudFront distribution with one default cache behavior targeting its
/// first origin. Geo restriction is a denylist of country codes; an empty
/// list means no restriction.
#[derive(Debug, Clone, Default)]
pub struct Distribution {
    pub comment: String,
    pub origins: Vec<Origin>,
    pub price_class: String,
    pub geo_denylist: Vec<String>,
}

impl Distribution {
    /// A distribution fronting an S3 website bucket. Website endpoints only
    /// speak plain HTTP, so the origin is a custom origin with `http-only`.
    pub fn s3_website(
        bucket_logical_id: &str,
        price_class: &str,
        geo_denylist: &[String],
        comment: &str,
    ) -> Self {
        Self {
            comment: comment.to_string(),
            origins: vec![Origin {
                domain_name: select_website_host(bucket_logical_id),
                ..Default::default()
            }],
            price_class: price_class.to_string(),
            geo_denylist: geo_denylist.to_vec(),
        }
    }
}

impl CfnResource for Distribution {
    fn type_string(&self) -> &'static str {
        "AWS::CloudFront::Distribution"
    }

    fn properties(&self) -> Result<Value> {
        let default_origin = self.origins.first().ok_or_else(|| StackError::InvalidConfig {
            message: "distribution must declare at least one origin".into(),
        })?;
        let origins: Vec<Value> = self
            .origins
            .iter()
            .map(|origin| {
                json!({
                    "Id": origin.id,
                    "DomainName": origin.domain_name,
                    "CustomOriginConfig": {
                        "HTTPPort": origin.http_port,
                        "HTTPSPort": origin.https_port,
                        "OriginProtocolPolicy": origin.origin_protocol_policy,
                    }
                })
            })
            .collect();
        let mut config = json!({
            "Enabled": true,
            "DefaultCacheBehavior": {
                "TargetOriginId": default_origin.id,
                "ViewerProtocolPolicy": "redirect-to-https",
                "CachePolicyId": CACHING_OPTIMIZED_POLICY_ID,
            },
            "Origins": origins,
            "PriceClass": self.price_class,
        });
        if !self.comment.is_empty() {
            config["Comment"] = Value::String(self.comment.clone());
        }
        if !self.geo_denylist.is_empty() {
            config["Restrictions"] = json!({
                "GeoRestriction": {
                    "RestrictionType": "blacklist",
                    "Locations": self.geo_denylist,
                }
            });
        }
        Ok(json!({ "DistributionConfig": config }))
    }

    fn validate(&self) -> Result<()> {
        if self.origins.is_empty() {
            return Err(StackError::InvalidConfig {
                message: "distribution must declare at least one origin".into(),
            });
        }
        for origin in &self.origins {
            if origin.domain_name.is_null() {
                return Err(StackError::InvalidConfig {
                    message: format!("origin '{}' has no domain name", origin.id),
                });
            }
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
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn denylist(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn website_distribution_properties() {
        let dist = Distribution::s3_website(
            "S3Bucketteam1cloudhacom",
            "PriceClass_100",
            &denylist(&["CN"]),
            "website distribution for team1",
        );
        dist.validate().unwrap();
        let props = dist.properties().unwrap();
        let config = &props["DistributionConfig"];
        assert_eq!(config["Enabled"], true);
        assert_eq!(config["PriceClass"], "PriceClass_100");
        let origins = config["Origins"].as_array().unwrap();
        assert_eq!(origins.len(), 1);
        assert_eq!(origins[0]["Id"], "default-origin");
        assert_eq!(origins[0]["CustomOriginConfig"]["OriginProtocolPolicy"], "http-only");
        assert_eq!(
            origins[0]["DomainName"]["Fn::Select"][1]["Fn::Split"][1]["Fn::GetAtt"][0],
            "S3Bucketteam1cloudhacom"
        );
        assert_eq!(config["DefaultCacheBehavior"]["TargetOriginId"], "default-origin");
        assert_eq!(config["DefaultCacheBehavior"]["ViewerProtocolPolicy"], "redirect-to-https");
        let geo = &config["Restrictions"]["GeoRestriction"];
        assert_eq!(geo["RestrictionType"], "blacklist");
        assert_eq!(geo["Locations"], serde_json::json!(["CN"]));
    }

    #[test]
    fn empty_denylist_omits_restrictions() {
        let dist = Distribution::s3_website("Bucket", "PriceClass_All", &[], "");
        let props = dist.properties().unwrap();
        assert!(props["DistributionConfig"].get("Restrictions").is_none());
        assert!(props["DistributionConfig"].get("Comment").is_none());
    }

    #[test]
    fn origin_is_required() {
        let dist = Distribution { price_class: "PriceClass_100".into(), ..Default::default() };
        assert!(dist.validate().is_err());
    }

    #[test]
    fn bad_price_class_and_country_codes() {
        let mut dist = Distribution::s3_website("Bucket", "PriceClass_50", &[], "");
        assert!(dist.validate().is_err());
        dist.price_class = "PriceClass_100".into();
        dist.geo_denylist = denylist(&["china"]);
        assert!(matches!(dist.validate().unwrap_err(), StackError::InvalidCountryCode(_)));
    }
}
