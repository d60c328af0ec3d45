use serde_json::{json, Value};

use crate::error::{Result, StackError};
use crate::regions::RegionEndpoint;
use crate::template::CfnResource;

/// An alias record in an existing hosted zone. The zone itself is never
/// declared by this stack; its id and name must match a provider-side zone.
#[derive(Debug, Clone)]
pub struct RecordSet {
    pub record_type: String,
    pub name: String,
    pub hosted_zone_id: String,
    pub hosted_zone_name: String,
    pub alias_target_dns_name: Value,
    pub alias_target_hosted_zone_id: String,
}

impl RecordSet {
    /// An `A` alias pointing a fully-qualified name at the regional S3
    /// website endpoint. The record name selects the bucket, so the alias
    /// target is just the endpoint host for the bucket's region.
    pub fn bucket_website_alias(
        name: &str,
        hosted_zone_id: &str,
        hosted_zone_name: &str,
        endpoint: &RegionEndpoint,
    ) -> Self {
        Self {
            record_type: "A".into(),
            name: name.to_string(),
            hosted_zone_id: hosted_zone_id.to_string(),
            hosted_zone_name: hosted_zone_name.to_string(),
            alias_target_dns_name: Value::String(endpoint.website_endpoint.to_string()),
            alias_target_hosted_zone_id: endpoint.website_zone_id.to_string(),
        }
    }
}

impl CfnResource for RecordSet {
    fn type_string(&self) -> &'static str {
        "AWS::Route53::RecordSet"
    }

    fn properties(&self) -> Result<Value> {
        Ok(json!({
            "HostedZoneId": self.hosted_zone_id,
            "Name": self.name,
            "Type": self.record_type,
            "Comment": self.name,
            "AliasTarget": {
                "DNSName": self.alias_target_dns_name,
                "HostedZoneId": self.alias_target_hosted_zone_id,
            }
        }))
    }

    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(StackError::InvalidConfig {
                message: "record must have a name, e.g. mysubdomain.mywebsite.com".into(),
            });
        }
        if self.hosted_zone_id.is_empty() || self.hosted_zone_name.is_empty() {
            return Err(StackError::InvalidConfig {
                message: "record must name the hosted zone it belongs to".into(),
            });
        }
        // zone names are stored with a trailing dot on the provider side
        let zone = self.hosted_zone_name.trim_end_matches('.');
        if self.name != zone && !self.name.ends_with(&format!(".{zone}")) {
            return Err(StackError::RecordOutsideZone {
                record: self.name.clone(),
                zone: self.hosted_zone_name.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::website_endpoint;

    #[test]
    fn alias_record_properties() {
        let endpoint = website_endpoint("eu-north-1").unwrap();
        let record = RecordSet::bucket_website_alias(
            "team1.cloud-ha.com",
            "Z0413857YT73A0A8FRFF",
            "cloud-ha.com",
            endpoint,
        );
        record.validate().unwrap();
        let props = record.properties().unwrap();
        assert_eq!(props["Name"], "team1.cloud-ha.com");
        assert_eq!(props["Type"], "A");
        assert_eq!(props["HostedZoneId"], "Z0413857YT73A0A8FRFF");
        assert_eq!(props["AliasTarget"]["DNSName"], "s3-website.eu-north-1.amazonaws.com");
        assert_eq!(props["AliasTarget"]["HostedZoneId"], "Z3BAZG2TWCNX0D");
    }

    #[test]
    fn record_outside_zone_is_rejected() {
        let endpoint = website_endpoint("eu-north-1").unwrap();
        let record = RecordSet::bucket_website_alias(
            "team1.other-domain.com",
            "Z0413857YT73A0A8FRFF",
            "cloud-ha.com",
            endpoint,
        );
        let err = record.validate().unwrap_err();
        assert!(matches!(err, StackError::RecordOutsideZone { .. }));
    }

    #[test]
    fn zone_apex_is_inside_its_own_zone() {
        let endpoint = website_endpoint("eu-north-1").unwrap();
        let record = RecordSet::bucket_website_alias(
            "cloud-ha.com",
            "Z0413857YT73A0A8FRFF",
            "cloud-ha.com.",
            endpoint,
        );
        assert!(record.validate().is_ok());
    }
}
