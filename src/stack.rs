//! The stack assembly routine.
//!
//! [`WebsiteStack::synthesize`] turns a [`StackConfig`] into the fixed
//! five-resource declaration graph: website bucket, IP-conditioned bucket
//! policy, content deployment source, Route 53 alias record and CloudFront
//! distribution, plus the two named outputs. Everything is validated here;
//! a failure aborts the whole synthesis before anything is written.

use std::path::PathBuf;

use tracing::debug;

use crate::config::StackConfig;
use crate::error::Result;
use crate::regions;
use crate::resources::{BucketPolicy, Distribution, RecordSet, S3Bucket};
use crate::template::{
    get_att, get_ref, logical_id, validate_stack_name, Output, OutputExport, Template,
};

/// A local content directory whose contents the deployment step asserts
/// into the destination bucket. Diffing and upload mechanics are the
/// provisioning tooling's job, not ours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentSource {
    pub asset_dir: PathBuf,
    pub destination_bucket: String,
}

/// The result of one synthesis: everything the deploy step needs.
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub stack_name: String,
    pub region: String,
    pub template: Template,
    pub deployment: DeploymentSource,
}

pub struct WebsiteStack;

impl WebsiteStack {
    pub fn synthesize(config: &StackConfig) -> Result<Synthesis> {
        config.validate()?;
        let stack_name = validate_stack_name(&config.effective_stack_name())?;
        let fqdn = config.site_fqdn();
        let mut template = Template::default();

        // website bucket, access exclusively policy-mediated
        let bucket_id = logical_id("S3Bucket", &fqdn);
        let bucket = S3Bucket::website(fqdn.clone(), config.index_document.clone());
        template.add_resource(&bucket_id, &bucket)?;
        debug!(bucket = %fqdn, "declared website bucket");

        // allow-with-condition read policy; everything else is implicitly denied
        let policy_id = format!("{bucket_id}Policy");
        let policy = BucketPolicy::ip_allow_read(&bucket_id, &config.allowed_source_ip);
        template.add_resource(&policy_id, &policy)?;
        debug!(source_ip = %config.allowed_source_ip, "declared bucket read policy");

        let deployment = DeploymentSource {
            asset_dir: config.asset_dir.clone(),
            destination_bucket: fqdn.clone(),
        };

        template.add_output(
            "websiteBucketOutput",
            Output {
                description: Some(format!("URL of the bucket assignment: {}", config.group)),
                value: get_att(&bucket_id, "WebsiteURL"),
                export: Some(OutputExport { name: config.url_export_name() }),
            },
        );

        // the hosted zone is external; only the record is declared
        let endpoint = regions::website_endpoint(&config.region)?;
        let record_id = logical_id("Route53Record", &fqdn);
        let record = RecordSet::bucket_website_alias(
            &fqdn,
            &config.hosted_zone_id,
            &config.hosted_zone_name,
            endpoint,
        );
        template.add_resource(&record_id, &record)?;
        debug!(record = %fqdn, zone = %config.hosted_zone_name, "declared alias record");

        let distribution_id = logical_id("CDN", &fqdn);
        let distribution = Distribution::s3_website(
            &bucket_id,
            &config.price_class,
            &config.geo_denylist,
            &format!("website distribution for {}", config.group),
        );
        template.add_resource(&distribution_id, &distribution)?;
        debug!(denylist = ?config.geo_denylist, "declared delivery distribution");

        template.add_output(
            "DistributionId",
            Output {
                description: None,
                value: get_ref(&distribution_id),
                export: None,
            },
        );

        Ok(Synthesis {
            stack_name,
            region: config.region.clone(),
            template,
            deployment,
        })
    }
}
