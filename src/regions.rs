//! Per-region constants for the S3 static website endpoints.
//!
//! Alias records that point at a bucket website endpoint need two things
//! that vary by region: the endpoint host suffix and the hosted zone id
//! that AWS assigns to that endpoint. Neither is discoverable at synthesis
//! time, so they are baked in here.

use crate::error::{Result, StackError};

/// S3 website endpoint data for one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionEndpoint {
    pub region: &'static str,
    /// host suffix of the website endpoint, e.g. `s3-website.eu-north-1.amazonaws.com`
    pub website_endpoint: &'static str,
    /// hosted zone id AWS assigns to the website endpoint in this region
    pub website_zone_id: &'static str,
}

// older regions use the dashed `s3-website-<region>` form, newer ones the
// dotted `s3-website.<region>` form
pub const S3_WEBSITE_ENDPOINTS: &[RegionEndpoint] = &[
    RegionEndpoint { region: "us-east-1", website_endpoint: "s3-website-us-east-1.amazonaws.com", website_zone_id: "Z3AQBSTGFYJSTF" },
    RegionEndpoint { region: "us-east-2", website_endpoint: "s3-website.us-east-2.amazonaws.com", website_zone_id: "Z2O1EMRO9K5GLX" },
    RegionEndpoint { region: "us-west-1", website_endpoint: "s3-website-us-west-1.amazonaws.com", website_zone_id: "Z2F56UZL2M1ACD" },
    RegionEndpoint { region: "us-west-2", website_endpoint: "s3-website-us-west-2.amazonaws.com", website_zone_id: "Z3BJ6K6RIION7M" },
    RegionEndpoint { region: "ca-central-1", website_endpoint: "s3-website.ca-central-1.amazonaws.com", website_zone_id: "Z1QDHH18159H29" },
    RegionEndpoint { region: "eu-north-1", website_endpoint: "s3-website.eu-north-1.amazonaws.com", website_zone_id: "Z3BAZG2TWCNX0D" },
    RegionEndpoint { region: "eu-west-1", website_endpoint: "s3-website-eu-west-1.amazonaws.com", website_zone_id: "Z1BKCTXD74EZPE" },
    RegionEndpoint { region: "eu-west-2", website_endpoint: "s3-website.eu-west-2.amazonaws.com", website_zone_id: "Z3GKZC51ZF0DB4" },
    RegionEndpoint { region: "eu-west-3", website_endpoint: "s3-website.eu-west-3.amazonaws.com", website_zone_id: "Z3R1K369G5AVDG" },
    RegionEndpoint { region: "eu-central-1", website_endpoint: "s3-website.eu-central-1.amazonaws.com", website_zone_id: "Z21DNDUVLTQW6Q" },
    RegionEndpoint { region: "eu-south-1", website_endpoint: "s3-website.eu-south-1.amazonaws.com", website_zone_id: "Z30OZKI7KXW7MI" },
    RegionEndpoint { region: "ap-south-1", website_endpoint: "s3-website.ap-south-1.amazonaws.com", website_zone_id: "Z11RGJOFQNVJUP" },
    RegionEndpoint { region: "ap-northeast-1", website_endpoint: "s3-website-ap-northeast-1.amazonaws.com", website_zone_id: "Z2M4EHUR26P7ZW" },
    RegionEndpoint { region: "ap-northeast-2", website_endpoint: "s3-website.ap-northeast-2.amazonaws.com", website_zone_id: "Z3W03O7B5YMIYP" },
    RegionEndpoint { region: "ap-southeast-1", website_endpoint: "s3-website-ap-southeast-1.amazonaws.com", website_zone_id: "Z3O0J2DXBE1FTB" },
    RegionEndpoint { region: "ap-southeast-2", website_endpoint: "s3-website-ap-southeast-2.amazonaws.com", website_zone_id: "Z1WCIGYICN2BYD" },
    RegionEndpoint { region: "sa-east-1", website_endpoint: "s3-website-sa-east-1.amazonaws.com", website_zone_id: "Z7KQH4QJS55SO" },
];

pub fn is_valid_region(r: &str) -> bool {
    S3_WEBSITE_ENDPOINTS.iter().any(|e| e.region == r)
}

/// Looks up the website endpoint for a region code. Unknown regions fail
/// the whole synthesis.
pub fn website_endpoint(region: &str) -> Result<&'static RegionEndpoint> {
    S3_WEBSITE_ENDPOINTS
        .iter()
        .find(|e| e.region == region)
        .ok_or_else(|| StackError::UnknownRegion(region.to_string()))
}
