//! Typed declarations for the resource kinds this stack uses.

mod s3_bucket;
pub use s3_bucket::*;
mod bucket_policy;
pub use bucket_policy::*;
mod route53;
pub use route53::*;
mod cloudfront;
pub use cloudfront::*;
