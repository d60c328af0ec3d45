//! website_stack: declares the CloudFormation stack for an IP-restricted
//! static website hosted on S3 behind Route 53 and CloudFront.
//!
//! The crate is a synthesizer, not a deployer: it assembles a fixed
//! five-resource declaration graph from a small configuration file, writes
//! the template plus a deploy script, and leaves reconciliation entirely to
//! CloudFormation.

pub mod config;
pub mod deploy;
pub mod error;
pub mod regions;
pub mod resources;
pub mod stack;
pub mod template;

pub use config::StackConfig;
pub use error::{Result, StackError};
pub use stack::{Synthesis, WebsiteStack};
