//! Writes the synthesis result to disk: the template JSON and a deploy
//! script that hands the declaration to the AWS CLI. This crate itself
//! never talks to the provider.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::stack::Synthesis;

pub const TEMPLATE_FILE: &str = "template.json";
pub const DEPLOY_SCRIPT: &str = "deploy.sh";

/// Writes `template.json` and `deploy.sh` into `out_dir`, creating it if
/// needed. Returns the paths written.
pub fn write_synthesis(synth: &Synthesis, out_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(out_dir)?;
    let template_path = out_dir.join(TEMPLATE_FILE);
    fs::write(&template_path, synth.template.to_json_pretty()?)?;
    info!(path = %template_path.display(), "wrote template");

    let script_path = out_dir.join(DEPLOY_SCRIPT);
    fs::write(&script_path, render_deploy_script(synth))?;
    make_executable(&script_path)?;
    info!(path = %script_path.display(), "wrote deploy script");
    Ok((template_path, script_path))
}

/// The stack must exist before content can be synced into its bucket, so
/// the CloudFormation deploy runs first. `aws s3 sync` owns the diffing.
pub fn render_deploy_script(synth: &Synthesis) -> String {
    let region = &synth.region;
    let stack_name = &synth.stack_name;
    let asset_dir = synth.deployment.asset_dir.display();
    let bucket = &synth.deployment.destination_bucket;
    let mut out = String::from("#!/usr/bin/env bash\nset -euo pipefail\n");
    out.push_str("\n# deploy:\n");
    out.push_str(&format!(
        "AWS_REGION={region} aws --region {region} cloudformation deploy \
         --stack-name {stack_name} --template-file ./{TEMPLATE_FILE}\n"
    ));
    out.push_str("\n# content sync:\n");
    out.push_str(&format!("aws s3 sync {asset_dir} s3://{bucket}\n"));
    out
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StackConfig;
    use crate::stack::WebsiteStack;

    #[test]
    fn script_deploys_then_syncs() {
        let synth = WebsiteStack::synthesize(&StackConfig::for_group("team1")).unwrap();
        let script = render_deploy_script(&synth);
        assert!(script.starts_with("#!/usr/bin/env bash"));
        let deploy = script.find("cloudformation deploy").unwrap();
        let sync = script.find("aws s3 sync ./website s3://team1.cloud-ha.com").unwrap();
        assert!(deploy < sync);
        assert!(script.contains("--stack-name team1-website"));
        assert!(script.contains("AWS_REGION=eu-north-1"));
    }
}
