use std::fs;

use serde_json::Value;
use tempfile::tempdir;

use website_stack::{config::StackConfig, deploy, WebsiteStack};

#[test]
fn config_file_to_written_stack() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("stack.toml");
    fs::write(
        &config_path,
        r#"
group = "team1"
region = "eu-north-1"
geo_denylist = ["CN"]
"#,
    )
    .unwrap();

    let config = StackConfig::load(&config_path).unwrap();
    let synth = WebsiteStack::synthesize(&config).unwrap();

    let out_dir = dir.path().join("out");
    let (template_path, script_path) = deploy::write_synthesis(&synth, &out_dir).unwrap();

    let template: Value = serde_json::from_str(&fs::read_to_string(&template_path).unwrap()).unwrap();
    assert_eq!(template["AWSTemplateFormatVersion"], "2010-09-09");

    let resources = template["Resources"].as_object().unwrap();
    assert_eq!(resources.len(), 4);
    assert_eq!(
        resources["S3Bucketteam1cloudhacom"]["Properties"]["BucketName"],
        "team1.cloud-ha.com"
    );
    assert_eq!(
        resources["Route53Recordteam1cloudhacom"]["Properties"]["Name"],
        "team1.cloud-ha.com"
    );

    let statements = resources["S3Bucketteam1cloudhacomPolicy"]["Properties"]["PolicyDocument"]
        ["Statement"]
        .as_array()
        .unwrap();
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0]["Action"], serde_json::json!(["s3:GetObject"]));
    assert_eq!(
        statements[0]["Condition"]["IpAddress"]["aws:SourceIp"],
        "79.133.25.93/32"
    );

    let dist_config = &resources["CDNteam1cloudhacom"]["Properties"]["DistributionConfig"];
    assert_eq!(dist_config["Origins"].as_array().unwrap().len(), 1);
    assert_eq!(dist_config["PriceClass"], "PriceClass_100");
    assert_eq!(
        dist_config["Restrictions"]["GeoRestriction"]["Locations"],
        serde_json::json!(["CN"])
    );

    let outputs = template["Outputs"].as_object().unwrap();
    assert_eq!(outputs["websiteBucketOutput"]["Export"]["Name"], "team1-assignment2-url");
    assert_eq!(outputs["DistributionId"]["Value"]["Ref"], "CDNteam1cloudhacom");

    let script = fs::read_to_string(&script_path).unwrap();
    assert!(script.contains("cloudformation deploy"));
    assert!(script.contains("s3://team1.cloud-ha.com"));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(&script_path).unwrap().permissions().mode();
        assert_ne!(mode & 0o111, 0);
    }
}

#[test]
fn missing_config_file_fails() {
    let dir = tempdir().unwrap();
    let err = StackConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn broken_config_never_reaches_the_filesystem() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("stack.toml");
    fs::write(&config_path, "group = \"Team One\"\n").unwrap();
    assert!(StackConfig::load(&config_path).is_err());
    assert!(!dir.path().join("out").exists());
}
