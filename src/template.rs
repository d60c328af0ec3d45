//! CloudFormation template object model.
//!
//! Resources are declared through the [`CfnResource`] trait and collected
//! into a [`Template`], which serializes to the JSON shape CloudFormation
//! expects. Intrinsic functions (`Ref`, `Fn::GetAtt`, `Fn::Sub`, ...) are
//! plain `serde_json::Value` objects built by the helpers below.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{Result, StackError};

pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";

/// A resource kind that can be placed into a template.
pub trait CfnResource {
    /// the CloudFormation type string, e.g. `AWS::S3::Bucket`
    fn type_string(&self) -> &'static str;

    /// the `Properties` object for this resource
    fn properties(&self) -> Result<Value>;

    /// structural checks that must pass before the resource is accepted
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceEntry {
    #[serde(rename = "Type")]
    pub ty: String,
    #[serde(rename = "Properties")]
    pub properties: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputExport {
    #[serde(rename = "Name")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Output {
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "Value")]
    pub value: Value,
    #[serde(rename = "Export", skip_serializing_if = "Option::is_none")]
    pub export: Option<OutputExport>,
}

/// A full template: format version, resources, outputs.
///
/// BTreeMap keeps the serialized output deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub version: String,
    #[serde(rename = "Resources")]
    pub resources: BTreeMap<String, ResourceEntry>,
    #[serde(rename = "Outputs", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, Output>,
}

impl Default for Template {
    fn default() -> Self {
        Self {
            version: TEMPLATE_FORMAT_VERSION.to_string(),
            resources: Default::default(),
            outputs: Default::default(),
        }
    }
}

impl Template {
    /// Validates the resource and inserts it under `logical_id`.
    pub fn add_resource(&mut self, logical_id: &str, resource: &dyn CfnResource) -> Result<()> {
        resource.validate().map_err(|e| StackError::InvalidResource {
            name: logical_id.to_string(),
            message: e.to_string(),
        })?;
        if self.resources.contains_key(logical_id) {
            return Err(StackError::DuplicateResource(logical_id.to_string()));
        }
        let entry = ResourceEntry {
            ty: resource.type_string().to_string(),
            properties: resource.properties()?,
        };
        self.resources.insert(logical_id.to_string(), entry);
        Ok(())
    }

    pub fn add_output(&mut self, logical_id: &str, output: Output) {
        self.outputs.insert(logical_id.to_string(), output);
    }

    /// Pretty-printed so the template reads well in the CloudFormation console.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// `{ "Ref": logical_id }`
pub fn get_ref(logical_id: &str) -> Value {
    json!({ "Ref": logical_id })
}

/// `{ "Fn::GetAtt": [logical_id, attr] }`
pub fn get_att(logical_id: &str, attr: &str) -> Value {
    json!({ "Fn::GetAtt": [logical_id, attr] })
}

/// `{ "Fn::Sub": expr }`
pub fn sub(expr: &str) -> Value {
    json!({ "Fn::Sub": expr })
}

/// Extracts the bare host from a bucket's `WebsiteURL` attribute
/// (`http://host` splits to `["http:", "", "host"]`).
pub fn select_website_host(bucket_logical_id: &str) -> Value {
    json!({
        "Fn::Select": ["2", { "Fn::Split": ["/", get_att(bucket_logical_id, "WebsiteURL")] }]
    })
}

/// Collapses an arbitrary name into a logical resource id. CloudFormation
/// logical ids must be alphanumeric.
pub fn logical_id(prefix: &str, name: &str) -> String {
    let cleaned: String = name.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    format!("{prefix}{cleaned}")
}

/// A stack name can contain only alphanumeric characters and hyphens,
/// must start with an alphabetical character, and can't be longer than
/// 128 characters.
pub fn validate_stack_name(name: &str) -> Result<String> {
    let restriction = "must only consist of alphanumeric characters and hyphens, \
         must start with an alphabetical character, and cannot be longer than 128 characters";
    let invalid = |message: &str| StackError::InvalidStackName {
        name: name.to_string(),
        message: message.to_string(),
    };
    if name.is_empty() {
        return Err(invalid(restriction));
    }
    for (i, c) in name.chars().enumerate() {
        if i == 0 && !c.is_ascii_alphabetic() {
            return Err(invalid(restriction));
        }
        if !c.is_ascii_alphanumeric() && c != '-' {
            return Err(invalid(restriction));
        }
    }
    if name.len() > 128 {
        return Err(invalid(restriction));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl CfnResource for Fixed {
        fn type_string(&self) -> &'static str {
            "AWS::Test::Fixed"
        }
        fn properties(&self) -> Result<Value> {
            Ok(json!({ "Key": "value" }))
        }
    }

    #[test]
    fn template_serializes_with_pascal_case_keys() {
        let mut template = Template::default();
        template.add_resource("MyResource", &Fixed).unwrap();
        template.add_output(
            "MyOutput",
            Output {
                description: Some("a value".to_string()),
                value: get_ref("MyResource"),
                export: Some(OutputExport { name: "my-export".to_string() }),
            },
        );
        let value: Value = serde_json::from_str(&template.to_json_pretty().unwrap()).unwrap();
        assert_eq!(value["AWSTemplateFormatVersion"], "2010-09-09");
        assert_eq!(value["Resources"]["MyResource"]["Type"], "AWS::Test::Fixed");
        assert_eq!(value["Resources"]["MyResource"]["Properties"]["Key"], "value");
        assert_eq!(value["Outputs"]["MyOutput"]["Export"]["Name"], "my-export");
    }

    #[test]
    fn duplicate_logical_ids_are_rejected() {
        let mut template = Template::default();
        template.add_resource("Twice", &Fixed).unwrap();
        let err = template.add_resource("Twice", &Fixed).unwrap_err();
        assert!(matches!(err, StackError::DuplicateResource(_)));
    }

    #[test]
    fn website_host_selects_third_split_component() {
        let value = select_website_host("Bucket");
        assert_eq!(value["Fn::Select"][0], "2");
        assert_eq!(value["Fn::Select"][1]["Fn::Split"][0], "/");
        assert_eq!(
            value["Fn::Select"][1]["Fn::Split"][1]["Fn::GetAtt"],
            json!(["Bucket", "WebsiteURL"])
        );
    }

    #[test]
    fn logical_ids_drop_separators() {
        assert_eq!(logical_id("S3Bucket", "team1.cloud-ha.com"), "S3Bucketteam1cloudhacom");
    }

    #[test]
    fn stack_name_rules() {
        assert!(validate_stack_name("team1-website").is_ok());
        assert!(validate_stack_name("1team").is_err());
        assert!(validate_stack_name("team_1").is_err());
        assert!(validate_stack_name("").is_err());
        assert!(validate_stack_name(&"a".repeat(129)).is_err());
    }
}
