use std::fmt;

use crate::domain::{common::OrderedMap, value_objects::DeploymentType};

use super::application::OptionValue;

/// Default options for a deployment type, in rendering order.
pub fn default_options(deployment_type: DeploymentType) -> Vec<(&'static str, OptionValue)> {
    let mut defaults = vec![
        ("appsFolders", OptionValue::List(Vec::new())),
        ("directoryPath", OptionValue::String("../".into())),
        ("clusteredDbApps", OptionValue::List(Vec::new())),
        ("monitoring", OptionValue::String("no".into())),
        ("serviceDiscoveryType", OptionValue::String("consul".into())),
    ];
    match deployment_type {
        DeploymentType::DockerCompose => {
            defaults.push(("gatewayType", OptionValue::String("SpringCloudGateway".into())));
        }
        DeploymentType::Kubernetes => {
            defaults.extend([
                ("dockerPushCommand", OptionValue::String("docker push".into())),
                ("kubernetesNamespace", OptionValue::String("default".into())),
                ("kubernetesServiceType", OptionValue::String("LoadBalancer".into())),
                ("kubernetesUseDynamicStorage", OptionValue::Boolean(false)),
                ("kubernetesStorageClassName", OptionValue::String(String::new())),
                ("istio", OptionValue::Boolean(false)),
                ("ingressDomain", OptionValue::String(String::new())),
                ("ingressType", OptionValue::String("nginx".into())),
            ]);
        }
        DeploymentType::Openshift => {
            defaults.extend([
                ("dockerPushCommand", OptionValue::String("docker push".into())),
                ("openshiftNamespace", OptionValue::String("default".into())),
                ("storageType", OptionValue::String("ephemeral".into())),
                ("registryReplicas", OptionValue::Integer(2)),
            ]);
        }
    }
    defaults
}

/// Deployment topology for a set of applications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JdlDeployment {
    deployment_type: DeploymentType,
    options: OrderedMap<String, OptionValue>,
}

impl JdlDeployment {
    /// A deployment holding its type's default options.
    pub fn new(deployment_type: DeploymentType) -> Self {
        let options = default_options(deployment_type)
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        Self {
            deployment_type,
            options,
        }
    }

    /// Override or add an option; defaults keep their position.
    pub fn set_option(&mut self, name: impl Into<String>, value: OptionValue) {
        self.options.insert(name.into(), value);
    }

    pub fn with_option(mut self, name: impl Into<String>, value: OptionValue) -> Self {
        self.set_option(name, value);
        self
    }

    pub fn deployment_type(&self) -> DeploymentType {
        self.deployment_type
    }

    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    pub fn options(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.options.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl fmt::Display for JdlDeployment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "deployment {{\n  deploymentType {}", self.deployment_type)?;
        for (name, value) in self.options.iter() {
            if value.is_empty() {
                continue;
            }
            write!(f, "\n  {name} {value}")?;
        }
        f.write_str("\n}")
    }
}
