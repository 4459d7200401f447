use serde::Deserialize;

/// The parts of a kubeconfig the store cares about: the names of its clusters and contexts.
/// Every other key (users, preferences, server details, ...) is accepted and ignored.
#[derive(Debug, Default, Deserialize)]
pub struct KubeConfig {
    #[serde(default)]
    clusters: Option<Vec<NamedCluster>>,
    #[serde(default)]
    contexts: Option<Vec<NamedContext>>,
}

#[derive(Debug, Deserialize)]
pub struct NamedCluster {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct NamedContext {
    pub name: String,
}

impl KubeConfig {
    pub fn parse(bytes: &[u8]) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_slice(bytes)
    }

    pub fn clusters(&self) -> &[NamedCluster] {
        self.clusters.as_deref().unwrap_or_default()
    }

    pub fn contexts(&self) -> &[NamedContext] {
        self.contexts.as_deref().unwrap_or_default()
    }
}
