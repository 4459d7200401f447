//! Kubeconfig fixtures shared by the unit tests.

pub const SINGLE_EU: &str = r#"apiVersion: v1
clusters:
- cluster:
    server: https://10.1.1.0
  name: dev-eu-1
contexts:
- context:
    cluster: dev-eu-1
    namespace: kube-public
    user: dev-eu
  name: dev-eu
current-context: dev-eu
kind: Config
preferences: {}
users:
- name: dev-eu
  user: {}
"#;

pub const SINGLE_ASIA: &str = r#"apiVersion: v1
clusters:
- cluster:
    server: https://10.1.1.0
  name: dev-asia-1
contexts:
- context:
    cluster: dev-asia-1
    namespace: kube-public
    user: dev-asia
  name: dev-asia
current-context: dev-asia
kind: Config
preferences: {}
users:
- name: dev-asia
  user: {}
"#;

pub const MULTI_CLUSTER: &str = r#"apiVersion: v1
clusters:
- cluster:
    server: https://10.1.1.0
  name: dev-eu-1
- cluster:
    server: https://10.1.1.1
  name: dev-eu-2
contexts:
- context:
    cluster: dev-eu-1
    user: dev-eu
  name: dev-eu
kind: Config
"#;

pub const MULTI_CONTEXT: &str = r#"apiVersion: v1
clusters:
- cluster:
    server: https://10.1.1.0
  name: dev-eu-1
contexts:
- context:
    cluster: dev-eu-1
    user: dev-eu
  name: dev-eu
- context:
    cluster: dev-eu-1
    user: admin
  name: dev-eu-admin
kind: Config
"#;

pub const NO_CONTEXT: &str = r#"apiVersion: v1
clusters:
- cluster:
    server: https://10.1.1.0
  name: dev-eu-1
kind: Config
"#;

pub const INVALID: &str = "I am no valid yaml";
