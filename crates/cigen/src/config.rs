//! Configuration record produced by the question flow.
//!
//! One flat struct, filled in strictly sequential order and handed as-is to
//! the template renderer and the instructions writer.

use serde::Serialize;

/// CI platform the pipeline targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Github,
    Gitlab,
}

impl Platform {
    /// Human-readable name used in the instructions document.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Github => "GitHub Actions",
            Self::Gitlab => "GitLab CI/CD",
        }
    }
}

/// When the AWS deploy job runs.
///
/// `None` means no deploy job at all (the AWS questions were skipped).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployMode {
    None,
    /// On every push to `main`.
    Main,
    /// Only when a tag is pushed (release).
    Tag,
    /// Only triggered by hand from the CI web UI.
    Manual,
}

/// Names of the CI secrets/variables the AWS jobs reference.
///
/// These are names, never values; the user creates the actual secrets in
/// the platform UI afterwards, following the instructions document.
#[derive(Debug, Clone, Serialize)]
pub struct AwsSecretNames {
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    pub ecr_registry: String,
    pub ecr_repo: String,
    pub ec2_host: String,
    pub ec2_user: String,
    pub ec2_key: String,
}

impl Default for AwsSecretNames {
    fn default() -> Self {
        Self {
            access_key: "AWS_ACCESS_KEY_ID".to_string(),
            secret_key: "AWS_SECRET_ACCESS_KEY".to_string(),
            region: "AWS_REGION".to_string(),
            ecr_registry: "AWS_ECR_URL".to_string(),
            ecr_repo: "ECR_REPOSITORY".to_string(),
            ec2_host: "EC2_HOST".to_string(),
            ec2_user: "EC2_USUARIO".to_string(),
            ec2_key: "EC2_LLAVE_SSH".to_string(),
        }
    }
}

/// Everything the question flow collects.
#[derive(Debug, Clone, Serialize)]
pub struct CiConfig {
    pub platform: Platform,
    pub project_name: String,
    /// Branches the pipeline runs on. May be empty if the user typed only
    /// separators; the templates tolerate that.
    pub branches: Vec<String>,
    /// GitHub only; always false for GitLab.
    pub run_on_pr: bool,
    /// GitHub only; always false for GitLab.
    pub use_node: bool,
    pub use_sonar: bool,
    /// Break the pipeline when the Sonar quality gate fails.
    pub fail_on_sonar: bool,
    pub use_aws: bool,
    pub deploy_mode: DeployMode,
    pub aws_secrets: AwsSecretNames,
    /// Spin up a throwaway database service for the test job.
    pub use_db: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_aws_secret_names() {
        let names = AwsSecretNames::default();
        assert_eq!(names.access_key, "AWS_ACCESS_KEY_ID");
        assert_eq!(names.ec2_key, "EC2_LLAVE_SSH");
        assert_eq!(names.ecr_registry, "AWS_ECR_URL");
    }

    #[test]
    fn enums_serialize_lowercase() {
        // The templates compare against these exact strings.
        assert_eq!(
            serde_json::to_value(Platform::Github).expect("serialize"),
            serde_json::json!("github")
        );
        assert_eq!(
            serde_json::to_value(DeployMode::Manual).expect("serialize"),
            serde_json::json!("manual")
        );
        assert_eq!(
            serde_json::to_value(DeployMode::None).expect("serialize"),
            serde_json::json!("none")
        );
    }

    #[test]
    fn platform_display_names() {
        assert_eq!(Platform::Github.display_name(), "GitHub Actions");
        assert_eq!(Platform::Gitlab.display_name(), "GitLab CI/CD");
    }
}
