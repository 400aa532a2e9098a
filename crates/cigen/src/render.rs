//! Pipeline YAML rendering.
//!
//! The two templates are embedded in the binary; rendering takes the flat
//! [`CiConfig`] record and nothing else, so the output is a pure function
//! of the answers given.

use std::path::Path;

use anyhow::{Context as _, Result};
use tera::{Context, Tera};

use crate::config::{CiConfig, Platform};

const GITHUB_TEMPLATE: &str = include_str!("../templates/github_ci.yml.tera");
const GITLAB_TEMPLATE: &str = include_str!("../templates/gitlab_ci.yml.tera");

/// Where the rendered pipeline lands, relative to the project root.
#[must_use]
pub fn pipeline_path(platform: Platform) -> &'static Path {
    match platform {
        Platform::Github => Path::new(".github/workflows/generated-ci.yml"),
        Platform::Gitlab => Path::new(".gitlab-ci.yml"),
    }
}

/// Renders the pipeline YAML for the configured platform.
///
/// # Errors
///
/// Returns an error if the embedded template fails to parse or if the
/// configuration cannot be serialized into a template context.
pub fn render_pipeline(config: &CiConfig) -> Result<String> {
    let mut tera = Tera::default();
    // YAML output, not HTML.
    tera.autoescape_on(vec![]);
    tera.add_raw_template("github", GITHUB_TEMPLATE)
        .context("invalid GitHub workflow template")?;
    tera.add_raw_template("gitlab", GITLAB_TEMPLATE)
        .context("invalid GitLab pipeline template")?;

    let context =
        Context::from_serialize(config).context("configuration cannot be serialized")?;
    let name = match config.platform {
        Platform::Github => "github",
        Platform::Gitlab => "gitlab",
    };
    tera.render(name, &context)
        .with_context(|| format!("rendering the {name} pipeline failed"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AwsSecretNames, DeployMode};

    fn sample(platform: Platform) -> CiConfig {
        CiConfig {
            platform,
            project_name: "tienda".to_string(),
            branches: vec!["main".to_string(), "develop".to_string()],
            run_on_pr: platform == Platform::Github,
            use_node: false,
            use_sonar: true,
            fail_on_sonar: false,
            use_aws: false,
            deploy_mode: DeployMode::None,
            aws_secrets: AwsSecretNames::default(),
            use_db: true,
        }
    }

    #[test]
    fn github_pipeline_with_defaults() {
        let yaml = render_pipeline(&sample(Platform::Github)).expect("render");
        assert!(yaml.contains("name: \"tienda\""));
        assert!(yaml.contains("branches: [\"main\", \"develop\"]"));
        assert!(yaml.contains("pull_request"));
        assert!(yaml.contains("mysql:8"));
        assert!(yaml.contains("sonar:"));
        // The GitHub expression must survive templating verbatim.
        assert!(yaml.contains("${{ secrets.SONAR_TOKEN }}"));
        assert!(!yaml.contains("deploy:"));
        assert!(!yaml.contains("workflow_dispatch"));
        assert!(!yaml.contains("qualitygate.wait"));
        assert!(!yaml.contains("node:"));
    }

    #[test]
    fn github_quality_gate_blocks_when_asked() {
        let mut config = sample(Platform::Github);
        config.fail_on_sonar = true;
        let yaml = render_pipeline(&config).expect("render");
        assert!(yaml.contains("-Dsonar.qualitygate.wait=true"));
    }

    #[test]
    fn github_node_job_is_optional() {
        let mut config = sample(Platform::Github);
        config.use_node = true;
        let yaml = render_pipeline(&config).expect("render");
        assert!(yaml.contains("npm ci"));
        assert!(yaml.contains("npm test --if-present"));
    }

    #[test]
    fn github_deploy_uses_configured_secret_names() {
        let mut config = sample(Platform::Github);
        config.use_aws = true;
        config.deploy_mode = DeployMode::Tag;
        config.aws_secrets.access_key = "MI_ACCESS".to_string();
        let yaml = render_pipeline(&config).expect("render");
        assert!(yaml.contains("${{ secrets.MI_ACCESS }}"));
        assert!(yaml.contains("${{ secrets.AWS_SECRET_ACCESS_KEY }}"));
        assert!(yaml.contains("startsWith(github.ref, 'refs/tags/')"));
        assert!(yaml.contains("- \"v*\""));
        // Container names come from the project name, slugified.
        assert!(yaml.contains("--name tienda"));
    }

    #[test]
    fn github_manual_deploy_adds_dispatch_trigger() {
        let mut config = sample(Platform::Github);
        config.use_aws = true;
        config.deploy_mode = DeployMode::Manual;
        let yaml = render_pipeline(&config).expect("render");
        assert!(yaml.contains("workflow_dispatch: {}"));
        assert!(yaml.contains("github.event_name == 'workflow_dispatch'"));
    }

    #[test]
    fn github_deploy_waits_for_sonar_only_when_gate_blocks() {
        let mut config = sample(Platform::Github);
        config.use_aws = true;
        config.deploy_mode = DeployMode::Main;
        let yaml = render_pipeline(&config).expect("render");
        assert!(!yaml.contains("- sonar"));

        config.fail_on_sonar = true;
        let yaml = render_pipeline(&config).expect("render");
        assert!(yaml.contains("- sonar"));
    }

    #[test]
    fn gitlab_pipeline_with_defaults() {
        let yaml = render_pipeline(&sample(Platform::Gitlab)).expect("render");
        assert!(yaml.contains("# Pipeline generado para \"tienda\""));
        assert!(yaml.contains("$CI_COMMIT_BRANCH == \"main\""));
        assert!(yaml.contains("$CI_COMMIT_BRANCH == \"develop\""));
        assert!(yaml.contains("allow_failure: true"));
        assert!(yaml.contains("mysql:8"));
        assert!(!yaml.contains("deploy:"));
        assert!(!yaml.contains("$CI_COMMIT_TAG"));
    }

    #[test]
    fn gitlab_blocking_gate_flips_allow_failure() {
        let mut config = sample(Platform::Gitlab);
        config.fail_on_sonar = true;
        let yaml = render_pipeline(&config).expect("render");
        assert!(yaml.contains("allow_failure: false"));
        assert!(yaml.contains("-Dsonar.qualitygate.wait=true"));
    }

    #[test]
    fn gitlab_tag_deploy_runs_on_tags() {
        let mut config = sample(Platform::Gitlab);
        config.use_aws = true;
        config.deploy_mode = DeployMode::Tag;
        config.aws_secrets.ec2_key = "MI_LLAVE".to_string();
        let yaml = render_pipeline(&config).expect("render");
        assert!(yaml.contains("- if: $CI_COMMIT_TAG"));
        assert!(yaml.contains("$MI_LLAVE"));
        assert!(yaml.contains("$AWS_ACCESS_KEY_ID"));
        assert!(yaml.contains("docker:27-dind"));
    }

    #[test]
    fn gitlab_manual_deploy_is_manual_only() {
        let mut config = sample(Platform::Gitlab);
        config.use_aws = true;
        config.deploy_mode = DeployMode::Manual;
        let yaml = render_pipeline(&config).expect("render");
        assert!(yaml.contains("- when: manual"));
        assert!(yaml.contains("$CI_PIPELINE_SOURCE == \"web\""));
    }

    #[test]
    fn sonar_jobs_disappear_without_sonar() {
        for platform in [Platform::Github, Platform::Gitlab] {
            let mut config = sample(platform);
            config.use_sonar = false;
            let yaml = render_pipeline(&config).expect("render");
            assert!(!yaml.contains("sonar"), "{platform:?} still mentions sonar");
        }
    }

    #[test]
    fn pipeline_paths_per_platform() {
        assert_eq!(
            pipeline_path(Platform::Github),
            Path::new(".github/workflows/generated-ci.yml")
        );
        assert_eq!(pipeline_path(Platform::Gitlab), Path::new(".gitlab-ci.yml"));
    }
}
