//! End-to-end generator runs with a scripted console.

use tienda_cigen::generate;
use tienda_cigen::testing::ScriptedPrompter;

#[test]
fn github_run_with_defaults_writes_both_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    // "github" then Enter on every question.
    let prompter = ScriptedPrompter::new(["github", "", "", "", "", "", "", "", ""]);

    let files = generate::run(&prompter, dir.path()).expect("run");

    assert!(files.pipeline.ends_with(".github/workflows/generated-ci.yml"));
    assert!(files.instructions.ends_with("workflow-github.md"));

    let yaml = std::fs::read_to_string(&files.pipeline).expect("pipeline file");
    assert!(yaml.contains("name: \"mi-proyecto\""));
    assert!(yaml.contains("pull_request"));
    assert!(yaml.contains("sonar:"));
    assert!(!yaml.contains("deploy:"));
    assert!(!yaml.contains("workflow_dispatch"));

    let doc = std::fs::read_to_string(&files.instructions).expect("instructions file");
    assert!(doc.contains("## Secrets/variables necesarios para SonarCloud"));
    assert!(doc.contains("## Cómo creo los secrets en GitHub"));

    assert!(prompter.exhausted());
    let transcript = prompter.transcript().join("\n");
    assert!(transcript.contains("Workflow de GitHub generado correctamente."));
}

#[test]
fn gitlab_run_with_custom_aws_names() {
    let dir = tempfile::tempdir().expect("tempdir");
    let prompter = ScriptedPrompter::new([
        "gitlab",          // platform
        "tienda-ci",       // project name
        "main,develop",    // branches
        "n",               // sonar
        "s",               // aws
        "",                // deploy mode (default: tag)
        "n",               // standard names? no
        "MI_ACCESS_KEY",   // access key name
        "",                // secret key name
        "",                // region
        "",                // ecr registry
        "",                // ecr repo
        "",                // ec2 host
        "",                // ec2 user
        "",                // ssh key name
        "n",               // database
    ]);

    let files = generate::run(&prompter, dir.path()).expect("run");

    assert!(files.pipeline.ends_with(".gitlab-ci.yml"));
    assert!(files.instructions.ends_with("workflow-gitlab.md"));

    let yaml = std::fs::read_to_string(&files.pipeline).expect("pipeline file");
    assert!(yaml.contains("# Pipeline generado para \"tienda-ci\""));
    assert!(yaml.contains("$CI_COMMIT_BRANCH == \"develop\""));
    assert!(yaml.contains("- if: $CI_COMMIT_TAG"));
    assert!(yaml.contains("$MI_ACCESS_KEY"));
    assert!(yaml.contains("$EC2_LLAVE_SSH"));
    assert!(!yaml.contains("sonar"));
    assert!(!yaml.contains("mysql"));

    let doc = std::fs::read_to_string(&files.instructions).expect("instructions file");
    assert!(doc.contains("### `MI_ACCESS_KEY`"));
    assert!(doc.contains("## Cómo creo las variables en GitLab"));

    let transcript = prompter.transcript().join("\n");
    assert!(transcript.contains("Pipeline de GitLab generado correctamente."));
}

#[test]
fn github_manual_deploy_with_node_job() {
    let dir = tempfile::tempdir().expect("tempdir");
    let prompter = ScriptedPrompter::new([
        "github", // platform
        "",       // project name
        "",       // branches
        "n",      // run on PR
        "s",      // node
        "n",      // sonar
        "s",      // aws
        "3",      // manual deploy
        "",       // standard names? yes
        "",       // database
    ]);

    let files = generate::run(&prompter, dir.path()).expect("run");

    let yaml = std::fs::read_to_string(&files.pipeline).expect("pipeline file");
    assert!(yaml.contains("workflow_dispatch: {}"));
    assert!(yaml.contains("github.event_name == 'workflow_dispatch'"));
    assert!(yaml.contains("npm ci"));
    assert!(yaml.contains("${{ secrets.AWS_ACCESS_KEY_ID }}"));
    assert!(!yaml.contains("pull_request"));
    assert!(!yaml.contains("sonar"));
    assert!(prompter.exhausted());
}
