//! The question flow.
//!
//! Strictly sequential prompts; the only branching is skipping blocks the
//! user turned off (Sonar quality gate, the whole AWS section, the custom
//! secret-name sub-form). All user-visible text is Spanish, matching the
//! rest of the tool's surface.

use anyhow::Result;

use crate::config::{AwsSecretNames, CiConfig, DeployMode, Platform};
use crate::prompt::Prompter;

/// Ask which platform to generate for, insisting until the answer is
/// `github` or `gitlab`.
///
/// # Errors
///
/// Returns an error when the console cannot be read.
pub fn ask_platform(prompter: &dyn Prompter) -> Result<Platform> {
    prompter.say("=== Generador de Workflows CI/CD ===\n");
    loop {
        let answer = prompter
            .ask_text(
                "¿Para qué plataforma quieres generar CI/CD? (github/gitlab)",
                None,
            )?
            .trim()
            .to_lowercase();
        match answer.as_str() {
            "github" => return Ok(Platform::Github),
            "gitlab" => return Ok(Platform::Gitlab),
            _ => {}
        }
    }
}

/// Run the full flow for one platform and collect the configuration.
///
/// # Errors
///
/// Returns an error when the console cannot be read.
pub fn ask_config(prompter: &dyn Prompter, platform: Platform) -> Result<CiConfig> {
    match platform {
        Platform::Github => ask_github(prompter),
        Platform::Gitlab => ask_gitlab(prompter),
    }
}

fn ask_github(prompter: &dyn Prompter) -> Result<CiConfig> {
    prompter.say("=== Generador de Workflows CI/CD (GitHub Actions) ===\n");

    let project_name = prompter.ask_text(
        "Nombre del proyecto (para el workflow)",
        Some("mi-proyecto"),
    )?;
    let branches = ask_branches(
        prompter,
        "Ramas donde quieres ejecutar CI (coma, ej: main,develop)",
    )?;
    let run_on_pr = prompter.ask_yes_no("¿Ejecutar también en pull_request?", true)?;
    let use_node = prompter.ask_yes_no("¿Tu proyecto tiene parte en Node?", false)?;

    let common = ask_common(prompter, Platform::Github)?;

    Ok(CiConfig {
        platform: Platform::Github,
        project_name,
        branches,
        run_on_pr,
        use_node,
        use_sonar: common.use_sonar,
        fail_on_sonar: common.fail_on_sonar,
        use_aws: common.use_aws,
        deploy_mode: common.deploy_mode,
        aws_secrets: common.aws_secrets,
        use_db: common.use_db,
    })
}

fn ask_gitlab(prompter: &dyn Prompter) -> Result<CiConfig> {
    prompter.say("=== Generador GitLab CI/CD ===\n");

    let project_name = prompter.ask_text(
        "Nombre del proyecto (para el pipeline)",
        Some("mi-proyecto"),
    )?;
    let branches = ask_branches(
        prompter,
        "Ramas donde quieres que se ejecute CI (ej: main,develop)",
    )?;

    let common = ask_common(prompter, Platform::Gitlab)?;

    Ok(CiConfig {
        platform: Platform::Gitlab,
        project_name,
        branches,
        // Neither PRs nor a Node job are wired up for GitLab here.
        run_on_pr: false,
        use_node: false,
        use_sonar: common.use_sonar,
        fail_on_sonar: common.fail_on_sonar,
        use_aws: common.use_aws,
        deploy_mode: common.deploy_mode,
        aws_secrets: common.aws_secrets,
        use_db: common.use_db,
    })
}

/// Answers shared between the two platforms (Sonar, AWS, database).
struct CommonAnswers {
    use_sonar: bool,
    fail_on_sonar: bool,
    use_aws: bool,
    deploy_mode: DeployMode,
    aws_secrets: AwsSecretNames,
    use_db: bool,
}

fn ask_common(prompter: &dyn Prompter, platform: Platform) -> Result<CommonAnswers> {
    prompter.say("\n=== Configuración común CI/CD (SonarCloud, AWS, BD) ===\n");

    let use_sonar = prompter.ask_yes_no("¿Incluir análisis SonarCloud?", true)?;
    let fail_on_sonar = if use_sonar {
        prompter.ask_yes_no(
            "Si falla el Quality Gate de Sonar, ¿quiero que se ROMPA la pipeline?",
            false,
        )?
    } else {
        false
    };

    let use_aws = prompter.ask_yes_no("¿Añadir deploy completo a AWS (ECR + EC2)?", false)?;
    let (deploy_mode, aws_secrets) = if use_aws {
        (
            ask_deploy_mode(prompter)?,
            ask_aws_secret_names(prompter, platform)?,
        )
    } else {
        (DeployMode::None, AwsSecretNames::default())
    };

    let use_db = prompter.ask_yes_no("¿Tu proyecto usa base de datos?", true)?;

    Ok(CommonAnswers {
        use_sonar,
        fail_on_sonar,
        use_aws,
        deploy_mode,
        aws_secrets,
        use_db,
    })
}

fn ask_deploy_mode(prompter: &dyn Prompter) -> Result<DeployMode> {
    let choice = prompter.ask_choice(
        "\n¿Cuándo quiero lanzar el deploy?",
        &[
            "En cada push a main",
            "Solo con tag (release)",
            "Solo manual (desde la UI de CI/CD)",
        ],
        1,
    )?;
    Ok(match choice {
        0 => DeployMode::Main,
        2 => DeployMode::Manual,
        _ => DeployMode::Tag,
    })
}

fn ask_aws_secret_names(prompter: &dyn Prompter, platform: Platform) -> Result<AwsSecretNames> {
    match platform {
        Platform::Github => prompter.say(
            "\nPara AWS voy a usar NOMBRES de secrets de GitHub.\n\
             Luego tendré que crear esos secrets con sus valores reales en GitHub.",
        ),
        Platform::Gitlab => prompter.say(
            "\nPara AWS voy a usar NOMBRES de variables de GitLab CI/CD.\n\
             Luego tendré que crear esas variables con sus valores reales en GitLab.",
        ),
    }

    let standard = prompter.ask_yes_no(
        "¿Usar nombres estándar (AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY, EC2_LLAVE_SSH, etc.)?",
        true,
    )?;
    if standard {
        return Ok(AwsSecretNames::default());
    }

    prompter.say(
        "\nIntroduzco los NOMBRES de los secrets/variables (no sus valores). \
         Si dejo algo vacío, uso el nombre por defecto entre paréntesis.",
    );

    let defaults = AwsSecretNames::default();
    Ok(AwsSecretNames {
        access_key: prompter.ask_text(
            "Nombre secret/variable para AWS access key id",
            Some(&defaults.access_key),
        )?,
        secret_key: prompter.ask_text(
            "Nombre secret/variable para AWS secret access key",
            Some(&defaults.secret_key),
        )?,
        region: prompter.ask_text(
            "Nombre secret/variable para región AWS",
            Some(&defaults.region),
        )?,
        ecr_registry: prompter.ask_text(
            "Nombre secret/variable para URL del registry ECR",
            Some(&defaults.ecr_registry),
        )?,
        ecr_repo: prompter.ask_text(
            "Nombre secret/variable para nombre del repositorio ECR",
            Some(&defaults.ecr_repo),
        )?,
        ec2_host: prompter.ask_text(
            "Nombre secret/variable para host/IP de EC2",
            Some(&defaults.ec2_host),
        )?,
        ec2_user: prompter.ask_text(
            "Nombre secret/variable para usuario de EC2",
            Some(&defaults.ec2_user),
        )?,
        ec2_key: prompter.ask_text(
            "Nombre secret/variable para la clave SSH (.pem) de EC2",
            Some(&defaults.ec2_key),
        )?,
    })
}

/// Split a comma-separated branch answer into clean names.
///
/// A lone separator ("," and friends) yields an empty list; the default
/// only applies when the user presses Enter on the prompt itself.
fn ask_branches(prompter: &dyn Prompter, message: &str) -> Result<Vec<String>> {
    let raw = prompter.ask_text(message, Some("main"))?;
    Ok(raw
        .split(',')
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(ToString::to_string)
        .collect())
}
