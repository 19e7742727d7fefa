use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tokio::sync::watch;
use tracing::info;

use osdeploy::config::{self, ApiConfig, InstallSettings, ProfileSettings};
use osdeploy::deploy::Orchestrator;
use osdeploy::model::ResourceKind;
use osdeploy::remote::ApiClient;
use osdeploy::template::{self, Preset};

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Install an operating system on a server through virtual media
    InstallOs(InstallOsArgs),

    /// Deploy a server profile (applies on next reboot)
    DeployProfile(DeployProfileArgs),

    /// Look up a resource's moid and native type by name
    Resolve(ResolveArgs),

    /// Generate config files from templates using environment variables
    Render(RenderArgs),
}

#[derive(Args)]
pub(crate) struct ApiArgs {
    /// API base URL [env: INTERSIGHT_HOST]
    #[arg(long)]
    host: Option<String>,
    /// Access token [env: INTERSIGHT_ACCESS_TOKEN]
    #[arg(long)]
    token: Option<String>,
    /// Accept invalid TLS certificates [env: INTERSIGHT_INSECURE]
    #[arg(long)]
    insecure: bool,
    /// Per-request timeout in seconds [env: INTERSIGHT_TIMEOUT_SECS]
    #[arg(long)]
    timeout_secs: Option<u64>,
}

impl ApiArgs {
    fn overrides(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            (config::ENV_HOST, self.host.clone()),
            (config::ENV_ACCESS_TOKEN, self.token.clone()),
            (
                config::ENV_INSECURE,
                self.insecure.then(|| "true".to_string()),
            ),
            (
                config::ENV_TIMEOUT_SECS,
                self.timeout_secs.map(|s| s.to_string()),
            ),
        ]
    }
}

#[derive(Args)]
pub(crate) struct InstallOsArgs {
    #[command(flatten)]
    api: ApiArgs,
    /// Server name [env: SERVER_NAME]
    #[arg(long)]
    server: Option<String>,
    /// Organization name [env: ORGANIZATION_NAME, default: default]
    #[arg(long)]
    organization: Option<String>,
    /// OS image name [env: OS_IMAGE_NAME]
    #[arg(long)]
    os_image: Option<String>,
    /// Server configuration utility image name [env: SCU_IMAGE_NAME]
    #[arg(long)]
    scu_image: Option<String>,
    /// Installer answer file [env: ANSWER_FILE, default: ./ubuntu-ai-config.cfg]
    #[arg(long)]
    answer_file: Option<PathBuf>,
    /// Emit JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub(crate) struct DeployProfileArgs {
    #[command(flatten)]
    api: ApiArgs,
    /// Server profile name [env: SERVER_PROFILE_NAME]
    #[arg(long)]
    profile: Option<String>,
    /// Emit JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub(crate) struct ResolveArgs {
    #[command(flatten)]
    api: ApiArgs,
    /// Resource kind
    #[arg(long, value_enum)]
    kind: ResourceKind,
    /// Exact resource name
    name: String,
    /// Emit JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Generate the Ubuntu autoinstall config
    #[arg(long)]
    ubuntu: bool,
    /// Generate the JSON config
    #[arg(long)]
    json: bool,
    /// Generate all configs
    #[arg(long)]
    all: bool,
    /// Template path (only with a single preset)
    #[arg(long)]
    template: Option<PathBuf>,
    /// Output path (only with a single preset)
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Environment lookup where explicitly passed flags win.
fn env_with(overrides: Vec<(&'static str, Option<String>)>) -> impl Fn(&str) -> Option<String> {
    let overrides: HashMap<&'static str, String> = overrides
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect();
    move |name| {
        overrides
            .get(name)
            .cloned()
            .or_else(|| std::env::var(name).ok())
    }
}

fn api_client(read_env: &impl Fn(&str) -> Option<String>) -> Result<ApiClient> {
    let api = ApiConfig::from_env(read_env).context("load API configuration")?;
    info!(host = %api.base_url, "using management API");
    ApiClient::new(api).context("build API client")
}

/// Cancellation signal fired by Ctrl-C.
fn ctrl_c_signal() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(true);
        }
    });
    rx
}

pub(crate) async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::InstallOs(args) => install_os(args).await,
        Commands::DeployProfile(args) => deploy_profile(args).await,
        Commands::Resolve(args) => resolve(args).await,
        Commands::Render(args) => render(args),
    }
}

async fn install_os(args: InstallOsArgs) -> Result<()> {
    let mut overrides = args.api.overrides();
    overrides.extend([
        (config::ENV_SERVER_NAME, args.server),
        (config::ENV_ORGANIZATION_NAME, args.organization),
        (config::ENV_OS_IMAGE_NAME, args.os_image),
        (config::ENV_SCU_IMAGE_NAME, args.scu_image),
        (
            config::ENV_ANSWER_FILE,
            args.answer_file.map(|p| p.display().to_string()),
        ),
    ]);
    let read_env = env_with(overrides);

    let settings = InstallSettings::from_env(&read_env).context("load install settings")?;
    let client = api_client(&read_env)?;
    info!(
        organization = %settings.organization,
        server = %settings.server,
        os_image = %settings.os_image,
        scu_image = %settings.scu_image,
        "install request"
    );

    let orchestrator = Orchestrator::new(client).with_cancel(ctrl_c_signal());
    let ack = orchestrator
        .install_operating_system(&settings)
        .await
        .context("install operating system")?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&ack).context("serialize install response json")?
        );
    } else {
        match &ack.moid {
            Some(moid) => println!("OS install initiated (bulk request {})", moid),
            None => println!("OS install initiated"),
        }
    }
    Ok(())
}

async fn deploy_profile(args: DeployProfileArgs) -> Result<()> {
    let mut overrides = args.api.overrides();
    overrides.push((config::ENV_SERVER_PROFILE_NAME, args.profile));
    let read_env = env_with(overrides);

    let settings = ProfileSettings::from_env(&read_env).context("load profile settings")?;
    let client = api_client(&read_env)?;

    let orchestrator = Orchestrator::new(client).with_cancel(ctrl_c_signal());
    let updated = orchestrator
        .deploy_profile(&settings.profile)
        .await
        .context("deploy server profile")?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&updated).context("serialize profile json")?
        );
    } else {
        println!("Deploy scheduled for profile {}", settings.profile);
    }
    Ok(())
}

async fn resolve(args: ResolveArgs) -> Result<()> {
    let read_env = env_with(args.api.overrides());
    let client = api_client(&read_env)?;
    let resolved = osdeploy::resolve::resolve(&client, args.kind, &args.name)
        .await
        .with_context(|| format!("resolve {} '{}'", args.kind, args.name))?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&resolved).context("serialize resolved json")?
        );
    } else {
        println!("{} {}", resolved.moid, resolved.native_type);
    }
    Ok(())
}

fn render(args: RenderArgs) -> Result<()> {
    let mut presets: Vec<Preset> = Vec::new();
    if args.all || args.ubuntu {
        presets.push(template::UBUNTU_AUTOINSTALL);
    }
    if args.all || args.json {
        presets.push(template::JSON_CONFIG);
    }
    if presets.is_empty() {
        anyhow::bail!("specify --ubuntu, --json, or --all");
    }
    if presets.len() > 1 && (args.template.is_some() || args.output.is_some()) {
        anyhow::bail!("--template/--output can only be used with a single preset");
    }

    let read_env = |name: &str| std::env::var(name).ok();
    for preset in presets {
        let template_path = args
            .template
            .clone()
            .unwrap_or_else(|| PathBuf::from(preset.template));
        let output_path = args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(preset.output));
        let vars = preset.collect_vars(read_env);
        let generated = template::generate(&template_path, &output_path, &vars)
            .with_context(|| format!("render {} config", preset.name))?;
        if let Some(reason) = &generated.fallback {
            eprintln!("Warning: {}, using template as-is", reason);
        }
        println!(
            "Generated {} from {}",
            generated.output.display(),
            template_path.display()
        );
    }
    Ok(())
}
