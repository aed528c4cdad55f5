//! Move command - relocate an artifact from the staging repository to its target

use clap::{Args, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::watch;

use nexmove_core::{RelocationParams, RelocationPlan};
use nexmove_repo::{
    ArtifactFetcher, ArtifactPublisher, Credential, CredentialError, CredentialResolver,
    HttpFetcher, HttpPublisher, MavenFetcher, MavenInvoker, MavenPublisher, Relocator,
    RepositoryDeleteClient, ServerStore, Settings,
};

use crate::display;
use crate::error::{CliError, Result};

/// How the fetch and publish steps talk to the repositories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// Plain HTTP against the Maven 2 layout
    #[default]
    Http,
    /// `mvn dependency:get`/`copy` and `mvn deploy:deploy-file`
    Maven,
}

#[derive(Debug, Args)]
pub struct MoveArgs {
    /// Group id of the artifact to move
    #[arg(long)]
    pub group_id: String,

    /// Artifact id of the artifact to move
    #[arg(long)]
    pub artifact_id: String,

    /// Version of the artifact to move
    #[arg(id = "artifact_version", long = "artifact-version")]
    pub version: String,

    /// Packaging of the artifact (the POM is always moved too)
    #[arg(long)]
    pub packaging: String,

    /// Root URL of the staging Nexus, e.g. http://nexus.local:8081
    #[arg(long, env = "NEXMOVE_STAGING_URL")]
    pub staging_url: String,

    /// Root URL of the target Nexus (defaults to --staging-url)
    #[arg(long, env = "NEXMOVE_TARGET_URL")]
    pub target_url: Option<String>,

    /// Id of the staging repository; also the server id for delete credentials
    #[arg(long)]
    pub staging_repo_id: String,

    /// Id of the target repository
    #[arg(long)]
    pub target_repo_id: String,

    /// Skip downloading; publish the files already in --build-dir
    #[arg(long)]
    pub skip_fetch: bool,

    /// Skip uploading into the target repository
    #[arg(long)]
    pub skip_publish: bool,

    /// Skip deleting from the staging repository
    #[arg(long)]
    pub skip_delete: bool,

    /// Directory for the downloaded artifact and POM
    #[arg(long, default_value = "target")]
    pub build_dir: PathBuf,

    /// Settings file (default: ~/.config/nexmove/settings.yaml)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// HTTP timeout, e.g. 30s or 2m (overrides the settings file)
    #[arg(long, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// Transport for fetch and publish
    #[arg(long, value_enum, default_value_t = Transport::Http)]
    pub transport: Transport,

    /// Maven executable for --transport maven
    #[arg(long, default_value = "mvn")]
    pub mvn: PathBuf,

    /// Extra argument passed to every Maven invocation, e.g. --mvn-arg=--settings=ci.xml
    #[arg(long = "mvn-arg", allow_hyphen_values = true)]
    pub mvn_args: Vec<String>,

    /// Print the step report as JSON
    #[arg(long)]
    pub json: bool,
}

impl MoveArgs {
    fn params(&self) -> RelocationParams {
        RelocationParams {
            group_id: self.group_id.clone(),
            artifact_id: self.artifact_id.clone(),
            version: self.version.clone(),
            packaging: self.packaging.clone(),
            staging_url: self.staging_url.clone(),
            target_url: self.target_url.clone(),
            staging_repository_id: self.staging_repo_id.clone(),
            target_repository_id: self.target_repo_id.clone(),
            skip_fetch: self.skip_fetch,
            skip_publish: self.skip_publish,
            skip_delete: self.skip_delete,
        }
    }
}

/// Load settings from `--settings` or the default location
pub fn load_settings(path: Option<&PathBuf>) -> Result<Settings> {
    let settings = match path {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::config_with_help(
                    format!("Settings file not found: {}", path.display()),
                    "Omit --settings to use the default location",
                ));
            }
            Settings::load_from(path)?
        }
        None => Settings::load()?,
    };
    Ok(settings)
}

/// Credentials for fetch/publish are optional; a missing server means anonymous access
fn optional_credential(store: &ServerStore, repository_id: &str) -> Result<Option<Credential>> {
    match store.resolve(repository_id) {
        Ok(credential) => Ok(Some(credential)),
        Err(CredentialError::NotFound { .. }) => {
            tracing::debug!("No server entry for {}, using anonymous access", repository_id);
            Ok(None)
        }
        Err(e) => Err(CliError::Configuration {
            message: e.to_string(),
            help: None,
        }),
    }
}

/// Move an artifact
pub async fn run(args: &MoveArgs, verbose: bool) -> Result<()> {
    let plan = RelocationPlan::from_params(args.params(), &args.build_dir)?;
    let settings = load_settings(args.settings.as_ref())?;
    let timeout = args.timeout.unwrap_or(settings.http.timeout);

    // Plain lookups for fetch/publish stay quiet; diagnostics are for the delete credentials
    let lookup = ServerStore::new(settings.servers.clone());
    let store = ServerStore::new(settings.servers.clone()).with_diagnostics(verbose);

    let (fetcher, publisher): (Box<dyn ArtifactFetcher>, Box<dyn ArtifactPublisher>) =
        match args.transport {
            Transport::Http => {
                let source_cred = optional_credential(&lookup, plan.source().repository_id())?;
                let target_cred = optional_credential(&lookup, plan.target().repository_id())?;
                let fetcher: Box<dyn ArtifactFetcher> = Box::new(
                    HttpFetcher::new(timeout, source_cred)
                        .map_err(|e| CliError::internal(e.to_string()))?,
                );
                let publisher: Box<dyn ArtifactPublisher> = Box::new(
                    HttpPublisher::new(timeout, target_cred)
                        .map_err(|e| CliError::internal(e.to_string()))?,
                );
                (fetcher, publisher)
            }
            Transport::Maven => {
                let mvn = args
                    .mvn_args
                    .iter()
                    .fold(MavenInvoker::new(&args.mvn), |mvn, arg| mvn.arg(arg.as_str()));
                let fetcher: Box<dyn ArtifactFetcher> =
                    Box::new(MavenFetcher::new(mvn.clone(), &settings.tools)?);
                let publisher: Box<dyn ArtifactPublisher> =
                    Box::new(MavenPublisher::new(mvn, &settings.tools)?);
                (fetcher, publisher)
            }
        };

    let deleter =
        RepositoryDeleteClient::new(timeout).map_err(|e| CliError::internal(e.to_string()))?;

    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            display::interrupted();
            let _ = cancel_tx.send(true);
        }
    });

    let relocator = Relocator::new(fetcher, publisher, Box::new(deleter), Box::new(store))
        .with_cancellation(cancel_rx);

    let report = relocator.relocate(&plan).await?;

    if args.json {
        let json = serde_json::json!({
            "coordinate": plan.coordinate(),
            "source": plan.source(),
            "target": plan.target(),
            "steps": report.steps,
        });
        let output = serde_json::to_string_pretty(&json)
            .map_err(|e| CliError::internal(e.to_string()))?;
        println!("{}", output);
    } else {
        display::report(&plan, &report);
    }

    Ok(())
}
