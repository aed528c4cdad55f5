//! Maven CLI transport
//!
//! Runs `mvn` with pinned versions of the dependency and deploy plugins
//! instead of talking HTTP directly. Useful when the build host already has
//! Maven settings (mirrors, proxies, server credentials) that should apply.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use nexmove_core::{
    ArtifactCoordinate, ConfigurationError, DESCRIPTOR_PACKAGING, RepositoryEndpoint,
};

use crate::error::{FetchError, PublishError};
use crate::fetch::ArtifactFetcher;
use crate::publish::ArtifactPublisher;
use crate::settings::ToolVersions;

pub const MAVEN_PLUGINS_GROUP: &str = "org.apache.maven.plugins";
pub const DEPENDENCY_PLUGIN_ID: &str = "maven-dependency-plugin";
pub const DEPLOY_PLUGIN_ID: &str = "maven-deploy-plugin";

/// How to launch Maven
#[derive(Debug, Clone)]
pub struct MavenInvoker {
    program: PathBuf,
    extra_args: Vec<String>,
}

impl Default for MavenInvoker {
    fn default() -> Self {
        Self {
            program: PathBuf::from("mvn"),
            extra_args: vec!["--batch-mode".to_string()],
        }
    }
}

impl MavenInvoker {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    /// Append an argument passed before the goal, e.g. `--settings <file>`
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    /// Run Maven; on failure return the tail of its output
    async fn run(&self, args: &[String]) -> Result<(), String> {
        tracing::debug!("Running {} {}", self.program.display(), args.join(" "));

        let output = tokio::process::Command::new(&self.program)
            .args(&self.extra_args)
            .args(args)
            .output()
            .await
            .map_err(|e| format!("could not start {}: {}", self.program.display(), e))?;

        if output.status.success() {
            return Ok(());
        }

        // Maven reports build errors on stdout
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let tail: Vec<&str> = stdout
            .lines()
            .chain(stderr.lines())
            .filter(|l| l.contains("[ERROR]"))
            .take(10)
            .collect();

        Err(format!("exited with {}\n{}", output.status, tail.join("\n")))
    }
}

/// `groupId:artifactId:version` of a pinned plugin, or an error if unpinned
fn plugin_coordinate(plugin_id: &str, version: Option<&str>) -> Result<String, ConfigurationError> {
    let tool = format!("{}:{}", MAVEN_PLUGINS_GROUP, plugin_id);
    match version.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => Ok(format!("{}:{}", tool, v)),
        None => Err(ConfigurationError::UnresolvedTool { tool }),
    }
}

/// Fetcher resolving each file into the local repository with `dependency:get`,
/// then placing it with `dependency:copy`.
///
/// `get` lost its `dest` parameter in plugin 3.0; `copy` writes
/// `<artifactId>-<version>.<packaging>` into an output directory.
#[derive(Debug)]
pub struct MavenFetcher {
    mvn: MavenInvoker,
    plugin: String,
}

impl MavenFetcher {
    pub fn new(mvn: MavenInvoker, tools: &ToolVersions) -> Result<Self, ConfigurationError> {
        let plugin = plugin_coordinate(DEPENDENCY_PLUGIN_ID, tools.dependency_plugin.as_deref())?;
        Ok(Self { mvn, plugin })
    }

    fn artifact_arg(coordinate: &ArtifactCoordinate, packaging: &str) -> String {
        format!(
            "-Dartifact={}:{}:{}:{}",
            coordinate.group_id(),
            coordinate.artifact_id(),
            coordinate.version(),
            packaging
        )
    }

    /// Arguments for one non-transitive `dependency:get` from the source repository
    pub fn get_args(
        &self,
        coordinate: &ArtifactCoordinate,
        packaging: &str,
        source: &RepositoryEndpoint,
    ) -> Vec<String> {
        vec![
            format!("{}:get", self.plugin),
            Self::artifact_arg(coordinate, packaging),
            format!(
                "-DremoteRepositories={}::default::{}",
                source.repository_id(),
                source.content_url()
            ),
            "-Dtransitive=false".to_string(),
        ]
    }

    /// Arguments for `dependency:copy` of the resolved file into `output_dir`
    pub fn copy_args(
        &self,
        coordinate: &ArtifactCoordinate,
        packaging: &str,
        output_dir: &Path,
    ) -> Vec<String> {
        vec![
            format!("{}:copy", self.plugin),
            Self::artifact_arg(coordinate, packaging),
            format!("-DoutputDirectory={}", output_dir.display()),
            "-Dmdep.overWriteReleases=true".to_string(),
            "-Dmdep.overWriteSnapshots=true".to_string(),
        ]
    }

    fn tool_error(&self, message: String) -> FetchError {
        FetchError::Tool {
            tool: self.plugin.clone(),
            message,
        }
    }

    async fn fetch_one(
        &self,
        coordinate: &ArtifactCoordinate,
        packaging: &str,
        source: &RepositoryEndpoint,
        dest: &Path,
    ) -> Result<(), FetchError> {
        let output_dir = match dest.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let get = self.get_args(coordinate, packaging, source);
        self.mvn.run(&get).await.map_err(|m| self.tool_error(m))?;

        let copy = self.copy_args(coordinate, packaging, output_dir);
        self.mvn.run(&copy).await.map_err(|m| self.tool_error(m))?;

        // Maven can exit zero without writing anything
        let copied = output_dir.join(coordinate.file_name(packaging));
        if !tokio::fs::try_exists(&copied).await.unwrap_or(false) {
            return Err(self.tool_error(format!(
                "finished without writing {}",
                copied.display()
            )));
        }

        if copied != dest {
            tokio::fs::rename(&copied, dest)
                .await
                .map_err(|source| FetchError::Write {
                    path: dest.to_path_buf(),
                    source,
                })?;
        }

        Ok(())
    }
}

#[async_trait]
impl ArtifactFetcher for MavenFetcher {
    async fn fetch(
        &self,
        coordinate: &ArtifactCoordinate,
        source: &RepositoryEndpoint,
        artifact_dest: &Path,
        descriptor_dest: &Path,
    ) -> Result<(), FetchError> {
        let items = [
            (coordinate.packaging(), artifact_dest),
            (DESCRIPTOR_PACKAGING, descriptor_dest),
        ];

        for (packaging, dest) in items {
            self.fetch_one(coordinate, packaging, source, dest).await?;
        }

        Ok(())
    }
}

/// Publisher running `deploy:deploy-file`
#[derive(Debug)]
pub struct MavenPublisher {
    mvn: MavenInvoker,
    plugin: String,
}

impl MavenPublisher {
    pub fn new(mvn: MavenInvoker, tools: &ToolVersions) -> Result<Self, ConfigurationError> {
        let plugin = plugin_coordinate(DEPLOY_PLUGIN_ID, tools.deploy_plugin.as_deref())?;
        Ok(Self { mvn, plugin })
    }

    pub fn deploy_args(
        &self,
        artifact: &Path,
        descriptor: &Path,
        target: &RepositoryEndpoint,
    ) -> Vec<String> {
        vec![
            format!("{}:deploy-file", self.plugin),
            format!("-Dfile={}", artifact.display()),
            format!("-DpomFile={}", descriptor.display()),
            format!("-DrepositoryId={}", target.repository_id()),
            format!("-Durl={}", target.content_url()),
        ]
    }
}

#[async_trait]
impl ArtifactPublisher for MavenPublisher {
    async fn publish(
        &self,
        coordinate: &ArtifactCoordinate,
        artifact: &Path,
        descriptor: &Path,
        target: &RepositoryEndpoint,
    ) -> Result<(), PublishError> {
        tracing::debug!(
            "Deploying {} into repository {} via {}",
            coordinate,
            target.repository_id(),
            self.plugin
        );

        let args = self.deploy_args(artifact, descriptor, target);
        self.mvn.run(&args).await.map_err(|message| PublishError::Tool {
            tool: self.plugin.clone(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tools() -> ToolVersions {
        ToolVersions {
            dependency_plugin: Some("3.6.1".to_string()),
            deploy_plugin: Some("3.1.1".to_string()),
        }
    }

    fn widget() -> ArtifactCoordinate {
        ArtifactCoordinate::new("com.acme", "widget", "1.2.3", "war").unwrap()
    }

    #[test]
    fn test_unresolved_plugin_versions() {
        let err = MavenFetcher::new(MavenInvoker::default(), &ToolVersions::default()).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnresolvedTool {
                tool: "org.apache.maven.plugins:maven-dependency-plugin".to_string()
            }
        );

        let blank = ToolVersions {
            deploy_plugin: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            MavenPublisher::new(MavenInvoker::default(), &blank),
            Err(ConfigurationError::UnresolvedTool { .. })
        ));
    }

    #[test]
    fn test_get_args() {
        let fetcher = MavenFetcher::new(MavenInvoker::default(), &tools()).unwrap();
        let source = RepositoryEndpoint::new("http://nexus.local:8081", "staging").unwrap();

        let args = fetcher.get_args(&widget(), DESCRIPTOR_PACKAGING, &source);

        assert_eq!(
            args,
            vec![
                "org.apache.maven.plugins:maven-dependency-plugin:3.6.1:get".to_string(),
                "-Dartifact=com.acme:widget:1.2.3:pom".to_string(),
                "-DremoteRepositories=staging::default::http://nexus.local:8081/nexus/content/repositories/staging"
                    .to_string(),
                "-Dtransitive=false".to_string(),
            ]
        );
        assert!(!args.iter().any(|a| a.starts_with("-Ddest")));
    }

    #[test]
    fn test_copy_args() {
        let fetcher = MavenFetcher::new(MavenInvoker::default(), &tools()).unwrap();

        let args = fetcher.copy_args(&widget(), "war", Path::new("target"));

        assert_eq!(
            args[0],
            "org.apache.maven.plugins:maven-dependency-plugin:3.6.1:copy"
        );
        assert!(args.contains(&"-Dartifact=com.acme:widget:1.2.3:war".to_string()));
        assert!(args.contains(&"-DoutputDirectory=target".to_string()));
    }

    #[test]
    fn test_deploy_args() {
        let publisher = MavenPublisher::new(MavenInvoker::default(), &tools()).unwrap();
        let target = RepositoryEndpoint::new("http://nexus.local:8081", "releases").unwrap();

        let args = publisher.deploy_args(
            Path::new("target/widget-1.2.3.war"),
            Path::new("target/widget-1.2.3.pom"),
            &target,
        );

        assert_eq!(
            args,
            vec![
                "org.apache.maven.plugins:maven-deploy-plugin:3.1.1:deploy-file".to_string(),
                "-Dfile=target/widget-1.2.3.war".to_string(),
                "-DpomFile=target/widget-1.2.3.pom".to_string(),
                "-DrepositoryId=releases".to_string(),
                "-Durl=http://nexus.local:8081/nexus/content/repositories/releases".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_program_is_tool_error() {
        let mvn = MavenInvoker::new("/nonexistent/nexmove-test-mvn");
        let fetcher = MavenFetcher::new(mvn, &tools()).unwrap();
        let source = RepositoryEndpoint::new("http://nexus.local:8081", "staging").unwrap();
        let dir = tempfile::tempdir().unwrap();

        let err = fetcher
            .fetch(
                &widget(),
                &source,
                &dir.path().join("a.war"),
                &dir.path().join("a.pom"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Tool { .. }));
    }

    /// Write an executable stand-in for `mvn`
    #[cfg(unix)]
    fn fake_mvn(dir: &Path, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("mvn");
        std::fs::write(&path, format!("#!/bin/sh\n{}", script)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_zero_exit_without_file_is_tool_error() {
        let dir = tempfile::tempdir().unwrap();
        let mvn = MavenInvoker::new(fake_mvn(dir.path(), "exit 0\n"));
        let fetcher = MavenFetcher::new(mvn, &tools()).unwrap();
        let source = RepositoryEndpoint::new("http://nexus.local:8081", "staging").unwrap();
        let scratch = dir.path().join("target");

        let err = fetcher
            .fetch(
                &widget(),
                &source,
                &scratch.join("widget-1.2.3.war"),
                &scratch.join("widget-1.2.3.pom"),
            )
            .await
            .unwrap_err();

        match err {
            FetchError::Tool { message, .. } => {
                assert!(message.contains("finished without writing"));
                assert!(message.contains("widget-1.2.3.war"));
            }
            other => panic!("expected Tool error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_copy_lands_in_scratch_paths() {
        // Touches <outputDirectory>/<artifactId>-<version>.<packaging> on `copy`
        let script = r#"for a in "$@"; do
  case "$a" in
    -DoutputDirectory=*) out="${a#-DoutputDirectory=}" ;;
    -Dartifact=*) art="${a#-Dartifact=}" ;;
  esac
done
case "$*" in
  *:copy*)
    mkdir -p "$out"
    IFS=:
    set -- $art
    touch "$out/$2-$3.$4"
    ;;
esac
exit 0
"#;
        let dir = tempfile::tempdir().unwrap();
        let mvn = MavenInvoker::new(fake_mvn(dir.path(), script));
        let fetcher = MavenFetcher::new(mvn, &tools()).unwrap();
        let source = RepositoryEndpoint::new("http://nexus.local:8081", "staging").unwrap();
        let scratch = dir.path().join("target");
        std::fs::create_dir_all(&scratch).unwrap();

        let artifact = scratch.join("widget-1.2.3.war");
        let descriptor = scratch.join("widget-1.2.3.pom");
        fetcher
            .fetch(&widget(), &source, &artifact, &descriptor)
            .await
            .unwrap();

        assert!(artifact.exists());
        assert!(descriptor.exists());
    }

    #[test]
    fn test_invoker_extra_args() {
        let mvn = MavenInvoker::new("mvn").arg("--settings").arg("ci-settings.xml");
        assert_eq!(
            mvn.extra_args,
            vec!["--batch-mode", "--settings", "ci-settings.xml"]
        );
    }
}
