mod cli;

use cli::Args;
use clap::Parser;
use owo_colors::OwoColorize;
use rambo::adapters::outbound::console::StderrProgressReporter;
use rambo::adapters::outbound::filesystem::{RecipeDirectoryReader, YamlManifestReader};
use rambo::adapters::outbound::network::ChannelIndexClient;
use rambo::application::dto::{OutputFormat, PlanRequest};
use rambo::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use rambo::application::read_models::BuildPlanReadModelBuilder;
use rambo::application::use_cases::PlanBuildUseCase;
use rambo::build_planning::domain::PlanningError;
use rambo::config::{self, ConfigFile};
use rambo::ports::outbound::{
    host_platform, validate_platform, ChannelLocation, Manifest, ManifestReader,
};
use rambo::shared::error::ExitCode;
use rambo::shared::Result;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments.as_i32()
            } else {
                ExitCode::Success.as_i32()
            };
            let _ = e.print();
            process::exit(code);
        }
    };

    init_tracing(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("\n{} {}\n", "❌".red(), "An error occurred:".red().bold());
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\n{} {}", "Caused by:".yellow(), cause);
        }

        eprintln!();
        process::exit(exit_code_for(&e).as_i32());
    }
}

/// Diagnostic logs go to stderr; RUST_LOG takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "rambo=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    if error.chain().any(|cause| cause.is::<PlanningError>()) {
        ExitCode::PlanningFailed
    } else {
        ExitCode::ApplicationError
    }
}

/// Settings after merging CLI flags, the config file and the manifest
struct Settings {
    format: OutputFormat,
    channel: Option<ChannelLocation>,
    platform: String,
    culled: bool,
    exclude: Vec<String>,
    manifest: Option<Manifest>,
}

impl Settings {
    /// CLI flags win over the config file, which wins over the manifest and defaults.
    fn resolve(args: &Args, config: ConfigFile) -> Result<Self> {
        let format = match args.requested_format() {
            Some(format) => format,
            None => config.output_format()?.unwrap_or_default(),
        };

        let manifest = match args.manifest.as_ref().or(config.manifest.as_ref()) {
            Some(path) => Some(YamlManifestReader::new().read_manifest(path)?),
            None => None,
        };

        let channel = args
            .channel
            .clone()
            .or(config.channel)
            .or_else(|| manifest.as_ref().and_then(|m| m.channel_url.clone()))
            .map(|raw| ChannelLocation::parse(&raw))
            .transpose()?;

        let platform = args
            .platform
            .clone()
            .or(config.platform)
            .unwrap_or_else(|| host_platform().to_string());
        validate_platform(&platform)?;

        let exclude = if args.exclude.is_empty() {
            config.exclude_recipes.unwrap_or_default()
        } else {
            args.exclude.clone()
        };

        Ok(Self {
            format,
            channel,
            platform,
            culled: args.culled || config.culled.unwrap_or(false),
            exclude,
            manifest,
        })
    }
}

async fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => config::load_config_from_path(path)?,
        None => config::discover_config(&args.recipes_dir)?.unwrap_or_default(),
    };
    let settings = Settings::resolve(&args, config)?;
    debug!(
        format = %settings.format,
        platform = %settings.platform,
        culled = settings.culled,
        "resolved settings"
    );

    // Create adapters (Dependency Injection)
    let recipe_source = RecipeDirectoryReader::new();
    let channel_repository = ChannelIndexClient::new()?;
    let progress_reporter = StderrProgressReporter::new();

    let use_case = PlanBuildUseCase::new(recipe_source, channel_repository, progress_reporter);

    let request = PlanRequest::new(args.recipes_dir.clone(), settings.platform)
        .with_include(settings.manifest.map(|m| m.packages))
        .with_exclude_patterns(settings.exclude)
        .with_channel(settings.channel)
        .with_cull(settings.culled)
        .with_channel_status(settings.format != OutputFormat::Text);

    let response = use_case.execute(request).await?;
    let model = BuildPlanReadModelBuilder::build(&response);

    eprintln!("{}", FormatterFactory::progress_message(settings.format));
    let formatter = FormatterFactory::create(settings.format);
    let formatted_output = formatter.format(&model)?;

    let presenter_type = match args.file {
        Some(path) => PresenterType::File(path),
        None => PresenterType::Stdout,
    };
    PresenterFactory::create(presenter_type).present(&formatted_output)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rambo::build_planning::domain::RecipeId;
    use rambo::shared::error::RamboError;
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::TempDir;

    fn ids(names: &[&str]) -> BTreeSet<RecipeId> {
        names.iter().map(|n| RecipeId::new(*n).unwrap()).collect()
    }

    fn args(extra: &[&str]) -> Args {
        Args::try_parse_from(
            std::iter::once("rambo")
                .chain(extra.iter().copied())
                .chain(std::iter::once("recipes")),
        )
        .unwrap()
    }

    #[test]
    fn test_exit_code_for_planning_error() {
        let error: anyhow::Error = PlanningError::CyclicDependency { ids: ids(&["a", "b"]) }.into();
        assert_eq!(exit_code_for(&error), ExitCode::PlanningFailed);
    }

    #[test]
    fn test_exit_code_for_wrapped_planning_error() {
        let error =
            anyhow::Error::from(PlanningError::SelfDependency { ids: ids(&["a"]) }).context("planning");
        assert_eq!(exit_code_for(&error), ExitCode::PlanningFailed);
    }

    #[test]
    fn test_exit_code_for_application_error() {
        let error: anyhow::Error = RamboError::MissingChannel.into();
        assert_eq!(exit_code_for(&error), ExitCode::ApplicationError);
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::resolve(&args(&[]), ConfigFile::default()).unwrap();
        assert_eq!(settings.format, OutputFormat::Text);
        assert_eq!(settings.platform, host_platform());
        assert!(settings.channel.is_none());
        assert!(!settings.culled);
        assert!(settings.manifest.is_none());
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = ConfigFile {
            format: Some("json".to_string()),
            channel: Some("/srv/config-channel".to_string()),
            platform: Some("linux-64".to_string()),
            exclude_recipes: Some(vec!["from-config".to_string()]),
            ..ConfigFile::default()
        };
        let settings = Settings::resolve(
            &args(&["-d", "-p", "osx-64", "-e", "from-cli", "--channel", "/srv/cli-channel"]),
            config,
        )
        .unwrap();

        assert_eq!(settings.format, OutputFormat::Details);
        assert_eq!(settings.platform, "osx-64");
        assert_eq!(settings.exclude, vec!["from-cli"]);
        assert_eq!(settings.channel.unwrap().to_string(), "/srv/cli-channel");
    }

    #[test]
    fn test_config_values_used_without_flags() {
        let config = ConfigFile {
            format: Some("json".to_string()),
            culled: Some(true),
            exclude_recipes: Some(vec!["python".to_string()]),
            ..ConfigFile::default()
        };
        let settings = Settings::resolve(&args(&[]), config).unwrap();

        assert_eq!(settings.format, OutputFormat::Json);
        assert!(settings.culled);
        assert_eq!(settings.exclude, vec!["python"]);
    }

    #[test]
    fn test_manifest_channel_is_fallback() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = temp_dir.path().join("manifest.yml");
        fs::write(
            &manifest,
            "channel_URL: https://conda.example.org/main\npackages:\n  - core\n",
        )
        .unwrap();
        let manifest_arg = manifest.to_string_lossy().into_owned();

        let settings =
            Settings::resolve(&args(&["-m", manifest_arg.as_str()]), ConfigFile::default()).unwrap();
        assert_eq!(
            settings.channel,
            Some(ChannelLocation::Remote("https://conda.example.org/main".to_string()))
        );
        assert_eq!(
            settings.manifest.unwrap().packages,
            BTreeSet::from(["core".to_string()])
        );

        let settings = Settings::resolve(
            &args(&["-m", manifest_arg.as_str(), "--channel", "/srv/channel"]),
            ConfigFile::default(),
        )
        .unwrap();
        assert_eq!(settings.channel.unwrap().to_string(), "/srv/channel");
    }

    #[test]
    fn test_invalid_platform_rejected() {
        assert!(Settings::resolve(&args(&["-p", "linux/64"]), ConfigFile::default()).is_err());
    }
}
