mod logging;

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use upkeep_core::config::{
    DEFAULT_CHANGELOG_FILE, DEFAULT_OUTPUT_FILE, DEFAULT_PACKAGE_NAME, DEFAULT_RELEASE_NOTES_FILE,
    DEFAULT_UPSTREAM_REPO, DEFAULT_VERSION_FILE,
};
use upkeep_core::{
    augment, check_and_record, resolve_reader, MatchCriteria, NotesTemplate, OutputSink, Result,
    WatcherConfig,
};
use upkeep_provider::{GitHubProvider, RepoId, GITHUB_API_URL};

#[derive(Parser)]
#[command(name = "upkeep")]
#[command(version, about = "Track upstream releases and prepare downstream packaging")]
struct Cli {
    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check upstream for a new release and refresh version, changelog and notes
    Check(CheckArgs),
    /// Re-declare the metadata file of a build manifest after its command line
    Manifest {
        /// Manifest to read
        source: PathBuf,
        /// Where to write the result (may equal source)
        target: PathBuf,
        /// Metadata file to declare
        metadata_file: String,
    },
    /// Pick a release asset; reads the release JSON from stdin
    Resolve {
        /// Regex the asset name must match
        #[arg(allow_hyphen_values = true)]
        asset_pattern: String,
        /// Regex for the preferred architecture
        #[arg(allow_hyphen_values = true)]
        arch_pattern: String,
        /// Comma-separated fallback keywords
        #[arg(allow_hyphen_values = true)]
        fallbacks: Option<String>,
    },
}

#[derive(Args)]
struct CheckArgs {
    /// Upstream repository as owner/repo
    #[arg(long, env = "UPSTREAM_REPO", default_value = DEFAULT_UPSTREAM_REPO)]
    repo: String,

    /// File holding the last processed upstream tag
    #[arg(long, default_value = DEFAULT_VERSION_FILE)]
    version_file: PathBuf,

    /// Changelog with the latest-version marker region
    #[arg(long, default_value = DEFAULT_CHANGELOG_FILE)]
    changelog: PathBuf,

    /// Generated release notes
    #[arg(long, default_value = DEFAULT_RELEASE_NOTES_FILE)]
    release_notes: PathBuf,

    /// key=value sink the decision is appended to
    #[arg(long, env = "GITHUB_OUTPUT", default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Rebuild even if the upstream tag is unchanged
    #[arg(
        long,
        env = "FORCE",
        value_parser = parse_force,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true"
    )]
    force: bool,

    /// API token for the upstream host
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Root of the GitHub REST API
    #[arg(long, default_value = GITHUB_API_URL)]
    api_url: String,

    /// Package title used in the release notes
    #[arg(long, default_value = DEFAULT_PACKAGE_NAME)]
    package_name: String,
}

/// Only a case-insensitive `true` turns forcing on.
fn parse_force(value: &str) -> std::result::Result<bool, String> {
    Ok(value.eq_ignore_ascii_case("true"))
}

/// Exit status for a malformed command line (sysexits `EX_USAGE`), kept apart
/// from the codes of [`upkeep_core::UpkeepError`].
const USAGE_EXIT_CODE: u8 = 64;

/// `--help` and `--version` surface as parse errors but are successful runs.
fn parse_failure_code(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        USAGE_EXIT_CODE
    } else {
        0
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(parse_failure_code(&err));
        }
    };
    logging::init(cli.quiet);

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Check(args) => run_check(args).await,
        Commands::Manifest {
            source,
            target,
            metadata_file,
        } => augment(&source, &target, &metadata_file),
        Commands::Resolve {
            asset_pattern,
            arch_pattern,
            fallbacks,
        } => {
            let fallbacks = fallbacks.unwrap_or_default();
            let criteria = MatchCriteria::new(&asset_pattern, &arch_pattern, &fallbacks)?;
            let resolution = resolve_reader(std::io::stdin().lock(), &criteria)?;
            println!("{}", resolution);
            Ok(())
        }
    }
}

async fn run_check(args: CheckArgs) -> Result<()> {
    let repo: RepoId = args.repo.parse()?;
    let provider = GitHubProvider::new()
        .with_api_url(args.api_url)
        .with_token(args.token);
    let config = WatcherConfig {
        repo,
        version_file: args.version_file,
        changelog_file: args.changelog,
        release_notes_file: args.release_notes,
        force: args.force,
        notes: NotesTemplate {
            package_name: args.package_name,
        },
    };

    check_and_record(&provider, &config, &OutputSink::new(args.output)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use upkeep_core::UpkeepError;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_usage_errors_have_their_own_exit_code() {
        for argv in [
            vec!["upkeep", "bogus"],
            vec!["upkeep", "manifest", "a.yml"],
            vec!["upkeep", "check", "--no-such-flag"],
        ] {
            let err = Cli::try_parse_from(argv).err().unwrap();
            assert_eq!(parse_failure_code(&err), USAGE_EXIT_CODE);
        }

        let domain_errors = [
            UpkeepError::MalformedRelease("x".to_string()),
            UpkeepError::NoMatchingAsset {
                pattern: "x".to_string(),
            },
            UpkeepError::InvalidRepo("x".to_string()),
        ];
        assert!(domain_errors
            .iter()
            .all(|e| e.exit_code() != USAGE_EXIT_CODE));
    }

    #[test]
    fn test_help_is_not_a_failure() {
        let err = Cli::try_parse_from(["upkeep", "--help"]).err().unwrap();
        assert_eq!(parse_failure_code(&err), 0);
    }

    #[test]
    fn test_parse_force() {
        assert_eq!(parse_force("true"), Ok(true));
        assert_eq!(parse_force("TRUE"), Ok(true));
        assert_eq!(parse_force("false"), Ok(false));
        assert_eq!(parse_force("1"), Ok(false));
        assert_eq!(parse_force(""), Ok(false));
    }

    #[test]
    fn test_check_flags() {
        let cli = Cli::try_parse_from([
            "upkeep",
            "check",
            "--force",
            "--version-file",
            "VERSION",
            "--repo",
            "owner/repo",
        ])
        .unwrap();
        match cli.command {
            Commands::Check(args) => {
                assert!(args.force);
                assert_eq!(args.repo, "owner/repo");
                assert_eq!(args.version_file, PathBuf::from("VERSION"));
                assert_eq!(args.changelog, PathBuf::from(DEFAULT_CHANGELOG_FILE));
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_explicit_force_value() {
        let cli = Cli::try_parse_from(["upkeep", "check", "--force", "no"]).unwrap();
        match cli.command {
            Commands::Check(args) => assert!(!args.force),
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_resolve_args() {
        let cli = Cli::try_parse_from(["upkeep", "-q", "resolve", r"\.deb$", "arm64|aarch64", ""])
            .unwrap();
        assert!(cli.quiet);
        match cli.command {
            Commands::Resolve {
                asset_pattern,
                arch_pattern,
                fallbacks,
            } => {
                assert_eq!(asset_pattern, r"\.deb$");
                assert_eq!(arch_pattern, "arm64|aarch64");
                assert_eq!(fallbacks.as_deref(), Some(""));
            }
            _ => panic!("expected resolve"),
        }
    }

    #[test]
    fn test_manifest_args() {
        let cli = Cli::try_parse_from(["upkeep", "manifest", "a.yml", "b.yml", "m.xml"]).unwrap();
        assert!(matches!(cli.command, Commands::Manifest { .. }));
    }
}
