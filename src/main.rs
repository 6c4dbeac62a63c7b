mod cli;

use clap::Parser;
use cli::{Args, Command};
use license_info::adapters::outbound::cache::InMemoryParsingResultCache;
use license_info::adapters::outbound::filesystem::{
    FileSystemContentStore, JsonFileLicenseCatalog, ProjectManifest,
};
use license_info::adapters::outbound::network::HttpLicenseCatalog;
use license_info::application::factories::{GeneratorRegistry, ParserFactory};
use license_info::application::use_cases::{default_license_info_header, LicenseInfoService};
use license_info::config::{self, ConfigFile, LicenseCatalogSource};
use license_info::license_aggregation::domain::User;
use license_info::ports::inbound::LicenseInfoPort;
use license_info::ports::outbound::{LicenseCatalog, ReleaseStore};
use license_info::shared::error::ExitCode;
use license_info::shared::{LicenseInfoError, Result};
use std::io::Write;
use std::path::Path;
use std::process;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            process::exit(code.as_i32());
        }
    };

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    init_logging(args.verbose, config.log_level.as_deref());
    config.warn_unknown_fields();

    match args.command {
        Command::Generate {
            manifest,
            generator,
            output,
        } => {
            let manifest = ProjectManifest::load(&manifest)?;
            let service = build_service(&config, &manifest)?;

            let format_info = service.output_format_info(&generator)?;
            if format_info.is_output_binary && output.is_none() {
                return Err(LicenseInfoError::invalid_argument(
                    "output",
                    &format!(
                        "{} produces a binary document, pass --output <FILE>",
                        format_info.generator_id
                    ),
                )
                .into());
            }

            let mut request = manifest.file_request(&generator);
            if let Some(email) = &args.user {
                request.user = User::new(email.clone());
            }
            let file = service.generate_file(&request)?;

            match output {
                Some(path) => {
                    write_output(&path, &file.generated_output)?;
                    info!(path = %path.display(), bytes = file.generated_output.len(), "Wrote license information file");
                }
                None => std::io::stdout().write_all(&file.generated_output)?,
            }
        }
        Command::Formats => {
            for format in GeneratorRegistry::with_defaults().output_formats() {
                println!(
                    "{}\t{}\t{}\t{}",
                    format.generator_id, format.file_extension, format.mime_type, format.description
                );
            }
        }
        Command::Inspect {
            manifest,
            release,
            attachment,
        } => {
            let manifest = ProjectManifest::load(&manifest)?;
            let service = build_service(&config, &manifest)?;
            let user = args
                .user
                .map(User::new)
                .unwrap_or_else(|| manifest.user());

            let release = manifest.release_store().get_release(&release, &user)?;
            let results = service.attachment_license_info(Some(&release), &attachment, &user)?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Command::Header => println!("{}", default_license_info_header()),
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ConfigFile> {
    match path {
        Some(path) => config::load_config_from_path(path),
        None => Ok(config::discover_config(Path::new("."))?.unwrap_or_default()),
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose` and the config level
fn init_logging(verbose: u8, config_level: Option<&str>) {
    let level = match verbose {
        0 => config_level.unwrap_or("warn"),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("license_info={}", level.to_lowercase())));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Wires adapters into the service (Dependency Injection)
fn build_service(config: &ConfigFile, manifest: &ProjectManifest) -> Result<LicenseInfoService> {
    let content_dir = manifest.content_dir().unwrap_or_else(|| config.content_dir());
    let content_store = Arc::new(FileSystemContentStore::new(content_dir));
    let release_store: Arc<dyn ReleaseStore> = Arc::new(manifest.release_store());
    let cache = Arc::new(InMemoryParsingResultCache::new(
        config.cache_ttl(),
        config.cache_max_entries(),
    ));

    let parsers = ParserFactory::create_all(
        content_store,
        Arc::clone(&release_store),
        config.combined_cli_external_id_key(),
    );
    let service = LicenseInfoService::new(
        parsers,
        cache,
        release_store,
        GeneratorRegistry::with_defaults(),
    );

    let catalog: Option<Arc<dyn LicenseCatalog>> = match config.license_catalog_source() {
        Some(LicenseCatalogSource::Http(url)) => Some(Arc::new(HttpLicenseCatalog::new(url)?)),
        Some(LicenseCatalogSource::File(path)) => Some(Arc::new(JsonFileLicenseCatalog::new(path))),
        None => None,
    };
    Ok(match catalog {
        Some(catalog) => service.with_license_catalog(catalog),
        None => service,
    })
}

/// Writes the generated file, refusing to follow a symbolic link at the target
fn write_output(path: &Path, content: &[u8]) -> Result<()> {
    if let Ok(metadata) = std::fs::symlink_metadata(path) {
        if metadata.is_symlink() {
            anyhow::bail!(
                "Security: {} is a symbolic link. For security reasons, output is not written through symbolic links.",
                path.display()
            );
        }
    }

    std::fs::write(path, content).map_err(|e| {
        anyhow::anyhow!(
            "Failed to write output file {}: {}\n\n💡 Hint: Check that the directory exists and is writable.",
            path.display(),
            e
        )
    })
}
