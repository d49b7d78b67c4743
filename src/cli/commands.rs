use crate::app::App;
use crate::config::AppConfig;
use crate::controller::ControllerRegistry;
use crate::metadata::{load_manifest, CapabilityTable};
use crate::resolver::{DiskFileSystem, FileSystem, ModuleResolver, NamespaceBinding};
use crate::router::Router;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Command-line interface for frontmvc
///
/// Inspects routing and module resolution without writing any application code, and
/// renders requests through the built-in controllers.
#[derive(Parser)]
#[command(name = "frontmvc")]
#[command(about = "frontmvc CLI", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Route a request path against a controller manifest and print the result as JSON
    Route {
        /// Request path, e.g. `/blog/show/42`
        path: String,

        /// Application name (namespace root of its controllers)
        #[arg(short, long, default_value = "App")]
        app: String,

        /// YAML controller manifest declaring actions and argument shapes
        #[arg(short, long)]
        manifest: PathBuf,

        /// Controller used when the path names none
        #[arg(long, default_value = "main", env = "FRONTMVC_DEFAULT_CONTROLLER")]
        default_controller: String,
    },
    /// Resolve a symbolic name to a module file
    Resolve {
        /// Fully-qualified name, e.g. `Skel\Controller\Main`
        name: String,

        /// Root joined to root-relative candidates (default `../..`)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Namespace binding `PREFIX=PATH`, repeatable, tried in order
        #[arg(short, long = "namespace", value_parser = parse_binding)]
        namespaces: Vec<NamespaceBinding>,

        /// JSON namespace map imported after `--namespace`
        #[arg(long)]
        namespace_manifest: Option<PathBuf>,

        /// Module file extension, without the dot
        #[arg(short, long, default_value = crate::resolver::DEFAULT_EXTENSION)]
        extension: String,

        /// Directory relative candidates are searched in (repeatable)
        #[arg(long = "search-path", default_value = ".")]
        search_paths: Vec<PathBuf>,

        /// Print every candidate path instead of resolving
        #[arg(long, default_value_t = false)]
        candidates: bool,
    },
    /// Handle one request through the front controller and print the rendered page
    Run {
        /// Request path
        path: String,

        /// YAML application configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Application name, used when no configuration file is given
        #[arg(short, long, default_value = "App")]
        app: String,

        /// Show routing failure details on the not-found page
        #[arg(long, default_value_t = false)]
        debug: bool,
    },
}

fn parse_binding(value: &str) -> Result<NamespaceBinding, String> {
    match value.split_once('=') {
        Some((prefix, path)) if !prefix.is_empty() => Ok(NamespaceBinding::new(prefix, path)),
        _ => Err(format!("expected PREFIX=PATH, got `{value}`")),
    }
}

/// Parse the process arguments and run the selected command.
///
/// # Errors
///
/// Returns an error if the command fails; see [`execute`].
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    execute(&cli, &mut stdout.lock())
}

/// Run a parsed command, writing its output to `out`.
///
/// # Errors
///
/// Returns an error when an input file cannot be loaded, a name does not resolve, or the
/// front controller reports a failure it could not recover from.
pub fn execute(cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Route {
            path,
            app,
            manifest,
            default_controller,
        } => {
            let table: Arc<CapabilityTable> = Arc::new(load_manifest(manifest)?);
            let router = Router::new(
                default_controller.clone(),
                Arc::<CapabilityTable>::clone(&table),
                table,
            );
            let result = router.route(path, &crate::router::capitalize_first(app));
            writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
            Ok(())
        }
        Commands::Resolve {
            name,
            root,
            namespaces,
            namespace_manifest,
            extension,
            search_paths,
            candidates,
        } => {
            let fs: Arc<dyn FileSystem> = Arc::new(DiskFileSystem::new(search_paths.clone()));
            let mut resolver = ModuleResolver::new(root.as_deref(), fs).with_extension(extension);
            resolver.add_namespaces(namespaces.iter().cloned());
            if let Some(manifest) = namespace_manifest {
                resolver.import_namespace_manifest(manifest)?;
            }

            if *candidates {
                for candidate in resolver.candidates(name) {
                    writeln!(out, "{}", candidate.display())?;
                }
                return Ok(());
            }
            let path = resolver.try_resolve(name)?;
            writeln!(out, "{}", path.display())?;
            Ok(())
        }
        Commands::Run {
            path,
            config,
            app,
            debug,
        } => {
            let config = match config {
                Some(file) => AppConfig::load(file)?,
                None => AppConfig::new(app.clone()),
            }
            .apply_env();
            let config = if *debug { config.with_debug(true) } else { config };

            let app = App::new(config, ControllerRegistry::new())
                .context("failed to build the application")?;
            let page = app.handle(path)?;
            writeln!(out, "Status: {}", page.status)?;
            writeln!(out, "Content-Type: {}", page.content_type)?;
            writeln!(out)?;
            writeln!(out, "{}", page.body)?;
            Ok(())
        }
    }
}
