use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use ncbi_gene_client::ResponseFormat;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "ncbi-gene-cli",
    about = "Command-line interface for NCBI Entrez gene and protein metadata",
    long_about = "Fetch gene and protein information from the NCBI Entrez E-utilities"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// API key for NCBI E-utilities (increases rate limit)
    #[arg(long, env = "NCBI_API_KEY", global = true)]
    api_key: Option<String>,

    /// Email for NCBI requests (recommended)
    #[arg(long, env = "NCBI_EMAIL", global = true)]
    email: Option<String>,

    /// Tool name for NCBI requests
    #[arg(long, env = "NCBI_TOOL", default_value = "ncbi-gene-cli", global = true)]
    tool: String,

    /// Response format requested from NCBI
    #[arg(long, value_enum, default_value = "json", global = true)]
    format: FormatArg,

    /// HTTP request timeout in seconds (default: 30)
    #[arg(long, global = true)]
    timeout: Option<u64>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum FormatArg {
    Json,
    Xml,
}

impl From<FormatArg> for ResponseFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => ResponseFormat::Json,
            FormatArg::Xml => ResponseFormat::Xml,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for genes
    #[command(name = "search-genes")]
    SearchGenes(commands::search::SearchGenes),
    /// Fetch gene information by ID
    #[command(name = "gene-info")]
    GeneInfo(commands::gene::GeneInfo),
    /// Fetch protein information by ID
    #[command(name = "protein-info")]
    ProteinInfo(commands::protein::ProteinInfo),
    /// Search genes by symbol
    #[command(name = "search-symbol")]
    SearchSymbol(commands::symbol::SearchSymbol),
    /// Show the raw summary fields of a gene or protein record
    Summary(commands::summary::Summary),
    /// Run demo with BRCA1 gene
    Demo(commands::demo::Demo),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with indicatif layer for progress spinners
    let filter = if cli.verbose { "debug" } else { "info" };

    let indicatif_layer = IndicatifLayer::new();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(indicatif_layer.get_stderr_writer()),
        )
        .with(indicatif_layer)
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let client = commands::create_client(&commands::ClientOptions {
        api_key: cli.api_key.as_deref(),
        email: cli.email.as_deref(),
        tool: &cli.tool,
        format: cli.format.into(),
        timeout_seconds: cli.timeout,
    })?;

    match &cli.command {
        Commands::SearchGenes(cmd) => cmd.execute(&client).await,
        Commands::GeneInfo(cmd) => cmd.execute(&client).await,
        Commands::ProteinInfo(cmd) => cmd.execute(&client).await,
        Commands::SearchSymbol(cmd) => cmd.execute(&client).await,
        Commands::Summary(cmd) => cmd.execute(&client).await,
        Commands::Demo(cmd) => cmd.execute(&client).await,
    }
}
