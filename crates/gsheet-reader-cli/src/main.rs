//! gsheet-reader CLI - turn a Google Sheet into JSON records

mod table;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use gsheet_reader::prelude::*;
use gsheet_reader::{PipelineState, DEFAULT_BASE_URL, HIGHLIGHT_RED};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::table::render_table;

#[derive(Parser)]
#[command(name = "gsheet-reader")]
#[command(
    author,
    version,
    about = "Read a Google Sheet into validated, typed JSON records"
)]
struct Cli {
    /// Increase log verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a spreadsheet from the Sheets API and print its records
    Fetch {
        /// Spreadsheet id, as found in the sheet's URL
        #[arg(long, env = "SPREADSHEET_ID")]
        spreadsheet_id: String,

        #[command(flatten)]
        auth: AuthArgs,

        /// API endpoint
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// Request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout: u64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Convert a saved `spreadsheets.get` response (with grid data)
    Convert {
        /// Saved API response (JSON)
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the effective record shape as JSON
    Shape {
        /// Record shape file (JSON); default: Name, Number, IsHighlighted
        #[arg(long)]
        shape: Option<PathBuf>,
    },
}

#[derive(Args)]
struct AuthArgs {
    /// API key (public sheets only)
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// OAuth 2.0 access token
    #[arg(long, env = "GOOGLE_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// File holding an OAuth 2.0 access token (takes precedence)
    #[arg(long)]
    token_file: Option<PathBuf>,

    /// Service-account key file (JSON), exchanged for a read-only token
    #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS")]
    key_file: Option<PathBuf>,
}

#[derive(Args)]
struct OutputArgs {
    /// Record shape file (JSON); default: Name, Number, IsHighlighted
    #[arg(long)]
    shape: Option<PathBuf>,

    /// Output JSON file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the sheet as a table on stderr once its header checks out
    #[arg(long)]
    print_table: bool,

    /// Background red channel that marks a highlighted row
    #[arg(long, default_value_t = HIGHLIGHT_RED)]
    highlight_red: f32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Fetch {
            spreadsheet_id,
            auth,
            base_url,
            timeout,
            output,
        } => {
            let shape = load_shape(output.shape.as_deref())?;
            let options = SheetsOptions::new(spreadsheet_id, credentials(&auth)?)
                .context("Invalid spreadsheet id")?
                .with_base_url(base_url)
                .with_timeout(Duration::from_secs(timeout));
            let client = SheetsClient::new(options).context("Failed to build HTTP client")?;
            let grid = client
                .fetch_grid()
                .context("Failed to fetch spreadsheet")?;
            convert(grid, &shape, &output)
        }
        Commands::Convert { input, output } => {
            let shape = load_shape(output.shape.as_deref())?;
            let grid = load_grid(&input)
                .with_context(|| format!("Failed to read '{}'", input.display()))?;
            convert(grid, &shape, &output)
        }
        Commands::Shape { shape } => {
            let shape = load_shape(shape.as_deref())?;
            let json = serde_json::to_string_pretty(&shape)?;
            println!("{}", json);
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn credentials(auth: &AuthArgs) -> Result<Credentials> {
    if let Some(path) = &auth.token_file {
        let token = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read token file '{}'", path.display()))?;
        return Ok(Credentials::AccessToken(token.trim().to_string()));
    }
    if let Some(token) = &auth.access_token {
        return Ok(Credentials::AccessToken(token.clone()));
    }
    if let Some(path) = &auth.key_file {
        return Ok(Credentials::ServiceAccountKey(path.clone()));
    }
    if let Some(key) = &auth.api_key {
        return Ok(Credentials::ApiKey(key.clone()));
    }
    bail!("No credentials: pass --api-key, --access-token, --token-file or --key-file")
}

fn load_shape(path: Option<&Path>) -> Result<RecordShape> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read shape '{}'", path.display()))?;
            tracing::debug!("Loaded record shape from {}", path.display());
            RecordShape::from_json(&json)
                .with_context(|| format!("Invalid shape '{}'", path.display()))
        }
        None => Ok(RecordShape::default()),
    }
}

fn convert(grid: Grid, shape: &RecordShape, args: &OutputArgs) -> Result<()> {
    let table = args.print_table.then(|| render_table(&grid.text_rows()));
    let pipeline = Pipeline::new(shape).with_rule(HighlightRule::with_red(args.highlight_red));
    let records = run_validated(&pipeline, grid, || {
        if let Some(table) = &table {
            eprint!("{}", table);
        }
    })
    .context("Failed to convert spreadsheet rows")?;
    let json = serde_json::to_string_pretty(&records)?;

    if let Some(output_path) = &args.output {
        std::fs::write(output_path, format!("{}\n", json))
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        eprintln!(
            "Wrote {} records to '{}'",
            records.len(),
            output_path.display()
        );
    } else {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", json).context("Failed to write to stdout")?;
    }

    Ok(())
}

/// Run the pipeline, calling `on_valid` once the header has been checked
fn run_validated<F: FnOnce()>(
    pipeline: &Pipeline,
    grid: Grid,
    on_valid: F,
) -> gsheet_reader::Result<Vec<Record>> {
    match pipeline.step(PipelineState::Fetched(grid)) {
        PipelineState::Failed(err) => Err(err),
        validated => {
            on_valid();
            pipeline.finish(validated)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn auth(api_key: Option<&str>, access_token: Option<&str>) -> AuthArgs {
        AuthArgs {
            api_key: api_key.map(String::from),
            access_token: access_token.map(String::from),
            token_file: None,
            key_file: None,
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_access_token_wins_over_api_key() {
        let creds = credentials(&auth(Some("key"), Some("token"))).unwrap();
        assert_eq!(creds, Credentials::AccessToken("token".into()));
    }

    #[test]
    fn test_api_key_alone() {
        let creds = credentials(&auth(Some("key"), None)).unwrap();
        assert_eq!(creds, Credentials::ApiKey("key".into()));
    }

    #[test]
    fn test_key_file_wins_over_api_key() {
        let mut args = auth(Some("key"), None);
        args.key_file = Some(PathBuf::from("key.json"));
        let creds = credentials(&args).unwrap();
        assert_eq!(creds, Credentials::ServiceAccountKey(PathBuf::from("key.json")));
    }

    #[test]
    fn test_access_token_wins_over_key_file() {
        let mut args = auth(None, Some("token"));
        args.key_file = Some(PathBuf::from("key.json"));
        let creds = credentials(&args).unwrap();
        assert_eq!(creds, Credentials::AccessToken("token".into()));
    }

    #[test]
    fn test_parse_key_file_flag() {
        let cli = Cli::try_parse_from([
            "gsheet-reader",
            "fetch",
            "--spreadsheet-id",
            "abc",
            "--key-file",
            "key.json",
        ])
        .unwrap();

        match cli.command {
            Commands::Fetch { auth, .. } => {
                assert_eq!(auth.key_file, Some(PathBuf::from("key.json")));
            }
            _ => panic!("expected fetch"),
        }
    }

    fn grid(rows: &[&[&str]]) -> Grid {
        Grid::from_text(rows.iter().map(|r| r.iter().map(|c| c.to_string()).collect::<Vec<_>>()))
    }

    #[test]
    fn test_table_hook_runs_after_valid_header() {
        let shape = RecordShape::default();
        let pipeline = Pipeline::new(&shape);
        let mut called = false;
        let records = run_validated(&pipeline, grid(&[&["Name", "Number"], &["Alice", "1"]]), || {
            called = true
        })
        .unwrap();

        assert!(called);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_table_hook_skipped_on_header_mismatch() {
        let shape = RecordShape::default();
        let pipeline = Pipeline::new(&shape);
        let mut called = false;
        let result = run_validated(&pipeline, grid(&[&["Name", "Num"], &["Alice", "1"]]), || {
            called = true
        });

        assert!(matches!(result, Err(Error::SchemaMismatch { .. })));
        assert!(!called);
    }

    #[test]
    fn test_no_credentials() {
        assert!(credentials(&auth(None, None)).is_err());
    }

    #[test]
    fn test_default_shape() {
        assert_eq!(load_shape(None).unwrap(), RecordShape::default());
    }

    #[test]
    fn test_parse_convert_command() {
        let cli = Cli::try_parse_from([
            "gsheet-reader",
            "-vv",
            "convert",
            "sheet.json",
            "--print-table",
            "--highlight-red",
            "0.5",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Convert { input, output } => {
                assert_eq!(input, PathBuf::from("sheet.json"));
                assert!(output.print_table);
                assert_eq!(output.highlight_red, 0.5);
                assert!(output.output.is_none());
            }
            _ => panic!("expected convert"),
        }
    }
}
