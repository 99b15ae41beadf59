use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use inputwire_cli::{DEFAULT_LOG_LEVEL, EvaluateConfig, RequestConfig, init_logging, run_evaluate, run_request};

#[derive(Parser)]
#[command(name = "inputwire")]
#[command(version, about = "Evaluate GraphQL input templates against variable bindings")]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the evaluated template
    Evaluate(TemplateArgs),
    /// Print the JSON body of a request for an operation
    Request {
        #[arg(short = 'q', long)]
        query: PathBuf,
        #[arg(long)]
        operation_name: Option<String>,
        #[command(flatten)]
        template: TemplateArgs,
    },
}

#[derive(Args)]
struct TemplateArgs {
    #[arg(short = 't', long)]
    template: PathBuf,
    #[arg(short = 'b', long)]
    bindings: Option<PathBuf>,
    /// Fail on malformed template nodes instead of skipping them
    #[arg(long, default_value_t = false)]
    strict: bool,
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

impl From<TemplateArgs> for EvaluateConfig {
    fn from(args: TemplateArgs) -> Self {
        let mut config = EvaluateConfig::new(args.template).with_strict(args.strict);
        config.bindings = args.bindings;
        config.pretty = args.pretty;
        config
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    let output = match cli.command {
        Command::Evaluate(args) => run_evaluate(&args.into())?,
        Command::Request {
            query,
            operation_name,
            template,
        } => run_request(&RequestConfig {
            query,
            operation_name,
            evaluate: template.into(),
        })?,
    };
    println!("{output}");
    Ok(())
}
