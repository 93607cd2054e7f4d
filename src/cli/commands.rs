use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Checklist extractor for AVI inspection recipes
#[derive(Parser, Debug)]
#[command(
    name = "avicheck",
    about = "Extracts review checklists from AVI inspection recipe trees",
    version,
    long_about = "avicheck walks an inspection recipe directory, remaps its zones into \
                  canonical bump-map slots, and emits the flat checklist namespace the \
                  document assembler consumes."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Increase verbosity")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Extract the checklist namespace from a recipe directory",
        long_about = "Walks the recipe tree, classifies its profiles, remaps zones into \
                      bump-map slots, and prints the extracted namespaces.\n\n\
                      Examples:\n  \
                      avicheck extract /recipes/EQP1-GRP2-S-E-V1\n  \
                      avicheck extract /recipes/EQP1-GRP2-S-E-V1 --format json -o report.json"
    )]
    Extract(ExtractArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ExtractArgs {
    #[arg(value_name = "PATH", help = "Path to the recipe root directory")]
    pub recipe_path: PathBuf,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Disable the progress spinner")]
    pub no_progress: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
