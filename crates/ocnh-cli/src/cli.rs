use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "OCNH - Extract backbone O-C-N-H torsion angles from PDB coordinate files, one alternate conformation at a time.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used by `batch`.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract O-C-N-H torsions for one chain of one structure file.
    Extract(ExtractArgs),
    /// Extract the same chain from many structure files, writing one table per file.
    Batch(BatchArgs),
}

/// Arguments for the `extract` subcommand.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Path to the input PDB file.
    #[arg(value_name = "STRUCTURE_FILE")]
    pub input: PathBuf,

    /// Identifier of the chain to analyze.
    #[arg(value_name = "CHAIN_ID")]
    pub chain: char,

    /// Alternate conformation code to follow (e.g. 'A'). Leave empty for atoms without a code.
    #[arg(short, long, value_name = "CODE")]
    pub altloc: Option<String>,

    /// Output table path. Defaults to '<input>_<chain>_OCNH_dihedral[_altloc_<code>].csv'.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Arguments for the `batch` subcommand.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Input PDB files.
    #[arg(required = true, value_name = "FILES")]
    pub inputs: Vec<PathBuf>,

    /// Identifier of the chain to analyze in every file.
    #[arg(long, value_name = "CHAIN_ID")]
    pub chain: char,

    /// Alternate conformation code to follow in every file.
    #[arg(short, long, value_name = "CODE")]
    pub altloc: Option<String>,

    /// Directory for the output tables. Defaults to each input's own directory.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Write one summary row per input file to this CSV path.
    #[arg(long, value_name = "PATH")]
    pub summary: Option<PathBuf>,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Extraction and output settings shared by every subcommand.
#[derive(Args, Debug, Default, Clone)]
pub struct SettingsArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the maximum C-N distance (Angstroms) that counts as a peptide bond.
    #[arg(long, value_name = "FLOAT")]
    pub bond_threshold: Option<f64>,

    /// Override the number of decimal places written for angles.
    #[arg(long, value_name = "INT")]
    pub precision: Option<usize>,

    /// Override the output column delimiter.
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Prefix every row with the chain identifier.
    #[arg(long)]
    pub chain_column: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S output.precision=5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", action = clap::ArgAction::Append)]
    pub set_values: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_extract_with_altloc_and_overrides() {
        let cli = Cli::try_parse_from([
            "ocnh", "-vv", "extract", "1abc.pdb", "A", "-a", "B", "--precision", "5", "-S",
            "output.delimiter=;",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(args.input, PathBuf::from("1abc.pdb"));
        assert_eq!(args.chain, 'A');
        assert_eq!(args.altloc.as_deref(), Some("B"));
        assert_eq!(args.settings.precision, Some(5));
        assert_eq!(args.settings.set_values, vec!["output.delimiter=;"]);
    }

    #[test]
    fn parses_batch_with_many_inputs() {
        let cli = Cli::try_parse_from([
            "ocnh", "batch", "a.pdb", "b.pdb", "--chain", "H", "--output-dir", "out", "-j", "2",
        ])
        .unwrap();
        assert_eq!(cli.threads, Some(2));
        let Commands::Batch(args) = cli.command else {
            panic!("expected batch");
        };
        assert_eq!(args.inputs.len(), 2);
        assert_eq!(args.chain, 'H');
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn set_values_do_not_consume_positionals() {
        let cli = Cli::try_parse_from([
            "ocnh", "extract", "-S", "output.precision=4", "-S", "output.delimiter=;", "x.pdb",
            "A",
        ])
        .unwrap();
        let Commands::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(args.input, PathBuf::from("x.pdb"));
        assert_eq!(args.chain, 'A');
        assert_eq!(
            args.settings.set_values,
            vec!["output.precision=4", "output.delimiter=;"]
        );
    }

    #[test]
    fn multi_character_chain_is_rejected() {
        assert!(Cli::try_parse_from(["ocnh", "extract", "1abc.pdb", "AB"]).is_err());
    }
}
