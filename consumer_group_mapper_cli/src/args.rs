use crate::startup::RunSettings;
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

const REQUIRED_HEADING: &str = "Required arguments";
pub const MISSING_CONFIG_FILE_MESSAGE: &str = "No config_file provided - not cool.";

/// Maps consumer groups to the topics they consume and back, writing both
/// directions as JSON files.
#[derive(Parser, Debug, Clone)]
#[command(name = "consumer-group-mapper")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Consumer group to query (default is all groups)
    #[arg(short = 'g', long = "group")]
    pub group: Option<String>,

    /// Configuration file
    #[arg(short = 'f', long = "config_file", help_heading = REQUIRED_HEADING)]
    pub config_file: Option<PathBuf>,

    /// File to write group/topic info to; `<stem>-topics.<ext>` and
    /// `<stem>-groups.<ext>` are derived from it
    #[arg(short = 'o', long = "output_file", help_heading = REQUIRED_HEADING)]
    pub output_file: PathBuf,
}

/// Why the process stops before doing any work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarlyExit {
    pub message: String,
    pub code: i32,
    pub to_stderr: bool,
}

impl EarlyExit {
    pub fn print(&self) {
        if self.to_stderr {
            eprintln!("{}", self.message);
        } else {
            println!("{}", self.message);
        }
    }
}

impl From<clap::Error> for EarlyExit {
    fn from(value: clap::Error) -> Self {
        Self {
            message: value.render().to_string(),
            code: value.exit_code(),
            to_stderr: value.use_stderr(),
        }
    }
}

/// Turns the raw command line (program name included) into run settings.
///
/// No arguments at all prints the help to stderr with exit status 1, as does a
/// missing `--config_file` with its own message.
pub fn parse_run_settings<I, T>(args: I) -> Result<RunSettings, EarlyExit>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = args.into_iter().map(Into::into).collect::<Vec<OsString>>();

    if args.len() <= 1 {
        return Err(EarlyExit {
            message: Args::command().render_help().to_string(),
            code: 1,
            to_stderr: true,
        });
    }

    let args = Args::try_parse_from(args)?;

    let Some(config_file) = args.config_file else {
        return Err(EarlyExit {
            message: MISSING_CONFIG_FILE_MESSAGE.to_owned(),
            code: 1,
            to_stderr: true,
        });
    };

    Ok(RunSettings {
        config_file,
        output_file: args.output_file,
        group: args.group,
    })
}
