use std::path::PathBuf;

use clap::{crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches, Command};

use crate::app::{error::RuntimeError, export_type::ExportType};

/// Default container to read when no path is given
pub const DEFAULT_PATH: &str = ".DS_Store";

// CLI Arg Names
pub const OPTION_PATH: &str = "path";
pub const OPTION_EXPORT_TYPE: &str = "format";
pub const OPTION_EXPORT_PATH: &str = "export-path";
pub const OPTION_QUIET: &str = "quiet";

// Other CLI Text
pub const SUPPORTED_EXPORT_TYPES: &str = "txt, json";
pub const ABOUT: &str = concat!(
    "The `dsstore-exporter` binary decodes the metadata Finder stores in .DS_Store files\n",
    "and writes it as human-readable text or newline-delimited JSON."
);

#[derive(Debug, PartialEq, Eq)]
pub struct Options {
    /// Path to the container we want to decode
    pub store_path: PathBuf,
    /// Whether `store_path` was filled in because no path was given
    pub defaulted_path: bool,
    /// The format of the output
    pub export_type: ExportType,
    /// Where the output goes, stdout if [`None`]
    pub export_path: Option<PathBuf>,
    /// Only log errors
    pub quiet: bool,
}

impl Options {
    pub fn from_args(args: &ArgMatches) -> Result<Self, RuntimeError> {
        let user_path: Option<&String> = args.get_one(OPTION_PATH);
        let export_type: Option<&String> = args.get_one(OPTION_EXPORT_TYPE);
        let export_path: Option<&String> = args.get_one(OPTION_EXPORT_PATH);
        let quiet = args.get_flag(OPTION_QUIET);

        // Ensure the export type is one we know
        let export_type = match export_type {
            Some(export_type) => ExportType::from_cli(export_type).ok_or_else(|| {
                RuntimeError::InvalidOptions(format!(
                    "{export_type} is not a valid export type! Must be one of <{SUPPORTED_EXPORT_TYPES}>"
                ))
            })?,
            None => ExportType::TXT,
        };

        if matches!(export_path, Some(path) if path.is_empty()) {
            return Err(RuntimeError::InvalidOptions(format!(
                "--{OPTION_EXPORT_PATH} must not be empty"
            )));
        }

        let store_path = user_path.map_or_else(|| PathBuf::from(DEFAULT_PATH), PathBuf::from);

        Ok(Options {
            store_path,
            defaulted_path: user_path.is_none(),
            export_type,
            export_path: export_path.map(PathBuf::from),
            quiet,
        })
    }
}

/// Build the command line argument parser
pub fn get_command() -> Command {
    Command::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .long_about(ABOUT)
        .arg(
            Arg::new(OPTION_PATH)
                .help(format!(
                    "Path to the .DS_Store file to decode\nIf omitted, `{DEFAULT_PATH}` in the current directory is used\n"
                ))
                .value_name("PATH")
                .index(1),
        )
        .arg(
            Arg::new(OPTION_EXPORT_TYPE)
                .short('f')
                .long(OPTION_EXPORT_TYPE)
                .help("Specify a single file format to export the decoded records\nIf omitted, txt is used\n")
                .display_order(0)
                .value_name(SUPPORTED_EXPORT_TYPES),
        )
        .arg(
            Arg::new(OPTION_EXPORT_PATH)
                .short('o')
                .long(OPTION_EXPORT_PATH)
                .help("Specify a file to write the output to\nIf omitted, the output is written to stdout\n")
                .display_order(1)
                .value_name("FILE"),
        )
        .arg(
            Arg::new(OPTION_QUIET)
                .short('q')
                .long(OPTION_QUIET)
                .help("Only log errors, hiding warnings about unusual values in the file\n")
                .action(ArgAction::SetTrue)
                .display_order(2),
        )
}
