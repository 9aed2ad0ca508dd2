use std::{
    fs::{self, File},
    io::{self, Write},
};

use dsstore::{
    fields::registry::FieldRegistry,
    util::bud1::parser::{decode, DsStore},
};

use crate::{
    app::{
        error::RuntimeError,
        export_type::ExportType,
        options::{Options, DEFAULT_PATH},
    },
    exporters::{exporter::Exporter, ndjson::NDJSON, txt::TXT},
};

/// Stores the application state and handles application lifecycle
pub struct Config {
    /// App configuration options
    pub options: Options,
    /// The decoded container
    pub store: DsStore,
    /// Describes each field when rendering records
    pub registry: FieldRegistry,
}

impl Config {
    /// Read and decode the container named by the options
    ///
    /// The file is read once; everything after this is done in memory.
    pub fn new(options: Options) -> Result<Config, RuntimeError> {
        if options.defaulted_path {
            eprintln!("File unspecified, defaulting to {DEFAULT_PATH} in the current directory...");
        }

        let bytes = fs::read(&options.store_path)
            .map_err(|err| RuntimeError::FileError(err, options.store_path.clone()))?;
        let store = decode(&bytes).map_err(RuntimeError::DecodeError)?;

        tracing::info!(
            path = %options.store_path.display(),
            records = store.records.len(),
            diagnostics = store.diagnostics.len(),
            "decoded container"
        );

        Ok(Config {
            options,
            store,
            registry: FieldRegistry::default(),
        })
    }

    /// Open the destination for the output, stdout unless an export path was given
    pub fn output(&self) -> Result<Box<dyn Write>, RuntimeError> {
        match &self.options.export_path {
            Some(path) => {
                let file =
                    File::create(path).map_err(|err| RuntimeError::FileError(err, path.clone()))?;
                Ok(Box::new(file))
            }
            None => Ok(Box::new(io::stdout().lock())),
        }
    }

    /// Write every record in the selected format
    pub fn start(&self) -> Result<(), RuntimeError> {
        match self.options.export_type {
            ExportType::TXT => TXT::new(self)?.iter_records(),
            ExportType::JSON => NDJSON::new(self)?.iter_records(),
        }
    }
}
