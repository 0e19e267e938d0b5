//! Writes an account's transaction log to disk
//! The file is only held open for the duration of a scoped block
use std::{
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    path::Path,
};

use log::*;

use crate::{account::Account, errors::PassbookError};

/// How the passbook file is opened
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum OpenMode {
    /// Create the file or truncate an existing one
    Write,
    /// Create the file or add to the end of an existing one
    Append,
}

impl OpenMode {
    fn options(self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            OpenMode::Write => options.write(true).create(true).truncate(true),
            OpenMode::Append => options.append(true).create(true),
        };
        options
    }
}

/// Opens `path` with `mode`, hands the open file to `body` and closes it on every exit path.
/// A failing `body` is reported as `PassbookError::Body`; whatever it wrote before failing stays in the file.
pub fn with_passbook<P, T, F>(path: P, mode: OpenMode, body: F) -> Result<T, PassbookError>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> anyhow::Result<T>,
{
    let path = path.as_ref();
    let file = mode.options().open(path).map_err(|source| PassbookError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Passbook {} opened ({:?})", path.display(), mode);

    let mut writer = BufWriter::new(file);
    let outcome = body(&mut writer);
    let flushed = writer.flush();
    drop(writer);

    match outcome {
        Ok(value) => {
            flushed.map_err(|source| PassbookError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            info!("Passbook {} closed", path.display());
            Ok(value)
        }
        Err(err) => {
            error!("Something went wrong! Passbook {} closed. {:#}", path.display(), err);
            if let Err(flush_err) = flushed {
                error!(
                    "Partial output to passbook {} was lost. {}",
                    path.display(),
                    flush_err
                );
            }
            Err(PassbookError::Body(err))
        }
    }
}

/// Writes one line per transaction, oldest first, replacing any previous passbook at `path`.
/// Returns the number of lines written
pub fn write_passbook<P: AsRef<Path>>(account: &Account, path: P) -> Result<usize, PassbookError> {
    with_passbook(path, OpenMode::Write, |passbook| {
        let mut lines = 0;
        for record in account {
            writeln!(passbook, "{}", record)?;
            lines += 1;
        }
        Ok(lines)
    })
}

/// Exports the transaction log as a CSV statement with a header row
pub fn write_statement_csv<P: AsRef<Path>>(account: &Account, path: P) -> Result<(), PassbookError> {
    let path = path.as_ref();
    let csv_error = |source: csv::Error| PassbookError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut csv_writer = csv::Writer::from_path(path).map_err(csv_error)?;
    for record in account {
        csv_writer
            .serialize(record.to_statement_row())
            .map_err(csv_error)?;
    }
    csv_writer.flush().map_err(|source| PassbookError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        "Statement for account {} written to {}",
        account.number(),
        path.display()
    );
    Ok(())
}
