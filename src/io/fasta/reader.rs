/// Contains a reader for protein FASTA files.
// std imports
use std::fs::File;
use std::io::prelude::*;
use std::io::{BufReader, SeekFrom};
use std::path::Path;

// 3rd party imports
use anyhow::{bail, Result};
use fallible_iterator::FallibleIterator;

// internal imports
use crate::entities::protein::Protein;

/// Reader for protein FASTA files. Accessions are taken from the
/// header up to the first whitespace, with UniProt style
/// `db|accession|entry` headers reduced to the accession.
///
pub struct Reader {
    internal_reader: BufReader<File>,
    /// Header of the next entry, already consumed from the buffer
    pending_header: Option<String>,
}

impl Reader {
    /// Creates a new Reader
    ///
    /// # Arguments
    /// * `fasta_file_path` - Path to the FASTA file
    /// * `buffer_size` - Size of the read buffer
    ///
    pub fn new(fasta_file_path: &Path, buffer_size: usize) -> Result<Self> {
        let fasta_file: File = File::open(fasta_file_path)?;
        Ok(Self {
            internal_reader: BufReader::with_capacity(buffer_size, fasta_file),
            pending_header: None,
        })
    }

    /// Resets the reader to the beginning of the file
    ///
    pub fn reset(&mut self) -> Result<()> {
        self.internal_reader.seek(SeekFrom::Start(0))?;
        self.pending_header = None;
        Ok(())
    }

    /// Returns the number of entries in the file.
    /// This is much faster than iterating over all entries.
    /// Attention: Resets the reader to the beginning of the file.
    ///
    pub fn count_proteins(&mut self) -> Result<usize> {
        let mut count: usize = 0;
        let mut line = String::new();
        self.reset()?;
        while let Ok(num_bytes) = self.internal_reader.read_line(&mut line) {
            if num_bytes == 0 {
                break;
            }
            if line.starts_with('>') {
                count += 1;
            }
            line.clear();
        }
        self.reset()?;
        Ok(count)
    }

    /// Extracts the accession from a header line
    ///
    fn accession_from_header(header: &str) -> String {
        let identifier = header[1..]
            .split_ascii_whitespace()
            .next()
            .unwrap_or_default();
        let mut parts = identifier.split('|');
        match (parts.next(), parts.next()) {
            (Some(_), Some(accession)) => accession.to_string(),
            _ => identifier.to_string(),
        }
    }
}

impl FallibleIterator for Reader {
    type Item = Protein;
    type Error = anyhow::Error;

    fn next(&mut self) -> Result<Option<Self::Item>> {
        let mut header: Option<String> = self.pending_header.take();
        let mut sequence = String::new();
        loop {
            let mut line = String::new();
            let num_bytes = self.internal_reader.read_line(&mut line)?;
            if num_bytes == 0 {
                return match header {
                    Some(header) => {
                        if sequence.is_empty() {
                            bail!("entry `{}` has no sequence", header);
                        }
                        Ok(Some(Protein::new(
                            Self::accession_from_header(&header),
                            sequence,
                        )))
                    }
                    None => Ok(None),
                };
            }
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            if let Some(stripped) = line.strip_prefix('>') {
                match header {
                    Some(header) => {
                        if sequence.is_empty() {
                            bail!("entry `{}` has no sequence", header);
                        }
                        self.pending_header = Some(line.to_string());
                        return Ok(Some(Protein::new(
                            Self::accession_from_header(&header),
                            sequence,
                        )));
                    }
                    None => {
                        if stripped.is_empty() {
                            bail!("entry with empty header");
                        }
                        header = Some(line.to_string());
                    }
                }
            } else {
                if header.is_none() {
                    bail!("sequence data before the first header");
                }
                sequence.push_str(&line.to_ascii_uppercase());
            }
        }
    }
}
