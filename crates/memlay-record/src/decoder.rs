//! Streaming record decoder.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use zerocopy::FromBytes;

use crate::{Error, FieldRecord, RawFieldRecord, Result, RECORD_SIZE};

/// Lazy, forward-only decoder over a record stream.
///
/// Each call to [`Iterator::next`] consumes exactly one record from the
/// underlying reader. The sequence ends cleanly when the reader is exhausted
/// on a record boundary. A partial trailing record is reported as
/// [`Error::TruncatedRecord`]; after any error the decoder yields nothing
/// more.
#[derive(Debug)]
pub struct RecordDecoder<R> {
    reader: R,
    records_read: usize,
    finished: bool,
}

impl RecordDecoder<BufReader<File>> {
    /// Open a layout dump on disk.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> RecordDecoder<R> {
    /// Create a decoder reading from `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            records_read: 0,
            finished: false,
        }
    }

    /// Number of records decoded so far.
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Give back the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Fill `buffer` as far as the reader allows, returning the byte count.
    fn fill(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buffer.len() {
            match self.reader.read(&mut buffer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }

    fn read_record(&mut self) -> Result<Option<FieldRecord>> {
        let mut buffer = [0u8; RECORD_SIZE];
        let read = self.fill(&mut buffer)?;

        if read == 0 {
            return Ok(None);
        }
        if read < RECORD_SIZE {
            return Err(Error::TruncatedRecord {
                index: self.records_read,
                read,
                expected: RECORD_SIZE,
            });
        }

        let raw = RawFieldRecord::read_from_bytes(&buffer[..]).map_err(|_| {
            Error::TruncatedRecord {
                index: self.records_read,
                read,
                expected: RECORD_SIZE,
            }
        })?;
        self.records_read += 1;

        Ok(Some(FieldRecord::from(&raw)))
    }
}

impl<R: Read> Iterator for RecordDecoder<R> {
    type Item = Result<FieldRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for RecordDecoder<R> {}
