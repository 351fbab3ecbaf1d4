use std::io::{self, Cursor, ErrorKind, Read, Seek, SeekFrom};

use binrw::{BinRead, Endian};

use crate::{error::ExtractError, structs::Section};

/// Fills `buf` as far as the source allows, returns how many bytes were read.
fn read_up_to<R: Read>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Reads the fixed size records of a bank from a seekable byte source.
///
/// Every multi byte integer is read with the configured endianness, so byte swapping
/// happens exactly once, when a record is read.
pub struct BnkReader<R> {
    inner: R,
    endian: Endian,
}

impl<R: Read + Seek> BnkReader<R> {
    pub fn new(inner: R, endian: Endian) -> Self {
        Self { inner, endian }
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    pub fn read<T>(&mut self) -> Result<T, ExtractError>
    where
        T: for<'a> BinRead<Args<'a> = ()>,
    {
        self.read_args(())
    }

    pub fn read_args<T, A>(&mut self, args: A) -> Result<T, ExtractError>
    where
        T: for<'a> BinRead<Args<'a> = A>,
    {
        Ok(T::read_options(&mut self.inner, self.endian, args)?)
    }

    /// Reads the next section header.
    ///
    /// `Ok(None)` means the source ended cleanly before the header, a header cut off
    /// part way is an error.
    pub fn read_section(&mut self) -> Result<Option<Section>, ExtractError> {
        let mut buf = [0; 8];
        match read_up_to(&mut self.inner, &mut buf)? {
            0 => Ok(None),
            8 => Ok(Some(Section::read_options(
                &mut Cursor::new(&buf),
                self.endian,
                (),
            )?)),
            read => Err(ExtractError::TruncatedSection { read }),
        }
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, ExtractError> {
        let mut data = vec![0; len];
        self.inner.read_exact(&mut data)?;
        Ok(data)
    }

    pub fn position(&mut self) -> Result<u64, ExtractError> {
        Ok(self.inner.stream_position()?)
    }

    pub fn seek_to(&mut self, pos: u64) -> Result<(), ExtractError> {
        self.inner.seek(SeekFrom::Start(pos))?;
        Ok(())
    }

    pub fn skip(&mut self, len: u32) -> Result<(), ExtractError> {
        self.inner.seek(SeekFrom::Current(len.into()))?;
        Ok(())
    }
}
