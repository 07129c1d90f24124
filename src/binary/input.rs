use std::ops::Range;

use byteorder::{BigEndian, ReadBytesExt};

use crate::{
    error::{Error, Result},
    Tag,
};

/// Turn a signed length prefix into a byte count, rejecting negative sizes
/// and sizes the remaining input could never hold.
pub(crate) fn try_size(size: i32, multiplier: usize) -> Result<usize> {
    let size: usize = size
        .try_into()
        .map_err(|_| Error::invalid_length(format!("negative length: {}", size)))?;

    size.checked_mul(multiplier)
        .ok_or_else(|| Error::invalid_length(format!("length too large: {}", size)))
}

/// Bounds-checked cursor over the input. Every read either succeeds entirely
/// or fails with a truncated input error, leaving no partial state behind
/// for the caller to worry about.
pub(crate) struct Slice<'de> {
    data: &'de [u8],
    consumed: usize,
}

impl<'de> Slice<'de> {
    pub fn new(data: &'de [u8]) -> Self {
        Self { data, consumed: 0 }
    }

    /// Bytes read so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn remaining(&self) -> usize {
        self.data.len()
    }

    fn consume(&mut self, r: Range<usize>) -> Result<&'de [u8]> {
        if r.end <= self.data.len() {
            let ret = &self.data[r.start..r.end];
            self.data = &self.data[r.end..];
            self.consumed += r.end;
            Ok(ret)
        } else {
            Err(Error::unexpected_eof())
        }
    }

    pub fn consume_byte(&mut self) -> Result<u8> {
        Ok(self.consume(0..1)?[0])
    }

    pub fn consume_tag(&mut self) -> Result<Tag> {
        let tag = self.consume_byte()?;
        Tag::try_from(tag).map_err(|_| Error::invalid_tag(tag))
    }

    pub fn consume_str(&mut self) -> Result<String> {
        let len = self.consume(0..2)?.read_u16::<BigEndian>()? as usize;
        let bs = self.consume(0..len)?;
        std::str::from_utf8(bs)
            .map(str::to_owned)
            .map_err(|_| Error::nonunicode(bs))
    }

    pub fn consume_bytes(&mut self, n: usize) -> Result<&'de [u8]> {
        self.consume(0..n)
    }

    pub fn consume_i8(&mut self) -> Result<i8> {
        let mut bs = self.consume(0..std::mem::size_of::<i8>())?;
        Ok(bs.read_i8()?)
    }

    pub fn consume_i16(&mut self) -> Result<i16> {
        let mut bs = self.consume(0..std::mem::size_of::<i16>())?;
        Ok(bs.read_i16::<BigEndian>()?)
    }

    pub fn consume_i32(&mut self) -> Result<i32> {
        let mut bs = self.consume(0..std::mem::size_of::<i32>())?;
        Ok(bs.read_i32::<BigEndian>()?)
    }

    pub fn consume_i64(&mut self) -> Result<i64> {
        let mut bs = self.consume(0..std::mem::size_of::<i64>())?;
        Ok(bs.read_i64::<BigEndian>()?)
    }

    pub fn consume_f32(&mut self) -> Result<f32> {
        let mut bs = self.consume(0..std::mem::size_of::<f32>())?;
        Ok(bs.read_f32::<BigEndian>()?)
    }

    pub fn consume_f64(&mut self) -> Result<f64> {
        let mut bs = self.consume(0..std::mem::size_of::<f64>())?;
        Ok(bs.read_f64::<BigEndian>()?)
    }
}
