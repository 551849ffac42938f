//! Weight tables and their binary encoding.
//!
//! A single table is encoded as a little-endian `u32` entry count followed by
//! that many little-endian IEEE-754 `f32` values. A network file is a `u32`
//! table count followed by its tables (see [`crate::n_tuple`]).

use std::{
    io::{self, Read, Write},
    ops::{Index, IndexMut},
};

use crate::WeightsIoError;

const READ_CHUNK: usize = 1024;

/// A dense table of weights indexed by a pattern's feature index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeightTable {
    weights: Vec<f32>,
}

impl From<Vec<f32>> for WeightTable {
    fn from(weights: Vec<f32>) -> Self {
        Self { weights }
    }
}

impl WeightTable {
    #[must_use]
    pub fn zeroed(len: usize) -> Self {
        Self {
            weights: vec![0.0; len],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.weights
    }

    /// Decodes one table.
    ///
    /// ```
    /// use fib2048_evaluator::weight_table::WeightTable;
    ///
    /// let bytes = [2, 0, 0, 0, 0, 0, 0x80, 0x3f, 0, 0, 0, 0xc0];
    /// let table = WeightTable::read_from(&mut &bytes[..]).unwrap();
    /// assert_eq!(table.as_slice(), &[1.0, -2.0]);
    /// ```
    pub fn read_from<R>(reader: &mut R) -> Result<Self, WeightsIoError>
    where
        R: Read + ?Sized,
    {
        let len = read_u32(reader)? as usize;
        let mut weights = Vec::new();
        let mut buf = [0; READ_CHUNK * 4];
        let mut remaining = len;
        while remaining > 0 {
            let n = remaining.min(READ_CHUNK);
            let bytes = &mut buf[..n * 4];
            reader.read_exact(bytes)?;
            weights.extend(
                bytes
                    .chunks_exact(4)
                    .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]])),
            );
            remaining -= n;
        }
        Ok(Self { weights })
    }

    pub fn write_to<W>(&self, writer: &mut W) -> Result<(), WeightsIoError>
    where
        W: Write + ?Sized,
    {
        write_u32(writer, self.weights.len())?;
        for weight in &self.weights {
            writer.write_all(&weight.to_le_bytes())?;
        }
        Ok(())
    }
}

impl Index<usize> for WeightTable {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.weights[index]
    }
}

impl IndexMut<usize> for WeightTable {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.weights[index]
    }
}

pub(crate) fn read_u32<R>(reader: &mut R) -> io::Result<u32>
where
    R: Read + ?Sized,
{
    let mut bytes = [0; 4];
    reader.read_exact(&mut bytes)?;
    Ok(u32::from_le_bytes(bytes))
}

pub(crate) fn write_u32<W>(writer: &mut W, value: usize) -> io::Result<()>
where
    W: Write + ?Sized,
{
    let value = u32::try_from(value)
        .map_err(|_| io::Error::other(format!("count {value} does not fit in 32 bits")))?;
    writer.write_all(&value.to_le_bytes())
}
