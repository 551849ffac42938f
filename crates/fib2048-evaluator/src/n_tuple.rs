//! Linear n-tuple network over the four standard patterns.
//!
//! # Estimation
//!
//! For each [`Symmetry`] the board is rotated, every pattern's feature index is
//! looked up in that pattern's table, and the rotation is undone. The value is
//! the sum of all 16 lookups. Because every orientation feeds the same tables,
//! a rotated copy of a board shares weights with the original.
//!
//! # Update
//!
//! [`NTupleNetwork::adjust`] moves the estimate toward a target: the error
//! `target - estimate` is scaled by the learning rate and added to each of the
//! 16 entries that produced the estimate.
//!
//! # Persistence
//!
//! A network file is a little-endian `u32` table count followed by one
//! [`WeightTable`] per pattern, in [`PATTERNS`] order.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use fib2048_engine::Board;

use crate::{
    InvalidCapError, WeightsIoError,
    pattern::{PATTERNS, Pattern},
    symmetry::Symmetry,
    weight_table::{self, WeightTable},
};

/// Default radix of the feature digits; larger tile indices are clamped.
pub const DEFAULT_MAX_INDEX: usize = 24;

/// Weight tables for [`PATTERNS`], owned by one learning agent.
#[derive(Debug, Clone, PartialEq)]
pub struct NTupleNetwork {
    tables: Vec<WeightTable>,
    cap: usize,
}

impl NTupleNetwork {
    /// Table sizes for radix `cap`, in [`PATTERNS`] order.
    ///
    /// Fails if `cap` is below 2 or the tables together would not fit in
    /// addressable memory.
    ///
    /// ```
    /// use fib2048_evaluator::n_tuple::NTupleNetwork;
    ///
    /// assert_eq!(NTupleNetwork::table_lens(3).unwrap(), [729, 729, 81, 81]);
    /// assert!(NTupleNetwork::table_lens(1).is_err());
    /// assert!(NTupleNetwork::table_lens(4000).is_err());
    /// ```
    pub fn table_lens(cap: usize) -> Result<[usize; 4], InvalidCapError> {
        let invalid = InvalidCapError { cap };
        if cap < 2 {
            return Err(invalid);
        }
        let mut lens = [0; 4];
        let mut total = 0usize;
        for (len, pattern) in lens.iter_mut().zip(&PATTERNS) {
            *len = pattern.table_len(cap).ok_or(invalid)?;
            total = total.checked_add(*len).ok_or(invalid)?;
        }
        let bytes = total.checked_mul(size_of::<f32>()).ok_or(invalid)?;
        if isize::try_from(bytes).is_err() {
            return Err(invalid);
        }
        Ok(lens)
    }

    /// Allocates zero-filled tables sized for radix `cap`.
    ///
    /// With the default radix this is about 1.5 GB of weights.
    pub fn zeroed(cap: usize) -> Result<Self, InvalidCapError> {
        let tables: Vec<_> = Self::table_lens(cap)?
            .into_iter()
            .map(WeightTable::zeroed)
            .collect();
        tracing::info!(
            cap,
            entries = tables.iter().map(WeightTable::len).sum::<usize>(),
            "allocated weight tables"
        );
        Ok(Self { tables, cap })
    }

    /// Wraps existing tables, checking them against the pattern sizes for `cap`.
    pub fn from_tables(tables: Vec<WeightTable>, cap: usize) -> Result<Self, WeightsIoError> {
        let lens = Self::table_lens(cap)?;
        if tables.len() != lens.len() {
            return Err(WeightsIoError::TableCount {
                expected: lens.len(),
                found: tables.len(),
            });
        }
        for (table, (&expected, weights)) in lens.iter().zip(&tables).enumerate() {
            if weights.len() != expected {
                return Err(WeightsIoError::TableSize {
                    table,
                    expected,
                    found: weights.len(),
                });
            }
        }
        Ok(Self { tables, cap })
    }

    #[must_use]
    pub fn cap(&self) -> usize {
        self.cap
    }

    #[must_use]
    pub fn tables(&self) -> &[WeightTable] {
        &self.tables
    }

    /// Estimated value of an afterstate. Does not modify `board`.
    #[must_use]
    pub fn estimate(&self, board: &Board) -> f32 {
        let mut board = *board;
        let mut value = 0.0;
        for symmetry in Symmetry::ALL {
            symmetry.apply(&mut board);
            for (pattern, table) in self.patterns() {
                value += table[pattern.feature_index(&board, self.cap)];
            }
            symmetry.undo(&mut board);
        }
        value
    }

    /// Moves the estimate of `board` toward `target` with learning rate `alpha`.
    ///
    /// Returns the error `target - estimate` measured before the update.
    pub fn adjust(&mut self, board: &Board, target: f32, alpha: f32) -> f32 {
        let error = target - self.estimate(board);
        let delta = alpha * error;
        let cap = self.cap;
        let mut board = *board;
        for symmetry in Symmetry::ALL {
            symmetry.apply(&mut board);
            for (pattern, table) in PATTERNS.iter().zip(&mut self.tables) {
                table[pattern.feature_index(&board, cap)] += delta;
            }
            symmetry.undo(&mut board);
        }
        error
    }

    fn patterns(&self) -> impl Iterator<Item = (&Pattern, &WeightTable)> {
        PATTERNS.iter().zip(&self.tables)
    }

    /// Decodes a network and checks its tables against radix `cap`.
    pub fn read_from<R>(reader: &mut R, cap: usize) -> Result<Self, WeightsIoError>
    where
        R: Read + ?Sized,
    {
        let count = weight_table::read_u32(reader)? as usize;
        if count != PATTERNS.len() {
            return Err(WeightsIoError::TableCount {
                expected: PATTERNS.len(),
                found: count,
            });
        }
        let tables = (0..count)
            .map(|_| WeightTable::read_from(reader))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_tables(tables, cap)
    }

    pub fn write_to<W>(&self, writer: &mut W) -> Result<(), WeightsIoError>
    where
        W: Write + ?Sized,
    {
        weight_table::write_u32(writer, self.tables.len())?;
        for table in &self.tables {
            table.write_to(writer)?;
        }
        Ok(())
    }

    pub fn load(path: &Path, cap: usize) -> Result<Self, WeightsIoError> {
        Self::table_lens(cap)?;
        let file = File::open(path).map_err(WeightsIoError::file(path))?;
        let network = Self::read_from(&mut BufReader::new(file), cap)?;
        tracing::info!(path = %path.display(), tables = network.tables.len(), "loaded weights");
        Ok(network)
    }

    pub fn save(&self, path: &Path) -> Result<(), WeightsIoError> {
        let file = File::create(path).map_err(WeightsIoError::file(path))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush().map_err(WeightsIoError::file(path))?;
        tracing::info!(path = %path.display(), tables = self.tables.len(), "saved weights");
        Ok(())
    }
}
