//! Per-block summaries of finished episodes.

use std::fmt;

use fib2048_engine::{EpisodeStats, MAX_TILE_INDEX, fibonacci};
use serde::Serialize;

/// Share of a block's episodes that reached a tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileReach {
    /// Face value of the tile.
    pub tile: u32,
    /// Fraction of episodes whose largest tile was at least `tile`.
    pub reached: f64,
    /// Fraction of episodes whose largest tile was exactly `tile`.
    pub ended: f64,
}

/// Summary of one block of consecutive episodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockStatistics {
    /// Number of episodes played up to and including this block.
    pub episodes: usize,
    pub average_score: f64,
    pub max_score: u64,
    /// Average number of player moves per episode.
    pub average_moves: f64,
    pub moves_per_second: f64,
    /// Tiles reached, smallest first, starting from the smallest largest tile.
    pub tiles: Vec<TileReach>,
}

impl BlockStatistics {
    /// Summarizes `block`; `episodes` counts every episode played so far.
    ///
    /// Returns `None` for an empty block.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn new(episodes: usize, block: &[EpisodeStats]) -> Option<Self> {
        if block.is_empty() {
            return None;
        }
        let count = block.len() as f64;
        let total_score: u64 = block.iter().map(EpisodeStats::score).sum();
        let max_score = block.iter().map(EpisodeStats::score).max().unwrap_or(0);
        let total_moves: usize = block.iter().map(EpisodeStats::moves).sum();
        let seconds: f64 = block.iter().map(|s| s.duration().as_secs_f64()).sum();

        let mut ended = [0_usize; MAX_TILE_INDEX as usize + 1];
        for stats in block {
            ended[usize::from(stats.max_tile())] += 1;
        }
        let mut remaining = block.len();
        let mut tiles = Vec::new();
        for (index, &count_ended) in ended.iter().enumerate() {
            if remaining == block.len() && count_ended == 0 {
                continue;
            }
            if remaining == 0 {
                break;
            }
            let index = u8::try_from(index).unwrap_or(MAX_TILE_INDEX);
            tiles.push(TileReach {
                tile: fibonacci(index),
                reached: remaining as f64 / count,
                ended: count_ended as f64 / count,
            });
            remaining -= count_ended;
        }

        Some(Self {
            episodes,
            average_score: total_score as f64 / count,
            max_score,
            average_moves: total_moves as f64 / count,
            moves_per_second: if seconds > 0.0 {
                total_moves as f64 / seconds
            } else {
                0.0
            },
            tiles,
        })
    }
}

impl fmt::Display for BlockStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}\tavg = {:.0}, max = {}, moves = {:.1}, moves/s = {:.0}",
            self.episodes,
            self.average_score,
            self.max_score,
            self.average_moves,
            self.moves_per_second
        )?;
        for reach in &self.tiles {
            writeln!(
                f,
                "\t{}\t{:.1}%\t({:.1}%)",
                reach.tile,
                reach.reached * 100.0,
                reach.ended * 100.0
            )?;
        }
        Ok(())
    }
}

/// Everything a `run` produced, in the order the blocks were played.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingSummary {
    pub play: String,
    pub evil: String,
    pub total: usize,
    pub block: usize,
    pub blocks: Vec<BlockStatistics>,
}
