use std::path::PathBuf;

use anyhow::Context;
use fib2048_engine::{Action, Board, Direction};
use fib2048_evaluator::{
    n_tuple::{DEFAULT_MAX_INDEX, NTupleNetwork},
    slide_evaluator,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ShowArg {
    /// Weight file to evaluate with
    #[arg(long)]
    load: PathBuf,
    /// Sixteen face values in row-major order, e.g. "1 1 0 0 0 0 0 0 0 0 0 0 0 0 0 0"
    #[arg(long)]
    board: String,
    /// Feature radix the weights were trained with
    #[arg(long, default_value_t = DEFAULT_MAX_INDEX)]
    cap: usize,
}

pub(crate) fn run(arg: &ShowArg) -> anyhow::Result<()> {
    let ShowArg { load, board, cap } = arg;
    let board: Board = board
        .parse()
        .with_context(|| format!("Invalid board: {board}"))?;
    let network = NTupleNetwork::load(load, *cap)
        .with_context(|| format!("Failed to load weights: {}", load.display()))?;

    print!("{board}");
    println!("value = {}", network.estimate(&board));
    for candidate in slide_evaluator::legal_slides(&board, Direction::ALL) {
        println!(
            "{:>5}: reward = {}, value = {}",
            candidate.direction().to_string(),
            candidate.reward(),
            network.estimate(candidate.after())
        );
    }
    let best = slide_evaluator::select_best_slide(&network, &board, Direction::ALL)
        .map_or(Action::None, |c| Action::Slide(c.direction()));
    println!("best = {best}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_saved_network() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weights.bin");
        NTupleNetwork::zeroed(4).unwrap().save(&path).unwrap();

        let arg = ShowArg {
            load: path,
            board: "1 1 0 0 0 0 0 0 0 0 0 0 0 0 0 0".to_owned(),
            cap: 4,
        };
        run(&arg).unwrap();
    }

    #[test]
    fn test_show_rejects_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weights.bin");
        NTupleNetwork::zeroed(4).unwrap().save(&path).unwrap();

        let bad_board = ShowArg {
            load: path.clone(),
            board: "1 2 3".to_owned(),
            cap: 4,
        };
        assert!(run(&bad_board).is_err());

        for cap in [0, 5, 4000] {
            let wrong_cap = ShowArg {
                load: path.clone(),
                board: "0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0".to_owned(),
                cap,
            };
            assert!(run(&wrong_cap).is_err());
        }
    }
}
