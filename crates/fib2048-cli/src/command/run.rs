use std::path::PathBuf;

use anyhow::{Context, bail, ensure};
use fib2048_engine::{Agent, AgentConfig, Episode, RandomEnvironment};
use fib2048_evaluator::heuristic_player::HeuristicPlayer;
use fib2048_training::td_player::TdPlayer;

use crate::{
    statistics::{BlockStatistics, TrainingSummary},
    util::Output,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct RunArg {
    /// Number of episodes to play
    #[arg(long, default_value_t = 1000)]
    total: usize,
    /// Number of episodes summarized together
    #[arg(long, default_value_t = 1000)]
    block: usize,
    /// Maximum number of actions (placements included) per episode
    #[arg(long)]
    limit: Option<usize>,
    /// Player options, e.g. "name=td init alpha=0.1 save=weights.bin"
    #[arg(long, default_value = "")]
    play: String,
    /// Environment options, e.g. "name=random seed=1"
    #[arg(long, default_value = "")]
    evil: String,
    /// Seed for agents that do not set their own
    #[arg(long)]
    seed: Option<u64>,
    /// Write a JSON summary of every block to this path ("-" for stdout)
    #[arg(long)]
    summary: Option<PathBuf>,
}

enum Player {
    Td(Box<TdPlayer>),
    Heuristic(HeuristicPlayer),
}

impl Player {
    fn new(args: &str) -> anyhow::Result<Self> {
        let config: AgentConfig = args
            .parse()
            .with_context(|| format!("Invalid player options: {args}"))?;
        let player = match config.name() {
            "td" | "learning" => Player::Td(Box::new(
                TdPlayer::new(args).context("Failed to create learning player")?,
            )),
            _ => Player::Heuristic(
                HeuristicPlayer::new(args).context("Failed to create heuristic player")?,
            ),
        };
        Ok(player)
    }

    fn agent_mut(&mut self) -> &mut dyn Agent {
        match self {
            Player::Td(player) => player.as_mut(),
            Player::Heuristic(player) => player,
        }
    }

    fn finish(self) -> anyhow::Result<()> {
        if let Player::Td(player) = self {
            player.finish().context("Failed to save learning player weights")?;
        }
        Ok(())
    }
}

fn environment(args: &str) -> anyhow::Result<RandomEnvironment> {
    let env = RandomEnvironment::new(args)
        .with_context(|| format!("Invalid environment options: {args}"))?;
    if env.name() != "random" {
        bail!("Unknown environment: {}", env.name());
    }
    Ok(env)
}

fn seeded(args: &str, seed: Option<u64>) -> String {
    match seed {
        Some(seed) => format!("seed={seed} {args}"),
        None => args.to_owned(),
    }
}

pub(crate) fn run(arg: &RunArg) -> anyhow::Result<()> {
    let RunArg {
        total,
        block,
        limit,
        play,
        evil,
        seed,
        summary,
    } = arg;
    ensure!(*block > 0, "--block must be at least 1");

    let mut player = Player::new(&seeded(play, seed.map(|s| s.wrapping_add(1))))?;
    let mut env = environment(&seeded(evil, *seed))?;
    tracing::info!(
        play = %player.agent_mut().config(),
        evil = %env.config(),
        total,
        "starting run"
    );

    let mut blocks = Vec::new();
    let mut pending = Vec::with_capacity(*block);
    for episode in 1..=*total {
        pending.push(Episode::new().play(player.agent_mut(), &mut env, *limit));
        if pending.len() == *block || episode == *total {
            if let Some(stats) = BlockStatistics::new(episode, &pending) {
                print!("{stats}");
                blocks.push(stats);
            }
            pending.clear();
        }
    }

    player.finish()?;

    if let Some(path) = summary {
        let summary = TrainingSummary {
            play: play.clone(),
            evil: evil.clone(),
            total: *total,
            block: *block,
            blocks,
        };
        Output::create(path)?.write_json(&summary)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded() {
        assert_eq!(seeded("name=x", None), "name=x");
        assert_eq!(seeded("name=x", Some(3)), "seed=3 name=x");
        let config: AgentConfig = seeded("seed=9", Some(3)).parse().unwrap();
        assert_eq!(config.seed(), Some(9));
    }

    #[test]
    fn test_player_selection() {
        assert!(matches!(
            Player::new("name=td init cap=3").unwrap(),
            Player::Td(_)
        ));
        assert!(matches!(
            Player::new("name=learning").unwrap(),
            Player::Td(_)
        ));
        assert!(matches!(
            Player::new("space").unwrap(),
            Player::Heuristic(_)
        ));
        assert!(Player::new("name=dummy mode=nonsense").is_err());
    }

    #[test]
    fn test_environment_selection() {
        assert!(environment("").is_ok());
        assert!(environment("name=random seed=2").is_ok());
        assert!(environment("name=adversary").is_err());
        assert!(environment("seed=x").is_err());
    }

    #[test]
    fn test_run_writes_summary_and_weights() {
        let dir = tempfile::tempdir().unwrap();
        let weights = dir.path().join("weights.bin");
        let summary = dir.path().join("summary.json");
        let arg = RunArg {
            total: 5,
            block: 2,
            limit: None,
            play: format!("name=td init cap=3 alpha=0.05 save={}", weights.display()),
            evil: String::new(),
            seed: Some(7),
            summary: Some(summary.clone()),
        };
        run(&arg).unwrap();

        assert!(weights.exists());
        let text = std::fs::read_to_string(&summary).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let blocks = value["blocks"].as_array().unwrap();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[2]["episodes"], 5);
    }

    #[test]
    fn test_run_fails_on_missing_weights() {
        let dir = tempfile::tempdir().unwrap();
        let arg = RunArg {
            total: 1,
            block: 1,
            play: format!("name=td load={}", dir.path().join("none.bin").display()),
            ..RunArg::default()
        };
        assert!(run(&arg).is_err());
    }

    #[test]
    fn test_run_rejects_empty_block() {
        let arg = RunArg {
            total: 1,
            block: 0,
            ..RunArg::default()
        };
        assert!(run(&arg).is_err());
    }
}
