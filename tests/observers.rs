//! Observers attached to training and evaluation runs

use std::sync::{Arc, Mutex};

use ttt_sarsa::{
    Result,
    pipeline::{EvaluationConfig, EvaluationPipeline, Observer, RandomLearner},
    q_learning::{SelfPlayTrainer, TrainingConfig},
    tictactoe::{GameOutcome, Player},
};

#[derive(Debug, Default)]
struct Recorded {
    started_with: Option<usize>,
    games: Vec<(usize, GameOutcome)>,
    finished: bool,
}

struct RecordingObserver(Arc<Mutex<Recorded>>);

impl Observer for RecordingObserver {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        self.0.lock().unwrap().started_with = Some(total_games);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome) -> Result<()> {
        self.0.lock().unwrap().games.push((game_num, outcome));
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.0.lock().unwrap().finished = true;
        Ok(())
    }
}

#[test]
fn trainer_notifies_observer_for_every_game() {
    let recorded = Arc::new(Mutex::new(Recorded::default()));
    let mut trainer = SelfPlayTrainer::new(TrainingConfig::new(25).with_seed(8))
        .unwrap()
        .with_observer(Box::new(RecordingObserver(Arc::clone(&recorded))));
    let report = trainer.train().unwrap();

    let recorded = recorded.lock().unwrap();
    assert_eq!(recorded.started_with, Some(25));
    assert!(recorded.finished);
    assert_eq!(recorded.games.len(), 25);
    assert!(
        recorded
            .games
            .iter()
            .enumerate()
            .all(|(i, &(game_num, _))| i == game_num)
    );

    let x_wins = recorded
        .games
        .iter()
        .filter(|(_, outcome)| *outcome == GameOutcome::Win(Player::X))
        .count();
    assert_eq!(x_wins, report.x_wins);
}

#[test]
fn evaluation_notifies_observer() {
    let recorded = Arc::new(Mutex::new(Recorded::default()));
    let mut pipeline = EvaluationPipeline::new(EvaluationConfig {
        num_games: 10,
        seed: 4,
        agent_player: Player::O,
    })
    .with_observer(Box::new(RecordingObserver(Arc::clone(&recorded))));

    let mut agent = RandomLearner::new("Agent".to_string());
    let mut opponent = RandomLearner::new("Opponent".to_string());
    pipeline.run(&mut agent, &mut opponent).unwrap();

    let recorded = recorded.lock().unwrap();
    assert_eq!(recorded.started_with, Some(10));
    assert_eq!(recorded.games.len(), 10);
    assert!(recorded.finished);
}
