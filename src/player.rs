//! Decision sources that pick a move slot for a combatant each turn.

use crate::errors::{ActionError, BattleResult};
use crate::pokemon::Combatant;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{self, BufRead, Write};

/// Anything that can pick a move slot for `user` against `opponent`.
///
/// Called once per turn unless the user is finishing a two-turn move.
/// Returned indices outside 0..=3 are rejected by the battle.
pub trait MoveSelector {
    fn choose_move(&mut self, user: &Combatant, opponent: &Combatant) -> BattleResult<usize>;
}

/// Computer opponent: a uniform pick over the four slots.
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }
}

impl MoveSelector for RandomSelector {
    fn choose_move(&mut self, user: &Combatant, _opponent: &Combatant) -> BattleResult<usize> {
        let index = self.rng.random_range(0..user.moves().len());
        tracing::debug!(pokemon = %user.name, index, "computer picked a move");
        Ok(index)
    }
}

/// Where a human's answers come from, one line at a time.
pub trait LineSource {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

impl<R: BufRead> LineSource for R {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// Process stdin, locked only for the duration of each read so two human
/// sides can share one terminal.
#[derive(Debug)]
pub struct StdinLines(io::Stdin);

impl LineSource for StdinLines {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        self.0.read_line(buf)
    }
}

/// Interactive player reading 1-4 from a line-based input.
pub struct HumanSelector<R, W> {
    input: R,
    output: W,
}

impl HumanSelector<StdinLines, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(StdinLines(io::stdin()), io::stdout())
    }
}

impl<R: LineSource, W: Write> HumanSelector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn print_menu(&mut self, user: &Combatant) -> io::Result<()> {
        writeln!(self.output, "What will {} do?", user.name)?;
        for (slot, move_data) in user.moves().iter().enumerate() {
            writeln!(
                self.output,
                "  {}) {} [{}]",
                slot + 1,
                move_data.name,
                move_data.move_type
            )?;
        }
        write!(self.output, "> ")?;
        self.output.flush()
    }
}

fn no_input(err: io::Error) -> ActionError {
    ActionError::NoInput(err.to_string())
}

impl<R: LineSource, W: Write> MoveSelector for HumanSelector<R, W> {
    fn choose_move(&mut self, user: &Combatant, _opponent: &Combatant) -> BattleResult<usize> {
        self.print_menu(user).map_err(no_input)?;
        let mut line = String::new();
        loop {
            line.clear();
            let read = self.input.read_line(&mut line).map_err(no_input)?;
            if read == 0 {
                return Err(ActionError::NoInput("input closed".to_string()).into());
            }
            match line.trim().parse::<usize>() {
                Ok(choice) if (1..=user.moves().len()).contains(&choice) => return Ok(choice - 1),
                _ => {
                    write!(self.output, "Pick a move from 1 to {}: ", user.moves().len())
                        .and_then(|_| self.output.flush())
                        .map_err(no_input)?;
                }
            }
        }
    }
}
