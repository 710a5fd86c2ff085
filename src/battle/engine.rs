use crate::battle::move_effects::{resolve_move, MoveContext};
use crate::battle::state::{BattleEvent, EventSink, GameState, TurnRng};
use crate::battle::status::{apply_chip_damage, can_act, Mobility};
use crate::config::{BattleConfig, SpeedTieRule};
use crate::errors::{ActionError, BattleResult};
use crate::player::MoveSelector;
use crate::pokemon::Combatant;
use schema::StatType;
use std::cmp::Ordering;

/// One participant: the trainer's name, their combatant and whoever picks its moves.
pub struct BattleSide {
    pub owner: String,
    pub combatant: Combatant,
    selector: Box<dyn MoveSelector>,
}

impl BattleSide {
    pub fn new(
        owner: impl Into<String>,
        combatant: Combatant,
        selector: Box<dyn MoveSelector>,
    ) -> Self {
        Self {
            owner: owner.into(),
            combatant,
            selector,
        }
    }
}

/// Summary of a finished battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleOutcome {
    pub winner: String,
    pub loser: String,
    pub fainted_pokemon: String,
    pub turns: u32,
}

/// A single battle between two sides, driven one round at a time.
pub struct Battle {
    sides: [BattleSide; 2],
    rng: TurnRng,
    config: BattleConfig,
    turn_number: u32,
    state: GameState,
}

impl Battle {
    pub fn new(
        player1: BattleSide,
        player2: BattleSide,
        rng: TurnRng,
        config: BattleConfig,
    ) -> Self {
        Self {
            sides: [player1, player2],
            rng,
            config,
            turn_number: 0,
            state: GameState::Running,
        }
    }

    pub fn combatant(&self, index: usize) -> &Combatant {
        &self.sides[index].combatant
    }

    pub fn combatant_mut(&mut self, index: usize) -> &mut Combatant {
        &mut self.sides[index].combatant
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == GameState::Running
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn rng(&self) -> &TurnRng {
        &self.rng
    }

    fn announce(&self, sink: &mut dyn EventSink) {
        let [first, second] = &self.sides;
        tracing::info!(
            player1 = %first.owner,
            pokemon1 = %first.combatant.name,
            player2 = %second.owner,
            pokemon2 = %second.combatant.name,
            "battle started"
        );
        sink.emit(BattleEvent::BattleStarted {
            players: [first.owner.clone(), second.owner.clone()],
            pokemon: [first.combatant.name.clone(), second.combatant.name.clone()],
        });
    }

    /// Sides in acting order for this round. Higher current Speed goes first;
    /// ties follow the configured rule.
    fn turn_order(&mut self) -> [usize; 2] {
        let speed_of = |side: &BattleSide| side.combatant.stats.stat(StatType::Speed);
        let (first, second) = (speed_of(&self.sides[0]), speed_of(&self.sides[1]));

        let order = match first.cmp(&second) {
            Ordering::Greater => [0, 1],
            Ordering::Less => [1, 0],
            Ordering::Equal => match self.config.speed_tie {
                SpeedTieRule::PlayerOneFirst => [0, 1],
                SpeedTieRule::CoinFlip => {
                    if self.rng.range(0, 1, "Speed tie coin flip") == 0 {
                        [0, 1]
                    } else {
                        [1, 0]
                    }
                }
            },
        };
        tracing::debug!(turn = self.turn_number, ?order, first, second, "turn order");
        order
    }

    /// Plays one full round: both actions in speed order, then chip damage.
    /// Stops as soon as a combatant faints.
    pub fn play_round(&mut self, sink: &mut dyn EventSink) -> BattleResult<GameState> {
        if !self.is_running() {
            return Err(ActionError::BattleOver.into());
        }
        if self.turn_number == 0 {
            self.announce(sink);
        }

        self.turn_number += 1;
        sink.emit(BattleEvent::TurnStarted {
            turn_number: self.turn_number,
        });

        let order = self.turn_order();
        for (slot, &actor) in order.iter().enumerate() {
            self.take_action(actor, slot == 0, sink)?;
            if !self.is_running() {
                return Ok(self.state);
            }
        }

        for side in 0..2 {
            if apply_chip_damage(&mut self.sides[side].combatant, sink).is_some()
                && self.check_faint(side, sink)
            {
                return Ok(self.state);
            }
        }

        Ok(self.state)
    }

    /// Plays rounds until one side's combatant faints.
    pub fn run(&mut self, sink: &mut dyn EventSink) -> BattleResult<BattleOutcome> {
        loop {
            if let GameState::Over { winner, fainted } = self.play_round(sink)? {
                let outcome = BattleOutcome {
                    winner: self.sides[winner].owner.clone(),
                    loser: self.sides[fainted].owner.clone(),
                    fainted_pokemon: self.sides[fainted].combatant.name.clone(),
                    turns: self.turn_number,
                };
                tracing::info!(winner = %outcome.winner, turns = outcome.turns, "battle finished");
                return Ok(outcome);
            }
        }
    }

    fn take_action(
        &mut self,
        actor: usize,
        acts_first: bool,
        sink: &mut dyn EventSink,
    ) -> BattleResult<()> {
        let target = 1 - actor;
        {
            let side = &self.sides[actor];
            sink.emit(BattleEvent::CombatantStatus {
                owner: side.owner.clone(),
                pokemon: side.combatant.name.clone(),
                hp: side.combatant.current_hp(),
                max_hp: side.combatant.max_hp(),
            });
        }

        match can_act(&mut self.sides[actor].combatant, &mut self.rng, sink) {
            Mobility::Acts => {}
            Mobility::HurtItself { .. } => {
                self.check_faint(actor, sink);
                return Ok(());
            }
            Mobility::Prevented(_) => return Ok(()),
        }

        let (attacker, defender) = pair_mut(&mut self.sides, actor);

        // A stored two-turn move fires without consulting the selector.
        let (move_data, charged) = match attacker.combatant.flags.charging.take() {
            Some(stored) => (stored, true),
            None => {
                let index = attacker
                    .selector
                    .choose_move(&attacker.combatant, &defender.combatant)?;
                let chosen = attacker
                    .combatant
                    .move_at(index)
                    .cloned()
                    .ok_or(ActionError::InvalidChoice { index })?;
                tracing::debug!(
                    owner = %attacker.owner,
                    index,
                    move_name = %chosen.name,
                    "move chosen"
                );
                (chosen, false)
            }
        };

        resolve_move(
            &move_data,
            &mut attacker.combatant,
            &mut defender.combatant,
            MoveContext {
                acts_first,
                charged,
            },
            &mut self.rng,
            sink,
        );

        if !self.check_faint(target, sink) {
            self.check_faint(actor, sink);
        }
        Ok(())
    }

    /// Ends the battle if `side`'s combatant has fainted. Returns true if it did.
    fn check_faint(&mut self, side: usize, sink: &mut dyn EventSink) -> bool {
        if !self.is_running() || !self.sides[side].combatant.is_fainted() {
            return false;
        }
        let winner = 1 - side;
        let loser = &self.sides[side];

        sink.emit(BattleEvent::PokemonFainted {
            owner: loser.owner.clone(),
            pokemon: loser.combatant.name.clone(),
        });
        sink.emit(BattleEvent::PlayerDefeated {
            player: loser.owner.clone(),
        });
        sink.emit(BattleEvent::BattleEnded {
            winner: self.sides[winner].owner.clone(),
        });

        self.state = GameState::Over {
            winner,
            fainted: side,
        };
        true
    }
}

fn pair_mut(sides: &mut [BattleSide; 2], actor: usize) -> (&mut BattleSide, &mut BattleSide) {
    let (first, second) = sides.split_at_mut(1);
    if actor == 0 {
        (&mut first[0], &mut second[0])
    } else {
        (&mut second[0], &mut first[0])
    }
}
