use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    generate_enemy_choice, resolve_combat_round_with, Action, Advantage, Character, Choice, CombatRules,
    Dice, Enemy, EngineError, RoundResult, SkillBook,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    pub hp: u32,
    pub max_hp: u32,
}

impl Vitals {
    pub fn new(hp: u32, max_hp: u32) -> Self {
        Self { hp: hp.min(max_hp), max_hp }
    }

    pub fn is_down(&self) -> bool {
        self.hp == 0
    }
}

/// Apply damage, saturating at 0. Returns true if the creature dropped to 0 this call.
pub fn apply_damage(name: &str, vitals: &mut Vitals, dmg: u32, mut log: impl FnMut(String)) -> bool {
    let before = vitals.hp;
    vitals.hp = vitals.hp.saturating_sub(dmg);
    log(format!("[DMG][{}] {} → {} (−{})", name, before, vitals.hp, dmg));
    if before > 0 && vitals.hp == 0 {
        log(format!("[STATE][{}] falls at 0 HP", name));
        return true;
    }
    false
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterStatus {
    Ongoing,
    Victory,
    Defeat,
}

/// Rounds in which each side held the aspect advantage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdvantageTally {
    pub player: u32,
    pub enemy: u32,
}

/// One fight between the player and a single enemy. Owns the health pools
/// and the player's choice history; a new encounter starts with an empty one.
#[derive(Debug, Clone)]
pub struct Encounter {
    player: Character,
    enemy: Enemy,
    player_vitals: Vitals,
    enemy_vitals: Vitals,
    round: u32,
    advantages: AdvantageTally,
    history: Vec<Choice>,
    status: EncounterStatus,
    log: Vec<String>,
}

impl Encounter {
    pub fn new(player: Character, enemy: Enemy) -> Self {
        let player_vitals = Vitals::new(player.health, player.max_health);
        let enemy_vitals = Vitals::new(enemy.max_health, enemy.max_health);
        let log = vec![format!(
            "[START] {} (HP {}/{}) vs {} (HP {})",
            player.name, player_vitals.hp, player_vitals.max_hp, enemy.name, enemy_vitals.hp
        )];
        let status = if player_vitals.is_down() {
            EncounterStatus::Defeat
        } else {
            EncounterStatus::Ongoing
        };
        Self {
            player,
            enemy,
            player_vitals,
            enemy_vitals,
            round: 1,
            advantages: AdvantageTally::default(),
            history: Vec::new(),
            status,
            log,
        }
    }

    /// Let the enemy pick against the history, resolve, then apply damage.
    /// The player may only cast skills the character knows.
    pub fn play_round(
        &mut self,
        player_choice: Choice,
        dice: &mut Dice,
        rules: &CombatRules,
        skills: &SkillBook,
    ) -> Result<RoundResult, EngineError> {
        if self.status != EncounterStatus::Ongoing {
            return Err(EngineError::EncounterOver { round: self.round });
        }
        if player_choice.action == Action::Skill {
            let id = player_choice.skill.as_deref().ok_or(EngineError::MissingSkill)?;
            if !self.player.knows_skill(id) {
                return Err(EngineError::SkillNotKnown {
                    character: self.player.name.clone(),
                    skill: id.to_string(),
                });
            }
        }

        let enemy_choice = generate_enemy_choice(&self.enemy, &self.history, dice, &rules.ai);
        let result = resolve_combat_round_with(
            &self.player,
            &self.enemy,
            &player_choice,
            &enemy_choice,
            dice,
            rules,
            skills,
        );
        self.history.push(player_choice);

        match result.advantage {
            Advantage::Player => self.advantages.player += 1,
            Advantage::Enemy => self.advantages.enemy += 1,
            Advantage::None => {}
        }

        let log = &mut self.log;
        log.push(format!("[ROUND] {}", self.round));
        log.extend(result.effects.iter().cloned());
        apply_damage(&self.enemy.name, &mut self.enemy_vitals, result.damage.to_enemy, |m| {
            log.push(m)
        });
        apply_damage(&self.player.name, &mut self.player_vitals, result.damage.to_player, |m| {
            log.push(m)
        });

        self.status = if self.player_vitals.is_down() {
            EncounterStatus::Defeat
        } else if self.enemy_vitals.is_down() {
            EncounterStatus::Victory
        } else {
            EncounterStatus::Ongoing
        };

        if self.status == EncounterStatus::Ongoing {
            self.round += 1;
        } else {
            info!(
                status = ?self.status,
                round = self.round,
                player_hp = self.player_vitals.hp,
                enemy_hp = self.enemy_vitals.hp,
                "encounter ended"
            );
            self.log.push(format!(
                "[END] {:?} after {} rounds ({} HP {}, {} HP {})",
                self.status,
                self.round,
                self.player.name,
                self.player_vitals.hp,
                self.enemy.name,
                self.enemy_vitals.hp
            ));
        }

        Ok(result)
    }

    pub fn status(&self) -> EncounterStatus {
        self.status
    }

    /// Current round number; the final round once the encounter is over.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn history(&self) -> &[Choice] {
        &self.history
    }

    pub fn advantages(&self) -> AdvantageTally {
        self.advantages
    }

    pub fn player_vitals(&self) -> Vitals {
        self.player_vitals
    }

    pub fn enemy_vitals(&self) -> Vitals {
        self.enemy_vitals
    }

    pub fn player(&self) -> &Character {
        &self.player
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Hand the player back with the health left at the end of the fight.
    pub fn into_character(self) -> Character {
        let mut player = self.player;
        player.health = self.player_vitals.hp;
        player
    }
}
