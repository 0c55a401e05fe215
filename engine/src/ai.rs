use indexmap::IndexMap;
use tracing::trace;

use crate::{Action, AiRules, Aspect, Choice, Combatant, Dice};

/// Count of each aspect in the history, keyed in `Aspect::ALL` order.
pub fn aspect_frequencies(history: &[Choice]) -> IndexMap<Aspect, u32> {
    let mut freq: IndexMap<Aspect, u32> = Aspect::ALL.iter().map(|&a| (a, 0)).collect();
    for choice in history {
        *freq.entry(choice.aspect).or_insert(0) += 1;
    }
    freq
}

/// Most used aspect, or `None` for an empty history. Ties go to the
/// earlier aspect in `Aspect::ALL` (Body, then Mind, then Heart).
pub fn most_frequent_aspect(history: &[Choice]) -> Option<Aspect> {
    if history.is_empty() {
        return None;
    }
    let mut best: Option<(Aspect, u32)> = None;
    for (&aspect, &count) in &aspect_frequencies(history) {
        match best {
            Some((_, top)) if count <= top => {}
            _ => best = Some((aspect, count)),
        }
    }
    best.map(|(aspect, _)| aspect)
}

/// Counter the player's favourite aspect and pick an action from the
/// enemy's stat profile.
///
/// Draws: one for the aspect when the history is empty, then one for the action.
pub fn generate_enemy_choice(
    enemy: &impl Combatant,
    history: &[Choice],
    dice: &mut Dice,
    rules: &AiRules,
) -> Choice {
    let aspect = match most_frequent_aspect(history) {
        Some(favourite) => favourite.countered_by(),
        None => Aspect::ALL[dice.index(Aspect::ALL.len())],
    };

    let stats = enemy.stats();
    let roll = dice.unit();
    let action = if stats.strength > stats.intelligence {
        if roll > rules.aggressive_attack_threshold {
            Action::Attack
        } else {
            Action::Defend
        }
    } else if roll > rules.cerebral_special_threshold {
        Action::Special
    } else {
        Action::Attack
    };

    trace!(
        enemy = enemy.name(),
        history = history.len(),
        %aspect,
        %action,
        "enemy choice"
    );
    Choice::new(aspect, action)
}
