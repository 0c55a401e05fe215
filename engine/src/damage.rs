use crate::{Action, DamageRules, Dice, Stats};

/// Stat term plus jitter for one action. Stat formulas take exactly one draw;
/// `Skill` has no formula here and takes none.
pub fn base_damage(attacker: &Stats, action: Action, dice: &mut Dice, rules: &DamageRules) -> u32 {
    let (stat, scaling) = match action {
        Action::Attack => (attacker.strength, rules.attack),
        Action::Defend => (attacker.constitution, rules.defend),
        Action::Special => (attacker.intelligence, rules.special),
        Action::Skill => return 0,
    };
    let raw = stat as f64 * scaling.scale + dice.uniform(scaling.jitter);
    raw.floor().max(0.0) as u32
}

/// Damage reduction granted by the defender's constitution.
pub fn mitigation(defender: &Stats, rules: &DamageRules) -> u32 {
    (defender.constitution as f64 * rules.mitigation_ratio)
        .floor()
        .max(0.0) as u32
}

/// Advantage bonus, then mitigation, then the minimum-damage floor.
pub fn finish_damage(base: u32, defender: &Stats, has_advantage: bool, rules: &DamageRules) -> u32 {
    let boosted = if has_advantage {
        (base as f64 * rules.advantage_multiplier).floor().max(0.0) as u32
    } else {
        base
    };
    boosted
        .saturating_sub(mitigation(defender, rules))
        .max(rules.minimum_damage)
}

pub fn calculate_damage(
    attacker: &Stats,
    defender: &Stats,
    action: Action,
    has_advantage: bool,
    dice: &mut Dice,
    rules: &DamageRules,
) -> u32 {
    let base = base_damage(attacker, action, dice, rules);
    finish_damage(base, defender, has_advantage, rules)
}
