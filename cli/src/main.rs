use anyhow::Context;
use axiomancer_engine::api::{simulate_encounter, EncounterConfig, PlayerPolicy};
use axiomancer_engine::content::{builtin_character, builtin_enemy};
use axiomancer_engine::rules::load_rules;
use axiomancer_engine::{
    calculate_damage, generate_enemy_choice, resolve_advantage, resolve_combat_round_with,
    Action, Aspect, Choice, CombatRules, Dice, Outcome, SkillBook,
};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::Level;

#[derive(Copy, Clone, ValueEnum)]
enum AspectArg {
    Body,
    Mind,
    Heart,
}

#[derive(Copy, Clone, ValueEnum)]
enum ActionArg {
    Attack,
    Defend,
    Special,
    Skill,
}

#[derive(Copy, Clone, ValueEnum)]
enum PolicyArg {
    Fixed,
    Random,
    Cycle,
    SkillRotation,
}

#[derive(Subcommand)]
enum Cmd {
    /// Compare two aspects from the player's side
    Advantage {
        #[arg(long, value_enum)]
        player: AspectArg,
        #[arg(long, value_enum)]
        enemy: AspectArg,
    },
    /// Roll damage for the sample character against an enemy
    Damage {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, value_enum, default_value_t = ActionArg::Attack)]
        action: ActionArg,
        /// Attacker won the aspect comparison
        #[arg(long, default_value_t = false)]
        advantage: bool,
        /// Built-in enemy id
        #[arg(long, default_value = "philosophical_goblin")]
        enemy: String,
        /// Number of rolls
        #[arg(long, default_value_t = 5)]
        rolls: u32,
    },
    /// Show what an enemy would pick against a choice history
    EnemyChoice {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Built-in enemy id
        #[arg(long, default_value = "philosophical_goblin")]
        enemy: String,
        /// Player aspects so far, comma separated (e.g. body,body,mind)
        #[arg(long, value_delimiter = ',')]
        history: Vec<String>,
    },
    /// Resolve a single round between the sample character and an enemy
    Round {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, value_enum)]
        player_aspect: AspectArg,
        #[arg(long, value_enum)]
        player_action: ActionArg,
        /// Skill id when the player action is `skill`
        #[arg(long)]
        skill: Option<String>,
        /// Enemy aspect; omit to let the enemy AI choose both aspect and action
        #[arg(long, value_enum, requires = "enemy_action")]
        enemy_aspect: Option<AspectArg>,
        #[arg(long, value_enum, requires = "enemy_aspect")]
        enemy_action: Option<ActionArg>,
        /// Built-in enemy id
        #[arg(long, default_value = "philosophical_goblin")]
        enemy: String,
        /// Optional rules file (YAML or JSON)
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Fight a whole encounter with a scripted player policy
    Encounter {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 2025)]
        seed: u64,
        #[arg(long, value_enum, default_value_t = PolicyArg::Random)]
        policy: PolicyArg,
        /// Aspect for the fixed policy
        #[arg(long, value_enum, default_value_t = AspectArg::Mind)]
        aspect: AspectArg,
        /// Action for the fixed policy
        #[arg(long, value_enum, default_value_t = ActionArg::Attack)]
        action: ActionArg,
        /// Skill id for the fixed policy with `--action skill`
        #[arg(long)]
        skill: Option<String>,
        /// Built-in enemy id
        #[arg(long)]
        enemy: Option<String>,
        /// Enemy JSON file (overrides --enemy)
        #[arg(long)]
        enemy_file: Option<PathBuf>,
        /// Optional rules file (YAML or JSON)
        #[arg(long)]
        rules: Option<PathBuf>,
        #[arg(long, default_value_t = 30)]
        max_rounds: u32,
        /// Print the result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the default combat rules as YAML
    RulesDump,
    /// Serialize the sample character to JSON (stdout)
    CharacterDump {
        /// Single-line JSON
        #[arg(long, default_value_t = false)]
        compact: bool,
    },
}

#[derive(Parser)]
#[command(name = "axiomancer")]
#[command(about = "Axiomancer combat engine harness")]
struct Cli {
    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Cmd,
}

fn to_aspect(a: AspectArg) -> Aspect {
    match a {
        AspectArg::Body => Aspect::Body,
        AspectArg::Mind => Aspect::Mind,
        AspectArg::Heart => Aspect::Heart,
    }
}

fn to_action(a: ActionArg) -> Action {
    match a {
        ActionArg::Attack => Action::Attack,
        ActionArg::Defend => Action::Defend,
        ActionArg::Special => Action::Special,
        ActionArg::Skill => Action::Skill,
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn rules_from(path: Option<&PathBuf>) -> anyhow::Result<CombatRules> {
    match path {
        Some(p) => load_rules(p),
        None => Ok(CombatRules::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Cmd::Advantage { player, enemy } => {
            let (p, e) = (to_aspect(player), to_aspect(enemy));
            let verdict = match resolve_advantage(p, e) {
                Outcome::Player => "player",
                Outcome::Enemy => "enemy",
                Outcome::Tie => "tie",
            };
            println!("{} vs {} => {}", p, e, verdict);
        }
        Cmd::Damage {
            seed,
            action,
            advantage,
            enemy,
            rolls,
        } => {
            let player = builtin_character("socrates")?;
            let target = builtin_enemy(&enemy)?;
            let rules = CombatRules::default();
            let mut dice = Dice::from_seed(seed);
            for _ in 0..rolls {
                let dmg = calculate_damage(
                    &player.stats,
                    &target.stats,
                    to_action(action),
                    advantage,
                    &mut dice,
                    &rules.damage,
                );
                println!("{}", dmg);
            }
        }
        Cmd::EnemyChoice {
            seed,
            enemy,
            history,
        } => {
            let target = builtin_enemy(&enemy)?;
            let history = history
                .iter()
                .map(|s| s.parse::<Aspect>().map(|a| Choice::new(a, Action::Attack)))
                .collect::<Result<Vec<_>, _>>()?;
            let mut dice = Dice::from_seed(seed);
            let choice =
                generate_enemy_choice(&target, &history, &mut dice, &CombatRules::default().ai);
            println!("{} picks {} / {}", target.name, choice.aspect, choice.action);
        }
        Cmd::Round {
            seed,
            player_aspect,
            player_action,
            skill,
            enemy_aspect,
            enemy_action,
            enemy,
            rules,
            json,
        } => {
            let player = builtin_character("socrates")?;
            let target = builtin_enemy(&enemy)?;
            let rules = rules_from(rules.as_ref())?;
            let skills = SkillBook::builtin()?;
            let mut dice = Dice::from_seed(seed);

            let mut pc = Choice::new(to_aspect(player_aspect), to_action(player_action));
            if pc.action == Action::Skill {
                pc.skill = skill;
            }
            let ec = match (enemy_aspect, enemy_action) {
                (Some(a), Some(act)) => Choice::new(to_aspect(a), to_action(act)),
                _ => generate_enemy_choice(&target, &[], &mut dice, &rules.ai),
            };

            let result =
                resolve_combat_round_with(&player, &target, &pc, &ec, &mut dice, &rules, &skills);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                for line in &result.effects {
                    println!("{}", line);
                }
                println!(
                    "damage: {} takes {}, {} takes {}",
                    target.name, result.damage.to_enemy, player.name, result.damage.to_player
                );
            }
        }
        Cmd::Encounter {
            seed,
            policy,
            aspect,
            action,
            skill,
            enemy,
            enemy_file,
            rules,
            max_rounds,
            json,
        } => {
            let policy = match policy {
                PolicyArg::Fixed => PlayerPolicy::Fixed {
                    aspect: to_aspect(aspect),
                    action: to_action(action),
                    skill,
                },
                PolicyArg::Random => PlayerPolicy::Random,
                PolicyArg::Cycle => PlayerPolicy::Cycle,
                PolicyArg::SkillRotation => PlayerPolicy::SkillRotation,
            };
            let cfg = EncounterConfig {
                enemy_id: enemy,
                enemy_path: enemy_file.map(|p| p.to_string_lossy().into_owned()),
                rules_path: rules.map(|p| p.to_string_lossy().into_owned()),
                policy,
                seed,
                max_rounds: Some(max_rounds),
                ..EncounterConfig::default()
            };
            let res = simulate_encounter(cfg).context("encounter failed")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&res)?);
            } else {
                for line in &res.log {
                    println!("{}", line);
                }
                println!(
                    "winner={} rounds={} player_hp={} enemy_hp={}",
                    res.winner, res.rounds, res.player_hp_end, res.enemy_hp_end
                );
            }
        }
        Cmd::RulesDump => {
            print!("{}", serde_yaml::to_string(&CombatRules::default())?);
        }
        Cmd::CharacterDump { compact } => {
            let player = builtin_character("socrates")?;
            if compact {
                println!("{}", serde_json::to_string(&player)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&player)?);
            }
        }
    }
    Ok(())
}
