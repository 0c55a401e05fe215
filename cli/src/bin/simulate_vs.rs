use anyhow::Context;
use axiomancer_engine::api::{simulate_setup_many, EncounterConfig, PlayerPolicy};
use axiomancer_engine::{Action, Aspect, Character, Enemy};
use clap::Parser;
use encoding_rs::Encoding;
use std::{fs, path::PathBuf};

#[derive(Parser)]
#[command(name = "simulate-vs")]
#[command(about = "Monte Carlo sim: many encounters vs one enemy")]
struct Args {
    /// Built-in enemy id
    #[arg(long, default_value = "philosophical_goblin")]
    enemy: String,

    /// Enemy JSON file (overrides --enemy)
    #[arg(long)]
    enemy_file: Option<PathBuf>,

    /// Optional player character JSON (if omitted, uses Socrates)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Number of trials
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// Safety cap on rounds per trial
    #[arg(long, default_value_t = 30)]
    max_rounds: u32,

    /// Player policy: random | cycle | fixed | skill-rotation
    #[arg(long, default_value = "random")]
    policy: String,

    /// Aspect for the fixed policy
    #[arg(long, default_value = "mind")]
    aspect: String,

    /// Action for the fixed policy
    #[arg(long, default_value = "attack")]
    action: String,

    /// Skill id for the fixed policy with `--action skill`
    #[arg(long)]
    skill: Option<String>,

    /// Optional rules file (YAML or JSON)
    #[arg(long)]
    rules: Option<PathBuf>,

    /// RNG base seed (trial i uses seed+i)
    #[arg(long, default_value_t = 12345)]
    seed: u64,
}

fn read_text_auto(path: &std::path::Path) -> anyhow::Result<String> {
    let bytes = fs::read(path)?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

fn load_json<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> anyhow::Result<T> {
    let text = read_text_auto(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn parse_policy(args: &Args) -> anyhow::Result<PlayerPolicy> {
    Ok(match args.policy.to_lowercase().as_str() {
        "cycle" => PlayerPolicy::Cycle,
        "skill-rotation" | "skill_rotation" => PlayerPolicy::SkillRotation,
        "fixed" => PlayerPolicy::Fixed {
            aspect: args.aspect.parse::<Aspect>()?,
            action: args.action.parse::<Action>()?,
            skill: args.skill.clone(),
        },
        _ => PlayerPolicy::Random,
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let policy = parse_policy(&args)?;

    let cfg = EncounterConfig {
        enemy_id: Some(args.enemy.clone()),
        rules_path: args.rules.as_ref().map(|p| p.to_string_lossy().into_owned()),
        policy: policy.clone(),
        seed: args.seed,
        max_rounds: Some(args.max_rounds),
        ..EncounterConfig::default()
    };
    let mut setup = cfg.load()?;
    if let Some(p) = args.enemy_file.as_ref() {
        setup.enemy = load_json::<Enemy>(p)?;
    }
    if let Some(p) = args.file.as_ref() {
        setup.player = load_json::<Character>(p)?;
    }
    let enemy_name = setup.enemy.name.clone();

    let stats = simulate_setup_many(&cfg, &setup, args.trials)?;

    let trials_f = args.trials.max(1) as f64;
    println!("simulate-vs results");
    println!("-------------------");
    println!("trials:             {}", args.trials);
    println!("enemy:              {}", enemy_name);
    println!("policy:             {:?}", policy);
    println!();
    println!("win rate:           {:.1}%", stats.player_wins as f64 / trials_f * 100.0);
    println!("loss rate:          {:.1}%", stats.enemy_wins as f64 / trials_f * 100.0);
    println!("draw rate:          {:.1}%", stats.draws as f64 / trials_f * 100.0);
    println!("avg rounds:         {:.2}", stats.avg_rounds);

    Ok(())
}
