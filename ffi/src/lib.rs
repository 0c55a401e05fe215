use axiomancer_engine::api::{simulate_encounter, simulate_encounter_many, EncounterConfig};
use axiomancer_engine::{
    generate_enemy_choice, resolve_combat_round_with, Character, Choice, CombatRules, Dice, Enemy,
    SkillBook,
};
use jni::objects::{JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;
use serde::Deserialize;
use serde_json::{json, Value};

const VERSION: &str = "axiomancer-ffi 0.1.0";

fn ok(env: &JNIEnv, value: Value) -> jstring {
    let payload = json!({ "ok": true, "result": value });
    to_jstring(env, payload.to_string())
}

fn err(env: &JNIEnv, e: impl std::fmt::Display) -> jstring {
    let payload = json!({ "ok": false, "error": e.to_string() });
    to_jstring(env, payload.to_string())
}

fn to_jstring(env: &JNIEnv, s: String) -> jstring {
    env.new_string(s)
        .map(|js| js.into_raw())
        .unwrap_or(std::ptr::null_mut())
}

fn call_json(mut env: JNIEnv, json: JString, f: fn(&str) -> Result<Value, String>) -> jstring {
    let input: String = match env.get_string(&json) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    match f(&input) {
        Ok(value) => ok(&env, value),
        Err(e) => err(&env, e),
    }
}

#[no_mangle]
pub extern "system" fn Java_com_axiomancer_Ffi_version<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> jstring {
    to_jstring(&env, VERSION.to_string())
}

#[no_mangle]
pub extern "system" fn Java_com_axiomancer_Ffi_resolveRoundJson(
    env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    call_json(env, json, resolve_round_json)
}

#[no_mangle]
pub extern "system" fn Java_com_axiomancer_Ffi_enemyChoiceJson(
    env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    call_json(env, json, enemy_choice_json)
}

#[no_mangle]
pub extern "system" fn Java_com_axiomancer_Ffi_simulateEncounterJson(
    env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    call_json(env, json, simulate_encounter_json)
}

#[no_mangle]
pub extern "system" fn Java_com_axiomancer_Ffi_simulateEncounterManyJson(
    env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    call_json(env, json, simulate_encounter_many_json)
}

#[derive(Deserialize)]
struct RoundRequest {
    player: Character,
    enemy: Enemy,
    player_choice: Choice,
    enemy_choice: Choice,
    #[serde(default)]
    seed: u64,
    #[serde(default)]
    rules: CombatRules,
}

#[derive(Deserialize)]
struct EnemyChoiceRequest {
    enemy: Enemy,
    #[serde(default)]
    history: Vec<Choice>,
    #[serde(default)]
    seed: u64,
    #[serde(default)]
    rules: CombatRules,
}

// Plain Rust entry points, usable without a JVM.

pub fn resolve_round_json(input: &str) -> Result<Value, String> {
    let req: RoundRequest =
        serde_json::from_str(input).map_err(|e| format!("invalid_request: {}", e))?;
    let skills = SkillBook::builtin().map_err(|e| e.to_string())?;
    let mut dice = Dice::from_seed(req.seed);
    let result = resolve_combat_round_with(
        &req.player,
        &req.enemy,
        &req.player_choice,
        &req.enemy_choice,
        &mut dice,
        &req.rules,
        &skills,
    );
    serde_json::to_value(result).map_err(|e| e.to_string())
}

pub fn enemy_choice_json(input: &str) -> Result<Value, String> {
    let req: EnemyChoiceRequest =
        serde_json::from_str(input).map_err(|e| format!("invalid_request: {}", e))?;
    let mut dice = Dice::from_seed(req.seed);
    let choice = generate_enemy_choice(&req.enemy, &req.history, &mut dice, &req.rules.ai);
    serde_json::to_value(choice).map_err(|e| e.to_string())
}

pub fn simulate_encounter_json(input: &str) -> Result<Value, String> {
    let cfg: EncounterConfig =
        serde_json::from_str(input).map_err(|e| format!("invalid_config: {}", e))?;
    let result = simulate_encounter(cfg).map_err(|e| format!("{:#}", e))?;
    serde_json::to_value(result).map_err(|e| e.to_string())
}

/// Same as `simulate_encounter_json`, with an extra top-level `samples` (default 100).
pub fn simulate_encounter_many_json(input: &str) -> Result<Value, String> {
    let mut root: Value =
        serde_json::from_str(input).map_err(|e| format!("invalid_config: {}", e))?;
    let samples = match root.get("samples") {
        None => 100,
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| format!("invalid_config: samples must fit in u32, got {}", v))?,
    };
    if let Some(obj) = root.as_object_mut() {
        obj.remove("samples");
    }
    let cfg: EncounterConfig =
        serde_json::from_value(root).map_err(|e| format!("invalid_config: {}", e))?;
    let stats = simulate_encounter_many(cfg, samples).map_err(|e| format!("{:#}", e))?;
    serde_json::to_value(stats).map_err(|e| e.to_string())
}
