//! rdk-config
//!
//! Layered YAML configuration for the consolidation-range engine.
//!
//! Documents merge in order (base -> env -> strategy overrides; later docs
//! win), are refused if any leaf string looks like a secret literal, and are
//! canonicalised to JSON and hashed so two operators can compare effective
//! configs by hash alone. The typed [`rdk_engine::StrategyConfig`] is then
//! extracted from the `/strategy` section with defaults and validation.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;

use rdk_engine::StrategyConfig;

/// Known secret-like prefixes. If any leaf string value in the effective
/// config starts with one of these, loading aborts with CONFIG_SECRET_DETECTED.
/// Credentials belong in the environment, never in layered YAML.
const SECRET_PREFIXES: &[&str] = &[
    "sk-",        // Stripe / OpenAI style
    "sk_live",    // Stripe live
    "sk_test",    // Stripe test
    "AKIA",       // AWS access key ID
    "-----BEGIN", // PEM private keys
    "ghp_",       // GitHub PAT
    "gho_",       // GitHub OAuth
    "glpat-",     // GitLab PAT
    "xoxb-",      // Slack bot token
    "xoxp-",      // Slack user token
];

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
}

pub fn load_layered_yaml(paths: &[&str]) -> Result<LoadedConfig> {
    let mut docs: Vec<String> = Vec::new();
    for p in paths {
        let raw =
            fs::read_to_string(p).with_context(|| format!("failed to read yaml path: {p}"))?;
        docs.push(raw);
    }

    let doc_refs: Vec<&str> = docs.iter().map(|s| s.as_str()).collect();
    load_layered_yaml_from_strings(&doc_refs)
}

pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    // Merge YAML docs in order: earlier docs are base, later docs override.
    let mut merged = serde_json::json!({});
    for raw in yaml_docs {
        let v_yaml: serde_yaml::Value = serde_yaml::from_str(raw).context("invalid yaml")?;
        let v_json = serde_json::to_value(v_yaml).context("yaml->json conversion failed")?;
        merged = deep_merge(merged, v_json);
    }

    enforce_no_secret_literals(&merged)?;

    let canonical_json = canonicalize_json(&merged)?;
    let config_hash = sha256_hex(canonical_json.as_bytes());
    Ok(LoadedConfig {
        config_hash,
        canonical_json,
        config_json: merged,
    })
}

// ---------------------------------------------------------------------------
// Typed strategy section
// ---------------------------------------------------------------------------

/// Raw `/strategy` section as it appears in YAML; every knob optional so
/// layers can override individual keys.
#[derive(Debug, Deserialize, Default)]
struct StrategySection {
    symbol: Option<String>,
    lookback: Option<i64>,
    range_threshold: Option<f64>,
    stop_loss_pct: Option<f64>,
    take_profit_pct: Option<f64>,
    session_end_lead_secs: Option<i64>,
}

/// Extract and validate the strategy config from a loaded document.
///
/// `strategy.symbol` is required; every other key falls back to the
/// reference defaults (lookback 20, range 2%, stop 1%, target 2%, flatten
/// lead 15 minutes).
pub fn strategy_config(loaded: &LoadedConfig) -> Result<StrategyConfig> {
    let section: StrategySection = match loaded.config_json.pointer("/strategy") {
        Some(v) => serde_json::from_value(v.clone())
            .context("config section '/strategy' has unexpected shape")?,
        None => StrategySection::default(),
    };

    let symbol = match section.symbol {
        Some(s) if !s.trim().is_empty() => s,
        _ => bail!("CONFIG_INVALID: strategy.symbol is required and must be non-empty"),
    };

    let defaults = StrategyConfig::defaults(symbol);
    let cfg = StrategyConfig {
        lookback: match section.lookback {
            Some(n) => usize::try_from(n)
                .ok()
                .filter(|n| *n > 0)
                .with_context(|| format!("CONFIG_INVALID: strategy.lookback must be > 0, got {n}"))?,
            None => defaults.lookback,
        },
        range_threshold: section.range_threshold.unwrap_or(defaults.range_threshold),
        stop_loss_pct: section.stop_loss_pct.unwrap_or(defaults.stop_loss_pct),
        take_profit_pct: section.take_profit_pct.unwrap_or(defaults.take_profit_pct),
        session_end_lead_secs: section
            .session_end_lead_secs
            .unwrap_or(defaults.session_end_lead_secs),
        ..defaults
    };

    validate_positive_ratio("strategy.range_threshold", cfg.range_threshold)?;
    validate_positive_ratio("strategy.stop_loss_pct", cfg.stop_loss_pct)?;
    validate_positive_ratio("strategy.take_profit_pct", cfg.take_profit_pct)?;
    if cfg.session_end_lead_secs <= 0 {
        bail!(
            "CONFIG_INVALID: strategy.session_end_lead_secs must be > 0, got {}",
            cfg.session_end_lead_secs
        );
    }

    Ok(cfg)
}

fn validate_positive_ratio(key: &str, v: f64) -> Result<()> {
    if !v.is_finite() || v <= 0.0 {
        bail!("CONFIG_INVALID: {key} must be a finite value > 0, got {v}");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Merge / canonicalise / hash
// ---------------------------------------------------------------------------

fn deep_merge(a: Value, b: Value) -> Value {
    match (a, b) {
        (Value::Object(mut a_map), Value::Object(b_map)) => {
            for (k, b_val) in b_map {
                let a_val = a_map.remove(&k).unwrap_or(Value::Null);
                a_map.insert(k, deep_merge(a_val, b_val));
            }
            Value::Object(a_map)
        }
        (_, b_other) => b_other,
    }
}

fn canonicalize_json(v: &Value) -> Result<String> {
    // Merge order is deterministic given deterministic YAML input ordering,
    // so a compact serialization is a stable canonical form.
    let s = serde_json::to_string(v).context("canonical json serialize failed")?;
    Ok(s)
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let out = hasher.finalize();
    hex::encode(out)
}

// ---------------------------------------------------------------------------
// Secret-literal guard
// ---------------------------------------------------------------------------

fn enforce_no_secret_literals(v: &Value) -> Result<()> {
    let mut leaves = Vec::new();
    collect_leaf_pointers(v, "", &mut leaves);

    for ptr in leaves {
        if let Some(val) = v.pointer(&ptr) {
            if let Some(s) = val.as_str() {
                if looks_like_secret(s) {
                    bail!("CONFIG_SECRET_DETECTED leaf={} value=REDACTED", ptr);
                }
            }
        }
    }
    Ok(())
}

fn looks_like_secret(s: &str) -> bool {
    let t = s.trim();
    if t.len() < 8 {
        return false;
    }
    SECRET_PREFIXES.iter().any(|p| t.starts_with(p))
}

fn collect_leaf_pointers(v: &Value, prefix: &str, out: &mut Vec<String>) {
    match v {
        Value::Object(map) => {
            for (k, vv) in map.iter() {
                let next = format!("{}/{}", prefix, escape_pointer_token(k));
                collect_leaf_pointers(vv, &next, out);
            }
        }
        Value::Array(arr) => {
            for (i, vv) in arr.iter().enumerate() {
                let next = format!("{}/{}", prefix, i);
                collect_leaf_pointers(vv, &next, out);
            }
        }
        _ => {
            let p = if prefix.is_empty() {
                "/".to_string()
            } else {
                prefix.to_string()
            };
            out.push(p);
        }
    }
}

fn escape_pointer_token(s: &str) -> String {
    s.replace('~', "~0").replace('/', "~1")
}
