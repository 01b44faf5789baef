#![deny(warnings)]

//! Headless CLI for the pack simulator: collection pulls, royal hunt, shortfall odds.

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};
use gacha_core::*;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
usage: gacha <expected|royal|bakushi> [options]

  expected   pulls needed to collect the wanted cards (Monte Carlo)
  royal      pulls and cost to get one card's royal finish (Monte Carlo)
  bakushi    odds of not having drawn a card naturally yet (closed form)

options:
  --config <file>        JSON or YAML config (replaces the flags below)
  --pack <selection|secret>
  --total-ur <n>         distinct URs in the pack (default 8)
  --card <name[:count][:nocraft]>   wanted card, repeatable (expected)
  --target <name>        target card name (royal)
  --no-craft             never craft (royal)
  --cost <yen>           price of a 10-pull (royal, default 2000)
  --pulls <n>            pulls made so far (bakushi)
  --target-count <n>     copies to have drawn (bakushi, default 1)
  -n, --iterations <n>   trial count
  --seed <n>             seed for a reproducible run
  --json                 print a JSON report
  -V, --version
  -h, --help";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Expected,
    Royal,
    Bakushi,
}

impl Mode {
    fn name(self) -> &'static str {
        match self {
            Mode::Expected => "expected",
            Mode::Royal => "royal",
            Mode::Bakushi => "bakushi",
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    mode: Option<Mode>,
    config: Option<PathBuf>,
    pack: Option<PackType>,
    total_ur: Option<u32>,
    cards: Vec<WantedCard>,
    target: Option<String>,
    no_craft: bool,
    cost: Option<Decimal>,
    pulls: Option<u64>,
    target_count: Option<u64>,
    iterations: Option<usize>,
    seed: Option<u64>,
    json: bool,
    version: bool,
    help: bool,
}

fn value(it: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    it.next().ok_or_else(|| anyhow!("{flag} needs a value"))
}

fn number<T>(it: &mut impl Iterator<Item = String>, flag: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value(it, flag)?
        .parse::<T>()
        .with_context(|| format!("invalid value for {flag}"))
}

/// Parse `name[:count][:nocraft]` into the `index`-th wanted card.
fn parse_card(spec: &str, index: usize) -> Result<WantedCard> {
    let mut parts: Vec<&str> = spec.split(':').collect();
    let mut disable_craft = false;
    if parts.len() > 1 && parts[parts.len() - 1].eq_ignore_ascii_case("nocraft") {
        disable_craft = true;
        parts.pop();
    }
    let mut count = 1;
    if parts.len() > 1 {
        if let Ok(n) = parts[parts.len() - 1].trim().parse::<u8>() {
            count = n;
            parts.pop();
        }
    }
    let name = parts.join(":").trim().to_string();
    if name.is_empty() {
        bail!("card '{spec}' has no name");
    }
    Ok(WantedCard {
        id: CardId(format!("card-{}", index + 1)),
        name,
        count,
        disable_craft,
    })
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut out = Args::default();
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "expected" => out.mode = Some(Mode::Expected),
            "royal" => out.mode = Some(Mode::Royal),
            "bakushi" | "shortfall" => out.mode = Some(Mode::Bakushi),
            "--config" => out.config = Some(PathBuf::from(value(&mut it, "--config")?)),
            "--pack" => out.pack = Some(value(&mut it, "--pack")?.parse()?),
            "--total-ur" => out.total_ur = Some(number(&mut it, "--total-ur")?),
            "--card" => {
                let card = parse_card(&value(&mut it, "--card")?, out.cards.len())?;
                out.cards.push(card);
            }
            "--target" => out.target = Some(value(&mut it, "--target")?),
            "--no-craft" => out.no_craft = true,
            "--cost" => out.cost = Some(number(&mut it, "--cost")?),
            "--pulls" => out.pulls = Some(number(&mut it, "--pulls")?),
            "--target-count" => out.target_count = Some(number(&mut it, "--target-count")?),
            "-n" | "--iterations" => out.iterations = Some(number(&mut it, "--iterations")?),
            "--seed" => out.seed = Some(number(&mut it, "--seed")?),
            "--json" => out.json = true,
            "-V" | "--version" => out.version = true,
            "-h" | "--help" => out.help = true,
            other => bail!("unknown argument: {other}\n\n{USAGE}"),
        }
    }
    Ok(out)
}

/// Load a config from JSON, or YAML when the extension says so.
fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let parsed = if is_yaml {
        serde_yaml::from_str(&text).with_context(|| format!("parsing YAML {}", path.display()))?
    } else {
        serde_json::from_str(&text).with_context(|| format!("parsing JSON {}", path.display()))?
    };
    Ok(parsed)
}

const DEFAULT_TOTAL_UR: u32 = 8;

fn pack_config(args: &Args) -> Result<PackConfig> {
    let config = match &args.config {
        Some(path) => load_config::<PackConfig>(path)?,
        None => PackConfig {
            pack_type: args.pack.unwrap_or(PackType::Selection),
            total_ur_in_pack: args.total_ur.unwrap_or(DEFAULT_TOTAL_UR),
            wanted_cards: args.cards.clone(),
        },
    };
    let config = config.without_blank_names();
    validate_pack_config(&config)?;
    Ok(config)
}

fn royal_config(args: &Args) -> Result<RoyalChallengeConfig> {
    let config = match &args.config {
        Some(path) => load_config::<RoyalChallengeConfig>(path)?,
        None => {
            let target = args
                .target
                .clone()
                .ok_or_else(|| anyhow!("--target is required for royal"))?;
            let mut config = RoyalChallengeConfig::new(
                args.pack.unwrap_or(PackType::Selection),
                args.total_ur.unwrap_or(DEFAULT_TOTAL_UR),
                target.trim(),
                args.no_craft,
            );
            if let Some(cost) = args.cost {
                config.cost_per_ten_pulls = cost;
            }
            config
        }
    };
    validate_royal_config(&config)?;
    Ok(config)
}

fn bakushi_config(args: &Args) -> Result<BakushiConfig> {
    let config = match &args.config {
        Some(path) => load_config::<BakushiConfig>(path)?,
        None => BakushiConfig {
            pack_type: args.pack.unwrap_or(PackType::Selection),
            total_ur_in_pack: args.total_ur.unwrap_or(DEFAULT_TOTAL_UR),
            pulls: args
                .pulls
                .ok_or_else(|| anyhow!("--pulls is required for bakushi"))?,
            target_count: args.target_count.unwrap_or(1),
        },
    };
    validate_bakushi_config(&config)?;
    Ok(config)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<T> {
    command: &'static str,
    generated_at: DateTime<Utc>,
    seed: Option<u64>,
    iterations: Option<usize>,
    elapsed_ms: u128,
    result: T,
}

fn print_report<T: Serialize>(
    mode: Mode,
    seed: Option<u64>,
    iterations: Option<usize>,
    started: Instant,
    result: T,
) -> Result<()> {
    let report = Report {
        command: mode.name(),
        generated_at: Utc::now(),
        seed,
        iterations,
        elapsed_ms: started.elapsed().as_millis(),
        result,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_expected(args: &Args) -> Result<()> {
    let config = pack_config(args)?;
    let iterations = args.iterations.unwrap_or(rates::DEFAULT_ITERATIONS);
    let started = Instant::now();
    let mut rng = gacha_sim::seeded_rng(args.seed);
    let result = gacha_sim::run_simulation(&config, iterations, &mut rng)?;
    info!(elapsed_ms = started.elapsed().as_millis() as u64, "expected done");

    if args.json {
        return print_report(Mode::Expected, args.seed, Some(iterations), started, result);
    }
    println!(
        "Pack {} | URs in pack: {} | wanted: {} cards, {} copies | crafting: {}",
        config.pack_type,
        config.total_ur_in_pack,
        config.wanted_cards.len(),
        config.total_wanted_count(),
        if config.has_craftable_cards() { "on" } else { "off" }
    );
    println!(
        "Pulls | average: {:.1} | median: {} | p90: {} | URs drawn: {:.1}",
        result.average_pulls, result.median_pulls, result.percentile_90, result.average_ur_pulled
    );
    Ok(())
}

fn run_royal(args: &Args) -> Result<()> {
    let config = royal_config(args)?;
    let iterations = args.iterations.unwrap_or(rates::DEFAULT_ROYAL_ITERATIONS);
    let started = Instant::now();
    let mut rng = gacha_sim::seeded_rng(args.seed);
    let result = gacha_sim::run_royal_simulation(&config, iterations, &mut rng)?;
    info!(elapsed_ms = started.elapsed().as_millis() as u64, "royal done");

    if args.json {
        return print_report(Mode::Royal, args.seed, Some(iterations), started, result);
    }
    println!(
        "Royal {} | pack {} | URs in pack: {} | crafting: {}",
        config.target_card_name,
        config.pack_type,
        config.total_ur_in_pack,
        if config.disable_craft { "off" } else { "on" }
    );
    println!(
        "Pulls | average: {:.1} | median: {} | p90: {}",
        result.average_pulls, result.median_pulls, result.percentile_90
    );
    println!(
        "Cost  | average: ¥{} | median: ¥{} | p90: ¥{}",
        result.average_cost, result.median_cost, result.percentile_90_cost
    );
    Ok(())
}

fn run_bakushi(args: &Args) -> Result<()> {
    let config = bakushi_config(args)?;
    let started = Instant::now();
    let result = gacha_odds::calculate_bakushi(&config);

    if args.json {
        return print_report(Mode::Bakushi, None, None, started, result);
    }
    println!(
        "Shortfall | {} pack, 1 of {} URs | fewer than {} in {} pulls: {}",
        config.pack_type,
        config.total_ur_in_pack,
        config.target_count,
        config.pulls,
        result.probability_percent
    );
    println!(
        "Expected pulls for {}: {}",
        config.target_count, result.expected_pulls
    );
    Ok(())
}

fn main() -> Result<()> {
    // Logs go to stderr so JSON reports stay clean on stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    if args.version {
        println!(
            "gacha {} ({} {})",
            env!("CARGO_PKG_VERSION"),
            env!("GACHA_GIT_SHA"),
            env!("GACHA_BUILD_DATE")
        );
        return Ok(());
    }
    let Some(mode) = args.mode.filter(|_| !args.help) else {
        println!("{USAGE}");
        return Ok(());
    };
    info!(mode = mode.name(), seed = ?args.seed, config = ?args.config, "starting CLI");

    match mode {
        Mode::Expected => run_expected(&args),
        Mode::Royal => run_royal(&args),
        Mode::Bakushi => run_bakushi(&args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn card_specs() {
        let c = parse_card("Ash Blossom", 0).unwrap();
        assert_eq!(c.id, CardId::from("card-1"));
        assert_eq!((c.name.as_str(), c.count, c.disable_craft), ("Ash Blossom", 1, false));

        let c = parse_card("Nibiru:3:nocraft", 4).unwrap();
        assert_eq!(c.id, CardId::from("card-5"));
        assert_eq!((c.name.as_str(), c.count, c.disable_craft), ("Nibiru", 3, true));

        let c = parse_card("Sky Striker: Raye:2", 1).unwrap();
        assert_eq!((c.name.as_str(), c.count), ("Sky Striker: Raye", 2));

        assert!(parse_card(":2", 0).is_err());
    }

    #[test]
    fn expected_from_flags() {
        let a = args(&[
            "expected", "--pack", "secret", "--total-ur", "10", "--card", "A:3", "--card",
            "B:1:nocraft", "-n", "500", "--seed", "7",
        ])
        .unwrap();
        assert_eq!(a.mode, Some(Mode::Expected));
        let cfg = pack_config(&a).unwrap();
        assert_eq!(cfg.pack_type, PackType::Secret);
        assert_eq!(cfg.total_ur_in_pack, 10);
        assert_eq!(cfg.total_wanted_count(), 4);
        assert_eq!(a.iterations, Some(500));
        assert_eq!(a.seed, Some(7));
    }

    #[test]
    fn invalid_input_is_reported() {
        assert!(args(&["expected", "--bogus"]).is_err());
        assert!(args(&["--pack", "premium"]).is_err());
        assert!(args(&["--pulls"]).is_err());
        assert!(args(&["--pulls", "many"]).is_err());

        let no_cards = args(&["expected"]).unwrap();
        assert!(pack_config(&no_cards).is_err());
        let no_target = args(&["royal"]).unwrap();
        assert!(royal_config(&no_target).is_err());
        let no_pulls = args(&["bakushi"]).unwrap();
        assert!(bakushi_config(&no_pulls).is_err());
    }

    #[test]
    fn royal_cost_override() {
        let a = args(&["royal", "--target", " Droll ", "--cost", "1500", "--no-craft"]).unwrap();
        let cfg = royal_config(&a).unwrap();
        assert_eq!(cfg.target_card_name, "Droll");
        assert_eq!(cfg.cost_per_ten_pulls, Decimal::from(1500));
        assert!(cfg.disable_craft);
    }

    #[test]
    fn yaml_and_json_configs_load() {
        let dir = std::env::temp_dir();
        let yaml = dir.join(format!("gacha-cli-test-{}.yaml", std::process::id()));
        std::fs::write(
            &yaml,
            "packType: secret\ntotalUrInPack: 8\npulls: 40\ntargetCount: 2\n",
        )
        .unwrap();
        let a = args(&["bakushi", "--config", yaml.to_str().unwrap()]).unwrap();
        let cfg = bakushi_config(&a).unwrap();
        assert_eq!(cfg.pack_type, PackType::Secret);
        assert_eq!(cfg.target_count, 2);
        std::fs::remove_file(&yaml).unwrap();

        let json = dir.join(format!("gacha-cli-test-{}.json", std::process::id()));
        std::fs::write(
            &json,
            r#"{"packType":"selection","totalUrInPack":8,"wantedCards":[{"id":"x","name":" ","count":1},{"id":"y","name":"Ash","count":2}]}"#,
        )
        .unwrap();
        let a = args(&["expected", "--config", json.to_str().unwrap()]).unwrap();
        let cfg = pack_config(&a).unwrap();
        assert_eq!(cfg.wanted_cards.len(), 1);
        assert_eq!(cfg.wanted_cards[0].id, CardId::from("y"));
        std::fs::remove_file(&json).unwrap();
    }
}
