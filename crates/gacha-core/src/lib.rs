#![deny(warnings)]

//! Core domain models and invariants for the UR pack simulator.
//!
//! This crate defines the serializable configuration and result types shared
//! by the Monte Carlo engine and the analytic model, plus validation helpers
//! that a caller runs before handing a configuration to either of them.

pub mod rates;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Opaque identifier of a wanted card, e.g. a UUID.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        CardId(s.to_string())
    }
}

/// Kinds of packs that can be opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackType {
    /// Every UR is drawn from the pack's own pool.
    Selection,
    /// Mixes out-of-pack and in-pack URs, with a pity guarantee.
    Secret,
}

impl PackType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackType::Selection => "selection",
            PackType::Secret => "secret",
        }
    }
}

impl std::fmt::Display for PackType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PackType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "selection" => Ok(PackType::Selection),
            "secret" => Ok(PackType::Secret),
            other => Err(ValidationError::UnknownPackType(other.to_string())),
        }
    }
}

/// A card the player wants to own, and how many copies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WantedCard {
    /// Identity of the card; display names may repeat.
    pub id: CardId,
    /// Display name.
    pub name: String,
    /// Copies wanted, 1-3.
    pub count: u8,
    /// When set, CP is never spent crafting this card.
    #[serde(default)]
    pub disable_craft: bool,
}

/// Input to the collection simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackConfig {
    pub pack_type: PackType,
    /// Number of distinct URs in the pack (>= number of wanted cards).
    pub total_ur_in_pack: u32,
    /// Wanted cards; list order is the crafting priority.
    pub wanted_cards: Vec<WantedCard>,
}

impl PackConfig {
    /// Total copies wanted across all cards.
    pub fn total_wanted_count(&self) -> u32 {
        self.wanted_cards.iter().map(|c| u32::from(c.count)).sum()
    }

    /// Whether at least one wanted card may be crafted.
    pub fn has_craftable_cards(&self) -> bool {
        self.wanted_cards.iter().any(|c| !c.disable_craft)
    }

    /// Copy of the config without cards whose name is blank.
    pub fn without_blank_names(&self) -> PackConfig {
        PackConfig {
            pack_type: self.pack_type,
            total_ur_in_pack: self.total_ur_in_pack,
            wanted_cards: self
                .wanted_cards
                .iter()
                .filter(|c| !c.name.trim().is_empty())
                .cloned()
                .collect(),
        }
    }
}

fn default_cost_per_ten_pulls() -> Decimal {
    Decimal::from(rates::COST_PER_TEN_PULLS)
}

/// Input to the royal-hunt simulation.
///
/// The target is structurally "one UR slot chosen uniformly among
/// `total_ur_in_pack`"; `target_card_name` is only carried for display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoyalChallengeConfig {
    pub pack_type: PackType,
    pub total_ur_in_pack: u32,
    pub target_card_name: String,
    #[serde(default)]
    pub disable_craft: bool,
    /// Real-money price of a 10-pull.
    #[serde(default = "default_cost_per_ten_pulls")]
    pub cost_per_ten_pulls: Decimal,
}

impl RoyalChallengeConfig {
    pub fn new(
        pack_type: PackType,
        total_ur_in_pack: u32,
        target_card_name: impl Into<String>,
        disable_craft: bool,
    ) -> Self {
        Self {
            pack_type,
            total_ur_in_pack,
            target_card_name: target_card_name.into(),
            disable_craft,
            cost_per_ten_pulls: default_cost_per_ten_pulls(),
        }
    }
}

/// Input to the analytic shortfall model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BakushiConfig {
    pub pack_type: PackType,
    pub total_ur_in_pack: u32,
    /// Pulls already made.
    pub pulls: u64,
    /// Copies that should have been drawn naturally.
    pub target_count: u64,
}

/// Aggregate of a collection simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// Mean pulls, rounded to one decimal.
    pub average_pulls: f64,
    pub median_pulls: u64,
    #[serde(rename = "percentile90")]
    pub percentile_90: u64,
    /// Mean URs drawn per trial, rounded to one decimal.
    pub average_ur_pulled: f64,
}

/// Aggregate of a royal-hunt simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoyalChallengeResult {
    pub average_pulls: f64,
    pub median_pulls: u64,
    #[serde(rename = "percentile90")]
    pub percentile_90: u64,
    /// Costs serialize as JSON numbers, like the pull statistics.
    #[serde(with = "rust_decimal::serde::float")]
    pub average_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub median_cost: Decimal,
    #[serde(rename = "percentile90Cost", with = "rust_decimal::serde::float")]
    pub percentile_90_cost: Decimal,
}

/// Result of the analytic shortfall model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BakushiResult {
    /// P(fewer than `target_count` natural draws in `pulls`).
    pub probability: f64,
    /// `probability` rendered as a percentage string.
    pub probability_percent: String,
    /// Pulls expected to reach `target_count`, rounded.
    pub expected_pulls: u64,
}

/// Maximum copies of one card that may be requested.
pub const MAX_COPIES: u8 = 3;

/// Validation errors for caller-side configuration contracts.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Pack type string not recognised.
    #[error("unknown pack type: {0}")]
    UnknownPackType(String),
    /// A pack must contain at least one UR.
    #[error("pack must contain at least one UR")]
    NoUrInPack,
    /// Nothing to collect.
    #[error("no wanted cards given")]
    NoWantedCards,
    /// More wanted cards than distinct URs in the pack.
    #[error("{wanted} wanted cards exceed the {total} URs in the pack")]
    TooManyWantedCards { wanted: usize, total: u32 },
    /// Card name is empty after trimming.
    #[error("card {0} has a blank name")]
    BlankName(String),
    /// Same id used twice.
    #[error("duplicate card id: {0}")]
    DuplicateId(String),
    /// Requested copies outside 1-3.
    #[error("card {id} requests {count} copies (allowed 1-3)")]
    CountOutOfRange { id: String, count: u8 },
    /// Royal hunt without a target name.
    #[error("target card name is blank")]
    BlankTarget,
    /// Price must be non-negative.
    #[error("negative cost per 10 pulls")]
    NegativeCost,
    /// Shortfall needs at least one pull.
    #[error("pulls must be > 0")]
    NoPulls,
    /// Shortfall needs a positive target.
    #[error("target count must be > 0")]
    NoTargetCount,
}

fn validate_total_ur(total_ur_in_pack: u32) -> Result<(), ValidationError> {
    if total_ur_in_pack == 0 {
        return Err(ValidationError::NoUrInPack);
    }
    Ok(())
}

/// Validate a wanted card on its own.
pub fn validate_wanted_card(card: &WantedCard) -> Result<(), ValidationError> {
    if card.name.trim().is_empty() {
        return Err(ValidationError::BlankName(card.id.0.clone()));
    }
    if !(1..=MAX_COPIES).contains(&card.count) {
        return Err(ValidationError::CountOutOfRange {
            id: card.id.0.clone(),
            count: card.count,
        });
    }
    Ok(())
}

/// Validate a collection config, including cross-card rules.
pub fn validate_pack_config(config: &PackConfig) -> Result<(), ValidationError> {
    validate_total_ur(config.total_ur_in_pack)?;
    if config.wanted_cards.is_empty() {
        return Err(ValidationError::NoWantedCards);
    }
    if config.wanted_cards.len() > config.total_ur_in_pack as usize {
        return Err(ValidationError::TooManyWantedCards {
            wanted: config.wanted_cards.len(),
            total: config.total_ur_in_pack,
        });
    }
    let mut ids: BTreeSet<&CardId> = BTreeSet::new();
    for card in &config.wanted_cards {
        validate_wanted_card(card)?;
        if !ids.insert(&card.id) {
            return Err(ValidationError::DuplicateId(card.id.0.clone()));
        }
    }
    Ok(())
}

/// Validate a royal-hunt config.
pub fn validate_royal_config(config: &RoyalChallengeConfig) -> Result<(), ValidationError> {
    validate_total_ur(config.total_ur_in_pack)?;
    if config.target_card_name.trim().is_empty() {
        return Err(ValidationError::BlankTarget);
    }
    if config.cost_per_ten_pulls < Decimal::ZERO {
        return Err(ValidationError::NegativeCost);
    }
    Ok(())
}

/// Validate a shortfall config.
pub fn validate_bakushi_config(config: &BakushiConfig) -> Result<(), ValidationError> {
    validate_total_ur(config.total_ur_in_pack)?;
    if config.pulls == 0 {
        return Err(ValidationError::NoPulls);
    }
    if config.target_count == 0 {
        return Err(ValidationError::NoTargetCount);
    }
    Ok(())
}
