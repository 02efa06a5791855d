//! Roll execution and itemized outcomes
//!
//! The executor is a pure function of the expression and a stream of draws.
//! Callers own the random source and pass it in as a closure, so the same
//! seeded generator always yields the same outcome.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use super::dice::{DiceExpression, DiceGroup, DieType, Mechanic, Sign};
use super::seed::RollSeed;

/// One physical die and whether the mechanic kept it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieRoll {
    pub value: u32,
    pub kept: bool,
}

/// Result of one dice group, in expression order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupOutcome {
    /// Group notation without sign, e.g. `4d6dl1`
    pub notation: String,
    pub die: DieType,
    pub mechanic: Mechanic,
    pub sign: Sign,
    /// Every raw draw in roll order
    pub rolls: Vec<DieRoll>,
    /// Sum of kept dice, before the sign is applied
    pub subtotal: i64,
}

impl GroupOutcome {
    pub fn kept(&self) -> impl Iterator<Item = u32> + '_ {
        self.rolls.iter().filter(|r| r.kept).map(|r| r.value)
    }

    pub fn dropped(&self) -> impl Iterator<Item = u32> + '_ {
        self.rolls.iter().filter(|r| !r.kept).map(|r| r.value)
    }

    /// Signed amount this group adds to the total.
    pub fn contribution(&self) -> i64 {
        self.sign.apply(self.subtotal)
    }
}

/// Full, replayable result of evaluating one expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// Normalized notation of the evaluated expression
    pub expression: String,
    pub seed: RollSeed,
    pub groups: Vec<GroupOutcome>,
    pub modifier: i64,
    pub total: i64,
    pub is_critical_max: bool,
    pub is_critical_min: bool,
}

impl RollOutcome {
    /// Human-readable itemization, e.g. `4d6dl1[3, 5, ~1, 6] = 14; total 14`.
    ///
    /// Dropped dice are prefixed with `~`.
    pub fn breakdown(&self) -> String {
        let mut out = String::new();
        for (index, group) in self.groups.iter().enumerate() {
            match (index, group.sign) {
                (0, Sign::Plus) => {}
                (0, Sign::Minus) => out.push('-'),
                (_, sign) => {
                    let _ = write!(out, " {} ", sign.symbol());
                }
            }
            let dice: Vec<String> = group
                .rolls
                .iter()
                .map(|roll| {
                    if roll.kept {
                        roll.value.to_string()
                    } else {
                        format!("~{}", roll.value)
                    }
                })
                .collect();
            let _ = write!(out, "{}[{}] = {}", group.notation, dice.join(", "), group.subtotal);
        }

        if self.groups.is_empty() {
            let _ = write!(out, "{}", self.modifier);
        } else if self.modifier > 0 {
            let _ = write!(out, " + {}", self.modifier);
        } else if self.modifier < 0 {
            let _ = write!(out, " - {}", self.modifier.unsigned_abs());
        }

        let _ = write!(out, "; total {}", self.total);
        out
    }
}

impl DiceExpression {
    /// Execute the expression.
    ///
    /// `draw(faces)` must return a uniform value in `1..=faces`; out-of-range
    /// values are clamped. Groups draw in order, so a seeded `draw` makes the
    /// outcome fully reproducible.
    pub fn roll_with<F>(&self, seed: RollSeed, mut draw: F) -> RollOutcome
    where
        F: FnMut(u32) -> u32,
    {
        let groups: Vec<GroupOutcome> = self
            .groups()
            .iter()
            .map(|group| roll_group(group, &mut draw))
            .collect();

        let total = groups.iter().map(GroupOutcome::contribution).sum::<i64>() + self.modifier();

        let (is_critical_max, is_critical_min) = if self.is_single_d20() {
            let retained = groups.first().map_or(0, |g| g.subtotal);
            (retained == 20, retained == 1)
        } else {
            (false, false)
        };

        RollOutcome {
            expression: self.to_string(),
            seed,
            groups,
            modifier: self.modifier(),
            total,
            is_critical_max,
            is_critical_min,
        }
    }
}

fn roll_group<F>(group: &DiceGroup, draw: &mut F) -> GroupOutcome
where
    F: FnMut(u32) -> u32,
{
    let faces = group.faces();
    let values: Vec<u32> = (0..group.dice_rolled())
        .map(|_| draw(faces).clamp(1, faces))
        .collect();
    let kept = select(group.mechanic(), &values);

    let rolls: Vec<DieRoll> = values
        .iter()
        .zip(kept)
        .map(|(&value, kept)| DieRoll { value, kept })
        .collect();
    let subtotal = rolls
        .iter()
        .filter(|r| r.kept)
        .map(|r| i64::from(r.value))
        .sum();

    GroupOutcome {
        notation: group.notation(),
        die: group.die(),
        mechanic: group.mechanic(),
        sign: group.sign(),
        rolls,
        subtotal,
    }
}

/// Kept flag for every draw.
///
/// Ties resolve by roll order: the first-occurring die is dropped first
/// (or, for keep mechanics, kept first). Advantage and disadvantage keep
/// the first-occurring best or worst of their two draws.
fn select(mechanic: Mechanic, values: &[u32]) -> Vec<bool> {
    match mechanic {
        Mechanic::None => vec![true; values.len()],
        Mechanic::Advantage => mark(&descending(values), 1, true),
        Mechanic::Disadvantage => mark(&ascending(values), 1, true),
        Mechanic::DropLowest(k) => mark(&ascending(values), k as usize, false),
        Mechanic::DropHighest(k) => mark(&descending(values), k as usize, false),
        Mechanic::KeepHighest(k) => mark(&descending(values), k as usize, true),
        Mechanic::KeepLowest(k) => mark(&ascending(values), k as usize, true),
    }
}

/// Flag the first `k` ranked indices with `flag`, everything else with `!flag`.
fn mark(ranked: &[usize], k: usize, flag: bool) -> Vec<bool> {
    let mut flags = vec![!flag; ranked.len()];
    for &index in ranked.iter().take(k) {
        flags[index] = flag;
    }
    flags
}

fn ascending(values: &[u32]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by_key(|&i| (values[i], i));
    order
}

fn descending(values: &[u32]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by_key(|&i| (std::cmp::Reverse(values[i]), i));
    order
}
