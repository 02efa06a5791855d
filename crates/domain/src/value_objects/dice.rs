//! Dice value objects
//!
//! A [`DiceExpression`] is the validated, immutable form of a notation string
//! such as `2d6+1d4+2`, `1d20adv` or `4d6dl1`. Parsing lives in
//! `dice_notation`, execution in `roll_outcome`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DiceParseError;

/// Largest number of dice a single group may roll.
pub const MAX_DICE_PER_GROUP: u64 = 100;

/// Largest number of dice groups in one expression.
pub const MAX_GROUPS_PER_EXPRESSION: usize = 20;

/// Largest magnitude of the folded constant modifier.
pub const MAX_MODIFIER: i64 = 1_000_000;

/// Accepted die sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DieType {
    #[serde(rename = "d4")]
    D4,
    #[serde(rename = "d6")]
    D6,
    #[serde(rename = "d8")]
    D8,
    #[serde(rename = "d10")]
    D10,
    #[serde(rename = "d12")]
    D12,
    #[serde(rename = "d20")]
    D20,
    #[serde(rename = "d100")]
    D100,
}

impl DieType {
    pub const ALL: [DieType; 7] = [
        DieType::D4,
        DieType::D6,
        DieType::D8,
        DieType::D10,
        DieType::D12,
        DieType::D20,
        DieType::D100,
    ];

    pub fn from_faces(faces: u64) -> Result<Self, DiceParseError> {
        match faces {
            4 => Ok(Self::D4),
            6 => Ok(Self::D6),
            8 => Ok(Self::D8),
            10 => Ok(Self::D10),
            12 => Ok(Self::D12),
            20 => Ok(Self::D20),
            100 => Ok(Self::D100),
            other => Err(DiceParseError::InvalidDieType(other)),
        }
    }

    pub const fn faces(&self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
        }
    }
}

impl fmt::Display for DieType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.faces())
    }
}

/// Selection rule applied to the raw dice of one group.
///
/// Keep/drop variants carry `k`, the number of dice kept or dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "k", rename_all = "snake_case")]
pub enum Mechanic {
    /// Every die counts.
    #[default]
    None,
    /// Roll the single die twice, keep the higher value.
    Advantage,
    /// Roll the single die twice, keep the lower value.
    Disadvantage,
    DropLowest(u32),
    DropHighest(u32),
    KeepHighest(u32),
    KeepLowest(u32),
}

impl Mechanic {
    /// The `k` argument for keep/drop mechanics.
    pub fn argument(&self) -> Option<u32> {
        match self {
            Self::DropLowest(k) | Self::DropHighest(k) | Self::KeepHighest(k) | Self::KeepLowest(k) => {
                Some(*k)
            }
            Self::None | Self::Advantage | Self::Disadvantage => None,
        }
    }

    fn validate(&self, count: u32) -> Result<(), DiceParseError> {
        match self {
            Self::None => Ok(()),
            Self::Advantage | Self::Disadvantage if count != 1 => Err(DiceParseError::mechanic(
                format!("'{self}' applies to a single die, got {count} dice"),
            )),
            Self::Advantage | Self::Disadvantage => Ok(()),
            Self::DropLowest(k) | Self::DropHighest(k) | Self::KeepHighest(k) | Self::KeepLowest(k) => {
                if *k == 0 || *k >= count {
                    Err(DiceParseError::mechanic(format!(
                        "'{self}' needs 1 <= k < {count} for {count} dice"
                    )))
                } else {
                    Ok(())
                }
            }
        }
    }
}

impl fmt::Display for Mechanic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Advantage => f.write_str("adv"),
            Self::Disadvantage => f.write_str("dis"),
            Self::DropLowest(k) => write!(f, "dl{k}"),
            Self::DropHighest(k) => write!(f, "dh{k}"),
            Self::KeepHighest(k) => write!(f, "kh{k}"),
            Self::KeepLowest(k) => write!(f, "kl{k}"),
        }
    }
}

/// Whether a group is added to or subtracted from the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sign {
    #[default]
    Plus,
    Minus,
}

impl Sign {
    pub fn apply(&self, value: i64) -> i64 {
        match self {
            Self::Plus => value,
            Self::Minus => -value,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
        }
    }
}

/// One `NdM` term with its optional mechanic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceGroup {
    count: u32,
    die: DieType,
    mechanic: Mechanic,
    sign: Sign,
}

impl DiceGroup {
    /// Validate and build a group.
    ///
    /// Checks run in order: die size, dice count, mechanic argument.
    pub fn new(count: u64, faces: u64, mechanic: Mechanic) -> Result<Self, DiceParseError> {
        let die = DieType::from_faces(faces)?;
        if count == 0 || count > MAX_DICE_PER_GROUP {
            return Err(DiceParseError::TooManyDice(count));
        }
        // count <= 100 here
        let count = count as u32;
        mechanic.validate(count)?;
        Ok(Self {
            count,
            die,
            mechanic,
            sign: Sign::Plus,
        })
    }

    pub fn with_sign(mut self, sign: Sign) -> Self {
        self.sign = sign;
        self
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn die(&self) -> DieType {
        self.die
    }

    pub fn faces(&self) -> u32 {
        self.die.faces()
    }

    pub fn mechanic(&self) -> Mechanic {
        self.mechanic
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Number of physical dice drawn. Advantage and disadvantage draw two.
    pub fn dice_rolled(&self) -> u32 {
        match self.mechanic {
            Mechanic::Advantage | Mechanic::Disadvantage => 2,
            _ => self.count,
        }
    }

    /// Number of drawn dice that count toward the subtotal.
    pub fn dice_kept(&self) -> u32 {
        match self.mechanic {
            Mechanic::None => self.count,
            Mechanic::Advantage | Mechanic::Disadvantage => 1,
            Mechanic::DropLowest(k) | Mechanic::DropHighest(k) => self.count - k,
            Mechanic::KeepHighest(k) | Mechanic::KeepLowest(k) => k,
        }
    }

    /// Smallest possible signed contribution to the total.
    pub fn min_contribution(&self) -> i64 {
        let low = i64::from(self.dice_kept());
        let high = low * i64::from(self.faces());
        match self.sign {
            Sign::Plus => low,
            Sign::Minus => -high,
        }
    }

    /// Largest possible signed contribution to the total.
    pub fn max_contribution(&self) -> i64 {
        let low = i64::from(self.dice_kept());
        let high = low * i64::from(self.faces());
        match self.sign {
            Sign::Plus => high,
            Sign::Minus => -low,
        }
    }

    /// Notation without the sign, e.g. `4d6dl1`.
    pub fn notation(&self) -> String {
        format!("{}{}{}", self.count, self.die, self.mechanic)
    }
}

impl fmt::Display for DiceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation())
    }
}

/// A parsed dice expression: ordered groups plus an aggregated constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceExpression {
    groups: Vec<DiceGroup>,
    modifier: i64,
}

impl DiceExpression {
    /// Build an expression, enforcing that it rolls dice or adds something.
    pub fn new(groups: Vec<DiceGroup>, modifier: i64) -> Result<Self, DiceParseError> {
        if groups.is_empty() && modifier == 0 {
            return Err(DiceParseError::malformed(
                "expression has no dice and no modifier",
            ));
        }
        if groups.len() > MAX_GROUPS_PER_EXPRESSION {
            return Err(DiceParseError::malformed(format!(
                "at most {MAX_GROUPS_PER_EXPRESSION} dice groups allowed, got {}",
                groups.len()
            )));
        }
        if !(-MAX_MODIFIER..=MAX_MODIFIER).contains(&modifier) {
            return Err(DiceParseError::malformed(format!(
                "modifier {modifier} outside -{MAX_MODIFIER}..={MAX_MODIFIER}"
            )));
        }
        Ok(Self { groups, modifier })
    }

    pub fn groups(&self) -> &[DiceGroup] {
        &self.groups
    }

    pub fn modifier(&self) -> i64 {
        self.modifier
    }

    /// True for exactly one positive `1d20` group (with or without adv/dis).
    pub fn is_single_d20(&self) -> bool {
        match self.groups.as_slice() {
            [group] => group.count == 1 && group.die == DieType::D20 && group.sign == Sign::Plus,
            _ => false,
        }
    }

    pub fn min_total(&self) -> i64 {
        self.groups
            .iter()
            .map(DiceGroup::min_contribution)
            .sum::<i64>()
            + self.modifier
    }

    pub fn max_total(&self) -> i64 {
        self.groups
            .iter()
            .map(DiceGroup::max_contribution)
            .sum::<i64>()
            + self.modifier
    }

    /// Die types used, in group order (duplicates kept).
    pub fn dice_types(&self) -> Vec<DieType> {
        self.groups.iter().map(DiceGroup::die).collect()
    }
}

impl fmt::Display for DiceExpression {
    /// Normalized notation. Constants are folded into one trailing modifier,
    /// except when the first group is subtracted, where the modifier leads so
    /// the text stays parseable (`5-1d4`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let leading_modifier = self
            .groups
            .first()
            .is_some_and(|group| group.sign == Sign::Minus);

        if self.groups.is_empty() || leading_modifier {
            // The grammar has no unary minus, so a negative lead becomes `0-n`.
            if self.modifier < 0 {
                write!(f, "0{}", self.modifier)?;
            } else {
                write!(f, "{}", self.modifier)?;
            }
        }

        for (index, group) in self.groups.iter().enumerate() {
            if index > 0 || leading_modifier {
                write!(f, "{}", group.sign.symbol())?;
            }
            write!(f, "{group}")?;
        }

        if !self.groups.is_empty() && !leading_modifier {
            if self.modifier > 0 {
                write!(f, "+{}", self.modifier)?;
            } else if self.modifier < 0 {
                write!(f, "{}", self.modifier)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(count: u64, faces: u64, mechanic: Mechanic) -> DiceGroup {
        DiceGroup::new(count, faces, mechanic).unwrap()
    }

    #[test]
    fn test_die_type_from_faces() {
        for die in DieType::ALL {
            assert_eq!(DieType::from_faces(u64::from(die.faces())).unwrap(), die);
        }
        assert_eq!(DieType::from_faces(7), Err(DiceParseError::InvalidDieType(7)));
        assert_eq!(DieType::from_faces(2), Err(DiceParseError::InvalidDieType(2)));
    }

    #[test]
    fn test_group_count_bounds() {
        assert_eq!(
            DiceGroup::new(0, 6, Mechanic::None),
            Err(DiceParseError::TooManyDice(0))
        );
        assert_eq!(
            DiceGroup::new(101, 6, Mechanic::None),
            Err(DiceParseError::TooManyDice(101))
        );
        assert!(DiceGroup::new(100, 6, Mechanic::None).is_ok());
    }

    #[test]
    fn test_die_type_checked_before_count() {
        assert_eq!(
            DiceGroup::new(0, 7, Mechanic::None),
            Err(DiceParseError::InvalidDieType(7))
        );
    }

    #[test]
    fn test_mechanic_argument_bounds() {
        assert!(DiceGroup::new(4, 6, Mechanic::DropLowest(1)).is_ok());
        assert!(DiceGroup::new(4, 6, Mechanic::KeepHighest(3)).is_ok());
        for mechanic in [
            Mechanic::DropLowest(0),
            Mechanic::DropHighest(4),
            Mechanic::KeepHighest(7),
            Mechanic::KeepLowest(4),
        ] {
            assert!(matches!(
                DiceGroup::new(4, 6, mechanic),
                Err(DiceParseError::InvalidMechanicArgument(_))
            ));
        }
    }

    #[test]
    fn test_advantage_requires_single_die() {
        assert!(DiceGroup::new(1, 20, Mechanic::Advantage).is_ok());
        assert!(matches!(
            DiceGroup::new(2, 6, Mechanic::Advantage),
            Err(DiceParseError::InvalidMechanicArgument(_))
        ));
        assert!(matches!(
            DiceGroup::new(2, 20, Mechanic::Disadvantage),
            Err(DiceParseError::InvalidMechanicArgument(_))
        ));
    }

    #[test]
    fn test_dice_rolled_and_kept() {
        assert_eq!(group(1, 20, Mechanic::Advantage).dice_rolled(), 2);
        assert_eq!(group(1, 20, Mechanic::Advantage).dice_kept(), 1);
        assert_eq!(group(4, 6, Mechanic::DropLowest(1)).dice_kept(), 3);
        assert_eq!(group(6, 6, Mechanic::KeepHighest(3)).dice_kept(), 3);
        assert_eq!(group(3, 8, Mechanic::None).dice_kept(), 3);
    }

    #[test]
    fn test_expression_requires_dice_or_modifier() {
        assert!(matches!(
            DiceExpression::new(vec![], 0),
            Err(DiceParseError::MalformedExpression(_))
        ));
        assert!(DiceExpression::new(vec![], 5).is_ok());
        assert!(DiceExpression::new(vec![group(1, 20, Mechanic::None)], 0).is_ok());
    }

    #[test]
    fn test_expression_modifier_limit() {
        let d20 = || vec![group(1, 20, Mechanic::None)];
        assert!(DiceExpression::new(d20(), MAX_MODIFIER).is_ok());
        assert!(DiceExpression::new(d20(), -MAX_MODIFIER).is_ok());
        for modifier in [MAX_MODIFIER + 1, -MAX_MODIFIER - 1, i64::MAX, i64::MIN] {
            assert!(matches!(
                DiceExpression::new(d20(), modifier),
                Err(DiceParseError::MalformedExpression(_))
            ));
        }
    }

    #[test]
    fn test_extreme_expression_totals() {
        let groups = vec![group(100, 100, Mechanic::None); MAX_GROUPS_PER_EXPRESSION];
        let high = DiceExpression::new(groups, MAX_MODIFIER).unwrap();
        assert_eq!(high.max_total(), 20 * 100 * 100 + MAX_MODIFIER);

        let negative = group(100, 100, Mechanic::None).with_sign(Sign::Minus);
        let groups = vec![negative; MAX_GROUPS_PER_EXPRESSION];
        let low = DiceExpression::new(groups, -MAX_MODIFIER).unwrap();
        assert_eq!(low.min_total(), -(20 * 100 * 100) - MAX_MODIFIER);
    }

    #[test]
    fn test_expression_group_limit() {
        let groups = vec![group(1, 6, Mechanic::None); MAX_GROUPS_PER_EXPRESSION + 1];
        assert!(matches!(
            DiceExpression::new(groups, 0),
            Err(DiceParseError::MalformedExpression(_))
        ));
    }

    #[test]
    fn test_min_max_total() {
        let expr = DiceExpression::new(
            vec![
                group(2, 6, Mechanic::None),
                group(1, 4, Mechanic::None).with_sign(Sign::Minus),
            ],
            3,
        )
        .unwrap();
        assert_eq!(expr.min_total(), 2 - 4 + 3);
        assert_eq!(expr.max_total(), 12 - 1 + 3);

        let stats = DiceExpression::new(vec![group(4, 6, Mechanic::DropLowest(1))], 0).unwrap();
        assert_eq!((stats.min_total(), stats.max_total()), (3, 18));
    }

    #[test]
    fn test_display() {
        let expr = DiceExpression::new(
            vec![group(2, 6, Mechanic::None), group(1, 4, Mechanic::None)],
            2,
        )
        .unwrap();
        assert_eq!(expr.to_string(), "2d6+1d4+2");

        let adv = DiceExpression::new(vec![group(1, 20, Mechanic::Advantage)], -1).unwrap();
        assert_eq!(adv.to_string(), "1d20adv-1");

        let leading = DiceExpression::new(
            vec![group(1, 4, Mechanic::None).with_sign(Sign::Minus)],
            5,
        )
        .unwrap();
        assert_eq!(leading.to_string(), "5-1d4");

        let constant = DiceExpression::new(vec![], -3).unwrap();
        assert_eq!(constant.to_string(), "0-3");
    }

    #[test]
    fn test_is_single_d20() {
        let d20 = DiceExpression::new(vec![group(1, 20, Mechanic::None)], 5).unwrap();
        assert!(d20.is_single_d20());
        let two = DiceExpression::new(
            vec![group(1, 20, Mechanic::None), group(1, 4, Mechanic::None)],
            0,
        )
        .unwrap();
        assert!(!two.is_single_d20());
        let pair = DiceExpression::new(vec![group(2, 20, Mechanic::None)], 0).unwrap();
        assert!(!pair.is_single_d20());
    }

    #[test]
    fn test_mechanic_serde_shape() {
        let json = serde_json::to_value(Mechanic::DropLowest(1)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "drop_lowest", "k": 1}));
        let json = serde_json::to_value(Mechanic::Advantage).unwrap();
        assert_eq!(json, serde_json::json!({"type": "advantage"}));
        assert_eq!(serde_json::to_value(DieType::D100).unwrap(), "d100");
    }
}
