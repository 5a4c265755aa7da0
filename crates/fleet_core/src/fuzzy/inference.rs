//! Mamdani-style inference: fuzzify, fire the rule base, defuzzify.
//!
//! The output is the aggression factor in [[MIN_AGGRESSION], [MAX_AGGRESSION]]
//! that the physics model turns into a cruising speed. Defuzzification is the
//! weighted average of rule consequents by firing strength. The output is
//! continuous in both inputs except where the total firing strength reaches
//! zero (e.g. SOC crossing 0.60 outbound), where it snaps to the
//! [FALLBACK_AGGRESSION] default.

use bevy_ecs::prelude::Resource;

use super::membership::{
    distance_memberships, soc_memberships, DistanceLabel, MembershipSet, SocLabel,
};

pub const MIN_AGGRESSION: f64 = 0.4;
pub const MAX_AGGRESSION: f64 = 1.0;
/// Returned when no rule fires at all. Reachable at domain boundaries; a
/// required fallback, not an error.
pub const FALLBACK_AGGRESSION: f64 = 0.7;

/// A fuzzy antecedent term referencing one input label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Term {
    Soc(SocLabel),
    Distance(DistanceLabel),
}

/// Boolean expression over fuzzy terms. `And` is min, `Or` is max.
#[derive(Debug, Clone, PartialEq)]
pub enum Antecedent {
    Is(Term),
    And(Box<Antecedent>, Box<Antecedent>),
    Or(Box<Antecedent>, Box<Antecedent>),
}

impl Antecedent {
    pub fn soc(label: SocLabel) -> Self {
        Self::Is(Term::Soc(label))
    }

    pub fn distance(label: DistanceLabel) -> Self {
        Self::Is(Term::Distance(label))
    }

    pub fn and(self, other: Self) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Self) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }
}

/// One rule: an antecedent expression and a crisp consequent value.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub antecedent: Antecedent,
    pub consequent: f64,
}

/// The survival rule base: three rules trading battery against distance.
/// Rule order has no effect on the weighted average but is preserved for
/// reproducible debugging.
pub fn default_rules() -> Vec<Rule> {
    use DistanceLabel::{Close, Far};
    use SocLabel::{Critical, Low, Normal};

    vec![
        // Critical battery far from the destination: survival mode.
        Rule {
            antecedent: Antecedent::soc(Critical).and(Antecedent::distance(Far)),
            consequent: MIN_AGGRESSION,
        },
        // Low battery far from the destination: eco mode.
        Rule {
            antecedent: Antecedent::soc(Low).and(Antecedent::distance(Far)),
            consequent: FALLBACK_AGGRESSION,
        },
        // Normal battery, or low battery but nearly there: sport mode.
        Rule {
            antecedent: Antecedent::soc(Normal)
                .or(Antecedent::soc(Low).and(Antecedent::distance(Close))),
            consequent: MAX_AGGRESSION,
        },
    ]
}

/// The fuzzy cruise controller: membership sets plus the ordered rule base.
#[derive(Debug, Clone, Resource)]
pub struct FuzzyController {
    soc: MembershipSet<SocLabel>,
    distance: MembershipSet<DistanceLabel>,
    rules: Vec<Rule>,
}

impl Default for FuzzyController {
    fn default() -> Self {
        Self::new(soc_memberships(), distance_memberships(), default_rules())
    }
}

impl FuzzyController {
    pub fn new(
        soc: MembershipSet<SocLabel>,
        distance: MembershipSet<DistanceLabel>,
        rules: Vec<Rule>,
    ) -> Self {
        Self {
            soc,
            distance,
            rules,
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Crisp aggression factor for the given battery/distance state, always
    /// within [[MIN_AGGRESSION], [MAX_AGGRESSION]].
    pub fn infer(&self, soc: f64, distance_remaining_km: f64) -> f64 {
        let mut weighted = 0.0;
        let mut total = 0.0;
        for rule in &self.rules {
            let strength = self.strength(&rule.antecedent, soc, distance_remaining_km);
            weighted += strength * rule.consequent;
            total += strength;
        }

        let aggression = if total <= f64::EPSILON {
            FALLBACK_AGGRESSION
        } else {
            weighted / total
        };
        aggression.clamp(MIN_AGGRESSION, MAX_AGGRESSION)
    }

    /// Firing strength of an antecedent expression: min for AND, max for OR.
    fn strength(&self, antecedent: &Antecedent, soc: f64, distance: f64) -> f64 {
        match antecedent {
            Antecedent::Is(Term::Soc(label)) => self.soc.degree(*label, soc),
            Antecedent::Is(Term::Distance(label)) => self.distance.degree(*label, distance),
            Antecedent::And(a, b) => self
                .strength(a, soc, distance)
                .min(self.strength(b, soc, distance)),
            Antecedent::Or(a, b) => self
                .strength(a, soc, distance)
                .max(self.strength(b, soc, distance)),
        }
    }
}
