//! Fuzzy cruise control: membership functions, a data-driven rule base, and
//! Mamdani-style inference with weighted-average defuzzification.

pub mod inference;
pub mod membership;

pub use inference::{
    default_rules, Antecedent, FuzzyController, Rule, Term, FALLBACK_AGGRESSION, MAX_AGGRESSION,
    MIN_AGGRESSION,
};
pub use membership::{
    distance_memberships, soc_memberships, DistanceLabel, MembershipSet, MembershipShape, SocLabel,
    DISTANCE_BOUNDARY_KM, DISTANCE_RAMP_KM,
};
