//! ABV formula registry
//!
//! Each alcohol-yield estimator is a unit struct implementing [`AbvFormula`].
//! The registry is a fixed static table looked up by id; unknown ids are an
//! error, never a fallback to another formula.

use super::error::{CalcError, CalcResult};

/// An alcohol-by-volume estimator working on specific gravity values
pub trait AbvFormula: Sync + std::fmt::Debug {
    /// Stable registry id (e.g. "abv-basic")
    fn id(&self) -> &'static str;

    /// Human-readable label
    fn label(&self) -> &'static str;

    /// Estimate ABV percentage from original and final specific gravity
    fn compute(&self, original_sg: f64, final_sg: f64) -> f64;
}

/// Linear approximation, good for beer and cider at normal gravities
#[derive(Debug, Clone, Copy)]
pub struct Basic;

impl AbvFormula for Basic {
    fn id(&self) -> &'static str {
        "abv-basic"
    }

    fn label(&self) -> &'static str {
        "Basic (ΔSG × 131.25)"
    }

    fn compute(&self, original_sg: f64, final_sg: f64) -> f64 {
        (original_sg - final_sg) * 131.25
    }
}

/// C.J.J. Berry's wine/mead formula
#[derive(Debug, Clone, Copy)]
pub struct Berry;

impl AbvFormula for Berry {
    fn id(&self) -> &'static str {
        "abv-berry"
    }

    fn label(&self) -> &'static str {
        "Berry (wine and mead)"
    }

    fn compute(&self, original_sg: f64, final_sg: f64) -> f64 {
        (original_sg - final_sg) / 0.736 * 100.0
    }
}

/// Original gravity at which the Hall denominator reaches zero
pub const HALL_SINGULARITY_SG: f64 = 1.775;

/// Michael Hall's formula, via alcohol by weight
#[derive(Debug, Clone, Copy)]
pub struct Hall;

impl AbvFormula for Hall {
    fn id(&self) -> &'static str {
        "abv-hall"
    }

    fn label(&self) -> &'static str {
        "Hall (via alcohol by weight)"
    }

    fn compute(&self, original_sg: f64, final_sg: f64) -> f64 {
        // Output is left unguarded near the singularity so results stay
        // comparable with other Hall calculators.
        if original_sg >= HALL_SINGULARITY_SG - 0.05 {
            tracing::warn!(
                original_sg,
                "Hall formula is unreliable for original gravity near {}",
                HALL_SINGULARITY_SG
            );
        }
        let abw = 76.08 * (original_sg - final_sg) / (HALL_SINGULARITY_SG - original_sg);
        abw / 0.794
    }
}

/// UK excise bands: ΔSG threshold and multiplier. Must stay exact.
pub const HMRC_BANDS: [(f64, f64); 11] = [
    (0.0069, 125.0),
    (0.0104, 126.0),
    (0.0172, 127.0),
    (0.0261, 128.0),
    (0.0360, 129.0),
    (0.0465, 130.0),
    (0.0571, 131.0),
    (0.0679, 132.0),
    (0.0788, 133.0),
    (0.0897, 134.0),
    (0.1007, 135.0),
];

/// Multiplier used past the last HMRC band
pub const HMRC_FALLBACK_MULTIPLIER: f64 = 135.0;

/// HMRC step function used for UK duty declarations
#[derive(Debug, Clone, Copy)]
pub struct Hmrc;

impl Hmrc {
    /// Multiplier for the first band whose threshold `delta` does not exceed
    pub fn multiplier(delta: f64) -> f64 {
        HMRC_BANDS
            .iter()
            .find(|(threshold, _)| delta <= *threshold)
            .map(|(_, multiplier)| *multiplier)
            .unwrap_or(HMRC_FALLBACK_MULTIPLIER)
    }
}

impl AbvFormula for Hmrc {
    fn id(&self) -> &'static str {
        "abv-hmrc"
    }

    fn label(&self) -> &'static str {
        "HMRC (UK excise bands)"
    }

    fn compute(&self, original_sg: f64, final_sg: f64) -> f64 {
        let delta = original_sg - final_sg;
        delta * Self::multiplier(delta)
    }
}

/// All registered formulas, in display order
pub static FORMULAS: [&dyn AbvFormula; 4] = [&Basic, &Berry, &Hall, &Hmrc];

/// Ids of every registered formula
pub fn formula_ids() -> Vec<&'static str> {
    FORMULAS.iter().map(|f| f.id()).collect()
}

/// Resolve a formula by id
pub fn lookup(id: &str) -> CalcResult<&'static dyn AbvFormula> {
    FORMULAS
        .iter()
        .copied()
        .find(|f| f.id() == id)
        .ok_or_else(|| CalcError::InvalidFormula {
            id: id.to_string(),
            valid: formula_ids(),
        })
}
