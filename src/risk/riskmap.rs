//! Risk-to-meta mappings: translate a workspace risk value `∈ [0,1]`
//! into the LSM kernel's traversability convention (`1` = freespace,
//! `0` = obstacle), so the PNF facade can propagate directly from it.
//!
//! Three parameterized families are provided. Each is a monotonically
//! decreasing curve from `meta(0) = 1` to `meta(cutoff) = 0`, clamped to
//! `0` beyond `cutoff` (impassable). `meta_to_risk` is the reference
//! implementation's inverse, resolving the `meta = 0` tie to `risk =
//! cutoff` as it does (for `sigma` this is a direct transcription of
//! its piecewise formula rather than an exact algebraic inverse, see
//! `sigma_meta_to_risk`), even though the forward direction is the only
//! one the risk pipeline itself calls.

use error_stack::{Report, Result};

use crate::error::NavFieldError;

/// A risk-to-meta family, parameterized by where it clamps to zero
/// (`cutoff`) and how sharply it bends (`degree`).
#[derive(Debug, Clone, Copy)]
pub enum RiskMapKind {
    /// Falls steeply near `risk = 0`, flattening out as `risk -> cutoff`.
    Spike { cutoff: f64, degree: f64 },
    /// Stays near `1` until close to `cutoff`, then drops steeply.
    Blunt { cutoff: f64, degree: f64 },
    /// Flat at `1` below `1-cutoff`, flat at `0` above `cutoff`, and a
    /// power curve mirrored about `risk = 0.5` in between.
    Sigma { cutoff: f64, degree: f64 },
}

impl RiskMapKind {
    /// Build a risk map by family name (`"spike"`, `"blunt"`, or
    /// `"sigma"`), mirroring the reference implementation's
    /// `PNFRiskMap::Create`, which returns null on an unrecognized name.
    pub fn by_name(name: &str, cutoff: f64, degree: f64) -> Result<Self, NavFieldError> {
        match name {
            "spike" => Self::spike(cutoff, degree),
            "blunt" => Self::blunt(cutoff, degree),
            "sigma" => Self::sigma(cutoff, degree),
            other => Err(Report::new(NavFieldError::UnknownRiskMap(other.to_string()))),
        }
    }

    pub fn spike(cutoff: f64, degree: f64) -> Result<Self, NavFieldError> {
        Self::check_cutoff(cutoff)?;
        Ok(Self::Spike { cutoff, degree })
    }

    pub fn blunt(cutoff: f64, degree: f64) -> Result<Self, NavFieldError> {
        Self::check_cutoff(cutoff)?;
        Ok(Self::Blunt { cutoff, degree })
    }

    pub fn sigma(cutoff: f64, degree: f64) -> Result<Self, NavFieldError> {
        Self::check_cutoff(cutoff)?;
        Ok(Self::Sigma { cutoff, degree })
    }

    fn check_cutoff(cutoff: f64) -> Result<(), NavFieldError> {
        if cutoff > 0.0 && cutoff <= 1.0 {
            Ok(())
        } else {
            Err(Report::new(NavFieldError::InvalidCutoff { cutoff }))
        }
    }

    #[must_use]
    pub fn cutoff(&self) -> f64 {
        match self {
            Self::Spike { cutoff, .. } | Self::Blunt { cutoff, .. } | Self::Sigma { cutoff, .. } => {
                *cutoff
            }
        }
    }

    /// Map `risk ∈ [0,1]` to a meta in `[0,1]`.
    #[must_use]
    pub fn risk_to_meta(&self, risk: f64) -> f64 {
        match *self {
            Self::Spike { cutoff, degree } => {
                if risk >= cutoff {
                    0.0
                } else {
                    (1.0 - risk / cutoff).clamp(0.0, 1.0).powf(degree)
                }
            }
            Self::Blunt { cutoff, degree } => {
                if risk >= cutoff {
                    0.0
                } else {
                    (1.0 - (risk / cutoff).clamp(0.0, 1.0).powf(degree)).clamp(0.0, 1.0)
                }
            }
            Self::Sigma { cutoff, degree } => sigma_risk_to_meta(risk, cutoff, degree),
        }
    }

    /// Invert [`Self::risk_to_meta`]. `meta = 0` resolves to `risk =
    /// cutoff`, matching the forward direction's clamp.
    #[must_use]
    pub fn meta_to_risk(&self, meta: f64) -> f64 {
        if meta <= 0.0 {
            return self.cutoff();
        }
        match *self {
            Self::Spike { cutoff, degree } => {
                let u = meta.clamp(0.0, 1.0).powf(1.0 / degree);
                (1.0 - u) * cutoff
            }
            Self::Blunt { cutoff, degree } => {
                let u = (1.0 - meta.clamp(0.0, 1.0)).powf(1.0 / degree);
                u * cutoff
            }
            Self::Sigma { cutoff, degree } => sigma_meta_to_risk(meta, cutoff, degree),
        }
    }
}

/// `Sigma::RiskToMeta`: flat top/bottom outside `[1-cutoff, cutoff]`, a
/// power curve mirrored about `risk = 0.5` inside it.
fn sigma_risk_to_meta(risk: f64, cutoff: f64, degree: f64) -> f64 {
    if risk >= cutoff {
        return 0.0;
    }
    if risk <= 1.0 - cutoff {
        return 1.0;
    }
    let rhs = 0.5 * (1.0 - (risk - 0.5).abs() / (cutoff - 0.5)).powf(degree);
    if risk >= 0.5 {
        rhs
    } else {
        1.0 - rhs
    }
}

/// `Sigma::MetaToRisk` for `meta > 0` (the `meta <= 0` tie is resolved
/// by the caller, [`RiskMapKind::meta_to_risk`]). Transcribed as-is from
/// the reference implementation; per its own header comment this is
/// "not useful with the PNF anyways, which always goes from risk to
/// meta, never the other way around", and it is not an exact algebraic
/// inverse of [`sigma_risk_to_meta`] across the whole range.
fn sigma_meta_to_risk(meta: f64, cutoff: f64, degree: f64) -> f64 {
    if meta >= 1.0 {
        return 1.0 - cutoff;
    }
    if meta >= 0.5 {
        0.5 + (cutoff - 0.5) * (1.0 - (2.0 * meta).powf(1.0 / degree))
    } else {
        let m = 1.0 - meta;
        0.5 + (cutoff - 0.5) * ((2.0 * m).powf(1.0 / degree) - 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_must_be_in_unit_interval() {
        assert!(RiskMapKind::spike(0.0, 1.0).is_err());
        assert!(RiskMapKind::spike(1.5, 1.0).is_err());
        assert!(RiskMapKind::spike(0.5, 1.0).is_ok());
    }

    #[test]
    fn zero_risk_is_full_freespace_for_every_family() {
        let spike = RiskMapKind::spike(0.5, 2.0).unwrap();
        let blunt = RiskMapKind::blunt(0.5, 2.0).unwrap();
        let sigma = RiskMapKind::sigma(0.5, 4.0).unwrap();
        assert!((spike.risk_to_meta(0.0) - 1.0).abs() < 1e-9);
        assert!((blunt.risk_to_meta(0.0) - 1.0).abs() < 1e-9);
        assert!((sigma.risk_to_meta(0.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn risk_at_or_beyond_cutoff_is_impassable() {
        let spike = RiskMapKind::spike(0.5, 2.0).unwrap();
        assert_eq!(spike.risk_to_meta(0.5), 0.0);
        assert_eq!(spike.risk_to_meta(0.9), 0.0);
    }

    #[test]
    fn meta_to_risk_resolves_zero_tie_to_cutoff() {
        let spike = RiskMapKind::spike(0.5, 2.0).unwrap();
        assert_eq!(spike.meta_to_risk(0.0), 0.5);
    }

    #[test]
    fn spike_round_trips_through_its_own_inverse() {
        let spike = RiskMapKind::spike(0.6, 2.0).unwrap();
        let risk = 0.2;
        let meta = spike.risk_to_meta(risk);
        let recovered = spike.meta_to_risk(meta);
        assert!((recovered - risk).abs() < 1e-6);
    }

    #[test]
    fn sigma_is_flat_below_its_mirrored_cutoff() {
        let sigma = RiskMapKind::sigma(0.8, 2.0).unwrap();
        assert_eq!(sigma.risk_to_meta(0.1), 1.0);
        assert_eq!(sigma.risk_to_meta(0.2), 1.0);
    }

    #[test]
    fn sigma_is_point_symmetric_about_the_midpoint() {
        let sigma = RiskMapKind::sigma(0.8, 2.0).unwrap();
        let above = sigma.risk_to_meta(0.6);
        let below = sigma.risk_to_meta(0.4);
        assert!((above + below - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sigma_meta_to_risk_matches_the_reference_piecewise_formula() {
        let sigma = RiskMapKind::sigma(0.8, 2.0).unwrap();
        // meta = 0.125 falls in the `meta < 0.5` branch of the
        // reference's `Sigma::MetaToRisk`.
        let expected = 0.5 + (0.8 - 0.5) * ((2.0 * (1.0 - 0.125_f64)).powf(0.5) - 1.0);
        assert!((sigma.meta_to_risk(0.125) - expected).abs() < 1e-9);
    }

    #[test]
    fn by_name_dispatches_to_the_named_constructor() {
        assert!(matches!(
            RiskMapKind::by_name("spike", 0.5, 2.0).unwrap(),
            RiskMapKind::Spike { .. }
        ));
        assert!(matches!(
            RiskMapKind::by_name("blunt", 0.5, 2.0).unwrap(),
            RiskMapKind::Blunt { .. }
        ));
        assert!(matches!(
            RiskMapKind::by_name("sigma", 0.5, 2.0).unwrap(),
            RiskMapKind::Sigma { .. }
        ));
    }

    #[test]
    fn by_name_rejects_unknown_family() {
        assert!(RiskMapKind::by_name("quadratic", 0.5, 2.0).is_err());
    }
}
