//! ADP secretion by newly activated platelets.
//!
//! A platelet activated at `t_k` releases its ADP content over
//! `[t_k, t_k + sigma_Tf]` with the normalised rate profile
//! `R(t) = 2 t / sigma_Tf^2`. The released source is
//!
//! ```text
//! sigma_release(x, t) = ADP_rel * sum_k R(t - t_k) * dP_act(x, t_k)
//! ```
//!
//! where `dP_act(x, t_k)` is the density of platelets that left the
//! mobile unactivated pool in cell `x` during the coarse step ending at
//! `t_k`. That counts agonist activation (ADP, thrombin) and direct
//! subendothelial adhesion alike: a platelet bound to the injury is
//! activated and secretes, so at an agonist-free injury the source is
//! driven by adhesion alone.

use std::collections::VecDeque;

use clot_core::{Constants, ConstantsError, Dimensions};

/// Tabulated release-rate profile on `[0, sigma_Tf]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ReleaseProfile {
    sigma_dt: f64,
    sigma_tf: f64,
    samples: Vec<f64>,
}

impl ReleaseProfile {
    /// Tabulate `R(t) = 2 t / sigma_tf^2` at resolution `sigma_dt`.
    ///
    /// Returns `Err` unless both values are finite and positive and
    /// `sigma_dt <= sigma_tf`.
    pub fn new(sigma_tf: f64, sigma_dt: f64) -> Result<Self, String> {
        if !(sigma_tf.is_finite() && sigma_tf > 0.0) {
            return Err(format!("sigma_Tf must be finite and positive, got {sigma_tf}"));
        }
        if !(sigma_dt.is_finite() && sigma_dt > 0.0) || sigma_dt > sigma_tf {
            return Err(format!(
                "sigma_dt must be in (0, sigma_Tf = {sigma_tf}], got {sigma_dt}"
            ));
        }
        let n = (sigma_tf / sigma_dt).round() as usize;
        let samples = (0..=n)
            .map(|k| 2.0 * (k as f64 * sigma_dt).min(sigma_tf) / (sigma_tf * sigma_tf))
            .collect();
        Ok(Self {
            sigma_dt,
            sigma_tf,
            samples,
        })
    }

    /// Release window length.
    pub fn duration(&self) -> f64 {
        self.sigma_tf
    }

    /// Table resolution.
    pub fn resolution(&self) -> f64 {
        self.sigma_dt
    }

    /// Tabulated values.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Rate at elapsed time `t`, read from the table at the sample at or
    /// below `t`. Zero outside `[0, sigma_Tf]`.
    pub fn rate(&self, t: f64) -> f64 {
        if !(0.0..=self.sigma_tf).contains(&t) {
            return 0.0;
        }
        let k = ((t / self.sigma_dt) + 1e-9).floor() as usize;
        self.samples[k.min(self.samples.len() - 1)]
    }
}

/// Rolling record of recent activations that produces `sigma_release`.
#[derive(Clone, Debug)]
pub struct ReleaseTracker {
    profile: ReleaseProfile,
    adp_rel: f64,
    history: VecDeque<(f64, Vec<f64>)>,
}

impl ReleaseTracker {
    /// Create with ADP content per platelet `adp_rel`.
    pub fn new(profile: ReleaseProfile, adp_rel: f64) -> Self {
        Self {
            profile,
            adp_rel,
            history: VecDeque::new(),
        }
    }

    /// Read `ADP_rel`, `sigma_Tf` and `sigma_dt`.
    ///
    /// # Errors
    ///
    /// A missing or mis-dimensioned key, or an invalid profile (reported
    /// as [`ConstantsError::NonFinite`] on `sigma_dt`).
    pub fn from_constants(c: &Constants) -> Result<Self, ConstantsError> {
        let adp_rel = c.require("ADP_rel", Dimensions::MOLES)?;
        let sigma_tf = c.require("sigma_Tf", Dimensions::TIME)?;
        let sigma_dt = c.require("sigma_dt", Dimensions::TIME)?;
        let profile =
            ReleaseProfile::new(sigma_tf, sigma_dt).map_err(|_| ConstantsError::NonFinite {
                key: "sigma_dt".to_string(),
                value: sigma_dt,
            })?;
        Ok(Self::new(profile, adp_rel))
    }

    /// The release profile.
    pub fn profile(&self) -> &ReleaseProfile {
        &self.profile
    }

    /// Number of activation events still inside the release window.
    pub fn active_events(&self) -> usize {
        self.history.len()
    }

    /// Record `activated[cell]` platelets activated at time `t`.
    ///
    /// Events with no activation anywhere are not stored. Negative
    /// entries (de-activation cannot happen, but clamping can produce
    /// tiny negative differences) are ignored.
    pub fn record(&mut self, t: f64, activated: Vec<f64>) {
        if activated.iter().all(|&v| v <= 0.0) {
            return;
        }
        self.history.push_back((t, activated));
    }

    /// Write `sigma_release` at time `t` into `out` and drop events whose
    /// window has closed.
    pub fn source(&mut self, t: f64, out: &mut [f64]) {
        while let Some((tk, _)) = self.history.front() {
            if t - tk > self.profile.duration() {
                self.history.pop_front();
            } else {
                break;
            }
        }
        out.fill(0.0);
        for (tk, activated) in &self.history {
            let r = self.profile.rate(t - tk) * self.adp_rel;
            if r == 0.0 {
                continue;
            }
            for (o, &a) in out.iter_mut().zip(activated) {
                *o += r * a.max(0.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_integrates_to_one() {
        let p = ReleaseProfile::new(5.0, 0.001).unwrap();
        let integral: f64 = p.samples().iter().map(|r| r * p.resolution()).sum();
        assert!((integral - 1.0).abs() < 1e-3, "integral {integral}");
        assert_eq!(p.rate(-1.0), 0.0);
        assert_eq!(p.rate(5.5), 0.0);
        assert!((p.rate(2.5) - 2.0 * 2.5 / 25.0).abs() < 1e-12);
    }

    #[test]
    fn invalid_profiles_rejected() {
        assert!(ReleaseProfile::new(0.0, 0.1).is_err());
        assert!(ReleaseProfile::new(1.0, 2.0).is_err());
        assert!(ReleaseProfile::new(1.0, f64::NAN).is_err());
    }

    #[test]
    fn source_follows_profile_and_expires() {
        let profile = ReleaseProfile::new(1.0, 0.25).unwrap();
        let mut t = ReleaseTracker::new(profile, 3.0);
        t.record(0.0, vec![2.0, 0.0]);
        t.record(0.25, vec![0.0, 0.0]);
        assert_eq!(t.active_events(), 1);

        let mut out = vec![0.0; 2];
        t.source(0.5, &mut out);
        // R(0.5) = 1.0, times ADP_rel 3 and two activated platelets.
        assert!((out[0] - 6.0).abs() < 1e-12);
        assert_eq!(out[1], 0.0);

        t.source(1.5, &mut out);
        assert_eq!(out, vec![0.0, 0.0]);
        assert_eq!(t.active_events(), 0);
    }
}
