//! Easing functions for animation interpolation.
//!
//! Curves follow the GSAP naming used by the site's stylesheets and presets
//! (`"power2.out"`, `"back.out(1.7)"`, ...), so a treatment written for the
//! browser runtime reads the same in a TOML preset.

use std::fmt;

/// Easing function variants for animation curves.
///
/// `Power*` variants carry the polynomial exponent, which is one more than
/// the GSAP power number: `power2.out` is `PowerOut { exponent: 3 }`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EasingFunction {
    /// Linear interpolation (no easing). GSAP `"none"`.
    Linear,
    /// Slow start, fast end.
    PowerIn {
        /// Polynomial exponent.
        exponent: i32,
    },
    /// Fast start, slow end.
    PowerOut {
        /// Polynomial exponent.
        exponent: i32,
    },
    /// Slow start and end.
    PowerInOut {
        /// Polynomial exponent.
        exponent: i32,
    },
    /// Overshoots the target before settling.
    BackOut {
        /// Overshoot amount (GSAP default 1.70158).
        overshoot: f32,
    },
}

impl EasingFunction {
    /// Default easing function: `power2.out`.
    pub const DEFAULT: Self = Self::PowerOut { exponent: 3 };

    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0]. Returns the eased value, which is
    /// 0.0 at t=0 and 1.0 at t=1 (`BackOut` may exceed 1.0 in between).
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match *self {
            Self::Linear => t,
            Self::PowerIn { exponent } => t.powi(exponent),
            Self::PowerOut { exponent } => 1.0 - (1.0 - t).powi(exponent),
            Self::PowerInOut { exponent } => {
                if t < 0.5 {
                    (2.0 * t).powi(exponent) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - t)).powi(exponent) / 2.0
                }
            }
            Self::BackOut { overshoot } => {
                let u = t - 1.0;
                u * u * ((overshoot + 1.0) * u + overshoot) + 1.0
            }
        }
    }

    /// Parse a GSAP-style easing name.
    ///
    /// Accepts `none`/`linear`, `powerN.in|out|inOut` for N in 1..=4 (bare
    /// `powerN` means `.out`), and `back.out` with an optional overshoot
    /// argument: `back.out(1.7)`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name == "none" || name == "linear" {
            return Some(Self::Linear);
        }
        if let Some(rest) = name.strip_prefix("back.out") {
            let overshoot = if rest.is_empty() {
                1.701_58
            } else {
                rest.strip_prefix('(')?
                    .strip_suffix(')')?
                    .trim()
                    .parse()
                    .ok()?
            };
            return Some(Self::BackOut { overshoot });
        }

        let rest = name.strip_prefix("power")?;
        let (power, direction) = rest.split_once('.').unwrap_or((rest, "out"));
        let power: i32 = power.parse().ok()?;
        if !(1..=4).contains(&power) {
            return None;
        }
        let exponent = power + 1;
        match direction {
            "in" => Some(Self::PowerIn { exponent }),
            "out" => Some(Self::PowerOut { exponent }),
            "inOut" => Some(Self::PowerInOut { exponent }),
            _ => None,
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for EasingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "none"),
            Self::PowerIn { exponent } => write!(f, "power{}.in", exponent - 1),
            Self::PowerOut { exponent } => {
                write!(f, "power{}.out", exponent - 1)
            }
            Self::PowerInOut { exponent } => {
                write!(f, "power{}.inOut", exponent - 1)
            }
            Self::BackOut { overshoot } => write!(f, "back.out({overshoot})"),
        }
    }
}

impl TryFrom<String> for EasingFunction {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::from_name(&name).ok_or_else(|| format!("unknown easing: {name}"))
    }
}

impl From<EasingFunction> for String {
    fn from(easing: EasingFunction) -> Self {
        easing.to_string()
    }
}

impl serde::Serialize for EasingFunction {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for EasingFunction {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::try_from(name).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_endpoints() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(0.0), 0.0);
        assert_eq!(linear.evaluate(0.5), 0.5);
        assert_eq!(linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_power_out_shape() {
        // power2.out is a cubic ease-out: fast early movement
        let ease = EasingFunction::PowerOut { exponent: 3 };
        assert_eq!(ease.evaluate(0.0), 0.0);
        assert_eq!(ease.evaluate(1.0), 1.0);
        assert!((ease.evaluate(0.5) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn test_power_in() {
        let ease = EasingFunction::PowerIn { exponent: 3 };
        assert!((ease.evaluate(0.5) - 0.125).abs() < 1e-6);
    }

    #[test]
    fn test_power_in_out_is_symmetric() {
        let ease = EasingFunction::PowerInOut { exponent: 5 };
        assert!((ease.evaluate(0.5) - 0.5).abs() < 1e-6);
        let a = ease.evaluate(0.2);
        let b = ease.evaluate(0.8);
        assert!((a + b - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_back_out_overshoots() {
        let ease = EasingFunction::BackOut { overshoot: 1.7 };
        assert!(ease.evaluate(0.7) > 1.0);
        assert!((ease.evaluate(1.0) - 1.0).abs() < 1e-6);
        assert!(ease.evaluate(0.0).abs() < 1e-6);
    }

    #[test]
    fn test_input_clamping() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(-0.5), 0.0);
        assert_eq!(linear.evaluate(1.5), 1.0);
    }

    #[test]
    fn test_names() {
        assert_eq!(
            EasingFunction::from_name("power2.out"),
            Some(EasingFunction::PowerOut { exponent: 3 })
        );
        assert_eq!(
            EasingFunction::from_name("power4.inOut"),
            Some(EasingFunction::PowerInOut { exponent: 5 })
        );
        assert_eq!(
            EasingFunction::from_name("power3"),
            Some(EasingFunction::PowerOut { exponent: 4 })
        );
        assert_eq!(
            EasingFunction::from_name("back.out(2)"),
            Some(EasingFunction::BackOut { overshoot: 2.0 })
        );
        assert_eq!(
            EasingFunction::from_name("none"),
            Some(EasingFunction::Linear)
        );
        assert_eq!(EasingFunction::from_name("power9.out"), None);
        assert_eq!(EasingFunction::from_name("elastic"), None);
    }

    #[test]
    fn test_display_parses_back() {
        for ease in [
            EasingFunction::Linear,
            EasingFunction::PowerIn { exponent: 3 },
            EasingFunction::PowerInOut { exponent: 5 },
            EasingFunction::BackOut { overshoot: 1.7 },
        ] {
            assert_eq!(EasingFunction::from_name(&ease.to_string()), Some(ease));
        }
    }
}
