use crate::error::TreeError;

/// Multiplicative slack used by the default tolerance.
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

/// Additive slack used by the default tolerance.
///
/// At this value a tree needs a path over a thousand nodes deep before the
/// trigger fires, so proactive rebalancing is practically inert for realistic
/// sizes and a sorted feed degrades to list-like behavior. Lower it (or use
/// [`BalanceTolerance::strict`]) to rebalance eagerly.
pub const DEFAULT_ADDITIVE: f64 = 1000.0;

/// How far the tracked height may exceed `log2(n)` before a rebuild.
///
/// The tree rebuilds once `height > log2(n) * multiplier + additive`.
/// Fields are only reachable through the validating constructors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceTolerance {
    multiplier: f64,
    additive: f64,
    enabled: bool,
}

impl Default for BalanceTolerance {
    fn default() -> Self {
        Self {
            multiplier: DEFAULT_MULTIPLIER,
            additive: DEFAULT_ADDITIVE,
            enabled: true,
        }
    }
}

impl BalanceTolerance {
    pub fn new(multiplier: f64, additive: f64) -> Result<Self, TreeError> {
        let valid = |x: f64| x.is_finite() && x >= 0.0;
        if !valid(multiplier) || !valid(additive) {
            return Err(TreeError::InvalidTolerance {
                multiplier,
                additive,
            });
        }
        Ok(Self {
            multiplier,
            additive,
            enabled: true,
        })
    }

    /// Rebuilds as soon as the height exceeds `log2(n) + 1`.
    pub fn strict() -> Self {
        Self {
            multiplier: 1.0,
            additive: 1.0,
            enabled: true,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Multiplicative slack `C`.
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Additive slack `K`.
    pub fn additive(&self) -> f64 {
        self.additive
    }

    /// When false, only an explicit `rebalance()` rebuilds the tree.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_constants() {
        let t = BalanceTolerance::default();
        assert_eq!(t.multiplier(), 2.0);
        assert_eq!(t.additive(), 1000.0);
        assert!(t.is_enabled());
    }

    #[test]
    fn test_new_validates() {
        assert!(BalanceTolerance::new(1.5, 3.0).is_ok());
        assert!(BalanceTolerance::new(0.0, 0.0).is_ok());
        assert!(BalanceTolerance::new(-1.0, 0.0).is_err());
        assert!(BalanceTolerance::new(1.0, f64::NAN).is_err());
        assert!(BalanceTolerance::new(f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_disabled_keeps_constants() {
        let t = BalanceTolerance::disabled();
        assert!(!t.is_enabled());
        assert_eq!(t.additive(), DEFAULT_ADDITIVE);
    }

    #[test]
    fn test_rejected_constants_never_reach_a_tolerance() {
        let err = BalanceTolerance::new(f64::NAN, -5.0).unwrap_err();
        assert!(matches!(err, TreeError::InvalidTolerance { additive, .. } if additive == -5.0));

        let t = BalanceTolerance::new(3.0, 4.0).unwrap();
        assert_eq!((t.multiplier(), t.additive(), t.is_enabled()), (3.0, 4.0, true));
    }
}
