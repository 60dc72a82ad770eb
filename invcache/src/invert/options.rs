//! Options forwarded to the inversion collaborator
//!
//! The cache layer passes these through verbatim and does not key cached
//! results on them.

use crate::error::{InvCacheError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Environment variable overriding [`InvertOptions::pivot_tolerance`]
pub const ENV_PIVOT_TOLERANCE: &str = "INVCACHE_PIVOT_TOLERANCE";

/// Environment variable overriding [`InvertOptions::pivoting`]
pub const ENV_PIVOTING: &str = "INVCACHE_PIVOTING";

/// Environment variable overriding [`InvertOptions::check_finite`]
pub const ENV_CHECK_FINITE: &str = "INVCACHE_CHECK_FINITE";

/// How elimination picks its pivot row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PivotStrategy {
    /// Swap in the row with the largest magnitude in the pivot column
    Partial,

    /// Always use the diagonal entry, never swap rows
    Diagonal,
}

impl fmt::Display for PivotStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PivotStrategy::Partial => write!(f, "partial"),
            PivotStrategy::Diagonal => write!(f, "diagonal"),
        }
    }
}

impl FromStr for PivotStrategy {
    type Err = InvCacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "partial" => Ok(PivotStrategy::Partial),
            "diagonal" | "none" => Ok(PivotStrategy::Diagonal),
            other => Err(InvCacheError::Config(format!(
                "unknown pivot strategy '{}', expected 'partial' or 'diagonal'",
                other
            ))),
        }
    }
}

/// Parameters for a single inversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvertOptions {
    /// Pivots with magnitude at or below this fraction of the largest input
    /// entry are treated as zero
    pub pivot_tolerance: f64,

    /// Row pivoting strategy
    pub pivoting: PivotStrategy,

    /// Reject NaN and infinite entries before eliminating
    pub check_finite: bool,
}

impl Default for InvertOptions {
    fn default() -> Self {
        Self {
            pivot_tolerance: 1e-12,
            pivoting: PivotStrategy::Partial,
            check_finite: true,
        }
    }
}

impl InvertOptions {
    /// Create a new builder for inversion options
    pub fn builder() -> InvertOptionsBuilder {
        InvertOptionsBuilder::default()
    }

    /// Validate the options
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.pivot_tolerance.is_finite() {
            return Err("pivot_tolerance must be finite".to_string());
        }

        if self.pivot_tolerance < 0.0 {
            return Err("pivot_tolerance must not be negative".to_string());
        }

        Ok(())
    }

    /// Load options from `INVCACHE_*` environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Result<Self> {
        let mut options = Self::default();

        if let Ok(raw) = std::env::var(ENV_PIVOT_TOLERANCE) {
            options.pivot_tolerance = raw.trim().parse().map_err(|e| {
                InvCacheError::Config(format!("{}='{}': {}", ENV_PIVOT_TOLERANCE, raw, e))
            })?;
        }

        if let Ok(raw) = std::env::var(ENV_PIVOTING) {
            options.pivoting = raw.parse()?;
        }

        if let Ok(raw) = std::env::var(ENV_CHECK_FINITE) {
            options.check_finite = parse_bool(&raw).ok_or_else(|| {
                InvCacheError::Config(format!("{}='{}' is not a boolean", ENV_CHECK_FINITE, raw))
            })?;
        }

        options.validate().map_err(InvCacheError::Config)?;
        Ok(options)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Builder for inversion options
#[derive(Debug, Default)]
pub struct InvertOptionsBuilder {
    pivot_tolerance: Option<f64>,
    pivoting: Option<PivotStrategy>,
    check_finite: Option<bool>,
}

impl InvertOptionsBuilder {
    /// Set the singular pivot tolerance
    pub fn pivot_tolerance(mut self, tolerance: f64) -> Self {
        self.pivot_tolerance = Some(tolerance);
        self
    }

    /// Set the pivoting strategy
    pub fn pivoting(mut self, strategy: PivotStrategy) -> Self {
        self.pivoting = Some(strategy);
        self
    }

    /// Enable or disable the finiteness check
    pub fn check_finite(mut self, enable: bool) -> Self {
        self.check_finite = Some(enable);
        self
    }

    /// Build the options
    pub fn build(self) -> InvertOptions {
        let defaults = InvertOptions::default();

        InvertOptions {
            pivot_tolerance: self.pivot_tolerance.unwrap_or(defaults.pivot_tolerance),
            pivoting: self.pivoting.unwrap_or(defaults.pivoting),
            check_finite: self.check_finite.unwrap_or(defaults.check_finite),
        }
    }
}

/// Preset options for common use cases
impl InvertOptions {
    /// Refuse anything close to singular
    pub fn strict() -> Self {
        Self {
            pivot_tolerance: 1e-8,
            ..Default::default()
        }
    }

    /// Accept tiny pivots and skip the finiteness scan
    pub fn lenient() -> Self {
        Self {
            pivot_tolerance: 0.0,
            check_finite: false,
            ..Default::default()
        }
    }
}
