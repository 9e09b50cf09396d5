//! Financial health classification
//!
//! Classifies a period by its coverage ratio (`income / budget`). Checks run
//! in a fixed order: the deficit bands first, then the absolute balanced
//! window, then the surplus bands. A near-balanced period with a ratio of at
//! least the deficit cut-off therefore reads as `balanced`, not as a surplus.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::reconciler::BudgetPeriodData;
use crate::models::Money;

/// Categorical health of a period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialHealthStatus {
    CriticalDeficit,
    Deficit,
    Balanced,
    HealthySurplus,
    StrongSurplus,
    NoBudget,
}

impl FinancialHealthStatus {
    /// Stable identifier, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CriticalDeficit => "critical_deficit",
            Self::Deficit => "deficit",
            Self::Balanced => "balanced",
            Self::HealthySurplus => "healthy_surplus",
            Self::StrongSurplus => "strong_surplus",
            Self::NoBudget => "no_budget",
        }
    }

    pub fn is_deficit(&self) -> bool {
        matches!(self, Self::CriticalDeficit | Self::Deficit)
    }

    pub fn is_surplus(&self) -> bool {
        matches!(self, Self::HealthySurplus | Self::StrongSurplus)
    }
}

impl fmt::Display for FinancialHealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ratio cut-offs and the balanced window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthThresholds {
    /// Ratios below this are a critical deficit
    pub critical_below: f64,
    /// Ratios below this are a deficit
    pub deficit_below: f64,
    /// Absolute income/budget difference still considered balanced
    pub balanced_epsilon: Money,
    /// Ratios up to and including this are a healthy surplus
    pub healthy_max: f64,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            critical_below: 0.8,
            deficit_below: 0.99,
            balanced_epsilon: Money::from_units(500),
            healthy_max: 1.2,
        }
    }
}

/// Result of classifying a period
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthAssessment {
    pub status: FinancialHealthStatus,
    /// `income / budget`, 0 when there is no budget
    pub coverage_ratio: f64,
}

/// Classify a reconciled period with the default thresholds
pub fn classify(data: &BudgetPeriodData) -> HealthAssessment {
    classify_totals(data.income_total, data.budget_total, &HealthThresholds::default())
}

/// Classify a reconciled period with custom thresholds
pub fn classify_with(data: &BudgetPeriodData, thresholds: &HealthThresholds) -> HealthAssessment {
    classify_totals(data.income_total, data.budget_total, thresholds)
}

/// Classify raw income and budget totals
pub fn classify_totals(
    income_total: Money,
    budget_total: Money,
    thresholds: &HealthThresholds,
) -> HealthAssessment {
    if budget_total.is_zero() {
        return HealthAssessment {
            status: FinancialHealthStatus::NoBudget,
            coverage_ratio: 0.0,
        };
    }

    let ratio = income_total.as_f64() / budget_total.as_f64();
    let delta = (income_total - budget_total).abs();

    let status = if ratio < thresholds.critical_below {
        FinancialHealthStatus::CriticalDeficit
    } else if ratio < thresholds.deficit_below {
        FinancialHealthStatus::Deficit
    } else if delta <= thresholds.balanced_epsilon {
        FinancialHealthStatus::Balanced
    } else if ratio <= thresholds.healthy_max {
        FinancialHealthStatus::HealthySurplus
    } else {
        FinancialHealthStatus::StrongSurplus
    };

    HealthAssessment {
        status,
        coverage_ratio: ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, ReconcilePeriod};
    use crate::services::reconciler::reconcile;

    fn status(income: i64, budget: i64) -> FinancialHealthStatus {
        classify_totals(
            Money::from_units(income),
            Money::from_units(budget),
            &HealthThresholds::default(),
        )
        .status
    }

    #[test]
    fn test_deficit_bands() {
        assert_eq!(status(7900, 10000), FinancialHealthStatus::CriticalDeficit);
        assert_eq!(status(8500, 10000), FinancialHealthStatus::Deficit);
        assert_eq!(status(8000, 10000), FinancialHealthStatus::Deficit);
    }

    #[test]
    fn test_balanced_window() {
        assert_eq!(status(100_000, 100_000), FinancialHealthStatus::Balanced);
        assert_eq!(status(100_500, 100_000), FinancialHealthStatus::Balanced);
        assert_eq!(status(99_500, 100_000), FinancialHealthStatus::Balanced);
        // Ratio 0.98 is still a deficit even though the difference is small
        assert_eq!(status(490, 500), FinancialHealthStatus::Deficit);
        // Just outside the window
        assert_eq!(status(100_501, 100_000), FinancialHealthStatus::HealthySurplus);
    }

    #[test]
    fn test_surplus_bands() {
        assert_eq!(status(12000, 10000), FinancialHealthStatus::HealthySurplus);
        assert_eq!(status(12100, 10000), FinancialHealthStatus::StrongSurplus);
    }

    #[test]
    fn test_no_budget_regardless_of_income() {
        for income in [0, 1, 10_000, 1_000_000] {
            let assessment = classify_totals(
                Money::from_units(income),
                Money::zero(),
                &HealthThresholds::default(),
            );
            assert_eq!(assessment.status, FinancialHealthStatus::NoBudget);
            assert_eq!(assessment.coverage_ratio, 0.0);
        }
    }

    #[test]
    fn test_coverage_ratio() {
        let assessment = classify_totals(
            Money::from_units(15000),
            Money::from_units(10000),
            &HealthThresholds::default(),
        );
        assert!((assessment.coverage_ratio - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_custom_epsilon() {
        let thresholds = HealthThresholds {
            balanced_epsilon: Money::zero(),
            ..HealthThresholds::default()
        };
        let assessment =
            classify_totals(Money::from_units(1001), Money::from_units(1000), &thresholds);
        assert_eq!(assessment.status, FinancialHealthStatus::HealthySurplus);
    }

    #[test]
    fn test_classify_period_data() {
        let budgets = vec![Budget::monthly("Food", "Food", Money::from_units(7000))];
        let data = reconcile(
            &budgets,
            &[],
            ReconcilePeriod::month(2025, 0),
            Some(Money::from_units(10000)),
        );
        let assessment = classify(&data);
        assert_eq!(assessment.status, FinancialHealthStatus::StrongSurplus);
        assert!(assessment.status.is_surplus());
        assert_eq!(assessment.status.to_string(), "strong_surplus");
    }

    #[test]
    fn test_serialized_names() {
        let json = serde_json::to_string(&FinancialHealthStatus::CriticalDeficit).unwrap();
        assert_eq!(json, r#""critical_deficit""#);
        assert_eq!(FinancialHealthStatus::NoBudget.as_str(), "no_budget");
    }
}
