//! Surplus allocation
//!
//! Splits a surplus into savings, goals and personal buckets. Savings and goals
//! are rounded independently to the cent; personal absorbs the residual, so the
//! three buckets always add up to the input exactly. Plans are plain data: a
//! new plan never requires touching `allocate`.

use serde::{Deserialize, Serialize};

use crate::error::{PocketError, PocketResult};
use crate::models::money::BASIS_POINTS;
use crate::models::Money;

/// Tolerance when checking that plan shares add up to 1.0
const SHARE_TOLERANCE: f64 = 1e-6;

/// A named percentage split, shares expressed as fractions of 1.0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub id: String,
    pub name: String,
    pub savings: f64,
    pub goals: f64,
    pub personal: f64,
}

impl AllocationPlan {
    /// Create a validated plan
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        savings: f64,
        goals: f64,
        personal: f64,
    ) -> PocketResult<Self> {
        let plan = Self {
            id: id.into(),
            name: name.into(),
            savings,
            goals,
            personal,
        };
        plan.validate()?;
        Ok(plan)
    }

    fn builtin(id: &str, name: &str, savings: f64, goals: f64, personal: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            savings,
            goals,
            personal,
        }
    }

    /// 70% savings, 20% goals, 10% personal
    pub fn conservative() -> Self {
        Self::builtin("conservative", "Conservative", 0.7, 0.2, 0.1)
    }

    /// 50% savings, 30% goals, 20% personal
    pub fn balanced() -> Self {
        Self::builtin("balanced", "Balanced", 0.5, 0.3, 0.2)
    }

    /// 30% savings, 40% goals, 30% personal
    pub fn aggressive() -> Self {
        Self::builtin("aggressive", "Aggressive", 0.3, 0.4, 0.3)
    }

    /// Check that the shares are in range and sum to 1.0
    pub fn validate(&self) -> PocketResult<()> {
        if self.id.trim().is_empty() {
            return Err(PocketError::Validation("Plan id cannot be empty".into()));
        }
        for (bucket, share) in [
            ("savings", self.savings),
            ("goals", self.goals),
            ("personal", self.personal),
        ] {
            if !share.is_finite() || !(0.0..=1.0).contains(&share) {
                return Err(PocketError::Validation(format!(
                    "Plan '{}': {} share must be between 0 and 1, got {}",
                    self.id, bucket, share
                )));
            }
            let bp = share * BASIS_POINTS as f64;
            if (bp - bp.round()).abs() > SHARE_TOLERANCE * BASIS_POINTS as f64 {
                return Err(PocketError::Validation(format!(
                    "Plan '{}': {} share {} is finer than one basis point (0.0001)",
                    self.id, bucket, share
                )));
            }
        }
        let sum = self.savings + self.goals + self.personal;
        if (sum - 1.0).abs() > SHARE_TOLERANCE {
            return Err(PocketError::Validation(format!(
                "Plan '{}': shares must sum to 1.0, got {}",
                self.id, sum
            )));
        }
        Ok(())
    }

    fn savings_bp(&self) -> i64 {
        to_basis_points(self.savings)
    }

    fn goals_bp(&self) -> i64 {
        to_basis_points(self.goals)
    }
}

fn to_basis_points(share: f64) -> i64 {
    (share * BASIS_POINTS as f64).round() as i64
}

/// The three buckets of an allocated surplus
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanAllocation {
    pub plan_id: String,
    /// The amount that was split, clamped at zero
    pub available: Money,
    pub savings: Money,
    pub goals: Money,
    pub personal: Money,
}

impl PlanAllocation {
    fn zero(plan_id: &str) -> Self {
        Self {
            plan_id: plan_id.to_string(),
            available: Money::zero(),
            savings: Money::zero(),
            goals: Money::zero(),
            personal: Money::zero(),
        }
    }

    pub fn total(&self) -> Money {
        self.savings + self.goals + self.personal
    }

    pub fn is_empty(&self) -> bool {
        self.total().is_zero()
    }
}

/// Split `available` according to `plan`
///
/// Non-positive input yields three zero buckets. If independent rounding ever
/// pushes savings plus goals above the input (only possible for plans with a
/// very small personal share), the excess comes back out of goals first and
/// then savings, so no bucket goes negative.
pub fn allocate(available: Money, plan: &AllocationPlan) -> PlanAllocation {
    if !available.is_positive() {
        return PlanAllocation::zero(&plan.id);
    }

    let mut savings = available.share_bp(plan.savings_bp());
    let mut goals = available.share_bp(plan.goals_bp());

    let mut excess = savings + goals - available;
    if excess.is_positive() {
        let from_goals = excess.min(goals);
        goals -= from_goals;
        excess -= from_goals;
        savings -= excess;
    }

    let allocation = PlanAllocation {
        plan_id: plan.id.clone(),
        available,
        savings,
        goals,
        personal: available - savings - goals,
    };

    tracing::debug!(
        plan = %plan.id,
        available = %available,
        savings = %allocation.savings,
        goals = %allocation.goals,
        personal = %allocation.personal,
        "Allocated surplus"
    );

    allocation
}

/// Built-in plans plus any configured custom plans
#[derive(Debug, Clone)]
pub struct PlanRegistry {
    plans: Vec<AllocationPlan>,
}

impl PlanRegistry {
    /// Registry with the three built-in plans
    pub fn builtin() -> Self {
        Self {
            plans: vec![
                AllocationPlan::conservative(),
                AllocationPlan::balanced(),
                AllocationPlan::aggressive(),
            ],
        }
    }

    /// Built-ins plus custom plans; invalid or duplicate plans are skipped
    /// with a warning
    pub fn with_custom(custom: &[AllocationPlan]) -> Self {
        let mut registry = Self::builtin();
        for plan in custom {
            if let Err(e) = registry.register(plan.clone()) {
                tracing::warn!(plan = %plan.id, error = %e, "Skipping custom allocation plan");
            }
        }
        registry
    }

    /// Add a plan
    pub fn register(&mut self, plan: AllocationPlan) -> PocketResult<()> {
        plan.validate()?;
        if self.get(&plan.id).is_some() {
            return Err(PocketError::Duplicate {
                entity_type: "Allocation plan",
                identifier: plan.id,
            });
        }
        self.plans.push(plan);
        Ok(())
    }

    /// Look up a plan by id, case-insensitively
    pub fn get(&self, id: &str) -> Option<&AllocationPlan> {
        let id = id.trim();
        self.plans.iter().find(|p| p.id.eq_ignore_ascii_case(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &AllocationPlan> {
        self.plans.iter()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Allocate using the plan with the given id
    pub fn allocate(&self, available: Money, plan_id: &str) -> PocketResult<PlanAllocation> {
        let plan = self
            .get(plan_id)
            .ok_or_else(|| PocketError::plan_not_found(plan_id))?;
        Ok(allocate(available, plan))
    }
}

impl Default for PlanRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
