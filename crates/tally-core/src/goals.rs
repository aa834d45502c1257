//! Savings goal progress

use crate::models::{GoalProgress, SavingsGoal};

/// Share of `target` reached by `current`, clamped to 0..=100
///
/// A target that is zero, negative or not finite yields 0.
pub fn progress_percent(current: f64, target: f64) -> f64 {
    if !target.is_finite() || target <= 0.0 {
        return 0.0;
    }
    let percent = current / target * 100.0;
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, 100.0)
}

/// Progress for one goal; the stored amounts are reported as-is
pub fn progress_for(goal: &SavingsGoal) -> GoalProgress {
    let has_target = goal.target_amount.is_finite() && goal.target_amount > 0.0;
    GoalProgress {
        goal_id: goal.id.clone(),
        title: goal.title.clone(),
        color: goal.color.clone(),
        current_amount: goal.current_amount,
        target_amount: goal.target_amount,
        percent: progress_percent(goal.current_amount, goal.target_amount),
        remaining: (goal.target_amount - goal.current_amount).max(0.0),
        is_complete: has_target && goal.current_amount >= goal.target_amount,
    }
}

/// Progress for every goal, in stored order
pub fn goal_progress(goals: &[SavingsGoal]) -> Vec<GoalProgress> {
    goals.iter().map(progress_for).collect()
}
