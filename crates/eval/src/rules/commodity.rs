//! Commodity validations: cross-check the declared commodity line against
//! the linked notification. They only ever hold or defer; a deferral lets
//! the decision rule in front of them release.

use clearance_model::{DecisionCode, InternalCode, NotificationCommodity};
use rust_decimal::Decimal;

use crate::pipeline::{Next, Outcome, ResolutionContext, Rule};

/// Notification commodity lines whose code prefixes the declared code.
fn matching_lines<'a>(
    declared_code: &'a str,
    lines: &'a [NotificationCommodity],
) -> impl Iterator<Item = &'a NotificationCommodity> + 'a {
    lines.iter().filter(move |line| {
        let code = line.commodity_code.trim();
        !code.is_empty() && declared_code.trim().starts_with(code)
    })
}

/// The declared commodity code must appear on the notification.
pub struct CommodityCodeRule;

impl Rule for CommodityCodeRule {
    fn name(&self) -> &'static str {
        "commodity_code"
    }

    fn handle(&self, ctx: &ResolutionContext<'_>, next: Next<'_>) -> Outcome {
        let (Some(notification), Some(declared)) =
            (ctx.notification, ctx.commodity.commodity_code.as_deref())
        else {
            return next.run(ctx);
        };
        if notification.commodities.is_empty() {
            return next.run(ctx);
        }
        if matching_lines(declared, &notification.commodities)
            .next()
            .is_none()
        {
            return Outcome::with_detail(DecisionCode::H01, InternalCode::E85);
        }
        next.run(ctx)
    }
}

/// The declared net mass must be within `tolerance_percent` of the weight
/// notified for the same commodity code.
pub struct WeightToleranceRule {
    pub tolerance_percent: Decimal,
}

impl WeightToleranceRule {
    pub fn new(tolerance_percent: Decimal) -> Self {
        WeightToleranceRule { tolerance_percent }
    }

    /// Weights too large to compare count as outside tolerance.
    fn within_tolerance(&self, declared: Decimal, notified: Decimal) -> bool {
        let difference = declared.checked_sub(notified).map(|d| d.abs());
        let scaled = difference.and_then(|d| d.checked_mul(Decimal::ONE_HUNDRED));
        let allowed = notified.checked_mul(self.tolerance_percent);
        match (scaled, allowed) {
            (Some(scaled), Some(allowed)) => scaled <= allowed,
            _ => false,
        }
    }
}

impl Rule for WeightToleranceRule {
    fn name(&self) -> &'static str {
        "weight_tolerance"
    }

    fn handle(&self, ctx: &ResolutionContext<'_>, next: Next<'_>) -> Outcome {
        let (Some(notification), Some(declared_mass), Some(declared_code)) = (
            ctx.notification,
            ctx.commodity.net_mass,
            ctx.commodity.commodity_code.as_deref(),
        ) else {
            return next.run(ctx);
        };

        let notified = matching_lines(declared_code, &notification.commodities)
            .filter_map(|line| line.net_weight)
            .try_fold(Decimal::ZERO, |total, weight| total.checked_add(weight));
        let within = match notified {
            Some(total) if total.is_zero() => return next.run(ctx),
            Some(total) => self.within_tolerance(declared_mass, total),
            None => false,
        };
        if !within {
            return Outcome::with_detail(DecisionCode::H01, InternalCode::E86);
        }
        next.run(ctx)
    }
}
