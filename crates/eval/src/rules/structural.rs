//! Structural rules: conditions that make the notification's own decision
//! irrelevant. They run before any certificate-type rule.

use clearance_model::{DecisionCode, InspectionRequired, InternalCode, NotificationStatus};

use crate::pipeline::{Next, Outcome, ResolutionContext, Rule};

/// The check code belongs to no certificate family.
pub struct OrphanCheckCodeRule;

impl Rule for OrphanCheckCodeRule {
    fn name(&self) -> &'static str {
        "orphan_check_code"
    }

    fn handle(&self, ctx: &ResolutionContext<'_>, next: Next<'_>) -> Outcome {
        if ctx.certificate_type.is_none() {
            return Outcome::with_detail(DecisionCode::X00, InternalCode::E75);
        }
        next.run(ctx)
    }
}

/// No notification is linked to the document being resolved.
pub struct UnlinkedNotificationRule;

impl Rule for UnlinkedNotificationRule {
    fn name(&self) -> &'static str {
        "unlinked_notification"
    }

    fn handle(&self, ctx: &ResolutionContext<'_>, next: Next<'_>) -> Outcome {
        if ctx.notification.is_none() {
            return Outcome::UNLINKED;
        }
        next.run(ctx)
    }
}

/// The linked notification belongs to another family than the check.
pub struct WrongCertificateTypeRule;

impl Rule for WrongCertificateTypeRule {
    fn name(&self) -> &'static str {
        "wrong_certificate_type"
    }

    fn handle(&self, ctx: &ResolutionContext<'_>, next: Next<'_>) -> Outcome {
        if let (Some(notification), Some(expected)) = (ctx.notification, ctx.certificate_type) {
            if notification.certificate_type != expected {
                return Outcome::WRONG_CERTIFICATE_TYPE;
            }
        }
        next.run(ctx)
    }
}

/// The notification was withdrawn or superseded.
pub struct NotificationStatusRule;

impl Rule for NotificationStatusRule {
    fn name(&self) -> &'static str {
        "notification_status"
    }

    fn handle(&self, ctx: &ResolutionContext<'_>, next: Next<'_>) -> Outcome {
        let detail = match ctx.notification.map(|n| n.status) {
            Some(NotificationStatus::Cancelled) => InternalCode::E71,
            Some(NotificationStatus::Replaced) => InternalCode::E72,
            Some(NotificationStatus::Deleted) => InternalCode::E73,
            Some(NotificationStatus::SplitConsignment) => InternalCode::E74,
            _ => return next.run(ctx),
        };
        Outcome::with_detail(DecisionCode::X00, detail)
    }
}

/// Customs finalised the declaration as cancelled or destroyed.
pub struct TerminalDeclarationRule;

impl Rule for TerminalDeclarationRule {
    fn name(&self) -> &'static str {
        "terminal_declaration"
    }

    fn handle(&self, ctx: &ResolutionContext<'_>, next: Next<'_>) -> Outcome {
        if ctx.declaration.is_terminal() {
            return Outcome::with_detail(DecisionCode::X00, InternalCode::E82);
        }
        next.run(ctx)
    }
}

/// The notification is open for amendment; hold until it is resubmitted.
pub struct AmendmentRule;

impl Rule for AmendmentRule {
    fn name(&self) -> &'static str {
        "amendment"
    }

    fn handle(&self, ctx: &ResolutionContext<'_>, next: Next<'_>) -> Outcome {
        match ctx.notification {
            Some(n) if n.status == NotificationStatus::Amend => {
                Outcome::with_detail(DecisionCode::H01, InternalCode::E84)
            }
            _ => next.run(ctx),
        }
    }
}

/// The border control post asked for an inspection that has not concluded.
pub struct InspectionRequiredRule;

impl Rule for InspectionRequiredRule {
    fn name(&self) -> &'static str {
        "inspection_required"
    }

    fn handle(&self, ctx: &ResolutionContext<'_>, next: Next<'_>) -> Outcome {
        let Some(notification) = ctx.notification else {
            return next.run(ctx);
        };
        let Some(part_two) = notification.part_two.as_ref() else {
            return next.run(ctx);
        };
        let inspecting = matches!(
            part_two.inspection_required,
            Some(InspectionRequired::Required) | Some(InspectionRequired::Inconclusive)
        );
        if inspecting && part_two.decision.is_none() {
            return Outcome::new(DecisionCode::H02);
        }
        next.run(ctx)
    }
}

/// The notification carries no decision to act on yet.
///
/// Pending notifications are held awaiting a decision; anything else with no
/// part two is unresolvable.
pub struct MissingSupportingDataRule;

impl Rule for MissingSupportingDataRule {
    fn name(&self) -> &'static str {
        "missing_supporting_data"
    }

    fn handle(&self, ctx: &ResolutionContext<'_>, next: Next<'_>) -> Outcome {
        let Some(notification) = ctx.notification else {
            return next.run(ctx);
        };
        if notification.status.is_pending() {
            return Outcome::new(DecisionCode::H01);
        }
        if notification.part_two.is_none() {
            return Outcome::with_detail(DecisionCode::X00, InternalCode::E88);
        }
        next.run(ctx)
    }
}
