//! Certificate-type decision rules.
//!
//! Each rule reads the border control post's decision from the
//! notification. Releases are only granted after the rest of the chain
//! (the commodity validations) has deferred; refusals are returned
//! straight away.

use clearance_model::{
    ConsignmentDecision, DecisionCode, InternalCode, IuuOption, NotAcceptableAction,
    NotificationStatus,
};

use crate::identifiers::IUU_CHECK_CODE;
use crate::pipeline::{Next, Outcome, ResolutionContext, Rule};

/// Return `release` unless a later rule answers with something else.
fn release_unless_vetoed(release: Outcome, ctx: &ResolutionContext<'_>, next: Next<'_>) -> Outcome {
    let downstream = next.run(ctx);
    if downstream.is_unknown() {
        release
    } else {
        downstream
    }
}

fn refusal(action: Option<NotAcceptableAction>) -> Outcome {
    let code = match action {
        Some(NotAcceptableAction::Destruction)
        | Some(NotAcceptableAction::Euthanasia)
        | Some(NotAcceptableAction::Slaughter) => DecisionCode::N02,
        Some(NotAcceptableAction::Transformation) => DecisionCode::N03,
        Some(NotAcceptableAction::Reexport) => DecisionCode::N04,
        Some(NotAcceptableAction::Redispatching) => DecisionCode::N05,
        Some(NotAcceptableAction::Other) | None => DecisionCode::N07,
    };
    Outcome::new(code)
}

fn consignment_decision(
    ctx: &ResolutionContext<'_>,
) -> Option<(ConsignmentDecision, Option<NotAcceptableAction>)> {
    let part_two = ctx.notification?.part_two.as_ref()?;
    part_two
        .decision
        .map(|decision| (decision, part_two.not_acceptable_action))
}

/// Live animals.
pub struct ChedADecisionRule;

impl Rule for ChedADecisionRule {
    fn name(&self) -> &'static str {
        "cheda_decision"
    }

    fn handle(&self, ctx: &ResolutionContext<'_>, next: Next<'_>) -> Outcome {
        let release = match consignment_decision(ctx) {
            Some((ConsignmentDecision::NonAcceptable, action)) => return refusal(action),
            Some((ConsignmentDecision::AcceptableForInternalMarket, _)) => DecisionCode::C03,
            Some((ConsignmentDecision::AcceptableForTemporaryImport, _)) => DecisionCode::C05,
            Some((ConsignmentDecision::HorseReEntry, _))
            | Some((ConsignmentDecision::AcceptableIfChanneled, _)) => DecisionCode::C06,
            Some((ConsignmentDecision::AcceptableForTranshipment, _))
            | Some((ConsignmentDecision::AcceptableForTransit, _))
            | Some((ConsignmentDecision::AcceptableForSpecificWarehouse, _)) => DecisionCode::E03,
            None => return next.run(ctx),
        };
        release_unless_vetoed(Outcome::new(release), ctx, next)
    }
}

/// Products of animal origin.
pub struct ChedPDecisionRule;

impl Rule for ChedPDecisionRule {
    fn name(&self) -> &'static str {
        "chedp_decision"
    }

    fn handle(&self, ctx: &ResolutionContext<'_>, next: Next<'_>) -> Outcome {
        let release = match consignment_decision(ctx) {
            Some((ConsignmentDecision::NonAcceptable, action)) => return refusal(action),
            Some((ConsignmentDecision::AcceptableForInternalMarket, _)) => DecisionCode::C03,
            Some((ConsignmentDecision::AcceptableIfChanneled, _)) => DecisionCode::C06,
            Some((ConsignmentDecision::AcceptableForTranshipment, _))
            | Some((ConsignmentDecision::AcceptableForTransit, _))
            | Some((ConsignmentDecision::AcceptableForSpecificWarehouse, _)) => DecisionCode::E03,
            _ => return next.run(ctx),
        };
        release_unless_vetoed(Outcome::new(release), ctx, next)
    }
}

/// High-risk food and feed not of animal origin.
pub struct ChedDDecisionRule;

impl Rule for ChedDDecisionRule {
    fn name(&self) -> &'static str {
        "chedd_decision"
    }

    fn handle(&self, ctx: &ResolutionContext<'_>, next: Next<'_>) -> Outcome {
        match consignment_decision(ctx) {
            Some((ConsignmentDecision::NonAcceptable, action)) => refusal(action),
            Some((ConsignmentDecision::AcceptableForInternalMarket, _)) => {
                release_unless_vetoed(Outcome::new(DecisionCode::C03), ctx, next)
            }
            _ => next.run(ctx),
        }
    }
}

/// Plants and plant products. Decided on the notification status, since
/// plant health inspections record no consignment decision.
pub struct ChedPPDecisionRule;

impl Rule for ChedPPDecisionRule {
    fn name(&self) -> &'static str {
        "chedpp_decision"
    }

    fn handle(&self, ctx: &ResolutionContext<'_>, next: Next<'_>) -> Outcome {
        match ctx.notification.map(|n| n.status) {
            Some(NotificationStatus::Validated) => {
                release_unless_vetoed(Outcome::new(DecisionCode::C03), ctx, next)
            }
            Some(NotificationStatus::Rejected) => Outcome::new(DecisionCode::N01),
            Some(NotificationStatus::PartiallyRejected) => Outcome::new(DecisionCode::H01),
            _ => next.run(ctx),
        }
    }
}

/// Illegal-fishing check on CHED-P consignments. Only answers for the
/// illegal-fishing check code; every other CHED-P check defers.
pub struct IuuCheckRule;

impl Rule for IuuCheckRule {
    fn name(&self) -> &'static str {
        "iuu_check"
    }

    fn handle(&self, ctx: &ResolutionContext<'_>, next: Next<'_>) -> Outcome {
        if !ctx.check_code.eq_ignore_ascii_case(IUU_CHECK_CODE) {
            return next.run(ctx);
        }
        let control = ctx
            .notification
            .and_then(|n| n.part_two.as_ref())
            .and_then(|p| p.iuu.as_ref());

        let Some(control) = control else {
            return Outcome::with_detail(DecisionCode::X00, InternalCode::E87);
        };
        if !control.check_required {
            return Outcome::new(DecisionCode::C08);
        }
        match control.option {
            Some(IuuOption::Compliant) => Outcome::new(DecisionCode::C07),
            Some(IuuOption::NotCompliant) => Outcome::new(DecisionCode::N07),
            Some(IuuOption::NotApplicable) => Outcome::new(DecisionCode::C08),
            None => Outcome::new(DecisionCode::H02),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::fixtures::*;
    use clearance_model::{CertificateType, IuuControl, PartTwo};
    use std::sync::Arc;

    /// A validation that always holds, standing in for a failing
    /// commodity check.
    struct AlwaysHold;

    impl Rule for AlwaysHold {
        fn name(&self) -> &'static str {
            "always_hold"
        }

        fn handle(&self, _ctx: &ResolutionContext<'_>, _next: Next<'_>) -> Outcome {
            Outcome::with_detail(DecisionCode::H01, InternalCode::E85)
        }
    }

    fn resolve(rules: &[Arc<dyn Rule>], ctx: &ResolutionContext<'_>) -> Outcome {
        crate::pipeline::Pipeline::new(rules).resolve(ctx)
    }

    #[test]
    fn cheda_release_codes() {
        let d = declaration();
        let c = commodity("0201100000", None);
        for (decision, code) in [
            (ConsignmentDecision::AcceptableForInternalMarket, DecisionCode::C03),
            (ConsignmentDecision::AcceptableForTemporaryImport, DecisionCode::C05),
            (ConsignmentDecision::HorseReEntry, DecisionCode::C06),
            (ConsignmentDecision::AcceptableForTransit, DecisionCode::E03),
        ] {
            let n = notification(
                CertificateType::ChedA,
                NotificationStatus::Validated,
                Some(decision),
            );
            let ctx = context(&d, &c, "H221", Some(&n), None);
            let rules: Vec<Arc<dyn Rule>> = vec![Arc::new(ChedADecisionRule)];
            assert_eq!(
                resolve(&rules, &ctx),
                Outcome::new(code)
            );
        }
    }

    #[test]
    fn refusal_maps_not_acceptable_action() {
        let d = declaration();
        let c = commodity("0201100000", None);
        let mut n = notification(
            CertificateType::ChedP,
            NotificationStatus::Rejected,
            Some(ConsignmentDecision::NonAcceptable),
        );
        n.part_two.as_mut().unwrap().not_acceptable_action = Some(NotAcceptableAction::Reexport);
        let ctx = context(&d, &c, "H222", Some(&n), None);
        let rules: Vec<Arc<dyn Rule>> = vec![Arc::new(ChedPDecisionRule)];
        assert_eq!(
            resolve(&rules, &ctx),
            Outcome::new(DecisionCode::N04)
        );
    }

    #[test]
    fn later_validation_vetoes_release() {
        let d = declaration();
        let c = commodity("0201100000", None);
        let n = notification(
            CertificateType::ChedD,
            NotificationStatus::Validated,
            Some(ConsignmentDecision::AcceptableForInternalMarket),
        );
        let ctx = context(&d, &c, "H223", Some(&n), None);
        let rules: Vec<Arc<dyn Rule>> = vec![Arc::new(ChedDDecisionRule), Arc::new(AlwaysHold)];
        assert_eq!(
            resolve(&rules, &ctx),
            Outcome::with_detail(DecisionCode::H01, InternalCode::E85)
        );
    }

    #[test]
    fn refusal_is_not_vetoed() {
        let d = declaration();
        let c = commodity("0201100000", None);
        let n = notification(
            CertificateType::ChedD,
            NotificationStatus::Rejected,
            Some(ConsignmentDecision::NonAcceptable),
        );
        let ctx = context(&d, &c, "H223", Some(&n), None);
        let rules: Vec<Arc<dyn Rule>> = vec![Arc::new(ChedDDecisionRule), Arc::new(AlwaysHold)];
        assert_eq!(
            resolve(&rules, &ctx),
            Outcome::new(DecisionCode::N07)
        );
    }

    #[test]
    fn chedpp_uses_status() {
        let d = declaration();
        let c = commodity("0602100000", None);
        let n = notification(CertificateType::ChedPP, NotificationStatus::Rejected, None);
        let ctx = context(&d, &c, "H219", Some(&n), None);
        let rules: Vec<Arc<dyn Rule>> = vec![Arc::new(ChedPPDecisionRule)];
        assert_eq!(
            resolve(&rules, &ctx),
            Outcome::new(DecisionCode::N01)
        );
    }

    #[test]
    fn iuu_rule_only_answers_iuu_checks() {
        let d = declaration();
        let c = commodity("0302110000", None);
        let mut n = notification(
            CertificateType::ChedP,
            NotificationStatus::Validated,
            Some(ConsignmentDecision::AcceptableForInternalMarket),
        );
        n.part_two = Some(PartTwo {
            decision: Some(ConsignmentDecision::AcceptableForInternalMarket),
            iuu: Some(IuuControl {
                check_required: true,
                option: Some(IuuOption::NotCompliant),
            }),
            ..PartTwo::default()
        });

        let rules: Vec<Arc<dyn Rule>> = vec![Arc::new(IuuCheckRule), Arc::new(ChedPDecisionRule)];
        let ctx = context(&d, &c, "H224", Some(&n), None);
        assert_eq!(resolve(&rules, &ctx), Outcome::new(DecisionCode::N07));

        let ctx = context(&d, &c, "H222", Some(&n), None);
        assert_eq!(resolve(&rules, &ctx), Outcome::new(DecisionCode::C03));
    }

    #[test]
    fn iuu_rule_without_control_data() {
        let d = declaration();
        let c = commodity("0302110000", None);
        let n = notification(CertificateType::ChedP, NotificationStatus::Validated, None);
        let ctx = context(&d, &c, "H224", Some(&n), None);
        let rules: Vec<Arc<dyn Rule>> = vec![Arc::new(IuuCheckRule)];
        assert_eq!(
            resolve(&rules, &ctx),
            Outcome::with_detail(DecisionCode::X00, InternalCode::E87)
        );
    }
}
