//! Rule pipeline: an ordered chain of responsibility.
//!
//! Each [`Rule`] receives the resolution context and a [`Next`] cursor
//! over the rules that follow it. A rule either returns a terminal
//! [`Outcome`] or calls `next.run(ctx)` to defer. When the cursor runs off
//! the end of the list the chain yields [`Outcome::UNKNOWN`], so every
//! resolution terminates.
//!
//! A rule that defers may look at what the rest of the chain returned
//! before answering; decision rules use this to let the commodity
//! validations behind them veto a release.

use std::sync::Arc;

use clearance_model::{
    CertificateType, Commodity, Declaration, DecisionCode, Document, InternalCode, Notification,
};

/// Everything a rule may look at when resolving one check.
///
/// `notification` and `document` are `None` when no linked notification or
/// qualifying document exists for the pairing being resolved.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    pub declaration: &'a Declaration,
    pub commodity: &'a Commodity,
    pub check_code: &'a str,
    /// Family of `check_code`, `None` for orphan check codes.
    pub certificate_type: Option<CertificateType>,
    pub notification: Option<&'a Notification>,
    pub document: Option<&'a Document>,
}

/// A public decision code paired with an optional internal detail code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub decision_code: DecisionCode,
    pub internal_code: Option<InternalCode>,
}

impl Outcome {
    /// Default when no rule resolves the check.
    pub const UNKNOWN: Outcome = Outcome {
        decision_code: DecisionCode::X00,
        internal_code: Some(InternalCode::E99),
    };

    /// The linked notification is of another certificate family.
    pub const WRONG_CERTIFICATE_TYPE: Outcome = Outcome {
        decision_code: DecisionCode::X00,
        internal_code: Some(InternalCode::E80),
    };

    /// No notification is linked to the check.
    pub const UNLINKED: Outcome = Outcome {
        decision_code: DecisionCode::X00,
        internal_code: Some(InternalCode::E70),
    };

    pub const fn new(decision_code: DecisionCode) -> Self {
        Outcome {
            decision_code,
            internal_code: None,
        }
    }

    pub const fn with_detail(decision_code: DecisionCode, internal_code: InternalCode) -> Self {
        Outcome {
            decision_code,
            internal_code: Some(internal_code),
        }
    }

    /// True when the chain fell through without any rule answering.
    pub fn is_unknown(&self) -> bool {
        *self == Outcome::UNKNOWN
    }
}

/// One link of the chain. Rule instances are shared across every
/// resolution for their certificate type and must hold no mutable state.
pub trait Rule: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Resolve `ctx` or defer to `next`.
    fn handle(&self, ctx: &ResolutionContext<'_>, next: Next<'_>) -> Outcome;
}

/// Cursor over the rules remaining after the current one.
#[derive(Clone, Copy)]
pub struct Next<'r> {
    rules: &'r [Arc<dyn Rule>],
}

impl<'r> Next<'r> {
    /// A cursor with nothing behind it; `run` yields [`Outcome::UNKNOWN`].
    pub fn empty() -> Self {
        Next { rules: &[] }
    }

    /// Hand `ctx` to the rest of the chain.
    pub fn run(self, ctx: &ResolutionContext<'_>) -> Outcome {
        match self.rules.split_first() {
            Some((rule, rest)) => rule.handle(ctx, Next { rules: rest }),
            None => Outcome::UNKNOWN,
        }
    }
}

/// A composed chain ready to resolve contexts.
#[derive(Clone, Copy)]
pub struct Pipeline<'r> {
    rules: &'r [Arc<dyn Rule>],
}

impl<'r> Pipeline<'r> {
    pub fn new(rules: &'r [Arc<dyn Rule>]) -> Self {
        Pipeline { rules }
    }

    pub fn resolve(&self, ctx: &ResolutionContext<'_>) -> Outcome {
        Next { rules: self.rules }.run(ctx)
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}
