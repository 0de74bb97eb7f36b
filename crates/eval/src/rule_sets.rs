//! Per-certificate-type rule sets.
//!
//! Rule instances are built once and shared by every resolution for their
//! certificate type; a [`Pipeline`] borrowing the list is built per check.

use std::collections::BTreeMap;
use std::sync::Arc;

use clearance_model::CertificateType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EvalError;
use crate::pipeline::{Pipeline, Rule};
use crate::rules::{
    AmendmentRule, ChedADecisionRule, ChedDDecisionRule, ChedPDecisionRule, ChedPPDecisionRule,
    CommodityCodeRule, InspectionRequiredRule, IuuCheckRule, MissingSupportingDataRule,
    NotificationStatusRule, OrphanCheckCodeRule, TerminalDeclarationRule,
    UnlinkedNotificationRule, WeightToleranceRule, WrongCertificateTypeRule,
};

/// Tunables for the commodity validations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Allowed deviation of declared net mass from the notified weight.
    pub weight_tolerance_percent: Decimal,
    pub weight_validation: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        RuleConfig {
            weight_tolerance_percent: Decimal::TEN,
            weight_validation: true,
        }
    }
}

/// Ordered rule lists keyed by certificate type, plus the list used for
/// check codes outside every family.
pub struct RuleSets {
    sets: BTreeMap<CertificateType, Vec<Arc<dyn Rule>>>,
    orphan: Vec<Arc<dyn Rule>>,
}

impl RuleSets {
    /// The production rule sets.
    pub fn standard(config: &RuleConfig) -> Self {
        let orphan_check: Arc<dyn Rule> = Arc::new(OrphanCheckCodeRule);
        let unlinked: Arc<dyn Rule> = Arc::new(UnlinkedNotificationRule);
        let wrong_type: Arc<dyn Rule> = Arc::new(WrongCertificateTypeRule);
        let status: Arc<dyn Rule> = Arc::new(NotificationStatusRule);
        let terminal: Arc<dyn Rule> = Arc::new(TerminalDeclarationRule);
        let amendment: Arc<dyn Rule> = Arc::new(AmendmentRule);
        let inspection: Arc<dyn Rule> = Arc::new(InspectionRequiredRule);
        let missing_data: Arc<dyn Rule> = Arc::new(MissingSupportingDataRule);

        let prefix = vec![
            orphan_check,
            unlinked,
            wrong_type,
            status,
            terminal,
        ];

        let mut validations: Vec<Arc<dyn Rule>> = vec![Arc::new(CommodityCodeRule)];
        if config.weight_validation {
            validations.push(Arc::new(WeightToleranceRule::new(
                config.weight_tolerance_percent,
            )));
        }

        let assemble = |middle: Vec<Arc<dyn Rule>>| -> Vec<Arc<dyn Rule>> {
            prefix
                .iter()
                .cloned()
                .chain(middle)
                .chain(validations.iter().cloned())
                .collect()
        };

        let mut sets = BTreeMap::new();
        sets.insert(
            CertificateType::ChedA,
            assemble(vec![
                Arc::clone(&amendment),
                Arc::clone(&inspection),
                Arc::clone(&missing_data),
                Arc::new(ChedADecisionRule),
            ]),
        );
        sets.insert(
            CertificateType::ChedP,
            assemble(vec![
                Arc::clone(&amendment),
                Arc::clone(&inspection),
                Arc::clone(&missing_data),
                Arc::new(IuuCheckRule),
                Arc::new(ChedPDecisionRule),
            ]),
        );
        sets.insert(
            CertificateType::ChedD,
            assemble(vec![
                Arc::clone(&amendment),
                Arc::clone(&inspection),
                Arc::clone(&missing_data),
                Arc::new(ChedDDecisionRule),
            ]),
        );
        sets.insert(
            CertificateType::ChedPP,
            assemble(vec![Arc::clone(&missing_data), Arc::new(ChedPPDecisionRule)]),
        );

        RuleSets {
            sets,
            orphan: prefix,
        }
    }

    /// Rule sets from explicit lists. Types absent from `sets` fail
    /// selection with [`EvalError::MissingRuleSet`].
    pub fn from_parts(
        sets: BTreeMap<CertificateType, Vec<Arc<dyn Rule>>>,
        orphan: Vec<Arc<dyn Rule>>,
    ) -> Self {
        RuleSets { sets, orphan }
    }

    pub fn select(&self, certificate_type: CertificateType) -> Result<&[Arc<dyn Rule>], EvalError> {
        match self.sets.get(&certificate_type) {
            Some(rules) => Ok(rules.as_slice()),
            None => {
                tracing::warn!(%certificate_type, "no rule set configured");
                Err(EvalError::MissingRuleSet(certificate_type))
            }
        }
    }

    /// Pipeline for a check's certificate type; `None` selects the orphan set.
    pub fn pipeline(
        &self,
        certificate_type: Option<CertificateType>,
    ) -> Result<Pipeline<'_>, EvalError> {
        match certificate_type {
            Some(certificate_type) => self.select(certificate_type).map(Pipeline::new),
            None => Ok(Pipeline::new(&self.orphan)),
        }
    }
}

impl Default for RuleSets {
    fn default() -> Self {
        RuleSets::standard(&RuleConfig::default())
    }
}
