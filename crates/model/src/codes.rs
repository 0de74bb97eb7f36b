//! Code vocabularies shared by every clearance crate: certificate types,
//! public decision codes and internal detail codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ── Certificate types ───────────────────────────────────────────────

/// The four commodity-health certificate families a check can belong to.
///
/// Serialized with the notification type codes used by the notification
/// system (`CVEDA`, `CVEDP`, `CHEDPP`, `CED`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CertificateType {
    #[serde(rename = "CVEDA")]
    ChedA,
    #[serde(rename = "CVEDP")]
    ChedP,
    #[serde(rename = "CHEDPP")]
    ChedPP,
    #[serde(rename = "CED")]
    ChedD,
}

impl CertificateType {
    pub const ALL: [CertificateType; 4] = [
        CertificateType::ChedA,
        CertificateType::ChedP,
        CertificateType::ChedPP,
        CertificateType::ChedD,
    ];

    /// Notification type code, as carried on notifications.
    pub fn code(self) -> &'static str {
        match self {
            CertificateType::ChedA => "CVEDA",
            CertificateType::ChedP => "CVEDP",
            CertificateType::ChedPP => "CHEDPP",
            CertificateType::ChedD => "CED",
        }
    }

    /// Name shown to traders in reason text.
    pub fn display_name(self) -> &'static str {
        match self {
            CertificateType::ChedA => "CHED-A",
            CertificateType::ChedP => "CHED-P",
            CertificateType::ChedPP => "CHED-PP",
            CertificateType::ChedD => "CHED-D",
        }
    }

    /// Reference prefix used on this family's notification numbers.
    pub fn notification_prefix(self) -> &'static str {
        match self {
            CertificateType::ChedA => "CHEDA.GB",
            CertificateType::ChedP => "CHEDP.GB",
            CertificateType::ChedPP => "CHEDPP.GB",
            CertificateType::ChedD => "CHEDD.GB",
        }
    }
}

impl fmt::Display for CertificateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CertificateType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CertificateType::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown certificate type '{}'", s))
    }
}

// ── Decision codes ──────────────────────────────────────────────────

/// Public outcome of a resolved check.
///
/// `C*` release, `E03` release to a controlled destination, `H*` hold,
/// `N*` refusal, `X00` no match / unresolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DecisionCode {
    C02,
    C03,
    C05,
    C06,
    C07,
    C08,
    E03,
    H01,
    H02,
    N01,
    N02,
    N03,
    N04,
    N05,
    N06,
    N07,
    X00,
}

impl DecisionCode {
    pub fn as_str(self) -> &'static str {
        match self {
            DecisionCode::C02 => "C02",
            DecisionCode::C03 => "C03",
            DecisionCode::C05 => "C05",
            DecisionCode::C06 => "C06",
            DecisionCode::C07 => "C07",
            DecisionCode::C08 => "C08",
            DecisionCode::E03 => "E03",
            DecisionCode::H01 => "H01",
            DecisionCode::H02 => "H02",
            DecisionCode::N01 => "N01",
            DecisionCode::N02 => "N02",
            DecisionCode::N03 => "N03",
            DecisionCode::N04 => "N04",
            DecisionCode::N05 => "N05",
            DecisionCode::N06 => "N06",
            DecisionCode::N07 => "N07",
            DecisionCode::X00 => "X00",
        }
    }

    /// True for the "no match / unresolved" code.
    pub fn is_unresolved(self) -> bool {
        self == DecisionCode::X00
    }

    /// Rank used when several outcomes compete for one check.
    ///
    /// Refusal outranks no-match, which outranks hold, then controlled
    /// release, then release.
    pub fn severity(self) -> u8 {
        match self.as_str().as_bytes()[0] {
            b'N' => 4,
            b'X' => 3,
            b'H' => 2,
            b'E' => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for DecisionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Internal detail codes ───────────────────────────────────────────

/// Internal-only diagnostic code refining why a decision was produced.
/// Never shown to traders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InternalCode {
    /// No notification linked to the check.
    E70,
    /// Notification cancelled.
    E71,
    /// Notification replaced by a newer one.
    E72,
    /// Notification deleted.
    E73,
    /// Notification split into several consignments.
    E74,
    /// Check code belongs to no certificate type.
    E75,
    /// Notification is of the wrong certificate type for the check.
    E80,
    /// Declaration finalised as cancelled or destroyed.
    E82,
    /// Notification is being amended.
    E84,
    /// Declared commodity code not on the notification.
    E85,
    /// Declared net mass outside tolerance of the notification.
    E86,
    /// Illegal-fishing control data missing.
    E87,
    /// Notification has no part two decision.
    E88,
    /// No rule resolved the check.
    E99,
}

impl InternalCode {
    pub fn as_str(self) -> &'static str {
        match self {
            InternalCode::E70 => "E70",
            InternalCode::E71 => "E71",
            InternalCode::E72 => "E72",
            InternalCode::E73 => "E73",
            InternalCode::E74 => "E74",
            InternalCode::E75 => "E75",
            InternalCode::E80 => "E80",
            InternalCode::E82 => "E82",
            InternalCode::E84 => "E84",
            InternalCode::E85 => "E85",
            InternalCode::E86 => "E86",
            InternalCode::E87 => "E87",
            InternalCode::E88 => "E88",
            InternalCode::E99 => "E99",
        }
    }
}

impl fmt::Display for InternalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
