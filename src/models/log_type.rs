use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogType {
    In,
    Out,
    Justified,
}

impl LogType {
    /// Convert enum → DB string
    pub fn to_db_str(self) -> &'static str {
        match self {
            LogType::In => "in",
            LogType::Out => "out",
            LogType::Justified => "justified",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "in" => Some(LogType::In),
            "out" => Some(LogType::Out),
            "justified" => Some(LogType::Justified),
            _ => None,
        }
    }

    pub fn is_in(self) -> bool {
        matches!(self, LogType::In)
    }

    pub fn is_out(self) -> bool {
        matches!(self, LogType::Out)
    }

    pub fn is_punch(self) -> bool {
        matches!(self, LogType::In | LogType::Out)
    }
}

/// Why a JUSTIFIED interval exists: a personal commitment the user declared
/// up front, or an explanation for a missed work day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JustificationKind {
    Personal,
    Missed,
}

impl JustificationKind {
    pub fn to_db_str(self) -> &'static str {
        match self {
            JustificationKind::Personal => "personal",
            JustificationKind::Missed => "missed",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "personal" => Some(JustificationKind::Personal),
            "missed" => Some(JustificationKind::Missed),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            JustificationKind::Personal => "Justificado (pessoal)",
            JustificationKind::Missed => "Justificado (falta)",
        }
    }
}
