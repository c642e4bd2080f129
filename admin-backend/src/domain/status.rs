use serde::{Deserialize, Serialize};

/// 有効・無効ステータス（DB上は smallint で 1 = 有効, 2 = 無効）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i16")]
pub enum DisEnableStatus {
    #[default]
    Enable,
    Disable,
}

impl DisEnableStatus {
    pub fn value(self) -> i16 {
        match self {
            DisEnableStatus::Enable => 1,
            DisEnableStatus::Disable => 2,
        }
    }
}

impl From<DisEnableStatus> for i16 {
    fn from(status: DisEnableStatus) -> Self {
        status.value()
    }
}

impl TryFrom<i16> for DisEnableStatus {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DisEnableStatus::Enable),
            2 => Ok(DisEnableStatus::Disable),
            other => Err(format!("Invalid status value: {}", other)),
        }
    }
}

impl std::fmt::Display for DisEnableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisEnableStatus::Enable => write!(f, "enable"),
            DisEnableStatus::Disable => write!(f, "disable"),
        }
    }
}
