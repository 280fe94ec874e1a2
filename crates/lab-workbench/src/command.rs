use std::fmt;
use std::str::FromStr;

use lab_core::enums::Pane;

/// Synchronous UI commands. Loading and generation carry payloads and have
/// their own entry points on [`Workbench`](crate::Workbench).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    RunPreview,
    RunWithTests,
    OpenPreview,
    Save,
    ClearLog,
    ActivatePane(Pane),
    NextPane,
    PreviousPane,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RunPreview => f.write_str("run-preview"),
            Self::RunWithTests => f.write_str("run-with-tests"),
            Self::OpenPreview => f.write_str("open-preview"),
            Self::Save => f.write_str("save"),
            Self::ClearLog => f.write_str("clear-log"),
            Self::ActivatePane(pane) => write!(f, "activate-pane:{pane}"),
            Self::NextPane => f.write_str("next-pane"),
            Self::PreviousPane => f.write_str("previous-pane"),
        }
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(name) = s.strip_prefix("activate-pane:") {
            return name
                .parse::<Pane>()
                .map(Self::ActivatePane)
                .map_err(|e| e.to_string());
        }
        match s {
            "run-preview" => Ok(Self::RunPreview),
            "run-with-tests" => Ok(Self::RunWithTests),
            "open-preview" => Ok(Self::OpenPreview),
            "save" => Ok(Self::Save),
            "clear-log" => Ok(Self::ClearLog),
            "next-pane" => Ok(Self::NextPane),
            "previous-pane" => Ok(Self::PreviousPane),
            other => Err(format!("unknown command: {other}")),
        }
    }
}
