//! Success notifications (toasts)

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_TOAST_MS;

/// Screen corner toasts stack in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ToastPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl ToastPosition {
    /// Also used as the CSS class of the toast container
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastPosition::TopLeft => "top-left",
            ToastPosition::TopRight => "top-right",
            ToastPosition::BottomLeft => "bottom-left",
            ToastPosition::BottomRight => "bottom-right",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "top-left" => Some(ToastPosition::TopLeft),
            "top-right" => Some(ToastPosition::TopRight),
            "bottom-left" => Some(ToastPosition::BottomLeft),
            "bottom-right" => Some(ToastPosition::BottomRight),
            _ => None,
        }
    }
}

/// A transient, auto-dismissing success message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub position: ToastPosition,
    pub duration_ms: u32,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: ToastPosition::default(),
            duration_ms: DEFAULT_TOAST_MS,
        }
    }

    pub fn employee_added(name: &str) -> Self {
        Self::success(format!("{} employee added to the system.", name))
    }

    pub fn employee_deleted() -> Self {
        Self::success("Employee deleted.")
    }

    /// Apply user placement/lifetime preferences
    pub fn placed(mut self, position: ToastPosition, duration_ms: u32) -> Self {
        self.position = position;
        self.duration_ms = duration_ms;
        self
    }
}
