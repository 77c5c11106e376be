//! Shared types for the browser state and its host.
//!
//! Notices are what the host shows as toasts; the reducer only describes them.

use serde::{Deserialize, Serialize};

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeVariant {
    Info,
    Success,
    Error,
}

impl NoticeVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeVariant::Info => "Info",
            NoticeVariant::Success => "Success",
            NoticeVariant::Error => "Error",
        }
    }
}

/// A toast-style notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeVariant::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeVariant::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeVariant::Error, message)
    }

    fn new(variant: NoticeVariant, message: impl Into<String>) -> Self {
        Self {
            title: variant.as_str().to_string(),
            message: message.into(),
            variant,
        }
    }
}
