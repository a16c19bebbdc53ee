use std::sync::Arc;

use chrono::{DateTime, Utc};
use immich_api::ErrorKind;

use super::descriptor::ReadingDescriptor;

/// Lifecycle of one reading.
///
/// `Pending` until the first tick. Every later tick lands in `Fresh`,
/// `Missing` (the person it tracks no longer exists under that name), or
/// `Errored`. There is no retry state: the next tick simply tries again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingState {
    Pending,
    Fresh(u64),
    Missing,
    Errored(ErrorKind),
}

impl ReadingState {
    pub fn value(self) -> Option<u64> {
        match self {
            Self::Fresh(v) => Some(v),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fresh(_) => "fresh",
            Self::Missing => "missing",
            Self::Errored(_) => "errored",
        }
    }
}

/// One polled value plus its descriptor.
#[derive(Debug, Clone)]
pub struct Reading {
    pub descriptor: Arc<ReadingDescriptor>,
    pub state: ReadingState,
    /// When `state` was last committed. `None` while pending.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Reading {
    pub fn pending(descriptor: Arc<ReadingDescriptor>) -> Self {
        Self {
            descriptor,
            state: ReadingState::Pending,
            updated_at: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.descriptor.key
    }

    /// The value, or `None` when the last fetch failed or found nothing.
    /// A fresh zero is `Some(0)`.
    pub fn value(&self) -> Option<u64> {
        self.state.value()
    }
}
