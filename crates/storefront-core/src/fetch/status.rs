// ── Fetch status ──

use std::fmt;

/// What the controller is doing right now. Exactly one holds at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Idle,
    InitialLoading,
    LoadingMore,
    Refreshing,
    /// The last fetch failed; carries the display message.
    Error(String),
}

impl FetchStatus {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// A first-page load is outstanding.
    pub fn loading(&self) -> bool {
        matches!(self, Self::InitialLoading)
    }

    pub fn is_loading_more(&self) -> bool {
        matches!(self, Self::LoadingMore)
    }

    pub fn refreshing(&self) -> bool {
        matches!(self, Self::Refreshing)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Any fetch is outstanding.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            Self::InitialLoading | Self::LoadingMore | Self::Refreshing
        )
    }
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::InitialLoading => f.write_str("loading"),
            Self::LoadingMore => f.write_str("loading more"),
            Self::Refreshing => f.write_str("refreshing"),
            Self::Error(message) => write!(f, "error: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_flag_holds_for_exactly_one_status() {
        let all = [
            FetchStatus::Idle,
            FetchStatus::InitialLoading,
            FetchStatus::LoadingMore,
            FetchStatus::Refreshing,
            FetchStatus::Error("boom".into()),
        ];
        let count = |f: fn(&FetchStatus) -> bool| all.iter().filter(|s| f(s)).count();

        assert_eq!(count(FetchStatus::is_idle), 1);
        assert_eq!(count(FetchStatus::loading), 1);
        assert_eq!(count(FetchStatus::is_loading_more), 1);
        assert_eq!(count(FetchStatus::refreshing), 1);
        assert_eq!(all.iter().filter(|s| s.error().is_some()).count(), 1);
    }
}
