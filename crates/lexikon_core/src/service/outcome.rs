//! Three-way result for operations gated by a business rule.

/// Result of a flow whose success depends on a domain decision.
///
/// Structural faults (missing endpoints, blank fields) are reported as
/// `StoreError` instead; an `Outcome` is always a legitimate answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T, C> {
    Success(T),
    /// Every record that collided with the requested value. Nothing was
    /// written.
    Conflicts(Vec<C>),
    /// The caller chose not to proceed. Nothing was written.
    Canceled,
}

impl<T, C> Outcome<T, C> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Colliding records; empty unless `Conflicts`.
    pub fn conflicts(&self) -> &[C] {
        match self {
            Self::Conflicts(conflicts) => conflicts,
            _ => &[],
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U, C> {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::Conflicts(conflicts) => Outcome::Conflicts(conflicts),
            Self::Canceled => Outcome::Canceled,
        }
    }

    /// Stable status label for log lines.
    pub(crate) fn status(&self) -> &'static str {
        match self {
            Self::Success(_) => "ok",
            Self::Conflicts(_) => "conflict",
            Self::Canceled => "canceled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Outcome;

    #[test]
    fn accessors_follow_variant() {
        let success: Outcome<u8, char> = Outcome::Success(7);
        assert!(success.is_success());
        assert!(success.conflicts().is_empty());
        assert_eq!(success.map(|value| value * 2), Outcome::Success(14));

        let conflicts: Outcome<u8, char> = Outcome::Conflicts(vec!['a', 'b']);
        assert_eq!(conflicts.conflicts(), &['a', 'b']);
        assert_eq!(conflicts.clone().success(), None);
        assert_eq!(conflicts.map(u32::from), Outcome::Conflicts(vec!['a', 'b']));

        let canceled: Outcome<u8, char> = Outcome::Canceled;
        assert_eq!(canceled.status(), "canceled");
    }
}
