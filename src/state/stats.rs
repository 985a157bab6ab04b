use serde::Serialize;

/// Point-in-time view of every accepted submission.
/// Serialized as-is for `GET /stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// Number of latency samples recorded so far
    pub total: u64,
    /// Mean latency in microseconds, integer-divided
    pub average: u64,
}

impl Statistics {
    /// Fold a sample count and their sum into the public view.
    /// Returns zeroed values if nothing has been recorded.
    pub fn from_totals(count: u64, sum_us: u64) -> Self {
        if count == 0 {
            return Self::default();
        }

        Self {
            total: count,
            average: sum_us / count,
        }
    }

    pub fn has_data(&self) -> bool {
        self.total > 0
    }
}
