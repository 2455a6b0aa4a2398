//! Last-request-wins guard.

/// Monotonic request counter.
///
/// Each issued request takes the next number; a response is applied only if
/// its number is still the latest one issued.
#[derive(Debug, Default, Clone)]
pub struct RequestSequence {
    current: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number the next request, superseding every earlier one.
    pub fn issue(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    /// Whether `seq` is the most recently issued request.
    pub fn is_current(&self, seq: u64) -> bool {
        seq != 0 && seq == self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_is_current() {
        let mut seq = RequestSequence::new();
        assert!(!seq.is_current(0));

        let a = seq.issue();
        assert!(seq.is_current(a));

        let b = seq.issue();
        assert!(b > a);
        assert!(!seq.is_current(a));
        assert!(seq.is_current(b));
    }
}
