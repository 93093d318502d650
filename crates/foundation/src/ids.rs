/// Identifies one outstanding asynchronous request or timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic token source. Only the most recently issued token is current.
#[derive(Debug, Default, Clone)]
pub struct TokenSequence {
    last: u64,
}

impl TokenSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestToken {
        self.last += 1;
        RequestToken(self.last)
    }

    pub fn latest(&self) -> Option<RequestToken> {
        (self.last > 0).then_some(RequestToken(self.last))
    }

    pub fn is_latest(&self, token: RequestToken) -> bool {
        self.last > 0 && token.0 == self.last
    }

    /// Supersedes every outstanding token without handing out a new one.
    pub fn invalidate(&mut self) {
        self.last += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_newest_token_is_latest() {
        let mut seq = TokenSequence::new();
        assert_eq!(seq.latest(), None);
        let a = seq.issue();
        let b = seq.issue();
        assert!(b > a);
        assert!(!seq.is_latest(a));
        assert!(seq.is_latest(b));
    }

    #[test]
    fn invalidate_retires_outstanding_token() {
        let mut seq = TokenSequence::new();
        let a = seq.issue();
        seq.invalidate();
        assert!(!seq.is_latest(a));
        let b = seq.issue();
        assert!(seq.is_latest(b));
    }
}
