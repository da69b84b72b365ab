//! A stabilizer bound to the consumer of its commits.

use gestureai_signs::Symbol;

use crate::stabilizer::{Commit, HoldStabilizer, StabilizerConfig};

/// Receives committed symbols.
pub trait CommitSink {
    fn on_commit(&mut self, commit: &Commit);
}

impl<F> CommitSink for F
where
    F: FnMut(&Commit),
{
    fn on_commit(&mut self, commit: &Commit) {
        self(commit)
    }
}

/// One consuming context: its own [`HoldStabilizer`] plus the sink it feeds.
pub struct StabilizerContext<S> {
    stabilizer: HoldStabilizer,
    sink: S,
}

impl<S: CommitSink> StabilizerContext<S> {
    pub fn new(name: &'static str, config: StabilizerConfig, sink: S) -> Self {
        Self {
            stabilizer: HoldStabilizer::new(name, config),
            sink,
        }
    }

    /// Poll the stabilizer and deliver any commit to the sink.
    pub fn poll(&mut self, live: Symbol, now_ms: u64) -> Option<Commit> {
        let commit = self.stabilizer.poll(live, now_ms)?;
        self.sink.on_commit(&commit);
        Some(commit)
    }

    pub fn stabilizer(&self) -> &HoldStabilizer {
        &self.stabilizer
    }

    pub fn reset(&mut self) {
        self.stabilizer.reset();
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_sink_receives_commits() {
        let mut seen = Vec::new();
        {
            let mut ctx = StabilizerContext::new(
                "translator",
                StabilizerConfig::default(),
                |c: &Commit| seen.push(c.symbol),
            );
            for t in (0..=3000).step_by(250) {
                ctx.poll(Symbol::Letter("S"), t);
            }
        }
        assert_eq!(seen, vec![Symbol::Letter("S")]);
    }

    struct Counter(usize);

    impl CommitSink for Counter {
        fn on_commit(&mut self, _commit: &Commit) {
            self.0 += 1;
        }
    }

    #[test]
    fn test_reset_rearms_same_symbol() {
        let mut ctx = StabilizerContext::new("practice", StabilizerConfig::default(), Counter(0));
        for t in (0..=1500).step_by(250) {
            ctx.poll(Symbol::Letter("B"), t);
        }
        ctx.reset();
        for t in (1750..=3000).step_by(250) {
            ctx.poll(Symbol::Letter("B"), t);
        }
        assert_eq!(ctx.sink().0, 2);
    }
}
