//! An IO system that shows nothing and never gets input, for benchmarking the game loop.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::{
    io::{Action, Screen, XY},
    Result,
};

use super::{IoRunner, IoSystem};

pub struct NopSystem(Arc<AtomicBool>);

impl NopSystem {
    pub fn new() -> Result<(Self, NopRunner)> {
        let stop = Arc::new(AtomicBool::new(false));
        Ok((Self(stop.clone()), NopRunner(stop)))
    }
}

impl IoSystem for NopSystem {
    fn draw(&mut self, _screen: &Screen) -> Result<()> {
        Ok(())
    }
    fn poll_input(&mut self) -> Result<Option<Action>> {
        Ok(None)
    }
    fn size(&self) -> XY {
        XY(80, 24)
    }
    fn stop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

/// Does nothing except wait for its [`NopSystem`] to stop.
pub struct NopRunner(Arc<AtomicBool>);

impl IoRunner for NopRunner {
    fn step(&mut self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn runner_stops_when_told() {
        let (mut sys, mut run) = NopSystem::new().unwrap();
        assert!(!run.step());
        assert_eq!(sys.poll_input().unwrap(), None);
        sys.stop();
        assert!(run.step());
    }
}
