use chrono::Duration;
use parking_lot::RwLock;
use tickerhub_core::Timestamp;

use crate::Clock;

/// Clock that only moves when told to
#[derive(Debug)]
pub struct FixedClock {
    time: RwLock<Timestamp>,
}

impl FixedClock {
    pub fn at(time: Timestamp) -> Self {
        FixedClock {
            time: RwLock::new(time),
        }
    }

    pub fn set(&self, time: Timestamp) {
        *self.time.write() = time;
    }

    pub fn advance(&self, by: Duration) {
        let mut time = self.time.write();
        *time += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.time.read()
    }

    fn name(&self) -> &str {
        "FixedClock"
    }
}
