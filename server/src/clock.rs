use std::sync::Arc;

use actix_web::web::Data;
use chrono::{DateTime, Utc};

/// Source of "now" for request handlers. Each handler samples it once and
/// threads the value through every filter it runs.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn clock_data<C: Clock + 'static>(clock: C) -> Data<dyn Clock> {
    let clock: Arc<dyn Clock> = Arc::new(clock);
    Data::from(clock)
}
