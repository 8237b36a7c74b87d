use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

pub trait Clock {
  fn now(&self) -> PrimitiveDateTime;
}

#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
  offset: UtcOffset,
}

impl SystemClock {
  pub fn new(offset: UtcOffset) -> Self {
    Self { offset }
  }

  /// Detection only works while the process is single threaded.
  pub fn local() -> Self {
    Self::new(UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
  }
}

impl Default for SystemClock {
  fn default() -> Self {
    Self::local()
  }
}

impl Clock for SystemClock {
  fn now(&self) -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc().to_offset(self.offset);
    PrimitiveDateTime::new(now.date(), now.time())
  }
}

#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub PrimitiveDateTime);

impl Clock for FixedClock {
  fn now(&self) -> PrimitiveDateTime {
    self.0
  }
}
