use time::{OffsetDateTime, UtcOffset};

/// Source of "now" for every timestamp the relay produces.
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

/// Wall clock expressed in a fixed reference offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: UtcOffset,
}

impl SystemClock {
    pub fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }
}

#[cfg(test)]
mod tests {
    use time::Duration;

    use super::*;

    #[test]
    fn test_system_clock_uses_reference_offset() {
        let offset = UtcOffset::from_hms(7, 0, 0).unwrap();
        let clock = SystemClock::new(offset);

        let now = clock.now();

        assert_eq!(now.offset(), offset);
        assert!((OffsetDateTime::now_utc() - now).abs() < Duration::seconds(5));
    }
}
