use agency_di::Build;
use agency_shared_contracts::time::TimeService;
use agency_utils::trace_instrument;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, Default, Build)]
pub struct TimeServiceImpl;

impl TimeService for TimeServiceImpl {
    #[trace_instrument(skip(self))]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_current() {
        // Arrange
        let sut = TimeServiceImpl;
        let before = Utc::now();

        // Act
        let result = sut.now();

        // Assert
        assert!(result >= before - chrono::TimeDelta::seconds(1));
    }
}
