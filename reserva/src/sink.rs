//! Destinations for reload results.

use crate::error::Error;
use crate::Reservation;

/// Receives the records a reload reports, and its failure if any.
pub trait ReservationSink: Send + Sync {
    /// Called once per record found after a successful reload, in id order.
    fn record(&self, reservation: &Reservation);

    /// Called once if the reload fails.
    fn failed(&self, _error: &Error) {}
}

/// Sink that writes through the `log` facade.
///
/// Records go to `info`, failures to `error`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ReservationSink for LogSink {
    fn record(&self, reservation: &Reservation) {
        log::info!("{reservation}");
    }

    fn failed(&self, error: &Error) {
        log::error!("reload failed: {error}");
    }
}

impl<T: ReservationSink + ?Sized> ReservationSink for &T {
    fn record(&self, reservation: &Reservation) {
        (**self).record(reservation);
    }

    fn failed(&self, error: &Error) {
        (**self).failed(error);
    }
}


#[cfg(test)]
mod tests {
    use super::testing::CollectingSink;
    use super::*;
    use crate::ReservationId;

    #[test]
    fn test_failed_defaults_to_noop() {
        struct Quiet;
        impl ReservationSink for Quiet {
            fn record(&self, _reservation: &Reservation) {}
        }
        Quiet.failed(&Error::storage("boom"));
    }

    #[test]
    fn test_reference_forwards() {
        let sink = CollectingSink::default();
        let by_ref = &sink;
        by_ref.record(&Reservation::persisted(ReservationId::from(1), "Akash"));
        by_ref.failed(&Error::storage("boom"));

        assert_eq!(sink.names(), vec!["Akash"]);
        assert_eq!(sink.failure_count(), 1);
    }

    #[test]
    fn test_log_sink_accepts_everything() {
        LogSink.record(&Reservation::persisted(ReservationId::from(1), "Akash"));
        LogSink.failed(&Error::storage("boom"));
    }
}
