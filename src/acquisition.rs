//! Main-loop acquisition cycle.
//!
//! ```text
//! Idle --signal--> Checking --data bit--> Reading --ok--> Emitting --> Idle
//!                     |                      |
//!                     +--no data / error-----+-----error--> Idle
//! ```
//!
//! A cycle that does not reach `Emitting` sends nothing; the host only ever
//! sees complete frames.

use crate::config::Variant;
use crate::convert::SampleConverter;
use crate::error::TransportError;
use crate::frame::FrameEncoder;
use crate::reader::{Acquired, SampleReader};
use crate::signal::DataReadySignal;
use crate::sink::OutputSink;
use crate::transport::RegisterTransport;

/// Outcome of one [`Acquisition::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    /// No data-ready signal was pending; the bus was not touched.
    Idle,
    /// Status register read fine but had no new sample.
    NoData,
    /// A bus transaction failed and the cycle was abandoned.
    Dropped(TransportError),
    /// One frame went out.
    Emitted,
}

pub struct Acquisition<T> {
    reader: SampleReader<T>,
    converter: SampleConverter,
    encoder: FrameEncoder,
}

impl<T: RegisterTransport> Acquisition<T> {
    pub fn new(transport: T, address: u8, variant: Variant) -> Self {
        Self {
            reader: SampleReader::new(transport, address),
            converter: SampleConverter::new(variant),
            encoder: FrameEncoder::new(&variant),
        }
    }

    pub fn variant(&self) -> &Variant {
        self.converter.variant()
    }

    /// Runs one loop iteration.
    ///
    /// The signal is consumed on entry whatever happens next, so it is clear
    /// once the cycle ends unless the interrupt fired again meanwhile.
    pub fn poll<S: OutputSink>(&mut self, signal: &DataReadySignal, sink: &mut S) -> Cycle {
        if !signal.observe_and_clear() {
            return Cycle::Idle;
        }

        // Checking, then Reading
        let raw = match self.reader.acquire() {
            Acquired::Sample(raw) => raw,
            Acquired::NoData => return Cycle::NoData,
            Acquired::Failed(err) => return Cycle::Dropped(err),
        };

        // Emitting
        let sample = self.converter.convert(&raw);
        sink.transmit(self.encoder.encode(&sample));
        Cycle::Emitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{FOOTER, HEADER};
    use crate::lis3dh::{DEVICE_ADDRESS, STATUS_DATA_AVAILABLE};
    use crate::mock::ScriptedTransport;
    use crate::sink::recording::RecordingSink;

    fn pipeline(bus: &mut ScriptedTransport, variant: Variant) -> Acquisition<&mut ScriptedTransport> {
        Acquisition::new(bus, DEVICE_ADDRESS, variant)
    }

    #[test]
    fn no_signal_leaves_bus_untouched() {
        let mut bus = ScriptedTransport::new();
        let mut sink = RecordingSink::default();
        let signal = DataReadySignal::new();

        let cycle = pipeline(&mut bus, Variant::NORMAL_MILLI_G).poll(&signal, &mut sink);

        assert_eq!(cycle, Cycle::Idle);
        assert!(bus.accesses().is_empty());
        assert!(sink.frames.is_empty());
    }

    #[test]
    fn full_cycle_emits_one_frame() {
        let mut bus = ScriptedTransport::new();
        bus.push_byte(STATUS_DATA_AVAILABLE);
        bus.push_burst(&[0x00, 0x10, 0x00, 0x20, 0x00, 0x30]);
        let mut sink = RecordingSink::default();
        let signal = DataReadySignal::new();
        signal.signal();

        let cycle = pipeline(&mut bus, Variant::NORMAL_MILLI_G).poll(&signal, &mut sink);

        assert_eq!(cycle, Cycle::Emitted);
        assert_eq!(
            sink.frames,
            vec![vec![0xA0, 0x00, 0x01, 0x00, 0x02, 0x00, 0x03, 0xC0]]
        );
        assert!(!signal.is_pending());
    }

    #[test]
    fn status_failure_emits_nothing_and_clears_signal() {
        let mut bus = ScriptedTransport::new();
        bus.push_error(TransportError::Nack);
        let mut sink = RecordingSink::default();
        let signal = DataReadySignal::new();
        signal.signal();

        let cycle = pipeline(&mut bus, Variant::NORMAL_MILLI_G).poll(&signal, &mut sink);

        assert_eq!(cycle, Cycle::Dropped(TransportError::Nack));
        assert!(sink.frames.is_empty());
        assert!(!signal.is_pending());
        assert_eq!(bus.accesses().len(), 1);
    }

    #[test]
    fn missing_data_bit_drops_silently() {
        let mut bus = ScriptedTransport::new();
        bus.push_byte(0x00);
        let mut sink = RecordingSink::default();
        let signal = DataReadySignal::new();
        signal.signal();

        let cycle = pipeline(&mut bus, Variant::NORMAL_MILLI_G).poll(&signal, &mut sink);

        assert_eq!(cycle, Cycle::NoData);
        assert!(sink.frames.is_empty());
        assert!(!signal.is_pending());
    }

    #[test]
    fn burst_failure_emits_nothing() {
        let mut bus = ScriptedTransport::new();
        bus.push_byte(STATUS_DATA_AVAILABLE);
        bus.push_error(TransportError::Overrun);
        let mut sink = RecordingSink::default();
        let signal = DataReadySignal::new();
        signal.signal();

        let cycle = pipeline(&mut bus, Variant::NORMAL_MILLI_G).poll(&signal, &mut sink);

        assert_eq!(cycle, Cycle::Dropped(TransportError::Overrun));
        assert!(sink.frames.is_empty());
    }

    #[test]
    fn fixed_point_cycle_emits_fourteen_bytes() {
        let mut bus = ScriptedTransport::new();
        bus.push_byte(STATUS_DATA_AVAILABLE);
        bus.push_burst(&[0xFF; 6]);
        let mut sink = RecordingSink::default();
        let signal = DataReadySignal::new();
        signal.signal();

        let cycle = pipeline(&mut bus, Variant::HIGH_RES_FIXED_POINT).poll(&signal, &mut sink);

        assert_eq!(cycle, Cycle::Emitted);
        let frame = &sink.frames[0];
        assert_eq!(frame.len(), 14);
        assert_eq!(frame[0], HEADER);
        assert_eq!(frame[13], FOOTER);
        // -196 per axis
        assert_eq!(&frame[1..5], &[0x3C, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn one_frame_per_signalled_cycle() {
        let mut bus = ScriptedTransport::new();
        let mut sink = RecordingSink::default();
        let signal = DataReadySignal::new();
        for _ in 0..3 {
            bus.push_byte(STATUS_DATA_AVAILABLE);
            bus.push_burst(&[0; 6]);
        }

        let mut acquisition = pipeline(&mut bus, Variant::NORMAL_MILLI_G);
        let mut cycles = vec![];
        for round in 0..5 {
            if round % 2 == 0 {
                signal.signal();
            }
            cycles.push(acquisition.poll(&signal, &mut sink));
        }

        assert_eq!(
            cycles,
            vec![
                Cycle::Emitted,
                Cycle::Idle,
                Cycle::Emitted,
                Cycle::Idle,
                Cycle::Emitted
            ]
        );
        assert_eq!(sink.frames.len(), 3);
        assert_eq!(acquisition.variant().frame_len(), 8);
        drop(acquisition);
        assert_eq!(bus.remaining(), 0);
    }
}
