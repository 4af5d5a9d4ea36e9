use crate::blink::{Level, CHANNEL_COUNT};
use embedded_hal::digital::v2::OutputPin;

/// The four demo LEDs, indexed in channel order
pub struct LedBank<P> {
    leds: [P; CHANNEL_COUNT],
}

impl<P: OutputPin> LedBank<P> {
    pub fn new(leds: [P; CHANNEL_COUNT]) -> Self {
        LedBank { leds }
    }

    pub fn set(&mut self, idx: usize, level: Level) -> Result<(), P::Error> {
        let led = &mut self.leds[idx];
        match level {
            Level::High => led.set_high(),
            Level::Low => led.set_low(),
        }
    }

    /// Drive every LED that has a pending write this tick
    pub fn apply(&mut self, writes: &[Option<Level>; CHANNEL_COUNT]) -> Result<(), P::Error> {
        for (idx, write) in writes.iter().enumerate() {
            if let Some(level) = *write {
                self.set(idx, level)?;
            }
        }
        Ok(())
    }

    pub fn set_all(&mut self, level: Level) -> Result<(), P::Error> {
        for idx in 0..self.leds.len() {
            self.set(idx, level)?;
        }
        Ok(())
    }

    pub fn release(self) -> [P; CHANNEL_COUNT] {
        self.leds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::pin::{Mock as PinMock, State as PinState, Transaction as PinTransaction};

    #[test]
    fn apply_only_touches_pending_channels() {
        let leds = [
            PinMock::new(&[PinTransaction::set(PinState::High)]),
            PinMock::new(&[]),
            PinMock::new(&[PinTransaction::set(PinState::Low)]),
            PinMock::new(&[]),
        ];
        let mut bank = LedBank::new(leds);
        bank.apply(&[Some(Level::High), None, Some(Level::Low), None])
            .unwrap();

        for mut led in bank.release() {
            led.done();
        }
    }

    #[test]
    fn set_all_drives_every_led() {
        let expectations = [PinTransaction::set(PinState::Low)];
        let leds = [
            PinMock::new(&expectations),
            PinMock::new(&expectations),
            PinMock::new(&expectations),
            PinMock::new(&expectations),
        ];
        let mut bank = LedBank::new(leds);
        bank.set_all(Level::Low).unwrap();

        for mut led in bank.release() {
            led.done();
        }
    }
}
