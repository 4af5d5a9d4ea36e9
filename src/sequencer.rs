//! Tick-driven LED sequencer
//!
//! Owns the blink state, the LEDs and every collaborator the demo touches.
//! Nothing outside this type can read or change the tick counter; the timer
//! interrupt reaches it only through [`Sequencer::on_tick`].

use crate::blink::{advance, BlinkChannel, BlinkState, Level, Step, CHANNEL_COUNT};
use crate::board::{PowerControl, TickSource};
use crate::config::{CHANNELS, LED_PORT_MASK, SHUTDOWN_TICK, TICK_MS};
use crate::drivers::{Console, LedBank};
use crate::error::Error;
use embedded_hal::digital::v2::OutputPin;
use ufmt::uwrite;

pub struct Sequencer<P, T, W, C> {
    state: BlinkState,
    channels: &'static [BlinkChannel; CHANNEL_COUNT],
    shutdown_tick: u16,
    leds: LedBank<P>,
    ticker: T,
    power: W,
    console: C,
}

impl<P, T, W, C> Sequencer<P, T, W, C>
where
    P: OutputPin,
    T: TickSource,
    W: PowerControl,
    C: Console,
{
    /// Sequencer running the reference channel table
    pub fn new(leds: LedBank<P>, ticker: T, power: W, console: C) -> Self {
        Self::with_schedule(leds, ticker, power, console, &CHANNELS, SHUTDOWN_TICK)
    }

    pub fn with_schedule(
        leds: LedBank<P>,
        ticker: T,
        power: W,
        console: C,
        channels: &'static [BlinkChannel; CHANNEL_COUNT],
        shutdown_tick: u16,
    ) -> Self {
        Self {
            state: BlinkState::new(),
            channels,
            shutdown_tick,
            leds,
            ticker,
            power,
            console,
        }
    }

    /// Print the channel table and arm the tick timer
    pub fn start(&mut self) {
        for channel in self.channels.iter() {
            let device = channel.device;
            uwrite!(
                self.console,
                "[DBG] {} ({} MHz, {} {}): on {} off {} until {}\r\n",
                device.name,
                device.clock_mhz,
                device.throughput.value(),
                device.throughput.unit(),
                channel.on_period,
                channel.off_period,
                channel.off_deadline
            )
            .ok();
        }
        // Interrupts are still off, so the UART cannot drain on its own
        self.console.flush();
        self.ticker.configure_timer(TICK_MS);
    }

    /// Advance one tick, drive the LEDs and shut down at the end of the run
    pub fn on_tick(&mut self) -> Result<(), Error<P::Error>> {
        let step = advance(self.state, self.channels, self.shutdown_tick);
        self.state = step.state;

        let mut result = self.leds.apply(&step.writes).map_err(Error::Pin);
        self.log_completions(&step);

        if step.shutdown {
            let released = self.shut_down();
            result = result.and(released);
        }
        result
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &BlinkState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn is_asleep(&self) -> bool {
        self.state.phase == crate::blink::Phase::Asleep
    }

    fn log_completions(&mut self, step: &Step) {
        let elapsed_ms = u32::from(step.state.tick) * u32::from(TICK_MS);
        let channels = self.channels;
        for (channel, _) in channels
            .iter()
            .zip(step.completed.iter())
            .filter(|(_, done)| **done)
        {
            uwrite!(
                self.console,
                "[DBG] {} done @ {} ms\r\n",
                channel.device.name,
                elapsed_ms
            )
            .ok();
        }
    }

    fn shut_down(&mut self) -> Result<(), Error<P::Error>> {
        let elapsed_ms = u32::from(self.state.tick) * u32::from(TICK_MS);
        uwrite!(self.console, "[DBG] sleeping @ {} ms\r\n", elapsed_ms).ok();
        self.console.flush();

        self.ticker.stop();
        let leds_off = self.leds.set_all(Level::Low).map_err(Error::Pin);
        self.power.set_port_levels(LED_PORT_MASK, false);
        self.power.disable_port_pins(LED_PORT_MASK);
        self.power.enter_low_power_sleep();
        leds_off
    }

    #[cfg(test)]
    pub(crate) fn release(self) -> (LedBank<P>, T, W, C) {
        (self.leds, self.ticker, self.power, self.console)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::NullConsole;
    use crate::reference::{ATMEGA328P, PIC16F627A, SAMD09, XMEGA256A3BU};
    use core::convert::Infallible;
    use embedded_hal_mock::pin::{Mock as PinMock, State as PinState, Transaction as PinTransaction};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::string::String;
    use std::vec::Vec;
    use ufmt::uWrite;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        TimerArmed(u16),
        TimerStopped,
        PortLevels(u8, bool),
        PortDisabled(u8),
        Sleep,
    }

    type Events = Rc<RefCell<Vec<Event>>>;

    struct MockTicker(Events);

    impl TickSource for MockTicker {
        fn configure_timer(&mut self, period_ms: u16) {
            self.0.borrow_mut().push(Event::TimerArmed(period_ms));
        }

        fn stop(&mut self) {
            self.0.borrow_mut().push(Event::TimerStopped);
        }
    }

    struct MockPower(Events);

    impl PowerControl for MockPower {
        fn set_port_levels(&mut self, mask: u8, high: bool) {
            self.0.borrow_mut().push(Event::PortLevels(mask, high));
        }

        fn disable_port_pins(&mut self, mask: u8) {
            self.0.borrow_mut().push(Event::PortDisabled(mask));
        }

        fn enter_low_power_sleep(&mut self) {
            self.0.borrow_mut().push(Event::Sleep);
        }
    }

    #[derive(Default)]
    struct Log(String);

    impl uWrite for Log {
        type Error = Infallible;

        fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
            self.0.push_str(s);
            Ok(())
        }
    }

    impl Console for Log {
        fn flush(&mut self) {
            self.0.push_str("<flush>");
        }
    }

    /// Pin that remembers its last level
    #[derive(Clone, Default)]
    struct Probe(Rc<Cell<Option<bool>>>);

    impl OutputPin for Probe {
        type Error = Infallible;

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.set(Some(true));
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.set(Some(false));
            Ok(())
        }
    }

    struct BrokenPin;

    impl OutputPin for BrokenPin {
        type Error = ();

        fn set_high(&mut self) -> Result<(), ()> {
            Err(())
        }

        fn set_low(&mut self) -> Result<(), ()> {
            Err(())
        }
    }

    fn count(events: &Events, event: Event) -> usize {
        events.borrow().iter().filter(|e| **e == event).count()
    }

    #[test]
    fn full_run_latches_then_sleeps_once() {
        let events = Events::default();
        let probes: [Probe; CHANNEL_COUNT] = Default::default();
        let mut sequencer = Sequencer::new(
            LedBank::new(probes.clone()),
            MockTicker(events.clone()),
            MockPower(events.clone()),
            Log::default(),
        );

        sequencer.start();
        assert_eq!(*events.borrow(), [Event::TimerArmed(TICK_MS)]);

        for _ in 0..u32::from(SHUTDOWN_TICK) + 100 {
            sequencer.on_tick().unwrap();
            let tick = sequencer.state().tick;

            if (1110..SHUTDOWN_TICK).contains(&tick) {
                assert_eq!(probes[0].0.get(), Some(true), "tick {}", tick);
            }
            let expected_sleeps = if tick >= SHUTDOWN_TICK { 1 } else { 0 };
            assert_eq!(count(&events, Event::Sleep), expected_sleeps, "tick {}", tick);
        }

        assert!(sequencer.is_asleep());
        assert_eq!(sequencer.state().tick, SHUTDOWN_TICK);
        assert_eq!(
            *events.borrow(),
            [
                Event::TimerArmed(TICK_MS),
                Event::TimerStopped,
                Event::PortLevels(LED_PORT_MASK, false),
                Event::PortDisabled(LED_PORT_MASK),
                Event::Sleep,
            ]
        );
        for probe in probes.iter() {
            assert_eq!(probe.0.get(), Some(false));
        }

        let (_, _, _, log) = sequencer.release();
        assert!(log.0.starts_with("[DBG] SAM D09 (48 MHz, 48 DMIPS): on 111 off 131 until 1110\r\n"));
        assert!(log.0.contains("on 1000 off 1020 until 10000\r\n<flush>[DBG] SAM D09 done"));
        assert_eq!(log.0.matches("<flush>").count(), 2);
        assert!(log.0.contains("[DBG] SAM D09 done @ 1110 ms\r\n"));
        assert!(log.0.contains("[DBG] PIC16F627A done @ 10000 ms\r\n"));
        assert!(log.0.ends_with("[DBG] sleeping @ 15000 ms\r\n<flush>"));
    }

    #[test]
    fn first_300_ticks_drive_expected_edges() {
        let leds = [
            PinMock::new(&[
                PinTransaction::set(PinState::High), // 111
                PinTransaction::set(PinState::Low),  // 131
                PinTransaction::set(PinState::High), // 222
                PinTransaction::set(PinState::Low),  // 262
            ]),
            PinMock::new(&[
                PinTransaction::set(PinState::High), // 156
                PinTransaction::set(PinState::Low),  // 176
            ]),
            PinMock::new(&[
                PinTransaction::set(PinState::High), // 250
                PinTransaction::set(PinState::Low),  // 270
            ]),
            PinMock::new(&[]),
        ];
        let events = Events::default();
        let mut sequencer = Sequencer::new(
            LedBank::new(leds),
            MockTicker(events.clone()),
            MockPower(events.clone()),
            NullConsole,
        );

        for _ in 0..300 {
            sequencer.on_tick().unwrap();
        }
        assert_eq!(sequencer.state().tick, 300);
        assert!(events.borrow().is_empty());

        let (bank, _, _, _) = sequencer.release();
        for mut led in bank.release() {
            led.done();
        }
    }

    static SHORT_RUN: [BlinkChannel; CHANNEL_COUNT] = [
        BlinkChannel::new(SAMD09, 2, 3, 10),
        BlinkChannel::new(XMEGA256A3BU, 7, 9, 10),
        BlinkChannel::new(ATMEGA328P, 7, 9, 10),
        BlinkChannel::new(PIC16F627A, 7, 9, 10),
    ];

    #[test]
    fn pin_errors_propagate_without_blocking_shutdown() {
        let events = Events::default();
        let mut sequencer = Sequencer::with_schedule(
            LedBank::new([BrokenPin, BrokenPin, BrokenPin, BrokenPin]),
            MockTicker(events.clone()),
            MockPower(events.clone()),
            NullConsole,
            &SHORT_RUN,
            5,
        );

        assert_eq!(sequencer.on_tick(), Ok(()));
        assert_eq!(sequencer.on_tick(), Err(Error::Pin(())));
        assert_eq!(sequencer.on_tick(), Err(Error::Pin(())));
        assert_eq!(sequencer.on_tick(), Err(Error::Pin(())));
        assert!(events.borrow().is_empty());

        assert_eq!(sequencer.on_tick(), Err(Error::Pin(())));
        assert!(sequencer.is_asleep());
        assert_eq!(count(&events, Event::Sleep), 1);

        assert_eq!(sequencer.on_tick(), Ok(()));
        assert_eq!(count(&events, Event::Sleep), 1);
    }
}
