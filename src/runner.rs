use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;

use crate::{
    chip8::{ChipSet, State},
    devices::{DisplayCommands, InputEvent, KeyboardCommands},
    opcode::Operation,
    timer::TimedWorker,
    ProcessError,
};

/// Connects a chipset with the devices of the host.
pub struct Runner<D, K>
where
    D: DisplayCommands,
    K: KeyboardCommands,
{
    chip: ChipSet,
    display: D,
    keyboard: K,
}

impl<D, K> Runner<D, K>
where
    D: DisplayCommands,
    K: KeyboardCommands,
{
    /// The chipset is expected to have a rom loaded already.
    pub fn new(chip: ChipSet, display: D, keyboard: K) -> Self {
        Self {
            chip,
            display,
            keyboard,
        }
    }

    pub fn get_chip(&self) -> &ChipSet {
        &self.chip
    }

    pub fn get_chip_mut(&mut self) -> &mut ChipSet {
        &mut self.chip
    }

    /// Will run a single step of the machine.
    ///
    /// The input events are applied first, afterwards a single instruction is executed and the
    /// timers count down. The display is only sent when the instruction changed it. While paused
    /// or shut down nothing but the input is processed.
    pub fn tick(&mut self) -> Result<Operation, ProcessError> {
        for event in self.keyboard.poll() {
            match event {
                InputEvent::Key { key, pressed } => self.chip.set_key(key, pressed),
                InputEvent::TogglePause => self.chip.toggle_pause(),
                InputEvent::Quit => self.chip.quit(),
            }
        }

        if self.chip.get_state() != State::Running {
            return Ok(Operation::None);
        }

        let operation = self.chip.next()?;
        self.chip.tick();

        if operation == Operation::Draw {
            let display = self.chip.get_display();
            self.display
                .display(display.pixels(), display.width(), display.height());
        }

        Ok(operation)
    }

    /// Will return true once the machine was shut down.
    pub fn is_finished(&self) -> bool {
        self.chip.get_state() == State::Quit
    }
}

/// Will run the runner on a worker, a single tick every interval.
///
/// The runner stays accessible through the returned mutex, a fatal error shuts the machine
/// down. Dropping the worker stops the execution. A tick is skipped while the mutex is held
/// elsewhere, so the worker can be stopped even while the caller holds the lock.
///
/// # Example
/// ```rust
/// # use std::time::Duration;
/// # use chip::{
/// #     chip8::ChipSet,
/// #     definitions::cpu,
/// #     devices::{DisplayCommands, InputEvent, KeyboardCommands},
/// #     resources::Rom,
/// #     timer::{TimedWorker, Worker},
/// #     Runner,
/// # };
/// struct Screen;
/// impl DisplayCommands for Screen {
///     fn display(&mut self, _pixels: &[bool], _width: usize, _height: usize) {}
/// }
///
/// struct Keys;
/// impl KeyboardCommands for Keys {
///     fn poll(&mut self) -> Vec<InputEvent> {
///         Vec::new()
///     }
/// }
///
/// let mut chipset = ChipSet::default();
/// chipset.load(&Rom::new("IDLE", vec![0x12, 0x00])).unwrap();
///
/// let runner = Runner::new(chipset, Screen, Keys);
/// let (mut worker, runner) =
///     chip::run::<_, _, Worker>(runner, Duration::from_millis(cpu::INTERVAL));
/// assert!(worker.is_alive());
///
/// let guard = runner.lock();
/// worker.stop();
/// assert!(!guard.is_finished());
/// ```
pub fn run<D, K, W>(runner: Runner<D, K>, interval: Duration) -> (W, Arc<Mutex<Runner<D, K>>>)
where
    D: DisplayCommands + Send + 'static,
    K: KeyboardCommands + Send + 'static,
    W: TimedWorker,
{
    let runner = Arc::new(Mutex::new(runner));
    let inner = runner.clone();

    let inner_run = move || {
        // the owner of the lock may be waiting for this worker to stop
        let mut runner = match inner.try_lock() {
            Some(runner) => runner,
            None => return,
        };
        if runner.is_finished() {
            return;
        }
        // the chipset shuts itself down on fatal errors
        if let Err(err) = runner.tick() {
            log::error!("Stopped the execution of '{}': {}", runner.chip.get_name(), err);
        }
    };

    let mut worker = W::new();
    worker.start(inner_run, interval);

    (worker, runner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        definitions::{cpu, display},
        devices::{MockDisplayCommands, MockKeyboardCommands},
        resources::Rom,
        timer::Worker,
        StackError,
    };
    use mockall::Sequence;

    fn setup_chip(program: &[u8]) -> ChipSet {
        let mut chip = ChipSet::default();
        chip.load(&Rom::new("RUNNER", program.to_vec())).unwrap();
        chip
    }

    fn silent_keyboard() -> MockKeyboardCommands {
        let mut keyboard = MockKeyboardCommands::new();
        keyboard.expect_poll().returning(Vec::new);
        keyboard
    }

    #[test]
    fn test_draw_is_displayed() {
        // I = 0, draw the glyph "0" at (V0, V0), then clear the screen
        let chip = setup_chip(&[0xA0, 0x00, 0xD0, 0x05, 0x00, 0xE0]);

        let mut display = MockDisplayCommands::new();
        let mut seq = Sequence::new();
        display
            .expect_display()
            .withf(|pixels, width, height| {
                *width == display::WIDTH && *height == display::HEIGHT && pixels[0]
            })
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        display
            .expect_display()
            .withf(|pixels, _, _| pixels.iter().all(|pixel| !pixel))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let mut runner = Runner::new(chip, display, silent_keyboard());

        assert_eq!(runner.tick(), Ok(Operation::None));
        assert_eq!(runner.tick(), Ok(Operation::Draw));
        assert_eq!(runner.tick(), Ok(Operation::Draw));
        assert_eq!(runner.get_chip().get_program_counter(), 0x0206);
    }

    #[test]
    fn test_timers_tick_with_instructions() {
        // V0 = 3, DT = V0, jump onto itself
        let chip = setup_chip(&[0x60, 0x03, 0xF0, 0x15, 0x12, 0x04]);
        let mut display = MockDisplayCommands::new();
        display.expect_display().never();

        let mut runner = Runner::new(chip, display, silent_keyboard());

        runner.tick().unwrap();
        runner.tick().unwrap();
        // set and counted down within the same step
        assert_eq!(runner.get_chip().get_delay_timer(), 2);
        runner.tick().unwrap();
        assert_eq!(runner.get_chip().get_delay_timer(), 1);
    }

    #[test]
    fn test_input_events() {
        // wait for a key in V1
        let chip = setup_chip(&[0xF1, 0x0A]);
        let mut display = MockDisplayCommands::new();
        display.expect_display().never();

        let mut keyboard = MockKeyboardCommands::new();
        let mut seq = Sequence::new();
        let events = vec![
            vec![],
            vec![InputEvent::Key {
                key: 0x7,
                pressed: true,
            }],
            vec![InputEvent::TogglePause],
            vec![InputEvent::TogglePause],
            vec![InputEvent::Key {
                key: 0x7,
                pressed: false,
            }],
            vec![InputEvent::Quit],
        ];
        for event in events {
            keyboard
                .expect_poll()
                .times(1)
                .in_sequence(&mut seq)
                .return_once(move || event);
        }

        let mut runner = Runner::new(chip, display, keyboard);

        assert_eq!(runner.tick(), Ok(Operation::Wait));
        assert_eq!(runner.tick(), Ok(Operation::Wait));
        assert_eq!(runner.tick(), Ok(Operation::None));
        assert_eq!(runner.get_chip().get_state(), State::Paused);
        assert_eq!(runner.tick(), Ok(Operation::Wait));
        assert_eq!(runner.tick(), Ok(Operation::None));
        assert_eq!(runner.get_chip().get_registers()[0x1], 0x7);
        assert_eq!(runner.get_chip().get_program_counter(), 0x0202);

        assert!(!runner.is_finished());
        assert_eq!(runner.tick(), Ok(Operation::None));
        assert!(runner.is_finished());
    }

    #[test]
    fn test_fatal_error() {
        // return without a call
        let chip = setup_chip(&[0x00, 0xEE]);
        let mut display = MockDisplayCommands::new();
        display.expect_display().never();

        let mut runner = Runner::new(chip, display, silent_keyboard());
        assert_eq!(
            runner.tick(),
            Err(ProcessError::Stack(StackError::Empty))
        );

        // the machine stays down
        assert!(runner.is_finished());
        assert_eq!(runner.tick(), Ok(Operation::None));
        assert_eq!(runner.get_chip().get_program_counter(), 0x0202);
    }

    #[test]
    fn test_stop_while_locked() {
        let chip = setup_chip(&[0x12, 0x00]);
        let mut display = MockDisplayCommands::new();
        display.expect_display().never();

        let runner = Runner::new(chip, display, silent_keyboard());
        let (mut worker, runner) =
            run::<_, _, Worker>(runner, Duration::from_millis(cpu::INTERVAL));

        let guard = runner.lock();
        std::thread::sleep(Duration::from_millis(3 * cpu::INTERVAL));
        worker.stop();

        assert!(!worker.is_alive());
        assert!(!guard.is_finished());
    }

    #[test]
    fn test_run_on_worker() {
        // return without a call, stops the machine
        let chip = setup_chip(&[0x60, 0x2A, 0x00, 0xEE]);
        let mut display = MockDisplayCommands::new();
        display.expect_display().never();

        let runner = Runner::new(chip, display, silent_keyboard());
        let (mut worker, runner) = run::<_, _, Worker>(runner, Duration::from_millis(1));

        for _ in 0..200 {
            if runner.lock().is_finished() {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        worker.stop();

        let runner = runner.lock();
        assert!(runner.is_finished());
        assert_eq!(runner.get_chip().get_registers()[0x0], 0x2A);
    }
}
