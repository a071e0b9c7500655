use std::convert::TryFrom;

use {
    crate::{
        config::Config,
        definitions::{cpu, display, keyboard, memory},
        devices::Keyboard,
        display::Display,
        opcode::{self, Instruction, Opcodes, Operation, ProgramCounter, ProgramCounterStep},
        resources::Rom,
        timer::Timer,
        ConfigError, LoadError, ProcessError, StackError,
    },
    rand::RngCore,
    tinyvec::ArrayVec,
};

/// The lifecycle of a chipset.
///
/// `Loading` is left for good once a rom was loaded, `Quit` is never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Waiting for a rom.
    Loading,
    /// Executing instructions.
    Running,
    /// Execution is suspended by the host.
    Paused,
    /// Shut down.
    Quit,
}

/// The ChipSet struct represents the current state
/// of the system, it contains all the structures
/// needed for emulating an instant on the
/// Chip8 CPU.
pub struct ChipSet {
    /// name of the loaded rom
    pub(super) name: String,
    pub(super) config: Config,
    pub(super) state: State,
    /// the fields of the last fetched opcode
    pub(super) instruction: Instruction,
    /// - `0x000-0x04F` - Used for the built in `4x5` pixel font set (`0-F`)
    /// - `0x050-0x1FF` - Reserved
    /// - `0x200-0xFFF` - Program ROM and work RAM
    pub(super) memory: Vec<u8>,
    /// `8-bit` data registers named `V0` to `VF`. The `VF` register doubles as a flag for some
    /// instructions; thus, it should be avoided. In an addition operation, `VF` is the carry flag,
    /// while in subtraction, it is the "no borrow" flag. In the draw instruction `VF` is set upon
    /// pixel collision.
    pub(super) registers: [u8; cpu::register::SIZE],
    /// The index register `I`. Wider than the 12 bit address space as `FX1E` can move it past
    /// `0xFFF`, memory accesses wrap around.
    pub(super) index_register: u16,
    /// The address of the next instruction to be executed from memory.
    pub(super) program_counter: u16,
    /// The stack is only used to store return addresses when subroutines are called. The original
    /// [RCA 1802](https://de.wikipedia.org/wiki/RCA1802) version allocated `48` bytes for up to
    /// `12` levels of nesting.
    pub(super) stack: ArrayVec<[u16; cpu::stack::SIZE]>,
    /// Delay timer: This timer is intended to be used for timing the events of games. Its value
    /// can be set and read.
    pub(super) delay_timer: Timer,
    /// Sound timer: This timer is used for sound effects. When its value is nonzero, a beeping
    /// sound is made.
    pub(super) sound_timer: Timer,
    pub(super) display: Display,
    pub(super) keyboard: Keyboard,
    /// This stores the random number generator, used by the chipset.
    /// It is stored into the chipset, so as to enable simple mocking
    /// of the given type.
    pub(super) rng: Box<dyn RngCore + Send>,
}

impl Default for ChipSet {
    fn default() -> Self {
        Self::build(Config::default())
    }
}

impl ChipSet {
    /// will create a new chipset object waiting for a rom
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: Config) -> Self {
        // initialize all the memory with 0
        let mut ram = vec![0; memory::SIZE];

        // load fonts
        ram[display::fontset::LOCATION
            ..(display::fontset::LOCATION + display::fontset::FONTSET.len())]
            .copy_from_slice(&display::fontset::FONTSET);

        Self {
            name: String::new(),
            config,
            state: State::Loading,
            instruction: Instruction::default(),
            memory: ram,
            registers: [0; cpu::register::SIZE],
            index_register: 0,
            program_counter: config.entry_point as u16,
            stack: ArrayVec::new(),
            delay_timer: Timer::default(),
            sound_timer: Timer::default(),
            display: Display::new(config.display_width, config.display_height),
            keyboard: Keyboard::new(),
            rng: Box::new(rand::rngs::OsRng),
        }
    }

    /// Replaces the random number generator used by `CXNN`.
    pub fn with_rng<R: RngCore + Send + 'static>(mut self, rng: R) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Will write the rom into memory at the entry point and start the chipset.
    pub fn load(&mut self, rom: &Rom) -> Result<(), LoadError> {
        if self.state != State::Loading {
            return Err(LoadError::InvalidState(self.state));
        }

        let entry = self.config.entry_point;
        let available = memory::SIZE - entry;
        if rom.len() > available {
            return Err(LoadError::TooLarge {
                size: rom.len(),
                available,
            });
        }

        self.memory[entry..(entry + rom.len())].copy_from_slice(rom.get_data());
        self.name = rom.get_name().to_string();
        self.program_counter = entry as u16;
        self.state = State::Running;

        log::info!(
            "loaded rom '{}' ({} bytes) at {:#06X}",
            self.name,
            rom.len(),
            entry
        );
        Ok(())
    }

    /// will fetch the next opcode from memory and move the program counter past it
    pub(super) fn fetch(&mut self) {
        let opcode = opcode::build_opcode(&self.memory, self.program_counter as usize);
        self.instruction = Instruction::from(opcode);
        self.program_counter =
            self.program_counter.wrapping_add(memory::opcodes::SIZE) & memory::ADDRESS_MAX;
    }

    /// will advance the program by a single instruction
    ///
    /// A stack error shuts the chipset down, every later call fails with
    /// [`ProcessError::NotRunning`].
    pub fn next(&mut self) -> Result<Operation, ProcessError> {
        // import here as to not bloat the namespace
        use crate::opcode::ChipOpcodes;

        if self.state != State::Running {
            return Err(ProcessError::NotRunning(self.state));
        }

        let address = self.program_counter;
        self.fetch();

        match Opcodes::try_from(self.instruction) {
            Ok(opcode) => {
                log::trace!("{:#06X}: {:#06X} {}", address, self.instruction.opcode, opcode);
                self.calc(&opcode).map_err(|err| {
                    // a broken call stack can not be recovered from
                    log::error!("{} Halting at {:#06X}.", err, address);
                    self.state = State::Quit;
                    err
                })
            }
            Err(err) => {
                log::warn!("{} Skipping it at {:#06X}.", err, address);
                Ok(Operation::Unknown(self.instruction.opcode))
            }
        }
    }

    /// Counts both timers down by one, called at `60Hz` by the driver independent of the
    /// executed instructions.
    pub fn tick(&mut self) {
        self.delay_timer.tick();
        self.sound_timer.tick();
    }

    pub fn pause(&mut self) {
        if self.state == State::Running {
            log::info!("paused");
            self.state = State::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == State::Paused {
            log::info!("resumed");
            self.state = State::Running;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.state {
            State::Running => self.pause(),
            State::Paused => self.resume(),
            State::Loading | State::Quit => {}
        }
    }

    pub fn quit(&mut self) {
        if self.state != State::Quit {
            log::info!("quit");
            self.state = State::Quit;
        }
    }

    /// Will write keyboard data into internal keyboard representation.
    pub fn set_keyboard(&mut self, keys: &[bool; keyboard::SIZE]) {
        self.keyboard.set_mult(keys);
    }

    /// Will set the state of the given key (`0x0-0xF`)
    pub fn set_key(&mut self, key: u8, pressed: bool) {
        self.keyboard.set_key(key, pressed)
    }

    /// Will get the current state of the keyboard
    pub fn get_keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    pub fn get_state(&self) -> State {
        self.state
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_config(&self) -> &Config {
        &self.config
    }

    pub fn get_instruction(&self) -> Instruction {
        self.instruction
    }

    pub fn get_memory(&self) -> &[u8] {
        &self.memory
    }

    pub fn get_registers(&self) -> &[u8] {
        &self.registers
    }

    pub fn get_index_register(&self) -> u16 {
        self.index_register
    }

    pub fn get_program_counter(&self) -> u16 {
        self.program_counter
    }

    /// The return addresses, the last one is on top
    pub fn get_stack(&self) -> &[u16] {
        &self.stack
    }

    /// will return the sound timer
    pub fn get_sound_timer(&self) -> u8 {
        self.sound_timer.get_value()
    }

    /// will return the delay timer
    pub fn get_delay_timer(&self) -> u8 {
        self.delay_timer.get_value()
    }

    /// Will return the current display configuration
    pub fn get_display(&self) -> &Display {
        &self.display
    }

    /// Reads the byte at the address, wrapping around the end of memory.
    pub(super) fn read(&self, address: usize) -> u8 {
        self.memory[address % memory::SIZE]
    }

    /// Writes the byte to the address, wrapping around the end of memory.
    pub(super) fn write(&mut self, address: usize, value: u8) {
        self.memory[address % memory::SIZE] = value;
    }

    /// Will push the pointer to the stack
    pub(super) fn push_stack(&mut self, pointer: u16) -> Result<(), StackError> {
        match self.stack.try_push(pointer) {
            None => Ok(()),
            Some(_) => Err(StackError::Full),
        }
    }

    /// Will pop the last pointer from the stack
    pub(super) fn pop_stack(&mut self) -> Result<u16, StackError> {
        self.stack.pop().ok_or(StackError::Empty)
    }
}

impl ProgramCounter for ChipSet {
    fn step(&mut self, step: ProgramCounterStep) {
        // the program counter stays inside the 12 bit address space
        self.program_counter = step.apply(self.program_counter) & memory::ADDRESS_MAX;
    }
}
