use crate::definitions::keyboard;

#[cfg_attr(test, mockall::automock)]
/// The traits responsible for the display based code
pub trait DisplayCommands {
    /// Will display all the pixels, row after row
    fn display(&mut self, pixels: &[bool], width: usize, height: usize);
}

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for reading the keyboard data
pub trait KeyboardCommands {
    /// Returns all the events that happened since the last call.
    fn poll(&mut self) -> Vec<InputEvent>;
}

/// An event produced by the host for the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key of the hex keypad (`0x0-0xF`) changed its state.
    Key { key: u8, pressed: bool },
    /// Switch between running and paused.
    TogglePause,
    /// Shut the interpreter down.
    Quit,
}

/// The progress of the `FX0A` key wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyWait {
    /// No instruction is waiting for a key.
    Idle,
    /// Waiting for any key to be pressed, the result goes into the register.
    Waiting { register: usize },
    /// The key was pressed, waiting for it to be released.
    Latched {
        register: usize,
        key: u8,
        released: bool,
    },
}

impl Default for KeyWait {
    fn default() -> Self {
        KeyWait::Idle
    }
}

/// Input is done with a hex keyboard that has 16 keys ranging `0-F`. The `8`, `4`, `6`, and
/// `2` keys are typically used for directional input. Three opcodes are used to detect input.
/// One skips an instruction if a specific key is pressed, while another does the same if a
/// specific key is not pressed. The third waits for a key press and release, and then stores
/// it in one of the data registers.
#[derive(Default, Debug, Clone)]
pub struct Keyboard {
    keys: [bool; keyboard::SIZE],
    /// The state of the blocking key wait, kept per keyboard so no machine shares it.
    wait: KeyWait,
}

impl Keyboard {
    pub fn new() -> Self {
        Keyboard::default()
    }

    /// Applies a press or release edge of the given key. Keys outside of `0x0-0xF` are ignored.
    pub fn set_key(&mut self, key: u8, pressed: bool) {
        let index = key as usize;
        if index >= keyboard::SIZE {
            log::warn!("Ignoring the unknown key {:#X}", key);
            return;
        }

        self.keys[index] = pressed;

        self.wait = match self.wait {
            KeyWait::Waiting { register } if pressed => {
                log::debug!("latched key {:#X} for V{:X}", key, register);
                KeyWait::Latched {
                    register,
                    key,
                    released: false,
                }
            }
            KeyWait::Latched {
                register,
                key: latched,
                ..
            } if latched == key && !pressed => KeyWait::Latched {
                register,
                key,
                released: true,
            },
            wait => wait,
        };
    }

    /// Applies a full snapshot of the keyboard, every changed key is handled as an edge.
    pub fn set_mult(&mut self, keys: &[bool; keyboard::SIZE]) {
        for (key, pressed) in keys.iter().enumerate() {
            if self.keys[key] != *pressed {
                self.set_key(key as u8, *pressed);
            }
        }
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[key as usize % keyboard::SIZE]
    }

    pub fn get_keys(&self) -> &[bool] {
        &self.keys
    }

    pub fn get_wait(&self) -> KeyWait {
        self.wait
    }

    /// Advances the key wait of the instruction storing into `register`. Returns the key once
    /// it was pressed and released again, `None` while the wait goes on.
    pub fn poll_wait(&mut self, register: usize) -> Option<u8> {
        if let KeyWait::Latched { key, released, .. } = self.wait {
            if released || !self.is_pressed(key) {
                self.wait = KeyWait::Idle;
                return Some(key);
            }
            return None;
        }

        self.wait = match self.first_pressed() {
            Some(key) => {
                log::debug!("latched held key {:#X} for V{:X}", key, register);
                KeyWait::Latched {
                    register,
                    key,
                    released: false,
                }
            }
            None => KeyWait::Waiting { register },
        };
        None
    }

    fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|pressed| *pressed).map(|key| key as u8)
    }
}
