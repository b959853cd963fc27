use std::collections::HashMap;

use dotmatrix_core::core::machine::InputButton;
use sdl2::keyboard::Scancode;

/// Maps SDL scancodes to machine button IDs.
pub struct KeyMap {
    map: HashMap<Scancode, u8>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Bind a scancode to a machine button ID.
    pub fn bind(&mut self, scancode: Scancode, button_id: u8) {
        self.map.insert(scancode, button_id);
    }

    /// Look up the machine button ID for a scancode.
    pub fn get(&self, scancode: Scancode) -> Option<u8> {
        self.map.get(&scancode).copied()
    }
}

/// Build the default key map from the machine's input buttons:
/// arrow keys for the pad, Z/X for B/A, Enter/Right-Shift for
/// Start/Select.
pub fn default_key_map(buttons: &[InputButton]) -> KeyMap {
    let mut km = KeyMap::new();

    for button in buttons {
        let scancode = match button.name {
            "Up" => Some(Scancode::Up),
            "Down" => Some(Scancode::Down),
            "Left" => Some(Scancode::Left),
            "Right" => Some(Scancode::Right),
            "A" => Some(Scancode::X),
            "B" => Some(Scancode::Z),
            "Start" => Some(Scancode::Return),
            "Select" => Some(Scancode::RShift),
            _ => None,
        };

        if let Some(sc) = scancode {
            km.bind(sc, button.id);
        }
    }

    km
}
