//! Rebuilds what the LCD shows from the level changes on its bus.

use std::collections::BTreeMap;

use bcm_gpio::{PinEvent, PinState};
use mastermind::LcdPins;

const LINE_LENGTH: usize = 40;
const SECOND_LINE: u8 = 0x40;
/// Single nibbles of the 8-bit to 4-bit reset sequence
const RESET_NIBBLES: usize = 4;

/// Decoder for a 4-bit HD44780 bus with R/W tied low
pub struct LcdBus {
    pins: LcdPins,
    levels: BTreeMap<u8, bool>,
    reset_nibbles: usize,
    high_nibble: Option<u8>,
    ddram: [[u8; LINE_LENGTH]; 2],
    address: u8,
    display_on: bool,
    cursor_visible: bool,
    cursor_blink: bool,
    screens: Vec<[String; 2]>,
}

impl LcdBus {
    pub fn new(pins: LcdPins) -> Self {
        Self {
            pins,
            levels: BTreeMap::new(),
            reset_nibbles: RESET_NIBBLES,
            high_nibble: None,
            ddram: [[b' '; LINE_LENGTH]; 2],
            address: 0,
            display_on: false,
            cursor_visible: false,
            cursor_blink: false,
            screens: Vec::new(),
        }
    }

    /// Apply one level change; a falling edge on E latches a nibble
    pub fn feed(&mut self, event: PinEvent) {
        let high = event.level == PinState::High;
        let was_high = self.levels.insert(event.pin, high).unwrap_or(false);
        if event.pin == self.pins.en && was_high && !high {
            self.latch();
        }
    }

    /// Visible text of `row`, trailing blanks removed
    pub fn line(&self, row: usize, columns: usize) -> String {
        let bytes = &self.ddram[row][..columns.min(LINE_LENGTH)];
        String::from_utf8_lossy(bytes).trim_end().to_string()
    }

    pub fn display_on(&self) -> bool {
        self.display_on
    }

    /// Cursor visible and blinking flags
    pub fn cursor(&self) -> (bool, bool) {
        (self.cursor_visible, self.cursor_blink)
    }

    /// Column and row of the DDRAM address counter
    pub fn position(&self) -> (u8, u8) {
        if self.address >= SECOND_LINE {
            (self.address - SECOND_LINE, 1)
        } else {
            (self.address, 0)
        }
    }

    /// Every non-blank screen that was cleared away, oldest first
    pub fn screens(&self) -> &[[String; 2]] {
        &self.screens
    }

    fn level(&self, pin: u8) -> bool {
        self.levels.get(&pin).copied().unwrap_or(false)
    }

    fn latch(&mut self) {
        let nibble = [self.pins.d4, self.pins.d5, self.pins.d6, self.pins.d7]
            .iter()
            .enumerate()
            .fold(0u8, |acc, (bit, pin)| acc | (u8::from(self.level(*pin)) << bit));

        if self.reset_nibbles > 0 {
            self.reset_nibbles -= 1;
            return;
        }

        match self.high_nibble.take() {
            None => self.high_nibble = Some(nibble),
            Some(high) => {
                let byte = high << 4 | nibble;
                if self.level(self.pins.rs) {
                    self.data(byte);
                } else {
                    self.command(byte);
                }
            }
        }
    }

    /// Instructions are told apart by their highest set bit
    fn command(&mut self, byte: u8) {
        match byte.leading_zeros() {
            0 => self.address = byte & 0x7F,
            4 => {
                self.display_on = byte & 0x04 != 0;
                self.cursor_visible = byte & 0x02 != 0;
                self.cursor_blink = byte & 0x01 != 0;
            }
            6 => self.address = 0,
            7 => {
                self.snapshot();
                self.ddram = [[b' '; LINE_LENGTH]; 2];
                self.address = 0;
            }
            // CGRAM address, function set, shift, entry mode
            _ => {}
        }
    }

    fn data(&mut self, byte: u8) {
        let (col, row) = self.position();
        if let Some(cell) = self.ddram[usize::from(row)].get_mut(usize::from(col)) {
            *cell = byte;
        }
        self.address = (self.address + 1) & 0x7F;
    }

    fn snapshot(&mut self) {
        let screen = [self.line(0, LINE_LENGTH), self.line(1, LINE_LENGTH)];
        if screen.iter().any(|line| !line.is_empty()) {
            self.screens.push(screen);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pins() -> LcdPins {
        LcdPins::default()
    }

    /// Level changes for one nibble, as the parallel interface drives them
    fn nibble(bus: &mut LcdBus, value: u8) {
        let p = pins();
        let level = |high: bool| if high { PinState::High } else { PinState::Low };
        bus.feed(PinEvent { pin: p.en, level: PinState::High });
        for (bit, pin) in [p.d4, p.d5, p.d6, p.d7].into_iter().enumerate() {
            bus.feed(PinEvent {
                pin,
                level: level(value & (1 << bit) != 0),
            });
        }
        bus.feed(PinEvent { pin: p.en, level: PinState::Low });
    }

    fn byte(bus: &mut LcdBus, rs: bool, value: u8) {
        let level = if rs { PinState::High } else { PinState::Low };
        bus.feed(PinEvent { pin: pins().rs, level });
        nibble(bus, value >> 4);
        nibble(bus, value & 0x0F);
    }

    fn initialised() -> LcdBus {
        let mut bus = LcdBus::new(pins());
        for value in [0x3, 0x3, 0x3, 0x2] {
            nibble(&mut bus, value);
        }
        bus
    }

    #[test]
    fn text_lands_at_addressed_position() {
        let mut bus = initialised();
        byte(&mut bus, false, 0x80 | 0x42);
        for ch in b"Hi" {
            byte(&mut bus, true, *ch);
        }
        assert_eq!(bus.line(1, 16), "  Hi");
        assert_eq!(bus.position(), (4, 1));
    }

    #[test]
    fn clear_keeps_a_snapshot() {
        let mut bus = initialised();
        byte(&mut bus, true, b'A');
        byte(&mut bus, false, 0x01);
        byte(&mut bus, false, 0x01);
        assert_eq!(bus.line(0, 16), "");
        assert_eq!(bus.screens(), &[["A".to_string(), String::new()]]);
    }

    #[test]
    fn display_control_flags() {
        let mut bus = initialised();
        byte(&mut bus, false, 0x0F);
        assert!(bus.display_on());
        assert_eq!(bus.cursor(), (true, true));
        byte(&mut bus, false, 0x0C);
        assert_eq!(bus.cursor(), (false, false));
    }
}
