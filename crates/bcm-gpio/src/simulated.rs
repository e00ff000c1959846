//! In-memory GPIO block for tests and host-side simulation.
//!
//! Models the parts of the BCM GPIO block the driver relies on:
//! function-select words are plain storage, set and clear registers are
//! write-only and self-clearing, and every write to them updates the level
//! registers (outputs loop back). Input pins can be driven directly or fed a
//! script of samples that is consumed one sample per level-register read.

use std::collections::{BTreeMap, VecDeque};

use embedded_hal::digital::PinState;

use crate::config::Layout;
use crate::registers::{FSEL_MASK, PINS_PER_BANK, RegisterSpan};

/// A level change driven through the set or clear registers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinEvent {
    pub pin: u8,
    pub level: PinState,
}

/// Simulated GPIO register block
pub struct SimulatedBlock {
    layout: Layout,
    words: Vec<u32>,
    scripts: BTreeMap<u8, VecDeque<bool>>,
    events: Vec<PinEvent>,
}

impl SimulatedBlock {
    /// Create a zeroed block sized for `layout`
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            words: vec![0; layout.block_size() / 4],
            scripts: BTreeMap::new(),
            events: Vec::new(),
        }
    }

    /// Force the level of `pin`, as an external circuit would
    pub fn drive(&mut self, pin: u8, high: bool) {
        let (offset, mask) = self.layout.level_register(pin);
        let word = &mut self.words[offset / 4];
        if high {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }

    /// Queue samples for `pin`, one consumed per read of its level register
    ///
    /// Once the script runs dry the pin keeps its last level.
    pub fn script(&mut self, pin: u8, samples: impl IntoIterator<Item = bool>) {
        self.scripts.entry(pin).or_default().extend(samples);
    }

    /// Samples still queued for `pin`
    pub fn remaining(&self, pin: u8) -> usize {
        self.scripts.get(&pin).map_or(0, VecDeque::len)
    }

    /// Current level of `pin` without consuming script samples
    pub fn level(&self, pin: u8) -> bool {
        let (offset, mask) = self.layout.level_register(pin);
        self.words[offset / 4] & mask != 0
    }

    /// 3-bit function code currently stored for `pin`
    pub fn function(&self, pin: u8) -> u32 {
        let (offset, shift) = self.layout.function_select(pin);
        (self.words[offset / 4] >> shift) & FSEL_MASK
    }

    /// Raw register contents, bypassing side effects
    pub fn peek(&self, offset: usize) -> u32 {
        self.words[offset / 4]
    }

    /// Overwrite a register, bypassing side effects
    pub fn poke(&mut self, offset: usize, value: u32) {
        self.words[offset / 4] = value;
    }

    /// Level changes driven so far, oldest first
    pub fn events(&self) -> &[PinEvent] {
        &self.events
    }

    /// Drain the recorded level changes
    pub fn take_events(&mut self) -> Vec<PinEvent> {
        std::mem::take(&mut self.events)
    }

    fn drive_bank(&mut self, bank: usize, value: u32, level: PinState) {
        for bit in 0..u32::from(PINS_PER_BANK) {
            if value & (1 << bit) == 0 {
                continue;
            }
            let pin = bank * usize::from(PINS_PER_BANK) + bit as usize;
            let Ok(pin) = u8::try_from(pin) else { break };
            if pin > self.layout.max_pin() {
                break;
            }
            self.drive(pin, level == PinState::High);
            self.events.push(PinEvent { pin, level });
        }
    }

    fn sample_scripts(&mut self, bank: usize) {
        let pins: Vec<u8> = self
            .scripts
            .keys()
            .copied()
            .filter(|&pin| usize::from(pin) / usize::from(PINS_PER_BANK) == bank)
            .collect();

        for pin in pins {
            if let Some(sample) = self.scripts.get_mut(&pin).and_then(VecDeque::pop_front) {
                self.drive(pin, sample);
            }
        }
    }
}

impl RegisterSpan for SimulatedBlock {
    fn len(&self) -> usize {
        self.words.len() * 4
    }

    fn read(&mut self, offset: usize) -> u32 {
        assert!(offset % 4 == 0, "unaligned register offset {offset:#x}");
        let layout = self.layout;

        if layout.set_bank_offsets().contains(&offset)
            || layout.clear_bank_offsets().contains(&offset)
        {
            return 0;
        }

        let levels = layout.level_bank_offsets();
        if levels.contains(&offset) {
            self.sample_scripts((offset - levels.start) / 4);
        }

        self.words[offset / 4]
    }

    fn write(&mut self, offset: usize, value: u32) {
        assert!(offset % 4 == 0, "unaligned register offset {offset:#x}");
        let layout = self.layout;

        let set = layout.set_bank_offsets();
        if set.contains(&offset) {
            self.drive_bank((offset - set.start) / 4, value, PinState::High);
            return;
        }

        let clear = layout.clear_bank_offsets();
        if clear.contains(&offset) {
            self.drive_bank((offset - clear.start) / 4, value, PinState::Low);
            return;
        }

        self.words[offset / 4] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::{GPCLR0, GPLEV0, GPSET0};

    #[test]
    fn set_and_clear_loop_back_to_level() {
        let mut block = SimulatedBlock::new(Layout::default());
        block.write(GPSET0, 1 << 5 | 1 << 13);
        assert_eq!(block.read(GPLEV0), 1 << 5 | 1 << 13);

        block.write(GPCLR0, 1 << 5);
        assert_eq!(block.read(GPLEV0), 1 << 13);
        assert_eq!(
            block.events(),
            &[
                PinEvent { pin: 5, level: PinState::High },
                PinEvent { pin: 13, level: PinState::High },
                PinEvent { pin: 5, level: PinState::Low },
            ]
        );
    }

    #[test]
    fn set_and_clear_registers_read_as_zero() {
        let mut block = SimulatedBlock::new(Layout::default());
        block.write(GPSET0, u32::MAX);
        assert_eq!(block.read(GPSET0), 0);
        assert_eq!(block.read(GPCLR0), 0);
    }

    #[test]
    fn scripts_advance_once_per_level_read() {
        let mut block = SimulatedBlock::new(Layout::default());
        block.script(19, [true, false, true]);

        assert_eq!(block.read(GPLEV0) & 1 << 19, 1 << 19);
        assert_eq!(block.remaining(19), 2);
        assert_eq!(block.read(GPLEV0) & 1 << 19, 0);
        assert_eq!(block.read(GPLEV0) & 1 << 19, 1 << 19);
        // Dry script holds the last sample
        assert_eq!(block.read(GPLEV0) & 1 << 19, 1 << 19);
        assert!(block.level(19));
    }

    #[test]
    fn pins_in_the_second_bank() {
        let mut block = SimulatedBlock::new(Layout::default());
        block.write(GPSET0 + 4, 1 << 3);
        assert!(block.level(35));
        assert!(!block.level(3));
    }
}
