// HD44780 instruction set

// Basic instructions
pub const CLEAR_DISPLAY: u8 = 0x01; // Clear DDRAM, cursor home
pub const RETURN_HOME: u8 = 0x02; // Cursor home, undo display shift

// Entry mode set
pub const ENTRY_MODE: u8 = 0x04;
pub const ENTRY_SHIFT_DISPLAY: u8 = 0x01; // Shift display instead of cursor
pub const ENTRY_INCREMENT: u8 = 0x02; // Move cursor right after each write

// Display on/off control
pub const DISPLAY_CONTROL: u8 = 0x08;
pub const DISPLAY_ON: u8 = 0x04;
pub const CURSOR_ON: u8 = 0x02;
pub const CURSOR_BLINK: u8 = 0x01;

// Function set
pub const FUNCTION_SET: u8 = 0x20;
pub const FONT_5X10: u8 = 0x04;
pub const TWO_LINES: u8 = 0x08;
pub const EIGHT_BIT: u8 = 0x10;

// Address setting
pub const SET_CGRAM_ADDRESS: u8 = 0x40;
pub const SET_DDRAM_ADDRESS: u8 = 0x80;

// Reset nibbles sent while the controller may still be in 8-bit mode
pub const RESET_8_BIT: u8 = 0x03;
pub const RESET_4_BIT: u8 = 0x02;

// DDRAM columns per line in two-line mode
pub const DDRAM_LINE_LENGTH: u8 = 40;
