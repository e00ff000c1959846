use bcm_gpio::{Gpio, Layout, SharedGpio, SimulatedBlock};
use embedded_hal::delay::DelayNs;

/// Delay that returns immediately
#[derive(Clone, Copy, Debug, Default)]
pub struct InstantDelay;

impl DelayNs for InstantDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

pub fn simulated_gpio() -> SharedGpio<SimulatedBlock> {
    let layout = Layout::default();
    SharedGpio::new(Gpio::new(SimulatedBlock::new(layout), layout).unwrap())
}
