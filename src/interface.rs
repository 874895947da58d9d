use crate::error::TransportError;
use crate::traits::Command;
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

/// Largest block handed to the bus in one write
///
/// Linux has a default limit of 4096 bytes per spi transfer, see
/// <https://raspberrypi.stackexchange.com/questions/65595/spi-transfer-fails-with-buffer-size-greater-than-4096>
const MAX_TRANSFER: usize = 4096;

/// The connection between the controller and the host
///
/// Owns the bus and the three control lines for the whole lifetime of the driver.
/// Every transfer, command or data, gets its own chip select bracket.
pub(crate) struct DisplayInterface<SPI, CS, DC, RST> {
    /// SPI
    spi: SPI,
    /// CS for SPI, low while a transfer is running
    cs: CS,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Resetting
    rst: RST,
}

impl<SPI, CS, DC, RST> DisplayInterface<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Creates a new `DisplayInterface` struct
    pub fn new(spi: SPI, cs: CS, dc: DC, rst: RST) -> Self {
        DisplayInterface { spi, cs, dc, rst }
    }

    /// Gives the bus and the lines back
    pub fn release(self) -> (SPI, CS, DC, RST) {
        (self.spi, self.cs, self.dc, self.rst)
    }

    /// Puts the lines into their idle levels: deselected, command mode, not in reset
    pub(crate) fn prepare(&mut self) -> Result<(), TransportError<SPI, CS, DC, RST>> {
        self.cs.set_high().map_err(TransportError::ChipSelect)?;
        self.dc.set_low().map_err(TransportError::DataCommand)?;
        self.rst.set_high().map_err(TransportError::Reset)
    }

    /// Basic function for sending [Commands](Command).
    ///
    /// Enables direct interaction with the device with the help of [data()](DisplayInterface::data())
    pub(crate) fn cmd<T: Command>(
        &mut self,
        command: T,
    ) -> Result<(), TransportError<SPI, CS, DC, RST>> {
        // low for commands
        self.dc.set_low().map_err(TransportError::DataCommand)?;

        // Transfer the command over spi
        self.with_cs(|spi| spi.write(&[command.address()]))
    }

    /// Basic function for sending an array of u8-values of data over spi
    ///
    /// Enables direct interaction with the device with the help of [cmd()](DisplayInterface::cmd())
    pub(crate) fn data(&mut self, data: &[u8]) -> Result<(), TransportError<SPI, CS, DC, RST>> {
        // high for data
        self.dc.set_high().map_err(TransportError::DataCommand)?;

        self.with_cs(|spi| {
            for chunk in data.chunks(MAX_TRANSFER) {
                spi.write(chunk)?;
            }
            Ok(())
        })
    }

    /// Basic function for sending [Commands](Command) and the data belonging to it.
    ///
    /// An empty `data` only sends the command.
    pub(crate) fn cmd_with_data<T: Command>(
        &mut self,
        command: T,
        data: &[u8],
    ) -> Result<(), TransportError<SPI, CS, DC, RST>> {
        self.cmd(command)?;
        if data.is_empty() {
            return Ok(());
        }
        self.data(data)
    }

    // runs one transfer with chip select asserted, cs is released even if the transfer failed
    fn with_cs<F>(&mut self, f: F) -> Result<(), TransportError<SPI, CS, DC, RST>>
    where
        F: FnOnce(&mut SPI) -> Result<(), SPI::Error>,
    {
        // activate spi with cs low
        self.cs.set_low().map_err(TransportError::ChipSelect)?;

        // transfer spi data, the bus may still be shifting out when write returns
        let result = f(&mut self.spi)
            .and_then(|()| self.spi.flush())
            .map_err(TransportError::Spi);

        // deactivate spi with cs high
        let deselect = self.cs.set_high().map_err(TransportError::ChipSelect);
        result.and(deselect)
    }

    /// Resets the device with the reset line.
    ///
    /// The line is kept low for `duration_ms` and the controller gets the same
    /// time to come back up afterwards.
    pub(crate) fn reset<DELAY: DelayNs>(
        &mut self,
        delay: &mut DELAY,
        duration_ms: u32,
    ) -> Result<(), TransportError<SPI, CS, DC, RST>> {
        self.rst.set_low().map_err(TransportError::Reset)?;
        delay.delay_ms(duration_ms);
        self.rst.set_high().map_err(TransportError::Reset)?;
        delay.delay_ms(duration_ms);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec;
    use std::vec::Vec;

    use super::*;
    use crate::ili9341::command::Command;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    fn interface(
        spi: &[SpiTransaction<u8>],
        cs: &[PinTransaction],
        dc: &[PinTransaction],
        rst: &[PinTransaction],
    ) -> DisplayInterface<SpiMock<u8>, PinMock, PinMock, PinMock> {
        DisplayInterface::new(
            SpiMock::new(spi),
            PinMock::new(cs),
            PinMock::new(dc),
            PinMock::new(rst),
        )
    }

    fn done(interface: DisplayInterface<SpiMock<u8>, PinMock, PinMock, PinMock>) {
        let (mut spi, mut cs, mut dc, mut rst) = interface.release();
        spi.done();
        cs.done();
        dc.done();
        rst.done();
    }

    fn selected() -> [PinTransaction; 2] {
        [
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]
    }

    #[test]
    fn command_only() {
        let mut interface = interface(
            &[SpiTransaction::write_vec(vec![0x29]), SpiTransaction::flush()],
            &selected(),
            &[PinTransaction::set(PinState::Low)],
            &[],
        );

        interface.cmd(Command::DISPLAY_ON).unwrap();
        done(interface);
    }

    #[test]
    fn command_with_data_pulses_cs_per_phase() {
        let cs: Vec<PinTransaction> = selected().into_iter().chain(selected()).collect();
        let mut interface = interface(
            &[
                SpiTransaction::write_vec(vec![0xC5]),
                SpiTransaction::flush(),
                SpiTransaction::write_vec(vec![0x3E, 0x28]),
                SpiTransaction::flush(),
            ],
            &cs,
            &[
                PinTransaction::set(PinState::Low),
                PinTransaction::set(PinState::High),
            ],
            &[],
        );

        interface
            .cmd_with_data(Command::VCOM_CONTROL_1, &[0x3E, 0x28])
            .unwrap();
        done(interface);
    }

    #[test]
    fn empty_payload_is_command_only() {
        let mut interface = interface(
            &[SpiTransaction::write_vec(vec![0x11]), SpiTransaction::flush()],
            &selected(),
            &[PinTransaction::set(PinState::Low)],
            &[],
        );

        interface.cmd_with_data(Command::SLEEP_OUT, &[]).unwrap();
        done(interface);
    }

    #[test]
    fn large_payload_is_chunked_in_one_transfer() {
        let payload: Vec<u8> = (0..MAX_TRANSFER + 10).map(|i| i as u8).collect();
        let mut interface = interface(
            &[
                SpiTransaction::write_vec(payload[..MAX_TRANSFER].to_vec()),
                SpiTransaction::write_vec(payload[MAX_TRANSFER..].to_vec()),
                SpiTransaction::flush(),
            ],
            &selected(),
            &[PinTransaction::set(PinState::High)],
            &[],
        );

        interface.data(&payload).unwrap();
        done(interface);
    }

    #[test]
    fn prepare_and_reset() {
        let mut interface = interface(
            &[],
            &[PinTransaction::set(PinState::High)],
            &[PinTransaction::set(PinState::Low)],
            &[
                PinTransaction::set(PinState::High),
                PinTransaction::set(PinState::Low),
                PinTransaction::set(PinState::High),
            ],
        );

        interface.prepare().unwrap();
        interface.reset(&mut NoopDelay::new(), 50).unwrap();
        done(interface);
    }
}
