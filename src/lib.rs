//! Driver for the SGP30 indoor air quality sensor.
//!
//! The device reports a CO2 equivalent and a TVOC estimate over i2c.
//! This crate covers the full command set with the word framing and
//! checksum validation the chip requires, written against the
//! embedded-hal 1.0 traits. no_std unless built for tests or with the
//! `std` feature.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

use core::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c;

use log::trace;

//Import the sensor's available i2c commands and timing budgets
mod commands;
use crate::commands::{Command, GENERAL_CALL_ADDRESS, GENERAL_CALL_RESET};

//Checksum and word framing shared by every command
mod crc;
mod frame;

mod data;
pub use crate::data::{AirQuality, Baseline, RawSignals, SensorData};

/// SGP30 Sensor Address
pub const SENSOR_ADDR: u8 = 0x58;

/// Serial ID the identity probe expects from this chip family.
pub const EXPECTED_SERIAL_ID: u64 = 0x64_6762;

/// Word the self test returns when the chip is healthy.
pub const SELF_TEST_PASS: u16 = 0xD400;

/// Power-on default of the humidity compensation, 15.5 g/m³ in the 8.8
/// fixed point format set_humidity takes.
pub const DEFAULT_HUMIDITY: u16 = 0x0F80;

//Largest frames in either direction: the 3 word serial coming in, an
//opcode plus 2 argument words going out.
const MAX_RESPONSE_LEN: usize = 3 * frame::BYTES_PER_WORD;
const MAX_COMMAND_LEN: usize = 2 + 2 * frame::BYTES_PER_WORD;

//Error type for our driver.
#[derive(Debug, PartialEq)]
pub enum Error<E> {
    /// The bus rejected a write.
    I2c(E),
    /// No full response within the command's polling budget.
    I2cTimeout,
    /// A response word failed its checksum.
    BadCrc,
    /// The identity probe read a serial ID that isn't this chip.
    NoSensor,
    /// The self test ran but didn't return the pass word.
    SelfTestFailed,
}

impl<E> fmt::Display for Error<E>
where
    E: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2c(err) => write!(f, "i2c error: {}", err),
            Error::I2cTimeout => write!(f, "no response within the polling budget"),
            Error::BadCrc => write!(f, "response word failed its checksum"),
            Error::NoSensor => write!(f, "serial ID does not match an SGP30"),
            Error::SelfTestFailed => write!(f, "self test did not return the pass word"),
        }
    }
}

#[cfg(feature = "std")]
impl<E> std::error::Error for Error<E> where E: fmt::Debug + fmt::Display {}

pub struct Sensor<I2C>
where
    I2C: i2c::I2c,
{
    i2c: I2C,
    address: u8,
    data: SensorData,
}

//Implement functions for the sensor that require the embedded-hal I2C.
impl<E, I2C> Sensor<I2C>
where
    I2C: i2c::I2c<Error = E>,
{
    //Returns an unprobed instance; nothing touches the bus until a
    //method does.
    pub fn new(i2c: I2C, address: u8) -> Self {
        Sensor {
            i2c,
            address,
            data: SensorData::default(),
        }
    }

    /// Probes the chip identity, then starts its air quality algorithm.
    ///
    /// For the first 15 seconds afterwards the device reports fixed
    /// values (400ppm CO2, 0ppb TVOC) while it warms up. That is device
    /// behaviour and comes through measure_air_quality unchanged.
    pub fn init(
        &mut self,
        delay: &mut impl DelayNs,
    ) -> Result<InitializedSensor<'_, I2C>, Error<E>> {
        let serial_id = self.get_serial_id(delay)?;
        if serial_id != EXPECTED_SERIAL_ID {
            return Err(Error::NoSensor);
        }

        self.command(Command::InitAirQuality, &[])?;

        Ok(InitializedSensor { sensor: self })
    }

    /// Reads the 48bit serial ID, sent as three words high word first.
    pub fn get_serial_id(&mut self, delay: &mut impl DelayNs) -> Result<u64, Error<E>> {
        let mut words = [0u16; 3];
        self.command_with_response(delay, Command::GetSerialId, &mut words)?;

        let serial_id =
            (words[0] as u64) << 32 | (words[1] as u64) << 16 | (words[2] as u64);

        self.data.serial_id = serial_id;
        Ok(serial_id)
    }

    /// Reads the feature set word identifying the chip revision.
    pub fn get_feature_set_version(
        &mut self,
        delay: &mut impl DelayNs,
    ) -> Result<u16, Error<E>> {
        let mut words = [0u16; 1];
        self.command_with_response(delay, Command::GetFeatureSetVersion, &mut words)?;

        self.data.feature_set_version = words[0];
        Ok(words[0])
    }

    /// Reads the raw H2 and ethanol channels. No unit conversion, these
    /// are the ADC counts the estimation algorithm runs on.
    pub fn measure_raw_signals(
        &mut self,
        delay: &mut impl DelayNs,
    ) -> Result<RawSignals, Error<E>> {
        let mut words = [0u16; 2];
        self.command_with_response(delay, Command::MeasureRawSignals, &mut words)?;

        let raw = RawSignals {
            h2: words[0],
            ethanol: words[1],
        };
        self.data.h2 = raw.h2;
        self.data.ethanol = raw.ethanol;
        Ok(raw)
    }

    /// Runs the on-chip self test, a production check. The device
    /// restarts its baseline algorithm when the test runs, which is why
    /// an initialized sensor doesn't offer it.
    pub fn self_test(&mut self, delay: &mut impl DelayNs) -> Result<(), Error<E>> {
        let mut words = [0u16; 1];
        self.command_with_response(delay, Command::MeasureTest, &mut words)?;

        if words[0] != SELF_TEST_PASS {
            return Err(Error::SelfTestFailed);
        }
        Ok(())
    }

    /// Resets through the i2c general call address. Every device on the
    /// bus that honours the general call resets too, not just this one.
    pub fn general_call_reset(&mut self) -> Result<(), Error<E>> {
        self.i2c
            .write(GENERAL_CALL_ADDRESS, &[GENERAL_CALL_RESET])
            .map_err(Error::I2c)
    }

    //Copy of the most recently validated readings.
    pub fn data(&self) -> SensorData {
        self.data
    }

    //Hand the bus back.
    pub fn destroy(self) -> I2C {
        self.i2c
    }

    //Opcode plus optional argument words, sent as one write.
    fn command(&mut self, command: Command, args: &[u16]) -> Result<(), Error<E>> {
        let device_command = command.as_device_command();

        let mut buf = [0u8; MAX_COMMAND_LEN];
        let len = 2 + args.len() * frame::BYTES_PER_WORD;
        buf[..2].copy_from_slice(&device_command.opcode);
        frame::encode_words(args, &mut buf[2..len]);

        trace!("write {:02x?}", &buf[..len]);
        self.i2c.write(self.address, &buf[..len]).map_err(Error::I2c)
    }

    //Write the opcode, then poll for the response frame within the
    //command's attempt budget. A read the device doesn't acknowledge
    //counts as not ready and burns one attempt.
    fn command_with_response(
        &mut self,
        delay: &mut impl DelayNs,
        command: Command,
        words: &mut [u16],
    ) -> Result<(), Error<E>> {
        let device_command = command.as_device_command();
        debug_assert_eq!(words.len(), device_command.response_words);

        self.command(command, &[])?;

        let mut buf = [0u8; MAX_RESPONSE_LEN];
        let response = &mut buf[..device_command.response_words * frame::BYTES_PER_WORD];

        let mut responded = false;
        for _ in 0..device_command.poll_attempts {
            delay.delay_ms(device_command.poll_interval_ms);
            if self.i2c.read(self.address, response).is_ok() {
                responded = true;
                break;
            }
        }
        if !responded {
            return Err(Error::I2cTimeout);
        }
        trace!("read {:02x?}", &response[..]);

        frame::decode_words(response, words).map_err(|_| Error::BadCrc)
    }
}

//This structure encapsulates the Sensor structure after the identity
//probe and algorithm init have happened; enforcing correct method
//availability.
pub struct InitializedSensor<'a, I2C>
where
    I2C: i2c::I2c,
{
    sensor: &'a mut Sensor<I2C>,
}

impl<'a, E, I2C> InitializedSensor<'a, I2C>
where
    I2C: i2c::I2c<Error = E>,
{
    /// Reads one air quality measurement, CO2 equivalent in ppm and
    /// TVOC in ppb.
    ///
    /// The on-chip algorithm expects this call once a second; keeping
    /// that cadence is the caller's job.
    pub fn measure_air_quality(
        &mut self,
        delay: &mut impl DelayNs,
    ) -> Result<AirQuality, Error<E>> {
        let mut words = [0u16; 2];
        self.sensor
            .command_with_response(delay, Command::MeasureAirQuality, &mut words)?;

        let reading = AirQuality {
            co2_ppm: words[0],
            tvoc_ppb: words[1],
        };
        self.sensor.data.co2_ppm = reading.co2_ppm;
        self.sensor.data.tvoc_ppb = reading.tvoc_ppb;
        Ok(reading)
    }

    /// Reads the algorithm's current baseline. Save it somewhere non
    /// volatile once in a while; restoring it after power up skips the
    /// long recalibration.
    pub fn get_baseline(&mut self, delay: &mut impl DelayNs) -> Result<Baseline, Error<E>> {
        let mut words = [0u16; 2];
        self.sensor
            .command_with_response(delay, Command::GetBaseline, &mut words)?;

        let baseline = Baseline {
            co2: words[0],
            tvoc: words[1],
        };
        self.sensor.data.baseline_co2 = baseline.co2;
        self.sensor.data.baseline_tvoc = baseline.tvoc;
        Ok(baseline)
    }

    /// Restores a previously saved baseline. On the wire the TVOC word
    /// goes out first, the reverse of how get_baseline reports them.
    pub fn set_baseline(&mut self, baseline: Baseline) -> Result<(), Error<E>> {
        self.sensor
            .command(Command::SetBaseline, &[baseline.tvoc, baseline.co2])
    }

    /// Sets the absolute humidity for on-chip compensation, an 8.8
    /// fixed point g/m³ value. Passing 0x0000 turns compensation off
    /// and brings back the default of 15.5 g/m³.
    pub fn set_humidity(&mut self, humidity: u16) -> Result<(), Error<E>> {
        self.sensor.command(Command::SetHumidity, &[humidity])
    }

    /// Raw channel readout, same as before init.
    pub fn measure_raw_signals(
        &mut self,
        delay: &mut impl DelayNs,
    ) -> Result<RawSignals, Error<E>> {
        self.sensor.measure_raw_signals(delay)
    }

    //Copy of the most recently validated readings.
    pub fn data(&self) -> SensorData {
        self.sensor.data()
    }
}
