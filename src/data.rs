/*
 * Filename: data.rs
 * Description: reading types and the published state of the sensor.
 */

//One air quality measurement. CO2 equivalent in ppm, total volatile
//organic compounds in ppb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirQuality {
    pub co2_ppm: u16,
    pub tvoc_ppb: u16,
}

//Calibration state of the on-chip algorithm. Worth saving to non
//volatile storage now and then and restoring after power up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    pub co2: u16,
    pub tvoc: u16,
}

//Uncalibrated ADC counts from the two sensing channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSignals {
    pub h2: u16,
    pub ethanol: u16,
}

//Most recent checksum validated values, one field per thing the device
//reports. A field only changes once its whole response has validated;
//a failed operation leaves all of them as they were.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SensorData {
    pub co2_ppm: u16,
    pub tvoc_ppb: u16,
    pub baseline_co2: u16,
    pub baseline_tvoc: u16,
    pub feature_set_version: u16,
    pub h2: u16,
    pub ethanol: u16,
    pub serial_id: u64,
}

#[cfg(test)]
mod sensor_data_tests {
    use super::*;

    #[test]
    fn starts_zeroed() {
        let data = SensorData::default();

        assert_eq!(data.co2_ppm, 0);
        assert_eq!(data.tvoc_ppb, 0);
        assert_eq!(data.serial_id, 0);
    }
}
