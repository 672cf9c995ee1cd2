/// Size of one result record on the wire.
pub const RESULT_WIRE_SIZE: usize = 20;

/// One published vital-signs measurement. The record is copied out on read;
/// an invalid record carries zeros in every numeric field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VitalSignsResult {
    /// Tracked target id, zero unless a tracker is integrated.
    pub id: u16,
    /// Range bin the measurement was taken at.
    pub range_bin: u16,
    /// Estimated heart rate in beats per minute.
    pub heart_rate_bpm: f32,
    /// Estimated breathing rate in breaths per minute.
    pub breathing_rate_bpm: f32,
    /// Variance of the reference-cell phase motion, a presence indicator.
    pub breathing_deviation: f32,
    /// Whether the estimates are settled and the target is present.
    pub valid: bool,
}

impl VitalSignsResult {
    /// Packs the record into its little-endian wire layout:
    /// `{u16 id, u16 rangeBin, f32 heartRate, f32 breathingRate, f32 breathingDeviation, u8 valid, u8[3] reserved}`.
    pub fn to_wire_bytes(&self) -> [u8; RESULT_WIRE_SIZE] {
        let mut bytes = [0u8; RESULT_WIRE_SIZE];
        bytes[0..2].copy_from_slice(&self.id.to_le_bytes());
        bytes[2..4].copy_from_slice(&self.range_bin.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.heart_rate_bpm.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.breathing_rate_bpm.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.breathing_deviation.to_le_bytes());
        bytes[16] = self.valid as u8;
        bytes
    }

    /// Unpacks a record from its little-endian wire layout.
    pub fn from_wire_bytes(bytes: &[u8; RESULT_WIRE_SIZE]) -> Self {
        Self {
            id: u16::from_le_bytes([bytes[0], bytes[1]]),
            range_bin: u16::from_le_bytes([bytes[2], bytes[3]]),
            heart_rate_bpm: f32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            breathing_rate_bpm: f32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            breathing_deviation: f32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
            valid: bytes[16] != 0,
        }
    }
}
