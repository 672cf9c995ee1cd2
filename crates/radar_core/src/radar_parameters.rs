/// Refer to the structs VitalsParameters and AntennaGeometry for an explanation of how
/// these numbers are consumed. This contains all the information required to size the
/// vital-signs pipeline for the supported radar device class.
pub struct RadarParameters {
    /// Number of range bins in the extraction window around the target hint.
    pub nb_range_cells: usize,
    /// Number of virtual antennas (TX by RX combinations) in the range-FFT cube.
    pub nb_virtual_antennas: usize,
    /// Number of frames accumulated per measurement cycle.
    pub nb_cycle_frames: usize,
    /// Number of frames between two spectrum refreshes.
    pub nb_refresh_frames: usize,
    /// Size of the two-dimensional angle FFT along each axis.
    pub nb_angle_fft: usize,
    /// Number of angle cells tracked around the angle peak (a 3x3 neighborhood).
    pub nb_angle_cells: usize,
    /// Size of the phase spectrum FFT.
    pub nb_spectrum_fft: usize,
    /// Number of physical rows in the virtual antenna array.
    pub nb_antenna_rows: usize,
    /// Number of physical columns in the virtual antenna array.
    pub nb_antenna_cols: usize,
    /// Number of transmit antennas.
    pub nb_tx_antennas: usize,
    /// Number of receive antennas.
    pub nb_rx_antennas: usize,
}

/// These constants are defined for the 3 TX by 4 RX millimeter-wave front end.
pub fn get_radar_parameters() -> RadarParameters {
    let params = RadarParameters {
        nb_range_cells: 5,
        nb_virtual_antennas: 12,
        nb_cycle_frames: 128,
        nb_refresh_frames: 32,
        nb_angle_fft: 16,
        nb_angle_cells: 9,
        nb_spectrum_fft: 512,
        nb_antenna_rows: 3,
        nb_antenna_cols: 4,
        nb_tx_antennas: 3,
        nb_rx_antennas: 4,
    };

    assert!(params.nb_tx_antennas * params.nb_rx_antennas == params.nb_virtual_antennas, "Virtual antenna count must be the product of TX and RX antennas");
    assert!(params.nb_antenna_rows * params.nb_antenna_cols >= params.nb_virtual_antennas, "Virtual antennas must fit the physical array grid");
    assert!(params.nb_cycle_frames % params.nb_refresh_frames == 0, "Cycle length must be a whole number of refresh intervals");
    assert!(params.nb_spectrum_fft >= params.nb_cycle_frames, "Spectrum FFT must fit one cycle of phase samples");
    assert!(params.nb_angle_fft >= params.nb_antenna_rows && params.nb_angle_fft >= params.nb_antenna_cols, "Angle FFT must cover the physical array grid");

    params
}
