use vitals::vitals_parameters::VitalsParameters;
use radar_core::radar_parameters::get_radar_parameters;

/// The vital-signs pipeline parameters for the supported radar device class.
pub fn get_awr_vitals_parameters() -> VitalsParameters {
    let params = get_radar_parameters();
    VitalsParameters::new(
        params.nb_range_cells,
        params.nb_virtual_antennas,
        params.nb_cycle_frames,
        params.nb_refresh_frames,
        params.nb_angle_fft,
        params.nb_angle_cells,
        params.nb_spectrum_fft,
    )
}
