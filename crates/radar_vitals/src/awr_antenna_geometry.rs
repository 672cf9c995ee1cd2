use vitals::antenna_geometry::AntennaGeometry;
use radar_core::radar_parameters::get_radar_parameters;

/// Position of one virtual antenna in the angle grid, in half-wavelength
/// units. Rows run along elevation, columns along azimuth.
struct AntennaPosition {
    row: usize,
    col: usize,
}

// The 3 TX by 4 RX front end forms a filled planar virtual array:
// virtual antenna v sits at row v/4, column v%4.
const AWR_VIRTUAL_ANTENNAS: [AntennaPosition; 12] = [
    AntennaPosition { row: 0, col: 0 },
    AntennaPosition { row: 0, col: 1 },
    AntennaPosition { row: 0, col: 2 },
    AntennaPosition { row: 0, col: 3 },
    AntennaPosition { row: 1, col: 0 },
    AntennaPosition { row: 1, col: 1 },
    AntennaPosition { row: 1, col: 2 },
    AntennaPosition { row: 1, col: 3 },
    AntennaPosition { row: 2, col: 0 },
    AntennaPosition { row: 2, col: 1 },
    AntennaPosition { row: 2, col: 2 },
    AntennaPosition { row: 2, col: 3 },
];

/// Creates the antenna geometry for the supported radar front end.
pub fn get_awr_antenna_geometry() -> AntennaGeometry {
    let params = get_radar_parameters();
    let positions: Vec<(usize, usize)> = AWR_VIRTUAL_ANTENNAS
        .iter()
        .map(|position| (position.row, position.col))
        .collect();
    AntennaGeometry::new(
        &positions,
        params.nb_antenna_rows,
        params.nb_antenna_cols,
        params.nb_tx_antennas,
        params.nb_rx_antennas,
    )
}
