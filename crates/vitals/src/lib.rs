pub mod antenna_geometry;
pub mod cycle_ring;
pub mod phase;
pub mod radar_cube;
pub mod vitals_error;
pub mod vitals_parameters;
pub mod vitals_pipeline;
