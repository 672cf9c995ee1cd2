pub mod radar_parameters;
pub mod vitals_config;
pub mod vitals_result;
