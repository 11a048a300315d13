//! different utility modules around the polynomial core
/// run-time settings parsed from `key=value` arguments
pub mod config;
/// console/file logger set up from the settings
pub mod logger;
/// parse term counts and (coefficient, exponent) pairs into polynomials
pub mod poly_parser;
