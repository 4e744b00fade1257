//! KMA weather integration
//!
//! Client for the Korea Meteorological Administration short-range forecast
//! service (`VilageFcstInfoService_2.0` on data.go.kr). Provides the current
//! ultra-short-range observation and the multi-day village forecast for a
//! provider grid cell.

pub mod client;
mod models;

pub use client::{KmaClient, WeatherClient, WeatherConfig, WeatherError};
