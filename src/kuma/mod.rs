pub mod client;

pub use client::{MonitorSetup, MonitorSpec, ProbeReport, UptimeKumaClient, probe_service};
