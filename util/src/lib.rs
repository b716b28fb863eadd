pub mod system_metrics;
