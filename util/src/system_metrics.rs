use sysinfo::System;
use thiserror::Error;

/// Instantaneous host utilization, both as percentages in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceSample {
    pub cpu: f64,
    pub ram: f64,
}

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("no CPU usage data available from the host")]
    CpuUnavailable,
    #[error("host reports zero total memory")]
    MemoryUnavailable,
}

/// Samples current CPU and RAM utilization.
///
/// CPU usage needs two refreshes separated by sysinfo's minimum update
/// interval, so this call blocks for roughly 200ms. Async callers should run
/// it via `spawn_blocking`.
pub fn sample_cpu_ram() -> Result<ResourceSample, SampleError> {
    let mut sys = System::new();

    sys.refresh_cpu_usage();
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    sys.refresh_cpu_usage();
    sys.refresh_memory();

    let cpus = sys.cpus();
    if cpus.is_empty() {
        return Err(SampleError::CpuUnavailable);
    }
    let cpu = cpus.iter().map(|c| c.cpu_usage() as f64).sum::<f64>() / cpus.len() as f64;

    let total = sys.total_memory();
    if total == 0 {
        return Err(SampleError::MemoryUnavailable);
    }
    let ram = sys.used_memory() as f64 / total as f64 * 100.0;

    Ok(ResourceSample { cpu, ram })
}

#[cfg(test)]
mod tests {
    use super::sample_cpu_ram;

    #[test]
    fn sample_reports_percentages_in_range() {
        let sample = sample_cpu_ram().expect("host metrics should be readable");

        assert!(sample.cpu >= 0.0, "cpu usage {} below 0%", sample.cpu);
        assert!(sample.cpu <= 100.0, "cpu usage {} above 100%", sample.cpu);
        assert!(sample.ram > 0.0, "ram usage {} should be positive", sample.ram);
        assert!(sample.ram <= 100.0, "ram usage {} above 100%", sample.ram);
    }
}
