//! Continuous profiling.
//!
//! Samples the process with pprof-rs and ships profiles to a Pyroscope
//! server. The agent is compiled in with the default `profiling` feature; an
//! enabled profiler in a `--no-default-features` build stays inactive.

#[cfg(feature = "profiling")]
use pyroscope::{pyroscope::PyroscopeAgentRunning, PyroscopeAgent};

use crate::config::{ProfilingConfig, ServiceInfo};
use crate::observability::ObservabilityError;

/// Handle on the running profiling agent.
pub struct Profiler {
    #[cfg(feature = "profiling")]
    agent: Option<PyroscopeAgent<PyroscopeAgentRunning>>,
}

impl Profiler {
    /// Start profiling if enabled in `config`.
    pub fn start(
        config: &ProfilingConfig,
        service: &ServiceInfo,
    ) -> Result<Self, ObservabilityError> {
        if !config.enabled {
            ::tracing::info!("Continuous profiling disabled");
            return Ok(Self::inactive());
        }
        Self::start_agent(config, service)
    }

    #[cfg(feature = "profiling")]
    fn start_agent(
        config: &ProfilingConfig,
        service: &ServiceInfo,
    ) -> Result<Self, ObservabilityError> {
        use pyroscope_pprofrs::{pprof_backend, PprofConfig};

        let agent = PyroscopeAgent::builder(config.server_address.as_str(), service.name.as_str())
            .backend(pprof_backend(
                PprofConfig::new().sample_rate(config.sample_rate),
            ))
            .tags(vec![
                ("version", service.version.as_str()),
                ("environment", service.environment.as_str()),
            ])
            .build()?;
        let running = agent.start()?;

        ::tracing::info!(
            server_address = %config.server_address,
            sample_rate = config.sample_rate,
            "Continuous profiling started"
        );
        Ok(Self {
            agent: Some(running),
        })
    }

    #[cfg(not(feature = "profiling"))]
    fn start_agent(
        config: &ProfilingConfig,
        _service: &ServiceInfo,
    ) -> Result<Self, ObservabilityError> {
        ::tracing::warn!(
            server_address = %config.server_address,
            "Profiling enabled but this build lacks the `profiling` feature"
        );
        Ok(Self::inactive())
    }

    fn inactive() -> Self {
        Self {
            #[cfg(feature = "profiling")]
            agent: None,
        }
    }

    pub fn is_active(&self) -> bool {
        #[cfg(feature = "profiling")]
        {
            self.agent.is_some()
        }
        #[cfg(not(feature = "profiling"))]
        {
            false
        }
    }

    /// Flush the last profile and stop sampling.
    pub fn stop(self) {
        #[cfg(feature = "profiling")]
        if let Some(agent) = self.agent {
            match agent.stop() {
                Ok(ready) => ready.shutdown(),
                Err(e) => ::tracing::warn!(error = %e, "Failed to stop profiler"),
            }
        }
    }
}
