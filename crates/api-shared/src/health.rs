use crate::wire::HealthRes;

/// Simple health service usable by any API surface.
///
/// Provides a standardised way to report the liveness of the intake system.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Creates a new instance of HealthService.
    pub fn new() -> Self {
        Self
    }

    /// Static health check; preferred since no instance is needed.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "ICU intake is alive".into(),
        }
    }
}
