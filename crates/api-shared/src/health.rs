use crate::wire::HealthRes;

/// Simple health service used by the REST API and the standalone server binary
///
/// This service provides a standardised way to check the health status of the relay server.
/// Liveness only: the document service is never contacted.
#[derive(Clone, Debug)]
pub struct HealthService;

impl HealthService {
    /// Static method to check health without creating an instance
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "PDF Chat is alive".into(),
        }
    }
}
