/// Health status body.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Liveness check shared by the REST server and the CLI.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Reports the service as alive. The album service has no dependencies to probe.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Studio album service is alive".into(),
        }
    }
}
