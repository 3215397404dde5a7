//! Names that resilience wrappers and service registries key on.
//!
//! Generated connectors implement both traits; the behavior behind the names
//! belongs to whoever consumes them.

/// Names the circuit breaker guarding a connector.
pub trait CircuitBreaker {
    /// The client's logical name.
    const CIRCUIT_BREAKER: &'static str;
}

/// Names a connector for registration with a service container.
pub trait Service {
    /// The connector type name with its first letter lower-cased.
    const SERVICE_NAME: &'static str;
}
