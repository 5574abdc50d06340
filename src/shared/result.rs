/// Result alias used across ports, adapters and use cases.
///
/// Typed failures (`OvalError`) are wrapped into `anyhow::Error` and can be
/// recovered with `downcast_ref` where the exit code depends on them.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
