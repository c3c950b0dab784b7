/// Attach a human readable layer to any std error and turn it into an
/// [`InternalError`](crate::InternalError).
pub trait Context<T> {
    fn context<C>(self, context: C) -> Result<T, crate::InternalError>
    where
        C: std::fmt::Display + Send + Sync + 'static;

    fn with_context<C, F>(self, f: F) -> Result<T, crate::InternalError>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T, crate::InternalError>
    where
        C: std::fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| crate::InternalError(anyhow::Error::from(e).context(context)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, crate::InternalError>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| crate::InternalError(anyhow::Error::from(e).context(f())))
    }
}
