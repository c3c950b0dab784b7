/// Failure that is only ever reported to the operator, never to a client.
///
/// `Debug` prints the whole anyhow chain so `main` can surface every
/// context layer that was attached on the way up.
#[derive(thiserror::Error)]
#[error("{0:#}")]
pub struct InternalError(#[from] pub anyhow::Error);

impl std::fmt::Debug for InternalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context_chain() {
        let err = InternalError(anyhow::anyhow!("address in use").context("bind :: 0.0.0.0:8080"));
        assert_eq!(err.to_string(), "bind :: 0.0.0.0:8080: address in use");
    }
}
