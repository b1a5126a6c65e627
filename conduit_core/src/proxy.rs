use miette::Result;

/// Name used by proxies that only ever exist once.
pub const DEFAULT_PROXY_NAME: &str = "Proxy";

/// A named data holder registered with the [`Model`](crate::Model).
///
/// The data itself is up to the implementor; collaborators retrieve the
/// concrete proxy by name through
/// [`Model::retrieve_proxy_as`](crate::Model::retrieve_proxy_as).
pub trait Proxy {
    fn proxy_name(&self) -> &str;

    /// Called by the model right after the proxy is stored.
    fn on_register(&self) -> Result<()> {
        Ok(())
    }

    /// Called by the model right after the proxy is removed.
    fn on_remove(&self) -> Result<()> {
        Ok(())
    }
}
