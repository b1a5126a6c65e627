use std::any::{type_name, Any};
use std::cell::RefCell;
use std::rc::Rc;

use linked_hash_map::LinkedHashMap;
use miette::Result;

use crate::{Proxy, RegistryError};

struct RegisteredProxy {
    proxy: Rc<dyn Proxy>,
    proxy_any: Rc<dyn Any>,
}

/// Proxy registry: maps proxy names to proxies, in registration order.
///
/// Unlike mediators, registering a proxy under a name that is already taken
/// replaces the previous proxy (which is *not* sent `on_remove`).
pub struct Model {
    proxy_map: RefCell<LinkedHashMap<String, RegisteredProxy>>,
}

impl Model {
    pub fn new() -> Self {
        Self {
            proxy_map: RefCell::new(LinkedHashMap::new()),
        }
    }

    /// Store the proxy under its name and call its `on_register`.
    pub fn register_proxy<P>(&self, proxy: Rc<P>) -> Result<()>
    where
        P: Proxy + 'static,
    {
        let proxy_name = proxy.proxy_name().to_string();

        let proxy_dyn: Rc<dyn Proxy> = proxy.clone();
        let proxy_any: Rc<dyn Any> = proxy;

        let previous = self.proxy_map.borrow_mut().insert(
            proxy_name.clone(),
            RegisteredProxy {
                proxy: proxy_dyn.clone(),
                proxy_any,
            },
        );

        if previous.is_some() {
            tracing::debug!(proxy = %proxy_name, "replaced proxy");
        } else {
            tracing::debug!(proxy = %proxy_name, "registered proxy");
        }

        proxy_dyn.on_register()
    }

    pub fn retrieve_proxy(&self, proxy_name: &str) -> Option<Rc<dyn Proxy>> {
        self.proxy_map
            .borrow()
            .get(proxy_name)
            .map(|registered| registered.proxy.clone())
    }

    /// Retrieve a proxy as its concrete type.
    pub fn retrieve_proxy_as<P>(
        &self,
        proxy_name: &str,
    ) -> Result<Option<Rc<P>>, RegistryError>
    where
        P: Proxy + 'static,
    {
        let proxy_any = match self.proxy_map.borrow().get(proxy_name) {
            Some(registered) => registered.proxy_any.clone(),
            None => return Ok(None),
        };

        proxy_any
            .downcast::<P>()
            .map(Some)
            .map_err(|_| RegistryError::TypeMismatch {
                name: proxy_name.to_string(),
                expected_type: type_name::<P>(),
            })
    }

    pub fn has_proxy(&self, proxy_name: &str) -> bool {
        self.proxy_map.borrow().contains_key(proxy_name)
    }

    /// Remove a proxy and call its `on_remove`, returning it if it was registered.
    pub fn remove_proxy(&self, proxy_name: &str) -> Result<Option<Rc<dyn Proxy>>> {
        let Some(removed) = self.proxy_map.borrow_mut().remove(proxy_name) else {
            return Ok(None);
        };

        tracing::debug!(proxy = proxy_name, "removed proxy");

        removed.proxy.on_remove()?;

        Ok(Some(removed.proxy))
    }

    /// Names of all registered proxies, in registration order.
    pub fn proxy_names(&self) -> Vec<String> {
        self.proxy_map.borrow().keys().cloned().collect()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}
