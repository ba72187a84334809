//! Connector registry and factory.
//!
//! The factory maps a site's `type` string to a connector constructor. It is
//! the single entry point callers use to reach a connector for a site.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use sitebridge_core::{ConfigField, ConnectorDescriptor, CoreError, SiteConfig};
use sitebridge_fetch::RequestExecutor;
use tracing::debug;

use crate::connector::SiteConnector;
use crate::generic::{GenericApiConnector, generic_descriptor};
use crate::git::{GitConnector, git_descriptor};
use crate::wordpress::{WordPressConnector, wordpress_descriptor};

/// Builds a connector around the shared executor.
pub type ConnectorConstructor =
    Arc<dyn Fn(RequestExecutor) -> Arc<dyn SiteConnector> + Send + Sync>;

// ============================================================================
// Built-in Catalog
// ============================================================================

static BUILTIN_DESCRIPTORS: OnceLock<Vec<ConnectorDescriptor>> = OnceLock::new();

/// Descriptors of the built-in connectors, in catalog order.
pub fn builtin_descriptors() -> &'static [ConnectorDescriptor] {
    BUILTIN_DESCRIPTORS.get_or_init(|| {
        vec![
            wordpress_descriptor(),
            generic_descriptor(),
            git_descriptor(),
        ]
    })
}

fn builtin_constructor(kind: &str) -> Option<ConnectorConstructor> {
    let constructor: ConnectorConstructor = match kind {
        "wordpress" => Arc::new(|executor: RequestExecutor| -> Arc<dyn SiteConnector> {
            Arc::new(WordPressConnector::new(executor))
        }),
        "api" => Arc::new(|executor: RequestExecutor| -> Arc<dyn SiteConnector> {
            Arc::new(GenericApiConnector::new(executor))
        }),
        "git" => Arc::new(|executor: RequestExecutor| -> Arc<dyn SiteConnector> {
            Arc::new(GitConnector::new(executor))
        }),
        _ => return None,
    };
    Some(constructor)
}

// ============================================================================
// Connector Factory
// ============================================================================

struct Registration {
    descriptor: ConnectorDescriptor,
    constructor: ConnectorConstructor,
}

/// Resolves sites to connectors.
///
/// Connectors hold no per-site state, so one instance per type is built on
/// first use and reused afterwards. Unknown types are rejected before any
/// request is made.
pub struct ConnectorFactory {
    executor: RequestExecutor,
    registrations: Vec<Registration>,
    instances: RwLock<HashMap<String, Arc<dyn SiteConnector>>>,
}

impl fmt::Debug for ConnectorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorFactory")
            .field("kinds", &self.kinds())
            .field("executor", &self.executor)
            .finish_non_exhaustive()
    }
}

impl ConnectorFactory {
    /// Creates a factory with the built-in connectors registered.
    pub fn new(executor: RequestExecutor) -> Self {
        let registrations = builtin_descriptors()
            .iter()
            .filter_map(|descriptor| {
                builtin_constructor(&descriptor.kind).map(|constructor| Registration {
                    descriptor: descriptor.clone(),
                    constructor,
                })
            })
            .collect();

        Self {
            executor,
            registrations,
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a connector type, replacing any registration of the same
    /// kind and dropping its cached instance.
    pub fn register<F>(&mut self, descriptor: ConnectorDescriptor, constructor: F)
    where
        F: Fn(RequestExecutor) -> Arc<dyn SiteConnector> + Send + Sync + 'static,
    {
        let kind = descriptor.kind.clone();
        debug!(kind = %kind, "Registering connector");

        self.instances
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&kind);

        let registration = Registration {
            descriptor,
            constructor: Arc::new(constructor),
        };
        match self.registrations.iter_mut().find(|r| r.descriptor.kind == kind) {
            Some(existing) => *existing = registration,
            None => self.registrations.push(registration),
        }
    }

    /// Connector for `site`, selected by its `type`.
    pub fn resolve(&self, site: &SiteConfig) -> Result<Arc<dyn SiteConnector>, CoreError> {
        self.connector(&site.site_type)
    }

    /// Connector registered under `kind`.
    pub fn connector(&self, kind: &str) -> Result<Arc<dyn SiteConnector>, CoreError> {
        if let Some(instance) = self
            .instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(kind)
        {
            return Ok(Arc::clone(instance));
        }

        let registration = self.registration(kind).ok_or_else(|| CoreError::UnknownConnector {
            kind: kind.to_string(),
            available: self.kinds().into_iter().map(String::from).collect(),
        })?;

        let mut instances = self
            .instances
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let instance = instances
            .entry(kind.to_string())
            .or_insert_with(|| (registration.constructor)(self.executor.clone()));
        Ok(Arc::clone(instance))
    }

    /// Descriptors of every registered type, in registration order.
    pub fn catalog(&self) -> Vec<&ConnectorDescriptor> {
        self.registrations.iter().map(|r| &r.descriptor).collect()
    }

    /// Descriptor for `kind`.
    pub fn descriptor(&self, kind: &str) -> Option<&ConnectorDescriptor> {
        self.registration(kind).map(|r| &r.descriptor)
    }

    /// Whether `kind` is registered.
    pub fn has_connector(&self, kind: &str) -> bool {
        self.registration(kind).is_some()
    }

    /// Configuration fields for `kind`.
    pub fn configuration_fields(&self, kind: &str) -> Result<&[ConfigField], CoreError> {
        self.descriptor(kind)
            .map(|d| d.configuration_fields.as_slice())
            .ok_or_else(|| CoreError::UnknownConnector {
                kind: kind.to_string(),
                available: self.kinds().into_iter().map(String::from).collect(),
            })
    }

    /// Registered type strings, in registration order.
    pub fn kinds(&self) -> Vec<&str> {
        self.registrations
            .iter()
            .map(|r| r.descriptor.kind.as_str())
            .collect()
    }

    fn registration(&self, kind: &str) -> Option<&Registration> {
        self.registrations.iter().find(|r| r.descriptor.kind == kind)
    }
}

// ============================================================================
// Tests
// ============================================================================
