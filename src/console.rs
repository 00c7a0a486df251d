use std::sync::Arc;

use action_wait::Conditions;
use authoring_core_types::{DomPort, Scope};
use dialog_fields::{DialogConfigurer, FieldTypeRegistry};
use parsys_gate::path::{after_jcr_content, normalize};
use parsys_gate::{Parsys, ParsysPorts};
use tracing::debug;

use crate::config::ConsoleConfig;
use crate::errors::ConsoleError;

/// Entry point wiring one console session into page objects.
///
/// Everything handed out shares the same [`DomPort`] and wait budgets.
#[derive(Clone)]
pub struct AuthoringConsole {
    conditions: Conditions,
    configurer: DialogConfigurer,
}

impl AuthoringConsole {
    pub fn new(dom: Arc<dyn DomPort>, config: &ConsoleConfig, registry: FieldTypeRegistry) -> Self {
        Self {
            conditions: Conditions::new(dom.clone(), config.waits.clone()),
            configurer: DialogConfigurer::new(dom, Arc::new(registry)),
        }
    }

    pub fn dom(&self) -> &Arc<dyn DomPort> {
        self.conditions.dom()
    }

    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    pub fn configurer(&self) -> &DialogConfigurer {
        &self.configurer
    }

    /// Wraps an already located parsys overlay.
    pub fn parsys(&self, scope: Scope, ports: ParsysPorts) -> Parsys {
        Parsys::new(scope, self.conditions.clone(), ports)
    }

    /// First parsys on `page` whose data path contains the normalized `path`.
    pub async fn find_parsys(
        &self,
        page: &Scope,
        path: &str,
        ports: ParsysPorts,
    ) -> Result<Parsys, ConsoleError> {
        let query = normalize(path);
        let dom = self.dom();
        for candidate in dom.find_all(page, &Parsys::CSS).await? {
            let raw = dom.attribute(&candidate, "data-path").await?;
            if after_jcr_content(raw.as_deref().unwrap_or_default()).contains(&query) {
                debug!(path = %query, parsys = %candidate, "parsys found");
                return Ok(self.parsys(candidate, ports));
            }
        }
        Err(ConsoleError::ParsysNotFound(path.to_string()))
    }
}
