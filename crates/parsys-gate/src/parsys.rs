//! Paragraph system page object

use std::sync::Arc;

use action_wait::{Conditions, PollOutcome, WaitError, WaitTier};
use authoring_core_types::{DomError, DomPort, Scope, Selector};
use dialog_fields::ComponentData;
use tracing::{debug, info, instrument, warn};

use crate::errors::ParsysError;
use crate::path::{after_jcr_content, normalize};
use crate::ports::{Component, InsertSurface, ParsysPorts};

const DROP_AREA: Selector = Selector::css(".cq-Overlay--placeholder[data-text='Drag components here']");
const COMPONENT: Selector = Selector::css(".cq-Overlay.cq-Overlay--component");
const IS_SELECTED: &str = "is-selected";
const DATA_PATH: &str = "data-path";

/// Drop zone holding component instances on an authored page.
pub struct Parsys {
    scope: Scope,
    conditions: Conditions,
    ports: ParsysPorts,
}

impl Parsys {
    /// Overlay of a parsys container.
    pub const CSS: Selector = Selector::css(".cq-Overlay.cq-Overlay--component.cq-Overlay--container");

    pub fn new(scope: Scope, conditions: Conditions, ports: ParsysPorts) -> Self {
        Self {
            scope,
            conditions,
            ports,
        }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    fn dom(&self) -> &Arc<dyn DomPort> {
        self.conditions.dom()
    }

    /// Content path of the parsys below `jcr:content`, e.g. `/par`.
    pub async fn data_path(&self) -> Result<String, ParsysError> {
        let raw = self.dom().attribute(&self.scope, DATA_PATH).await?;
        Ok(after_jcr_content(raw.as_deref().unwrap_or_default()).to_string())
    }

    /// Selects the drop area, then opens the insert surface.
    #[instrument(skip_all, fields(parsys = %self.scope))]
    pub async fn open_insert_surface(&self) -> Result<Arc<dyn InsertSurface>, ParsysError> {
        self.select_drop_area().await?;
        self.open_surface().await?;
        Ok(self.ports.surface.clone())
    }

    /// First child whose data path contains the normalized `path`.
    pub async fn component(&self, path: &str) -> Result<Box<dyn Component>, ParsysError> {
        match self.find_child(path).await? {
            Some(child) => Ok(self.ports.binder.bind(child)),
            None => Err(ParsysError::ComponentNotFound(path.to_string())),
        }
    }

    pub async fn is_component_present(&self, path: &str) -> Result<bool, ParsysError> {
        Ok(self.find_child(path).await?.is_some())
    }

    #[instrument(skip_all, fields(parsys = %self.scope, title = %title))]
    pub async fn insert_component(&self, title: &str) -> Result<(), ParsysError> {
        let surface = self.open_insert_surface().await?;
        surface.insert_component(title).await?;
        info!("component inserted");
        Ok(())
    }

    #[instrument(skip_all, fields(parsys = %self.scope, path = %path))]
    pub async fn configure_component(&self, path: &str, data: &ComponentData) -> Result<(), ParsysError> {
        self.component(path).await?.configure(data).await?;
        info!("component configured");
        Ok(())
    }

    #[instrument(skip_all, fields(parsys = %self.scope, path = %path))]
    pub async fn delete_component(&self, path: &str) -> Result<(), ParsysError> {
        self.component(path).await?.delete().await?;
        info!("component deleted");
        Ok(())
    }

    /// `false` once the parsys overlay has been re-rendered away.
    pub async fn is_live(&self) -> Result<bool, ParsysError> {
        Ok(self.conditions.is_not_stale(&self.scope).await?)
    }

    async fn find_child(&self, path: &str) -> Result<Option<Scope>, ParsysError> {
        let query = normalize(path);
        let dom = self.dom();
        for child in dom.find_all(&self.scope, &COMPONENT).await? {
            let raw = dom.attribute(&child, DATA_PATH).await?;
            if after_jcr_content(raw.as_deref().unwrap_or_default()).contains(&query) {
                debug!(path = %query, child = %child, "component found");
                return Ok(Some(child));
            }
        }
        Ok(None)
    }

    /// Visible drop area, found anew on each attempt.
    async fn visible_drop_area(&self) -> Result<Scope, WaitError> {
        let dom = self.dom();
        let scope = &self.scope;
        self.conditions
            .verify("drop area visible", WaitTier::Small, move || async move {
                let area = match PollOutcome::absorb_stale(dom.find_all(scope, &DROP_AREA).await)? {
                    PollOutcome::Ready(found) => found.into_iter().next(),
                    _ => None,
                };
                let Some(area) = area else {
                    return Ok(PollOutcome::Retry);
                };
                Ok::<_, WaitError>(match PollOutcome::absorb_stale(dom.is_displayed(&area).await)? {
                    PollOutcome::Ready(true) => PollOutcome::Ready(area),
                    _ => PollOutcome::Retry,
                })
            })
            .await
    }

    /// Phase one: click the drop area until it reports being selected.
    async fn select_drop_area(&self) -> Result<(), WaitError> {
        let dom = self.dom();
        self.conditions
            .verify("drop area selected", WaitTier::Medium, move || async move {
                let area = self.visible_drop_area().await?;
                if let PollOutcome::Retry = PollOutcome::absorb_stale(dom.click(&area).await)? {
                    return Ok(PollOutcome::Retry);
                }
                Ok::<_, WaitError>(match PollOutcome::absorb_stale(dom.attribute(&area, "class").await)? {
                    PollOutcome::Ready(class) => {
                        PollOutcome::when(class.map_or(false, |class| class.contains(IS_SELECTED)))
                    }
                    _ => PollOutcome::Retry,
                })
            })
            .await
    }

    /// Phase two: click again until the insert surface is up.
    ///
    /// The surface may pop up just before the click lands and intercept it;
    /// readiness is checked either way.
    async fn open_surface(&self) -> Result<(), WaitError> {
        let dom = self.dom();
        let surface = &self.ports.surface;
        self.conditions
            .verify("insert surface open", WaitTier::Medium, move || async move {
                let area = match PollOutcome::absorb_stale(dom.find_first(&self.scope, &DROP_AREA).await)? {
                    PollOutcome::Ready(area) => area,
                    _ => return Ok(PollOutcome::Retry),
                };
                match dom.click(&area).await {
                    Ok(()) => {}
                    Err(DomError::ClickIntercepted(target)) => {
                        warn!(intercepted_by = %target, "drop area click intercepted");
                    }
                    Err(err) => return Err(err.into()),
                }
                Ok::<_, WaitError>(match PollOutcome::absorb_stale(surface.is_ready().await)? {
                    PollOutcome::Ready(true) => PollOutcome::Ready(()),
                    _ => PollOutcome::Retry,
                })
            })
            .await
    }
}
