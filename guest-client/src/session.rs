//! Guest session store
//!
//! Ambient context for an unauthenticated ordering session: business
//! (tenant), area and table seeded from the scanned QR link, and the guest
//! name collected by the blocking name dialog. Tab-scoped; torn down with
//! the tab, no explicit destroy.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::{ClientError, ClientResult};

/// Snapshot of the current guest context
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestContext {
    pub business_id: Option<String>,
    pub area_id: Option<String>,
    pub unit_id: Option<String>,
    pub guest_name: Option<String>,
}

/// Guest session handle; clones share the same underlying state
#[derive(Debug, Clone, Default)]
pub struct GuestSession {
    inner: Arc<RwLock<GuestContext>>,
}

impl GuestSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed business, area and table from the inbound guest link:
    /// `<origin>/<prefix>/<businessId>/menu?area=<areaId>&table=<unitId>`.
    ///
    /// Route mounts call this once; repeated calls overwrite
    /// (last-write-wins), matching the setter semantics.
    pub fn bootstrap_from_url(&self, prefix: &str, url: &str) -> ClientResult<()> {
        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (url, None),
        };

        // Path segments after the scheme/host, e.g. ["unauth", "biz123", "menu"]
        let path = match path.split_once("://") {
            Some((_, rest)) => rest.split_once('/').map(|(_, p)| p).unwrap_or(""),
            None => path.trim_start_matches('/'),
        };
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let business_id = segments
            .iter()
            .position(|s| *s == prefix)
            .and_then(|idx| segments.get(idx + 1))
            .map(|s| s.to_string())
            .ok_or_else(|| ClientError::InvalidGuestLink(url.to_string()))?;

        let mut area_id = None;
        let mut unit_id = None;
        if let Some(query) = query {
            for pair in query.split('&') {
                match pair.split_once('=') {
                    Some(("area", v)) if !v.is_empty() => area_id = Some(v.to_string()),
                    Some(("table", v)) if !v.is_empty() => unit_id = Some(v.to_string()),
                    _ => {}
                }
            }
        }

        let mut ctx = self.inner.write();
        ctx.business_id = Some(business_id);
        ctx.area_id = area_id;
        ctx.unit_id = unit_id;

        tracing::debug!(
            business = ctx.business_id.as_deref().unwrap_or(""),
            area = ctx.area_id.as_deref().unwrap_or(""),
            unit = ctx.unit_id.as_deref().unwrap_or(""),
            "guest session bootstrapped"
        );
        Ok(())
    }

    /// Set the business id (route-mount effect)
    pub fn set_business(&self, id: impl Into<String>) {
        self.inner.write().business_id = Some(id.into());
    }

    /// Set area and table together (QR link query parameters)
    pub fn set_area_and_table(&self, area: impl Into<String>, unit: impl Into<String>) {
        let mut ctx = self.inner.write();
        ctx.area_id = Some(area.into());
        ctx.unit_id = Some(unit.into());
    }

    /// Set the guest name from the blocking name dialog.
    ///
    /// Returns `false` (and leaves the state untouched) for empty or
    /// whitespace-only input; the dialog stays open in that case. A
    /// precondition, not an error.
    pub fn set_guest_name(&self, name: impl Into<String>) -> bool {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.inner.write().guest_name = Some(trimmed.to_string());
        true
    }

    /// Whether the blocking name dialog must be shown before the menu
    /// becomes interactive
    pub fn needs_name_prompt(&self) -> bool {
        self.inner.read().guest_name.is_none()
    }

    /// Current snapshot
    pub fn context(&self) -> GuestContext {
        self.inner.read().clone()
    }
}
