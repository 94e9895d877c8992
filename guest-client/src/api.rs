//! Typed API surface over the envelope client
//!
//! List reads return `ClientResult<Vec<_>>`; screens that prefer a safe
//! fallback wrap them in [`or_empty`]. Writes always propagate the failure
//! so the calling dialog can reset its pending state.

use std::sync::Arc;

use async_trait::async_trait;
use shared::models::{
    Area, AreaCreate, Branch, Category, GuestRequest, GuestRequestCreate, OrderCreate, OrderLine,
    OrderSummary, Product, RequestKind, RequestProcess, RequestStatus, SelectOption, ServiceUnit,
    ServiceUnitCreate, Subcategory,
};

use crate::cart::CartStore;
use crate::cascade::{OptionSource, SelectChain};
use crate::http::HttpClient;
use crate::money::to_f64;
use crate::polling::QueryInvalidator;
use crate::session::GuestSession;
use crate::{ClientConfig, ClientError, ClientResult};

/// Collapse a failed list read into an empty list, logging the failure.
/// The screen stays interactive; the user retries by repeating the action.
pub fn or_empty<T>(result: ClientResult<Vec<T>>, what: &str) -> Vec<T> {
    match result {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!(what, error = %e, "list read failed, falling back to empty");
            Vec::new()
        }
    }
}

/// Permission gate for the staff screens: the permission-code list is
/// already fetched with the session, the check is purely local
pub fn has_permission(granted: &[String], required: &str) -> bool {
    granted.iter().any(|code| code == required)
}

/// Typed client for the ordering backend
#[derive(Debug, Clone)]
pub struct OrderingApi {
    http: HttpClient,
}

impl OrderingApi {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    pub fn from_http(http: HttpClient) -> Self {
        Self { http }
    }

    // ========== Read paths ==========

    pub async fn branches(&self) -> ClientResult<Vec<Branch>> {
        self.http.get_data("api/branches").await
    }

    pub async fn areas(&self, branch_id: &str) -> ClientResult<Vec<Area>> {
        self.http
            .get_data(&format!("api/branches/{}/areas", branch_id))
            .await
    }

    pub async fn service_units(&self, area_id: &str) -> ClientResult<Vec<ServiceUnit>> {
        self.http
            .get_data(&format!("api/areas/{}/units", area_id))
            .await
    }

    pub async fn categories(&self) -> ClientResult<Vec<Category>> {
        self.http.get_data("api/categories").await
    }

    pub async fn subcategories(&self, category_id: &str) -> ClientResult<Vec<Subcategory>> {
        self.http
            .get_data(&format!("api/categories/{}/subcategories", category_id))
            .await
    }

    pub async fn products(&self, category_id: &str) -> ClientResult<Vec<Product>> {
        self.http
            .get_data(&format!("api/categories/{}/products", category_id))
            .await
    }

    pub async fn requests(&self, business_id: &str) -> ClientResult<Vec<GuestRequest>> {
        self.http
            .get_data(&format!("api/businesses/{}/requests", business_id))
            .await
    }

    pub async fn orders(&self, business_id: &str) -> ClientResult<Vec<OrderSummary>> {
        self.http
            .get_data(&format!("api/businesses/{}/orders", business_id))
            .await
    }

    // ========== Write paths ==========

    /// Inline-create an area from within the QR dialog. The caller feeds
    /// the returned entity into `SelectChain::append_and_select`.
    pub async fn create_area(&self, payload: &AreaCreate) -> ClientResult<Area> {
        self.http.post_data("api/areas", payload).await
    }

    /// Inline-create a service unit from within the QR dialog
    pub async fn create_service_unit(
        &self,
        payload: &ServiceUnitCreate,
    ) -> ClientResult<ServiceUnit> {
        self.http.post_data("api/units", payload).await
    }

    /// Guest "call staff" action, scoped by the ambient session
    pub async fn call_staff(
        &self,
        session: &GuestSession,
        note: Option<String>,
    ) -> ClientResult<()> {
        let payload = request_payload(session, RequestKind::CallStaff, note)?;
        self.http.post_ack("api/requests", &payload).await
    }

    /// Submit the cart as an order request; clears the cart on success
    pub async fn submit_order(
        &self,
        session: &GuestSession,
        cart: &CartStore,
    ) -> ClientResult<OrderSummary> {
        let ctx = session.context();
        let business_id = ctx
            .business_id
            .ok_or(ClientError::IncompleteSession("business"))?;
        let area_id = ctx.area_id.ok_or(ClientError::IncompleteSession("area"))?;
        let unit_id = ctx.unit_id.ok_or(ClientError::IncompleteSession("table"))?;
        let guest_name = ctx
            .guest_name
            .ok_or(ClientError::IncompleteSession("guest name"))?;

        let lines: Vec<OrderLine> = cart
            .items()
            .into_iter()
            .map(|item| OrderLine {
                product_id: item.product_id,
                name: item.name,
                unit_price: to_f64(item.unit_price),
                quantity: item.quantity,
                variant: Some(item.variant),
                options: item.options,
                note: item.note,
            })
            .collect();

        let payload = OrderCreate {
            business_id,
            area_id,
            unit_id,
            guest_name,
            lines,
        };

        let summary: OrderSummary = self.http.post_data("api/orders", &payload).await?;
        cart.clear();
        Ok(summary)
    }

    /// Staff accept/reject of a queued request. A processed request becomes
    /// an order, so both query groups are invalidated immediately.
    pub async fn process_request(
        &self,
        request_id: &str,
        status: RequestStatus,
        invalidator: &QueryInvalidator,
    ) -> ClientResult<()> {
        self.http
            .post_ack(
                &format!("api/requests/{}/process", request_id),
                &RequestProcess { status },
            )
            .await?;
        invalidator.invalidate(&["requests", "orders"]);
        Ok(())
    }

    // ========== Cascading selector wiring ==========

    /// Branch → area → table chain for the QR and request dialogs
    pub fn location_chain(&self) -> SelectChain {
        SelectChain::new(vec![
            Arc::new(BranchOptions { api: self.clone() }),
            Arc::new(AreaOptions { api: self.clone() }),
            Arc::new(UnitOptions { api: self.clone() }),
        ])
    }

    /// Category → subcategory chain for the product dialogs
    pub fn category_chain(&self) -> SelectChain {
        SelectChain::new(vec![
            Arc::new(CategoryOptions { api: self.clone() }),
            Arc::new(SubcategoryOptions { api: self.clone() }),
        ])
    }
}

fn request_payload(
    session: &GuestSession,
    kind: RequestKind,
    note: Option<String>,
) -> ClientResult<GuestRequestCreate> {
    let ctx = session.context();
    Ok(GuestRequestCreate {
        kind,
        business_id: ctx
            .business_id
            .ok_or(ClientError::IncompleteSession("business"))?,
        area_id: ctx.area_id.ok_or(ClientError::IncompleteSession("area"))?,
        unit_id: ctx.unit_id.ok_or(ClientError::IncompleteSession("table"))?,
        guest_name: ctx
            .guest_name
            .ok_or(ClientError::IncompleteSession("guest name"))?,
        note,
    })
}

struct BranchOptions {
    api: OrderingApi,
}

#[async_trait]
impl OptionSource for BranchOptions {
    async fn fetch(&self, _parent: Option<&str>) -> ClientResult<Vec<SelectOption>> {
        Ok(self.api.branches().await?.iter().map(Into::into).collect())
    }
}

struct AreaOptions {
    api: OrderingApi,
}

#[async_trait]
impl OptionSource for AreaOptions {
    async fn fetch(&self, parent: Option<&str>) -> ClientResult<Vec<SelectOption>> {
        let Some(branch_id) = parent else {
            return Ok(Vec::new());
        };
        Ok(self.api.areas(branch_id).await?.iter().map(Into::into).collect())
    }
}

struct UnitOptions {
    api: OrderingApi,
}

#[async_trait]
impl OptionSource for UnitOptions {
    async fn fetch(&self, parent: Option<&str>) -> ClientResult<Vec<SelectOption>> {
        let Some(area_id) = parent else {
            return Ok(Vec::new());
        };
        Ok(self
            .api
            .service_units(area_id)
            .await?
            .iter()
            .map(Into::into)
            .collect())
    }
}

struct CategoryOptions {
    api: OrderingApi,
}

#[async_trait]
impl OptionSource for CategoryOptions {
    async fn fetch(&self, _parent: Option<&str>) -> ClientResult<Vec<SelectOption>> {
        Ok(self.api.categories().await?.iter().map(Into::into).collect())
    }
}

struct SubcategoryOptions {
    api: OrderingApi,
}

#[async_trait]
impl OptionSource for SubcategoryOptions {
    async fn fetch(&self, parent: Option<&str>) -> ClientResult<Vec<SelectOption>> {
        let Some(category_id) = parent else {
            return Ok(Vec::new());
        };
        Ok(self
            .api
            .subcategories(category_id)
            .await?
            .iter()
            .map(Into::into)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_permission() {
        let granted = vec!["menu.edit".to_string(), "qr.manage".to_string()];
        assert!(has_permission(&granted, "qr.manage"));
        assert!(!has_permission(&granted, "orders.void"));
        assert!(!has_permission(&[], "qr.manage"));
    }

    #[test]
    fn test_or_empty_swallows_failures() {
        let ok: ClientResult<Vec<i32>> = Ok(vec![1]);
        assert_eq!(or_empty(ok, "numbers"), vec![1]);

        let err: ClientResult<Vec<i32>> = Err(ClientError::InvalidResponse("bad".into()));
        assert!(or_empty(err, "numbers").is_empty());
    }

    #[test]
    fn test_request_payload_requires_full_session() {
        let session = GuestSession::new();
        session.set_business("b1");
        session.set_area_and_table("a1", "t1");

        let err = request_payload(&session, RequestKind::CallStaff, None).unwrap_err();
        assert!(matches!(err, ClientError::IncompleteSession("guest name")));

        session.set_guest_name("Dana");
        let payload = request_payload(&session, RequestKind::CallStaff, None).unwrap();
        assert_eq!(payload.business_id, "b1");
        assert_eq!(payload.unit_id, "t1");
    }

    #[test]
    fn test_chain_shapes() {
        let api = OrderingApi::new(&ClientConfig::default()).unwrap();
        assert_eq!(api.location_chain().len(), 3);
        assert_eq!(api.category_chain().len(), 2);
    }
}
