use std::sync::Arc;

use tracing::{error, info};

use super::form::ProductForm;
use super::view::{CatalogView, PendingAction};
use crate::store::ProductStore;

/// Drives the list view against a data layer.
///
/// There is no local cache: after every create, save, cancel or delete the
/// whole list is fetched again and rendered from the server's answer.
/// Failures are logged and queued as alerts for the caller to show; none are
/// retried.
pub struct CatalogApp {
    store: Arc<dyn ProductStore>,
    view: CatalogView,
    form: ProductForm,
    alerts: Vec<String>,
}

impl CatalogApp {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            store,
            view: CatalogView::new(),
            form: ProductForm::default(),
            alerts: Vec::new(),
        }
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut CatalogView {
        &mut self.view
    }

    /// The add-product form.
    pub fn form_mut(&mut self) -> &mut ProductForm {
        &mut self.form
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn render(&self) -> String {
        self.view.render()
    }

    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push(message.into());
    }

    pub async fn refresh(&mut self) {
        match self.store.list().await {
            Ok(products) => self.view.show(products),
            Err(e) => {
                error!(error = %e, "Failed to fetch products");
                self.view.show_load_failure();
            }
        }
    }

    /// Submits the add-product form. Invalid input never reaches the network.
    pub async fn submit_new(&mut self) -> bool {
        let body = match self.form.validate() {
            Ok(body) => body,
            Err(e) => {
                self.alert(e.to_string());
                return false;
            }
        };

        match self.store.create(body).await {
            Ok(product) => {
                info!(id = product.id, "Product added");
                self.form.reset();
                self.refresh().await;
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to add product");
                self.alert("Failed to add product, see the log for details.");
                false
            }
        }
    }

    pub fn edit(&mut self, id: i64) -> bool {
        self.view.begin_edit(id)
    }

    /// Throws away the draft, and every other unsaved draft with it.
    pub async fn cancel(&mut self, _id: i64) {
        self.refresh().await;
    }

    pub async fn save(&mut self, id: i64) -> bool {
        let body = match self.view.draft_mut(id).map(|draft| draft.validate()) {
            Some(Ok(body)) => body,
            Some(Err(e)) => {
                self.alert(e.to_string());
                return false;
            }
            None => return false,
        };
        let Some(previous) = self.view.mark_pending(id, PendingAction::Save) else {
            return false;
        };

        match self.store.update(id, body).await {
            Ok(Some(_)) => {
                info!(id, "Product updated");
                self.refresh().await;
                true
            }
            Ok(None) => {
                self.alert("This product no longer exists.");
                self.refresh().await;
                false
            }
            Err(e) => {
                error!(id, error = %e, "Failed to update product");
                self.alert("Failed to update product!");
                self.view.restore(id, previous);
                false
            }
        }
    }

    /// Deletes after the user confirmed; an unconfirmed click does nothing.
    pub async fn delete(&mut self, id: i64, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }
        let Some(previous) = self.view.mark_pending(id, PendingAction::Delete) else {
            return false;
        };

        match self.store.delete(id).await {
            Ok(true) => {
                info!(id, "Product deleted");
                self.refresh().await;
                true
            }
            Ok(false) => {
                self.alert("This product no longer exists.");
                self.refresh().await;
                false
            }
            Err(e) => {
                error!(id, error = %e, "Failed to delete product");
                self.alert("Failed to delete product!");
                self.view.restore(id, previous);
                false
            }
        }
    }
}
