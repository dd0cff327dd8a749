//! Delete confirmation dialog.

use cryptfield_core::Entity;
use tracing::info;

use crate::error::ApiError;
use crate::services::EntityService;

/// How a dialog was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResult {
    Deleted,
    Dismissed,
}

/// Asks for confirmation before deleting one entity.
#[derive(Debug)]
pub struct DeleteDialog<S> {
    service: S,
}

impl<S: EntityService> DeleteDialog<S> {
    #[must_use]
    pub const fn new(service: S) -> Self {
        Self { service }
    }

    /// Delete the entity and close the dialog.
    ///
    /// # Errors
    ///
    /// Returns the delete error; the dialog stays open.
    pub async fn confirm_delete(
        &self,
        id: <S::Entity as Entity>::Id,
    ) -> Result<DialogResult, ApiError> {
        self.service.delete(id).await?;
        info!(entity = <S::Entity as Entity>::NAME, %id, "Deleted");
        Ok(DialogResult::Deleted)
    }

    #[must_use]
    pub const fn cancel(&self) -> DialogResult {
        DialogResult::Dismissed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeService, ServiceCall};
    use cryptfield_core::{CustomerAddress, CustomerAddressId};

    #[tokio::test]
    async fn test_confirm_delete() {
        let service = FakeService::<CustomerAddress>::new();
        let dialog = DeleteDialog::new(service.clone());

        let result = dialog
            .confirm_delete(CustomerAddressId::new(123))
            .await
            .expect("delete");

        assert_eq!(result, DialogResult::Deleted);
        assert_eq!(service.calls(), vec![ServiceCall::Delete(123)]);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_dialog_open() {
        let service = FakeService::<CustomerAddress>::new();
        service.fail_next();
        let dialog = DeleteDialog::new(service);

        assert!(dialog.confirm_delete(CustomerAddressId::new(123)).await.is_err());
    }

    #[test]
    fn test_cancel_dismisses() {
        let dialog = DeleteDialog::new(FakeService::<CustomerAddress>::new());
        assert_eq!(dialog.cancel(), DialogResult::Dismissed);
    }
}
