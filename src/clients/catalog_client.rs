use crate::catalog_actor::CatalogError;
use crate::clients::row_client::RowClient;
use crate::framework::{StoreError, TableClient};
use crate::model::{Canteen, CanteenId, MenuItem};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client over the two catalog tables.
#[derive(Clone)]
pub struct CatalogClient {
    canteens: TableClient<Canteen>,
    menu_items: TableClient<MenuItem>,
}

impl CatalogClient {
    pub fn new(canteens: TableClient<Canteen>, menu_items: TableClient<MenuItem>) -> Self {
        Self {
            canteens,
            menu_items,
        }
    }

    #[instrument(skip(self, canteen), fields(canteen_id = %canteen.id))]
    pub async fn add_canteen(&self, canteen: Canteen) -> Result<CanteenId, CatalogError> {
        self.canteens.insert(canteen).await.map_err(Self::map_error)
    }

    #[instrument(skip(self, item), fields(item = %item.name))]
    pub async fn add_menu_item(&self, item: MenuItem) -> Result<(), CatalogError> {
        if self.get(item.canteen_id.clone()).await?.is_none() {
            return Err(CatalogError::CanteenNotFound(item.canteen_id.to_string()));
        }
        self.menu_items.insert(item).await.map_err(Self::map_error)?;
        Ok(())
    }

    /// All canteens, sorted by name.
    #[instrument(skip(self))]
    pub async fn list_canteens(&self) -> Result<Vec<Canteen>, CatalogError> {
        let mut canteens = self.canteens.select(|_| true).await.map_err(Self::map_error)?;
        canteens.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(count = canteens.len(), "Listed canteens");
        Ok(canteens)
    }

    /// Menu of one canteen, grouped by category then name.
    #[instrument(skip(self))]
    pub async fn menu_for(&self, canteen_id: CanteenId) -> Result<Vec<MenuItem>, CatalogError> {
        let mut items = self
            .menu_items
            .select(move |m: &MenuItem| m.canteen_id == canteen_id)
            .await
            .map_err(Self::map_error)?;
        items.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.name.cmp(&b.name)));
        Ok(items)
    }
}

#[async_trait]
impl RowClient<Canteen> for CatalogClient {
    type Error = CatalogError;

    fn inner(&self) -> &TableClient<Canteen> {
        &self.canteens
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e.into_row_error::<CatalogError>() {
            Ok(row) => row,
            Err(other) => CatalogError::TableCommunicationError(other.to_string()),
        }
    }
}
