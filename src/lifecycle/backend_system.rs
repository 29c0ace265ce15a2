use crate::backend::MemoryBackend;
use crate::clients::{CatalogClient, OrderClient, ReviewClient, UserClient};
use crate::lifecycle::AppConfig;
use crate::model::{Canteen, MenuItem};
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Runs the in-memory backend: one table task per record type.
///
/// # Example
///
/// ```ignore
/// let system = BackendSystem::new(&AppConfig::default());
/// let backend: Arc<dyn Backend> = Arc::new(system.backend.clone());
/// // ... sessions use `backend` ...
/// drop(backend);
/// system.shutdown().await?;
/// ```
pub struct BackendSystem {
    pub backend: MemoryBackend,
    handles: Vec<JoinHandle<()>>,
}

impl BackendSystem {
    /// Spawns the users, canteens, menu items, orders and reviews tables.
    pub fn new(config: &AppConfig) -> Self {
        let buffer = config.table_buffer;
        let (user_actor, user_client) = crate::user_actor::new(buffer);
        let (canteen_actor, canteen_client) = crate::catalog_actor::new_canteens(buffer);
        let (menu_actor, menu_client) = crate::catalog_actor::new_menu_items(buffer);
        let (order_actor, order_client) = crate::order_actor::new(buffer);
        let (review_actor, review_client) = crate::review_actor::new(buffer);

        let handles = vec![
            tokio::spawn(user_actor.run()),
            tokio::spawn(canteen_actor.run()),
            tokio::spawn(menu_actor.run()),
            tokio::spawn(order_actor.run()),
            tokio::spawn(review_actor.run()),
        ];

        let backend = MemoryBackend::new(
            UserClient::new(user_client),
            CatalogClient::new(canteen_client, menu_client),
            OrderClient::new(order_client),
            ReviewClient::new(review_client),
        );
        info!(tables = handles.len(), "Backend started");
        Self { backend, handles }
    }

    /// Loads the canteens and menus used by the demo.
    pub async fn seed_demo(&self) -> Result<(), crate::backend::BackendError> {
        let canteens = [
            Canteen::new("1", "Chemistry Canteen", "15 mins"),
            Canteen::new("2", "Staff Club Canteen", "20 mins"),
            Canteen::new("3", "Physics Canteen", "10 mins"),
        ];
        let items = [
            MenuItem::new("101", "1", "Chicken Biryani", 250, "Main Course"),
            MenuItem::new("102", "1", "Samosa", 40, "Snacks"),
            MenuItem::new("103", "1", "Chai", 50, "Beverages"),
            MenuItem::new("201", "2", "Club Sandwich", 220, "Main Course"),
            MenuItem::new("202", "2", "Cold Coffee", 150, "Beverages"),
            MenuItem::new("301", "3", "Aloo Paratha", 120, "Breakfast"),
            MenuItem::new("302", "3", "Lassi", 90, "Beverages"),
        ];
        for canteen in canteens {
            self.backend.add_canteen(canteen).await?;
        }
        for item in items {
            self.backend.add_menu_item(item).await?;
        }
        info!("Demo catalog seeded");
        Ok(())
    }

    /// Shuts the tables down and waits for their tasks.
    ///
    /// Every other clone of the backend (including ones held behind `Arc<dyn Backend>`) must be
    /// dropped first, or the tables keep running and this never returns.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down backend...");
        drop(self.backend);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Table task failed: {:?}", e);
                return Err(format!("Table task failed: {:?}", e));
            }
        }

        info!("Backend shutdown complete.");
        Ok(())
    }
}
