//! Demo: one student orders from a canteen while a simulated canteen moves the order along.

use canteen_orders::backend::Backend;
use canteen_orders::lifecycle::{setup_tracing, AppConfig, BackendSystem, CanteenSession};
use canteen_orders::model::{OrderStatus, Role, SignUp};
use canteen_orders::review::ReviewDraft;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = AppConfig::from_env().map_err(|e| e.to_string())?;
    info!("Starting canteen demo");

    let system = BackendSystem::new(&config);
    if config.seed_demo {
        system.seed_demo().await.map_err(|e| e.to_string())?;
    }

    let backend: Arc<dyn Backend> = Arc::new(system.backend.clone());
    let mut session = CanteenSession::new(backend, &config);

    let span = tracing::info_span!("sign_up");
    async {
        session
            .sign_up(SignUp {
                name: "John Doe".into(),
                email: "john@example.com".into(),
                department: "Computer Science".into(),
                role: Role::Student,
                password: "password123".into(),
            })
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    let canteens = session.canteens().await.map_err(|e| e.to_string())?;
    let Some(canteen) = canteens.into_iter().find(|c| c.is_open) else {
        return Err("no open canteen; set CANTEEN_SEED_DEMO=true".into());
    };
    let menu = session.menu(canteen.id.clone()).await.map_err(|e| e.to_string())?;
    info!(canteen = %canteen.name, items = menu.len(), "Browsing menu");

    for item in menu.iter().take(2) {
        session.cart_mut().add_item(item).map_err(|e| e.to_string())?;
    }
    if let Some(first) = menu.first() {
        session.cart_mut().add_item(first).map_err(|e| e.to_string())?;
    }
    info!(total = session.cart().total_price(), lines = session.cart().lines().len(), "Cart ready");

    let department = session
        .profile()
        .map(|p| p.department.clone())
        .unwrap_or_default();
    let order = session
        .checkout(&department)
        .instrument(tracing::info_span!("checkout"))
        .await
        .map_err(|e| e.to_string())?;
    info!(order = %order.id.short(), total = order.total_amount, "Order placed");

    let staff = system.backend.clone();
    let order_id = order.id;
    let kitchen = tokio::spawn(
        async move {
            for status in OrderStatus::FLOW.into_iter().skip(1) {
                tokio::time::sleep(Duration::from_millis(200)).await;
                if let Err(e) = staff.set_order_status(order_id, status).await {
                    error!(error = %e, "Status change failed");
                    return;
                }
            }
        }
        .instrument(tracing::info_span!("kitchen")),
    );

    if let Some(tracker) = session.tracker() {
        let mut updates = tracker.watch();
        loop {
            let (phase, settled) = {
                let state = updates.borrow_and_update();
                (state.phase(config.unknown_status), state.is_settled())
            };
            if let Some(phase) = phase {
                info!(title = phase.title, color = phase.color, "{}", phase.description);
            }
            if settled || updates.changed().await.is_err() {
                break;
            }
        }
    }
    kitchen.await.map_err(|e| e.to_string())?;

    if session.tracker_state().is_some_and(|s| s.is_completed()) {
        let draft = ReviewDraft::new(5, "Hot and on time");
        let review_id = session.submit_review(&draft).await.map_err(|e| e.to_string())?;
        info!(review_id = %review_id, "Review submitted");
    }

    let history = session.order_history().await.map_err(|e| e.to_string())?;
    info!(orders = history.len(), "Order history loaded");

    session.sign_out().await;
    drop(session);
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
