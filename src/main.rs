use anyhow::Context;
use chrono::{Local, Utc};
use tracing::{error, info, Instrument};

use bozorfood::app_system::{cleanup_delivered_orders, setup_tracing, Config, Storefront};
use bozorfood::session::{AdminGuard, PersistedState, SessionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = Config::from_env().context("loading configuration")?;
    info!("Starting Bozorfood storefront");

    let storefront = Storefront::start(&config).await?;

    // Client state from the previous run
    let store = SessionStore::new(&config.session_dir);
    let PersistedState { mut customer, mut cart, admin } = store.load_state().await?;
    let mut guard = AdminGuard::new(config.admin.clone(), config.admin_session_ttl).with_session(admin);

    // Customer flow: register, fill the cart, place an order
    let span = tracing::info_span!("customer_flow");
    let order = async {
        if !customer.is_registered() {
            let user = storefront.register(&mut customer, "+998 90 123 45 67", Some("Aziz")).await?;
            info!(user_id = %user.id, "Customer registered");
        } else if let Some(user) = customer.user() {
            info!(user_id = %user.id, name = ?user.name, "Welcome back");
        }

        let foods = storefront.menu_client.list_foods().await?;
        for food in foods.iter().take(2) {
            cart.add_item(food);
        }
        if let Some(first) = foods.first() {
            cart.update_quantity(&first.id, 2);
        }
        info!(items = cart.total_items(), total_price = cart.total_price(), "Cart ready");

        let order = storefront
            .checkout(&customer, &mut cart, "Chilonzor 5, 12-uy", Some("Eshik oldida qo'ng'iroq qiling"))
            .await?;
        anyhow::Ok(order)
    }
    .instrument(span)
    .await;

    match &order {
        Ok(order) => info!(order_id = %order.id, total_price = order.total_price, "Order placed"),
        Err(e) => error!(error = %e, "Customer flow failed"),
    }

    // Administrator flow: log in, move the order along, read statistics
    let span = tracing::info_span!("admin_flow");
    async {
        let credentials = &config.admin;
        if !guard.is_authenticated(Utc::now())
            && !guard.login(credentials.username(), credentials.password(), Utc::now())
        {
            error!("Administrator login failed");
            return anyhow::Ok(());
        }

        if let Ok(order) = &order {
            while let Some(status) = storefront.admin_advance(&guard, Utc::now(), &order.id).await? {
                info!(order_id = %order.id, status = %status, label = status.label(), "Order advanced");
            }
        }

        let stats = storefront.admin_stats(&guard, &Local::now()).await?;
        info!(
            total_orders = stats.total_orders,
            today_orders = stats.today_orders,
            total_revenue = stats.total_revenue,
            monthly_revenue = stats.monthly_revenue,
            top_food = ?stats.top_food,
            "Statistics"
        );

        let deleted = cleanup_delivered_orders(&storefront.order_client).await?;
        info!(deleted, "Cleanup pass finished");
        anyhow::Ok(())
    }
    .instrument(span)
    .await?;

    store
        .save_state(&PersistedState { customer, cart, admin: guard.session().clone() })
        .await?;

    storefront.shutdown().await.map_err(anyhow::Error::msg)?;
    info!("Storefront stopped");
    Ok(())
}
