mod account;
mod categories;
mod health;
mod messages;
mod order_items;
mod orders;
mod products;
mod reviews;
mod user_categories;
mod users;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};

use crate::{
    AppState,
    middleware::{auth_middleware, buyer_middleware, seller_middleware},
};

pub fn create_router(state: &AppState) -> Router<AppState> {
    let api = Router::new()
        .nest("/account", account_routes(state))
        .nest("/user", user_routes(state))
        .nest("/category", category_routes(state))
        .nest("/product", product_routes(state))
        .nest("/orderitem", order_item_routes(state))
        .nest("/order", order_routes(state))
        .nest("/usercategory", user_category_routes(state))
        .nest("/review", review_routes(state))
        .nest("/message", message_routes(state));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .nest("/api", api)
}

fn account_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/register", post(account::register_user))
        .route("/login", post(account::login_user));

    let authenticated = Router::new()
        .route("/logout", post(account::logout_user))
        .route("/me", get(account::get_me).put(account::update_me))
        .route("/change-password", post(account::change_password))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    public.merge(authenticated)
}

fn user_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route_layer(from_fn_with_state(state.clone(), auth_middleware))
}

fn category_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(categories::get_categories))
        .route("/{id}", get(categories::get_category))
        .route("/parent/{parent_id}", get(categories::get_subcategories));

    let seller = Router::new()
        .route("/", post(categories::create_category))
        .route("/seller", get(categories::get_seller_categories))
        .route(
            "/{id}",
            put(categories::update_category).delete(categories::delete_category),
        )
        .route_layer(from_fn_with_state(state.clone(), seller_middleware));

    public.merge(seller)
}

fn product_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(products::get_products))
        .route("/{id}", get(products::get_product));

    let seller = Router::new()
        .route("/", post(products::create_product))
        .route("/mine", get(products::get_my_products))
        .route(
            "/{id}",
            put(products::update_product).delete(products::delete_product),
        )
        .route_layer(from_fn_with_state(state.clone(), seller_middleware));

    public.merge(seller)
}

fn order_item_routes(state: &AppState) -> Router<AppState> {
    let buyer = Router::new()
        .route(
            "/cart",
            get(order_items::get_cart).post(order_items::add_to_cart),
        )
        .route("/cart/{id}", delete(order_items::remove_from_cart))
        .route_layer(from_fn_with_state(state.clone(), buyer_middleware));

    let seller = Router::new()
        .route("/{id}/status", put(order_items::update_item_status))
        .route_layer(from_fn_with_state(state.clone(), seller_middleware));

    buyer.merge(seller)
}

fn order_routes(state: &AppState) -> Router<AppState> {
    let buyer = Router::new()
        .route("/", post(orders::checkout))
        .route("/my", get(orders::get_my_orders))
        .route("/{id}", get(orders::get_order))
        .route_layer(from_fn_with_state(state.clone(), buyer_middleware));

    let seller = Router::new()
        .route("/seller", get(orders::get_seller_orders))
        .route_layer(from_fn_with_state(state.clone(), seller_middleware));

    buyer.merge(seller)
}

fn user_category_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(user_categories::get_links))
        .route(
            "/{user_id}/{category_id}",
            get(user_categories::get_link),
        );

    let seller = Router::new()
        .route("/", post(user_categories::create_link))
        .route("/my", get(user_categories::get_my_links))
        .route(
            "/{user_id}/{category_id}",
            put(user_categories::update_link).delete(user_categories::delete_link),
        )
        .route_layer(from_fn_with_state(state.clone(), seller_middleware));

    public.merge(seller)
}

fn review_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(reviews::get_reviews))
        .route("/product/{product_id}", get(reviews::get_product_reviews));

    let buyer = Router::new()
        .route("/", post(reviews::create_review))
        .route("/can-review/{product_id}", get(reviews::can_review))
        .route_layer(from_fn_with_state(state.clone(), buyer_middleware));

    let seller = Router::new()
        .route("/seller", get(reviews::get_seller_reviews))
        .route("/{id}/reply", put(reviews::reply_to_review))
        .route_layer(from_fn_with_state(state.clone(), seller_middleware));

    public.merge(buyer).merge(seller)
}

fn message_routes(state: &AppState) -> Router<AppState> {
    let authenticated = Router::new()
        .route("/", post(messages::send_message))
        .route("/with/{user_id}", get(messages::get_conversation))
        .route("/chat", get(messages::get_chat))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    let seller = Router::new()
        .route("/threads", get(messages::get_seller_threads))
        .route_layer(from_fn_with_state(state.clone(), seller_middleware));

    authenticated.merge(seller)
}
