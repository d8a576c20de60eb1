//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, catcher::Catcher, prelude::*};
use uuid::Uuid;

use stockroom_app::{
    auth::{Credentials, Identity, MockAuthService, records::UserUuid},
    context::AppContext,
    domain::{
        products::{
            MockProductsService,
            records::{Category, ProductRecord, ProductUuid},
        },
        purchases::MockPurchasesService,
    },
};

use crate::{errors::render_json_error, extensions::*, state::State};

pub(crate) const TEST_TOKEN: &str = "test-session-token";

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) fn bearer_credentials() -> Credentials {
    Credentials {
        bypass: None,
        bearer: Some(TEST_TOKEN.to_string()),
    }
}

pub(crate) fn make_product(uuid: ProductUuid, stock: u32) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Brake Pads".to_string(),
        category: Category::BrakesAndSuspension,
        brand: Some("Stoppa".to_string()),
        description: None,
        specs: None,
        price: 4_599,
        stock,
        image: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// Stands in for the admin gate: every request is the local admin.
#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_identity(Identity::local_admin());
    ctrl.call_next(req, depot, res).await;
}

/// Stands in for the authenticated gate: every request is a regular user.
#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_identity(Identity::user(TEST_USER_UUID, false));
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_adjust_stock().never();
    products.expect_delete_product().never();
    products.expect_clear_products().never();
    products.expect_inventory_stats().never();

    products
}

pub(crate) fn strict_purchases_mock() -> MockPurchasesService {
    let mut purchases = MockPurchasesService::new();

    purchases.expect_purchase().never();

    purchases
}

pub(crate) fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_register().never();
    auth.expect_login().never();
    auth.expect_change_password().never();
    auth.expect_authenticate().never();
    auth.expect_authorize_admin().never();

    auth
}

pub(crate) fn state(
    products: MockProductsService,
    purchases: MockPurchasesService,
    auth: MockAuthService,
) -> Arc<State> {
    let app = AppContext {
        products: Arc::new(products),
        purchases: Arc::new(purchases),
        auth: Arc::new(auth),
    };

    State::shared(app, std::env::temp_dir().join("stockroom-json-test-uploads"))
}

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    state(products, strict_purchases_mock(), strict_auth_mock())
}

pub(crate) fn state_with_purchases(purchases: MockPurchasesService) -> Arc<State> {
    state(strict_products_mock(), purchases, strict_auth_mock())
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state(strict_products_mock(), strict_purchases_mock(), auth)
}

/// Wrap a router the way the server does, with JSON error bodies.
pub(crate) fn with_catcher(router: Router) -> Service {
    Service::new(router).catcher(Catcher::default().hoop(render_json_error))
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    with_catcher(
        Router::new()
            .hoop(inject(state_with_products(products)))
            .hoop(inject_admin)
            .push(route),
    )
}

pub(crate) fn purchases_service(purchases: MockPurchasesService, route: Router) -> Service {
    with_catcher(
        Router::new()
            .hoop(inject(state_with_purchases(purchases)))
            .push(route),
    )
}

pub(crate) fn auth_service(auth: MockAuthService, route: Router) -> Service {
    with_catcher(
        Router::new()
            .hoop(inject(state_with_auth(auth)))
            .hoop(inject_user)
            .push(route),
    )
}
