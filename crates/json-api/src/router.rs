//! App Router

use std::path::Path;

use salvo::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, Cors, CorsHandler},
    http::{
        HeaderName, HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    prelude::*,
    serve_static::StaticDir,
};
use tracing::warn;

use crate::{
    auth::{
        self,
        middleware::{LOCAL_ADMIN_HEADER, admin, authenticated},
    },
    info, products, purchases, uploads,
};

/// Routes under `/api` plus the stored image files.
pub(crate) fn app_router(uploads_dir: &Path) -> Router {
    Router::new()
        .push(
            Router::with_path("api")
                .get(info::index)
                .push(products_router())
                .push(auth_router())
                .push(
                    Router::with_path("uploads/image")
                        .hoop(admin)
                        .post(uploads::handler::handler),
                ),
        )
        .push(
            Router::with_path("uploads/{**path}")
                .get(StaticDir::new(vec![uploads_dir.to_path_buf()])),
        )
}

fn products_router() -> Router {
    Router::with_path("products")
        .get(products::index::handler)
        .push(
            Router::new()
                .hoop(admin)
                .post(products::create::handler)
                .delete(products::clear::handler),
        )
        .push(Router::with_path("stats").get(products::stats::handler))
        .push(Router::with_path("purchase").post(purchases::handler::handler))
        .push(
            Router::with_path("{id}")
                .get(products::get::handler)
                .push(
                    Router::new()
                        .hoop(admin)
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                )
                .push(
                    Router::with_path("stock")
                        .hoop(admin)
                        .patch(products::stock::handler),
                ),
        )
}

fn auth_router() -> Router {
    Router::with_path("auth")
        .push(Router::with_path("register").post(auth::register::handler))
        .push(Router::with_path("login").post(auth::login::handler))
        .push(
            Router::with_path("change-password")
                .hoop(authenticated)
                .put(auth::change_password::handler),
        )
}

/// CORS policy admitting only the configured origins.
pub(crate) fn cors(allowed_origins: &[String]) -> CorsHandler {
    let origins = allowed_origins.iter().filter_map(|origin| {
        HeaderValue::from_str(origin)
            .inspect_err(|error| warn!(%origin, %error, "ignoring invalid CORS origin"))
            .ok()
    });

    Cors::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static(LOCAL_ADMIN_HEADER),
        ]))
        .allow_credentials(true)
        .into_handler()
}
