//! API Router

use salvo::Router;

use crate::{auth, collections, gallery, products, variants};

/// Public catalog reads plus bearer-guarded admin writes, all under `/api`.
pub(crate) fn api_router() -> Router {
    Router::with_path("api")
        .push(Router::with_path("auth/login").post(auth::login::handler))
        .push(public_router())
        .push(admin_router())
}

fn public_router() -> Router {
    Router::new()
        .push(
            Router::with_path("collections")
                .get(collections::index::handler)
                .push(Router::with_path("{id}").get(collections::get::handler)),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{id}").get(products::get::handler)),
        )
        .push(
            Router::with_path("product-variants")
                .get(variants::index::handler)
                .push(Router::with_path("product/{id}").get(variants::by_product::handler))
                .push(Router::with_path("{id}").get(variants::get::handler)),
        )
        .push(
            Router::with_path("gallery")
                .get(gallery::index::handler)
                .push(Router::with_path("{id}").get(gallery::get::handler)),
        )
}

fn admin_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(Router::with_path("auth/me").get(auth::me::handler))
        .push(
            Router::with_path("collections")
                .post(collections::create::handler)
                .push(
                    Router::with_path("{id}")
                        .put(collections::update::handler)
                        .delete(collections::delete::handler),
                ),
        )
        .push(
            Router::with_path("products")
                .post(products::create::handler)
                .push(
                    Router::with_path("{id}")
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("product-variants")
                .post(variants::create::handler)
                .push(
                    Router::with_path("{id}")
                        .put(variants::update::handler)
                        .delete(variants::delete::handler),
                ),
        )
        .push(
            Router::with_path("gallery")
                .post(gallery::create::handler)
                .push(
                    Router::with_path("{id}")
                        .put(gallery::update::handler)
                        .delete(gallery::delete::handler),
                ),
        )
}
