//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use quarry_app::{
    auth::{AdminUuid, MockAuthService},
    context::AppContext,
    domain::{
        collections::MockCollectionsService, gallery::MockGalleryService,
        products::MockProductsService, variants::MockVariantsService,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_ADMIN_UUID: AdminUuid = AdminUuid::from_uuid(Uuid::nil());

/// Stand-in for the auth middleware on routes under test.
#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_admin_uuid(TEST_ADMIN_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// One mock per service. Unconfigured mocks panic when called.
#[derive(Default)]
pub(crate) struct TestApp {
    pub(crate) collections: MockCollectionsService,
    pub(crate) products: MockProductsService,
    pub(crate) variants: MockVariantsService,
    pub(crate) gallery: MockGalleryService,
    pub(crate) auth: MockAuthService,
}

impl TestApp {
    pub(crate) fn state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            collections: Arc::new(self.collections),
            products: Arc::new(self.products),
            variants: Arc::new(self.variants),
            gallery: Arc::new(self.gallery),
            auth: Arc::new(self.auth),
        })
    }

    /// Serve `route` as an already authenticated admin.
    pub(crate) fn service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.state()))
                .hoop(inject_admin)
                .push(route),
        )
    }

    /// Serve `route` without any admin in the depot.
    pub(crate) fn anonymous_service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.state())).push(route))
    }
}

pub(crate) fn collections_app(collections: MockCollectionsService) -> TestApp {
    TestApp {
        collections,
        ..TestApp::default()
    }
}

pub(crate) fn products_app(products: MockProductsService) -> TestApp {
    TestApp {
        products,
        ..TestApp::default()
    }
}

pub(crate) fn variants_app(variants: MockVariantsService) -> TestApp {
    TestApp {
        variants,
        ..TestApp::default()
    }
}

pub(crate) fn gallery_app(gallery: MockGalleryService) -> TestApp {
    TestApp {
        gallery,
        ..TestApp::default()
    }
}

pub(crate) fn auth_app(auth: MockAuthService) -> TestApp {
    TestApp {
        auth,
        ..TestApp::default()
    }
}
