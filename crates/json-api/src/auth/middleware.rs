//! Authorization gate hoops.
//!
//! [`authenticated`] admits any caller the gate can identify and [`admin`]
//! additionally requires admin rights. Either one attaches the resolved
//! [`Identity`](stockroom_app::auth::Identity) to the depot before the
//! guarded handler runs; on denial the handler is never reached.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::debug;

use stockroom_app::auth::Credentials;

use crate::{auth::gate_status_error, extensions::*, state::State};

/// Header carrying the local-admin bypass secret.
pub(crate) const LOCAL_ADMIN_HEADER: &str = "x-local-admin";

#[derive(Debug, Clone, Copy)]
enum Access {
    Authenticated,
    Admin,
}

/// Require an identified caller.
#[salvo::handler]
pub(crate) async fn authenticated(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    gate(Access::Authenticated, req, depot, res, ctrl).await;
}

/// Require an identified caller with admin rights.
#[salvo::handler]
pub(crate) async fn admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    gate(Access::Admin, req, depot, res, ctrl).await;
}

async fn gate(
    access: Access,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let credentials = credentials(req);

    let decision = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => match access {
            Access::Authenticated => state.app.auth.authenticate(&credentials),
            Access::Admin => state.app.auth.authorize_admin(&credentials),
        },
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    match decision {
        Ok(identity) => {
            depot.insert_identity(identity);

            ctrl.call_next(req, depot, res).await;
        }
        Err(error) => {
            debug!(?access, %error, "request denied by authorization gate");

            res.render(gate_status_error(error));
            ctrl.skip_rest();
        }
    }
}

/// Lift the bypass header and bearer token off a request.
pub(crate) fn credentials(req: &Request) -> Credentials {
    let bypass = req
        .headers()
        .get(LOCAL_ADMIN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    Credentials {
        bypass,
        bearer: extract_bearer_token(req).map(str::to_owned),
    }
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
