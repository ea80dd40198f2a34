//! Role gates, mounted after the auth middleware.

use salvo::prelude::*;

use tantika_app::auth::Actor;

use crate::{envelope::ApiError, extensions::*};

#[salvo::handler]
pub(crate) async fn admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    gate(req, depot, res, ctrl, Actor::is_admin, "Admin access required").await;
}

/// Approved and pending artisans; pending ones can still manage their profile.
#[salvo::handler]
pub(crate) async fn artisan(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    gate(
        req,
        depot,
        res,
        ctrl,
        |actor| actor.acting_artisan().is_some(),
        "Artisan access required",
    )
    .await;
}

async fn gate(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
    allowed: impl Fn(&Actor) -> bool,
    denial: &str,
) {
    match depot.actor_or_401() {
        Ok(actor) if allowed(&actor) => {
            ctrl.call_next(req, depot, res).await;
        }
        Ok(_) => {
            res.render(ApiError::forbidden(denial));
            ctrl.skip_rest();
        }
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();
        }
    };
}
