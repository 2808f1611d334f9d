//! The resource-action contract.
//!
//! A controller is anything that can answer some subset of four actions on
//! the resources under its base path:
//!
//! ```text
//! GET    {base}/…  → show
//! PUT    {base}/…  → create
//! POST   {base}/…  → edit
//! DELETE {base}/…  → destroy
//! ```
//!
//! Each action has a default that replies `405` with a fixed body, so a
//! controller only writes the actions it supports. How the path after the
//! base is split into a [`Target`] is mount configuration
//! ([`MountOptions`](crate::MountOptions)), not part of the controller.
//!
//! Actions are synchronous and must finish in bounded time: they run on the
//! request task.

use std::sync::Arc;

use crate::method::Action;
use crate::payload::{Payload, PayloadKind};
use crate::reply::Reply;
use crate::target::Target;

/// A resource type served by the dispatcher.
///
/// ```rust
/// use otc::{Controller, Reply, StatusCode, Target};
///
/// struct Clock;
///
/// impl Controller for Clock {
///     fn name(&self) -> &str { "Clock" }
///
///     fn show(&self, _target: &Target) -> Reply {
///         Reply::text(StatusCode::OK, "noon")
///     }
/// }
/// ```
pub trait Controller: Send + Sync + 'static {
    /// Human-friendly name used in logs.
    fn name(&self) -> &str;

    /// Whether create/edit receive the raw body or form pairs.
    fn payload_kind(&self) -> PayloadKind {
        PayloadKind::Binary
    }

    fn show(&self, _target: &Target) -> Reply {
        Reply::unsupported(Action::Show)
    }

    fn create(&self, _target: &Target, _payload: Payload) -> Reply {
        Reply::unsupported(Action::Create)
    }

    fn edit(&self, _target: &Target, _payload: Payload) -> Reply {
        Reply::unsupported(Action::Edit)
    }

    fn destroy(&self, _target: &Target) -> Reply {
        Reply::unsupported(Action::Destroy)
    }
}

/// A controller shared across concurrent requests.
pub(crate) type BoxedController = Arc<dyn Controller>;

/// Runs `action` on `controller`. Show and destroy ignore the payload.
pub(crate) fn invoke(
    controller: &dyn Controller,
    action: Action,
    target: &Target,
    payload: Payload,
) -> Reply {
    match action {
        Action::Show    => controller.show(target),
        Action::Create  => controller.create(target, payload),
        Action::Edit    => controller.edit(target, payload),
        Action::Destroy => controller.destroy(target),
    }
}
