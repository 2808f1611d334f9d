//! HTTP method to controller action mapping.
//!
//! Methods with no mapped action are rejected at the dispatcher with
//! `405 Method Not Allowed` before they ever reach a controller.

use std::fmt;

use http::Method;

/// One of the four capabilities a [`Controller`](crate::Controller) may
/// implement.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Action {
    Show,
    Create,
    Edit,
    Destroy,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Show    => "Show",
            Self::Create  => "Create",
            Self::Edit    => "Edit",
            Self::Destroy => "Destroy",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which HTTP methods a mount answers.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MethodMap {
    /// `GET` Show, `PUT` Create, `POST` Edit, `DELETE` Destroy.
    #[default]
    Full,
    /// As [`Full`](MethodMap::Full) but `POST` is not a recognised method.
    WithoutEdit,
}

impl MethodMap {
    /// Returns the action for `method`, or `None` if the mount does not
    /// answer it.
    pub fn action(self, method: &Method) -> Option<Action> {
        match *method {
            Method::GET    => Some(Action::Show),
            Method::PUT    => Some(Action::Create),
            Method::DELETE => Some(Action::Destroy),
            Method::POST if self == Self::Full => Some(Action::Edit),
            _ => None,
        }
    }
}
