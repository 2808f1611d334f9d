//! Base-path router.
//!
//! One radix tree keyed by base path. A base path ending in `/` owns its whole
//! subtree (`/data/` answers `/data/repo/id`); any other base path matches
//! only itself. A request for a subtree's base path without its trailing
//! slash (`/data`) is redirected to it with `301`. Build it once at startup;
//! pass it to [`Server::serve`](crate::Server::serve).

use std::sync::Arc;

use matchit::Router as MatchitRouter;
use tracing::info;

use crate::controller::{BoxedController, Controller};
use crate::method::MethodMap;
use crate::target::PathShape;

/// What happens when a request body cannot be read or parsed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum BodyErrorPolicy {
    /// Reply `422` and stop.
    #[default]
    Reject,
    /// Reply `422`, still run the action with an empty payload, and append its
    /// output to the error body. The status stays `422`.
    Proceed,
}

/// Per-mount configuration.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MountOptions {
    pub shape: PathShape,
    pub methods: MethodMap,
    pub on_bad_body: BodyErrorPolicy,
}

impl MountOptions {
    pub fn new() -> Self { Self::default() }

    pub fn shape(mut self, shape: PathShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn methods(mut self, methods: MethodMap) -> Self {
        self.methods = methods;
        self
    }

    pub fn on_bad_body(mut self, policy: BodyErrorPolicy) -> Self {
        self.on_bad_body = policy;
        self
    }
}

/// A controller bound to a base path.
pub(crate) struct Mount {
    pub(crate) base_path: String,
    pub(crate) controller: BoxedController,
    pub(crate) options: MountOptions,
}

/// The application router.
///
/// Each [`Router::mount`] call returns `self` so registrations chain
/// naturally.
pub struct Router {
    tree: MatchitRouter<Arc<Mount>>,
}

impl Router {
    pub fn new() -> Self {
        Self { tree: MatchitRouter::new() }
    }

    /// Mounts `controller` under `base_path` with default options
    /// ([`PathShape::IdFirst`], [`MethodMap::Full`],
    /// [`BodyErrorPolicy::Reject`]).
    ///
    /// # Panics
    ///
    /// Panics if `base_path` is already mounted or conflicts with another
    /// mount.
    pub fn mount(self, base_path: &str, controller: Arc<dyn Controller>) -> Self {
        self.mount_with(base_path, MountOptions::default(), controller)
    }

    /// Mounts `controller` under `base_path` with explicit options.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// use otc::{DataController, MethodMap, MountOptions, PathShape, Router};
    ///
    /// let app = Router::new().mount_with(
    ///     "/data/",
    ///     MountOptions::new()
    ///         .shape(PathShape::RepositoryFirst)
    ///         .methods(MethodMap::WithoutEdit),
    ///     Arc::new(DataController::new()),
    /// );
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `base_path` is already mounted or conflicts with another
    /// mount.
    pub fn mount_with(
        mut self,
        base_path: &str,
        options: MountOptions,
        controller: Arc<dyn Controller>,
    ) -> Self {
        info!(base_path, controller = controller.name(), "controller mounted");

        let mount = Arc::new(Mount { base_path: base_path.to_owned(), controller, options });
        let route = escape(base_path);

        self.insert(&route, &mount);
        if base_path.ends_with('/') {
            self.insert(&format!("{route}{{*rest}}"), &mount);
        }
        self
    }

    fn insert(&mut self, route: &str, mount: &Arc<Mount>) {
        self.tree
            .insert(route, Arc::clone(mount))
            .unwrap_or_else(|e| panic!("invalid base path `{}`: {e}", mount.base_path));
    }

    pub(crate) fn lookup(&self, path: &str) -> Option<Arc<Mount>> {
        let matched = self.tree.at(path).ok()?;
        Some(Arc::clone(matched.value))
    }

    /// Whether `path` plus a trailing slash is the base path of a subtree
    /// mount.
    pub(crate) fn is_subtree_root(&self, path: &str) -> bool {
        if path.ends_with('/') {
            return false;
        }
        let with_slash = format!("{path}/");
        self.lookup(&with_slash).is_some_and(|mount| mount.base_path == with_slash)
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

/// Base paths are literal; braces would otherwise read as route parameters.
fn escape(base_path: &str) -> String {
    base_path.replace('{', "{{").replace('}', "}}")
}
