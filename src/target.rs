//! Request path decomposition.
//!
//! Every controller is mounted under a base path. Whatever follows the base
//! path is split once on `/` and handed to the controller as a [`Target`]:
//!
//! ```text
//! IdFirst          /base/{resource_id}/{extra...}
//! RepositoryFirst  /base/{repository}/{resource_id...}
//! ```
//!
//! Ids are opaque. Nothing here validates them and nothing here can fail.

/// How the segments following a base path are interpreted.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PathShape {
    /// `{base}/{resource_id}/{extra...}`, no repository.
    #[default]
    IdFirst,
    /// `{base}/{repository}/{resource_id...}`, no extra path.
    RepositoryFirst,
}

/// The resource addressed by a request, relative to its controller's base
/// path. Missing parts are empty strings.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Target {
    pub(crate) repository: String,
    pub(crate) resource_id: String,
    pub(crate) extra: String,
    pub(crate) remainder: String,
}

impl Target {
    /// Addresses `resource_id` inside `repository`.
    pub fn new(repository: impl Into<String>, resource_id: impl Into<String>) -> Self {
        let repository = repository.into();
        let resource_id = resource_id.into();
        let remainder = match (repository.is_empty(), resource_id.is_empty()) {
            (true, _) => resource_id.clone(),
            (false, true) => repository.clone(),
            (false, false) => format!("{repository}/{resource_id}"),
        };
        Self { repository, resource_id, extra: String::new(), remainder }
    }

    /// Splits `path` after the first occurrence of `base_path`.
    ///
    /// If `base_path` does not occur, the whole path is treated as the
    /// remainder.
    pub fn parse(path: &str, base_path: &str, shape: PathShape) -> Self {
        let rest = path.split_once(base_path).map_or(path, |(_, rest)| rest);
        let (first, second) = rest.split_once('/').unwrap_or((rest, ""));

        let (repository, resource_id, extra) = match shape {
            PathShape::IdFirst => ("", first, second),
            PathShape::RepositoryFirst => (first, second, ""),
        };

        Self {
            repository: repository.to_owned(),
            resource_id: resource_id.to_owned(),
            extra: extra.to_owned(),
            remainder: rest.to_owned(),
        }
    }

    pub fn repository(&self) -> &str { &self.repository }
    pub fn resource_id(&self) -> &str { &self.resource_id }
    pub fn extra(&self) -> &str { &self.extra }

    /// Everything after the base path, unsplit.
    pub fn remainder(&self) -> &str { &self.remainder }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_first_splits_on_the_first_slash_only() {
        let t = Target::parse("/base_path/abc/x/y", "/base_path/", PathShape::IdFirst);
        assert_eq!(t.repository(), "");
        assert_eq!(t.resource_id(), "abc");
        assert_eq!(t.extra(), "x/y");
        assert_eq!(t.remainder(), "abc/x/y");
    }

    #[test]
    fn repository_first_keeps_nested_ids_whole() {
        let t = Target::parse(
            "/data/repo/super_weird/fancy/id",
            "/data/",
            PathShape::RepositoryFirst,
        );
        assert_eq!(t.repository(), "repo");
        assert_eq!(t.resource_id(), "super_weird/fancy/id");
        assert_eq!(t.extra(), "");
    }

    #[test]
    fn empty_remainder_yields_empty_parts() {
        for shape in [PathShape::IdFirst, PathShape::RepositoryFirst] {
            let t = Target::parse("/base_path/", "/base_path/", shape);
            assert_eq!(t, Target::default());
        }
    }

    #[test]
    fn repository_without_id() {
        let t = Target::parse("/data/photos", "/data/", PathShape::RepositoryFirst);
        assert_eq!(t.repository(), "photos");
        assert_eq!(t.resource_id(), "");
    }

    #[test]
    fn root_base_path() {
        let t = Target::parse("/repo/id", "/", PathShape::RepositoryFirst);
        assert_eq!(t.repository(), "repo");
        assert_eq!(t.resource_id(), "id");
    }

    #[test]
    fn unmatched_base_path_uses_the_whole_path() {
        let t = Target::parse("elsewhere/id", "/data/", PathShape::IdFirst);
        assert_eq!(t.resource_id(), "elsewhere");
        assert_eq!(t.extra(), "id");
    }

    #[test]
    fn new_builds_a_repository_target() {
        let t = Target::new("repo", "id");
        assert_eq!(t.repository(), "repo");
        assert_eq!(t.resource_id(), "id");
        assert_eq!(t.remainder(), "repo/id");
    }

    #[test]
    fn new_without_repository_matches_id_first_parse() {
        let built = Target::new("", "id");
        assert_eq!(built.remainder(), "id");
        assert_eq!(built, Target::parse("/base/id", "/base/", PathShape::IdFirst));
        assert_eq!(Target::new("", ""), Target::default());
    }
}
