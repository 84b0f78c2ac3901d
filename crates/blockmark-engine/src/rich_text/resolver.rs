use std::collections::HashMap;

use thiserror::Error;

use crate::model::MentionKind;

/// Failure reported by a [`MentionResolver`]. The codec never propagates it;
/// it logs and falls back to the raw identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("mention resolver is unavailable")]
    Unavailable,

    #[error("mention lookup failed: {0}")]
    Backend(String),
}

/// Looks up display names for page, database and user mentions.
pub trait MentionResolver: Send + Sync {
    /// Display name for `id`, or `None` when the id is unknown.
    fn resolve(&self, kind: MentionKind, id: &str) -> Result<Option<String>, ResolveError>;

    /// Id for a display name. Resolvers that cannot search by name return `None`.
    fn resolve_name(
        &self,
        _kind: MentionKind,
        _name: &str,
    ) -> Result<Option<String>, ResolveError> {
        Ok(None)
    }
}

/// Resolver that knows no names. Mentions are written with their raw ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopResolver;

impl MentionResolver for NoopResolver {
    fn resolve(&self, _kind: MentionKind, _id: &str) -> Result<Option<String>, ResolveError> {
        Ok(None)
    }
}

/// In-memory resolver backed by a fixed id/name table.
#[derive(Debug, Default, Clone)]
pub struct StaticResolver {
    names: HashMap<(MentionKind, String), String>,
    ids: HashMap<(MentionKind, String), String>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: MentionKind, id: impl Into<String>, name: impl Into<String>) {
        let id = id.into();
        let name = name.into();
        self.ids.insert((kind, name.clone()), id.clone());
        self.names.insert((kind, id), name);
    }

    pub fn with(
        mut self,
        kind: MentionKind,
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        self.insert(kind, id, name);
        self
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl MentionResolver for StaticResolver {
    fn resolve(&self, kind: MentionKind, id: &str) -> Result<Option<String>, ResolveError> {
        Ok(self.names.get(&(kind, id.to_string())).cloned())
    }

    fn resolve_name(&self, kind: MentionKind, name: &str) -> Result<Option<String>, ResolveError> {
        Ok(self.ids.get(&(kind, name.to_string())).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn static_resolver_maps_both_ways() {
        let resolver = StaticResolver::new().with(MentionKind::Page, "p1", "Roadmap");
        assert_eq!(
            resolver.resolve(MentionKind::Page, "p1"),
            Ok(Some("Roadmap".to_string()))
        );
        assert_eq!(
            resolver.resolve_name(MentionKind::Page, "Roadmap"),
            Ok(Some("p1".to_string()))
        );
        assert_eq!(resolver.resolve(MentionKind::User, "p1"), Ok(None));
        assert_eq!(resolver.len(), 1);
    }

    #[test]
    fn noop_resolver_knows_nothing() {
        assert_eq!(NoopResolver.resolve(MentionKind::User, "u1"), Ok(None));
        assert_eq!(NoopResolver.resolve_name(MentionKind::User, "Ada"), Ok(None));
    }
}
