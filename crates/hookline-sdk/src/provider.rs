//! Ready-made provider for manifest-style plugins.

use hookline::{HookCallable, HookProvider, Member, SpecRef};

/// A [`HookProvider`] built from a fixed member list, for plugins that do
/// not need a type of their own.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    name: String,
    members: Vec<Member>,
}

impl StaticProvider {
    /// Creates an empty provider with a diagnostic name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Adds a tagged hook implementation.
    pub fn with_hook(mut self, spec_ref: impl Into<SpecRef>, callable: HookCallable) -> Self {
        self.members.push(Member::implementation(spec_ref, callable));
        self
    }

    /// Adds an arbitrary member, e.g. an untagged helper the host may
    /// inspect but discovery will skip.
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }
}

impl HookProvider for StaticProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn hooks(&self) -> Vec<Member> {
        self.members.clone()
    }
}

#[cfg(test)]
mod tests {
    use hookline::{HookRegistry, register_provider};

    use super::*;

    #[test]
    fn test_static_provider_registers_hooks() {
        let registry = HookRegistry::new();
        let provider = StaticProvider::new("test-plugin")
            .with_hook("app::hooks::double", HookCallable::plain(|x: i64| x * 2))
            .with_member(Member::opaque());

        let registered = register_provider(&registry, &provider).expect("register");
        assert_eq!(registered, 1);
        assert!(registry.lookup(&"app::hooks::double".into()).is_some());
    }
}
