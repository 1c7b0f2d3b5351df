//! Registration API — how plugins attach implementations to hook points.

use tracing::{debug, info};

use crate::callable::HookCallable;
use crate::error::{HookError, HookResult};
use crate::member::{Member, MemberValue, classify};
use crate::registry::HookRegistry;
use crate::spec_ref::SpecRef;

/// Tags `callable` as the implementation of `spec_ref` and registers it
/// immediately.
///
/// Returns the tagged member so the caller can keep it around (e.g. inside
/// a provider's member list). When eager registration must survive a
/// conflict, build the member with [`Member::implementation`] first and
/// call [`register`] separately — the tag is attached independently of
/// registration, so retrying later stays idempotent.
pub fn register_implementation(
    registry: &HookRegistry,
    spec_ref: impl Into<SpecRef>,
    callable: HookCallable,
) -> HookResult<Member> {
    let spec_ref = spec_ref.into();
    let member = Member::implementation(spec_ref.clone(), callable.clone());
    registry.register_impl(spec_ref, callable)?;
    Ok(member)
}

/// Registers a member with the registry.
///
/// Polymorphic over the two supported target shapes:
///
/// - a module or instance namespace: every member that is both dispatchable
///   and tagged is registered; untagged or non-dispatchable members are
///   skipped silently;
/// - a single tagged, dispatchable callable: registered directly.
///
/// Anything else fails with [`HookError::Usage`] before touching the
/// registry. Returns the number of implementations registered.
pub fn register(registry: &HookRegistry, target: &Member) -> HookResult<usize> {
    match target.value() {
        MemberValue::Module(members) | MemberValue::Instance(members) => {
            let mut registered = 0;
            for member in members {
                if !classify(member).is_dispatchable() {
                    continue;
                }
                let (Some(spec_ref), Some(callable)) = (member.tag(), member.callable()) else {
                    debug!("skipping untagged member during discovery");
                    continue;
                };
                registry.register_impl(spec_ref.clone(), callable.clone())?;
                registered += 1;
            }
            Ok(registered)
        }
        MemberValue::Callable(callable) => match target.tag() {
            Some(spec_ref) => {
                registry.register_impl(spec_ref.clone(), callable.clone())?;
                Ok(1)
            }
            None => Err(HookError::Usage {
                found: classify(target),
            }),
        },
        MemberValue::Opaque => Err(HookError::Usage {
            found: classify(target),
        }),
    }
}

/// A plugin's entry point: an explicit list of the hook implementations it
/// provides, in place of namespace scanning.
pub trait HookProvider {
    /// A name for diagnostics, typically the plugin's crate or module name.
    fn name(&self) -> &str;

    /// The members this plugin exports.
    fn hooks(&self) -> Vec<Member>;
}

/// Registers every tagged, dispatchable member a provider exports.
pub fn register_provider(
    registry: &HookRegistry,
    provider: &dyn HookProvider,
) -> HookResult<usize> {
    let registered = register(registry, &Member::module(provider.hooks()))?;
    info!(
        provider = provider.name(),
        registered, "plugin hooks registered"
    );
    Ok(registered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::InvocationCategory;

    fn tagged(name: &str) -> Member {
        Member::implementation(name, HookCallable::plain(|x: i32| x))
    }

    #[test]
    fn test_discovery_registers_only_tagged_dispatchables() {
        let registry = HookRegistry::new();
        let namespace = Member::module([
            tagged("p::a"),
            tagged("p::b"),
            tagged("p::c"),
            Member::untagged(HookCallable::plain(|x: i32| x)),
            Member::opaque(),
        ]);

        let registered = register(&registry, &namespace).expect("discovery");
        assert_eq!(registered, 3);
        assert!(registry.lookup(&"p::a".into()).is_some());
        assert!(registry.lookup(&"p::b".into()).is_some());
        assert!(registry.lookup(&"p::c".into()).is_some());
    }

    #[test]
    fn test_instance_namespace_supported() {
        let registry = HookRegistry::new();
        let registered =
            register(&registry, &Member::instance([tagged("p::a")])).expect("discovery");
        assert_eq!(registered, 1);
    }

    #[test]
    fn test_direct_tagged_callable() {
        let registry = HookRegistry::new();
        let registered = register(&registry, &tagged("p::single")).expect("direct registration");
        assert_eq!(registered, 1);
        assert!(registry.lookup(&"p::single".into()).is_some());
    }

    #[test]
    fn test_unsupported_targets_fail_with_usage() {
        let registry = HookRegistry::new();

        let err = register(&registry, &Member::opaque()).expect_err("opaque");
        assert!(matches!(
            err,
            HookError::Usage {
                found: InvocationCategory::Other
            }
        ));

        let untagged = Member::untagged(HookCallable::plain(|x: i32| x));
        let err = register(&registry, &untagged).expect_err("untagged callable");
        assert!(matches!(err, HookError::Usage { .. }));
        assert!(registry.lookup(&"p::single".into()).is_none());
    }

    #[test]
    fn test_register_implementation_tags_and_binds() {
        let registry = HookRegistry::new();
        let member =
            register_implementation(&registry, "p::x", HookCallable::plain(|x: u8| x ^ 0xff))
                .expect("register");
        assert_eq!(member.tag().map(SpecRef::as_str), Some("p::x"));
        assert!(registry.lookup(&"p::x".into()).is_some());
    }

    #[test]
    fn test_provider_registration() {
        struct CipherPlugin;

        impl HookProvider for CipherPlugin {
            fn name(&self) -> &str {
                "cipher-plugin"
            }

            fn hooks(&self) -> Vec<Member> {
                vec![tagged("p::encode"), Member::opaque()]
            }
        }

        let registry = HookRegistry::new();
        let registered = register_provider(&registry, &CipherPlugin).expect("provider");
        assert_eq!(registered, 1);
    }
}
