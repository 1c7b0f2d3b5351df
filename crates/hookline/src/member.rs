//! Plugin members and the invocation-category classifier.
//!
//! A plugin hands its hooks over as [`Member`] values: either a single
//! callable carrying a spec-reference tag, or a module/instance namespace
//! grouping several members. This replaces attribute-marker scanning from
//! reflective runtimes with an explicit member list.

use crate::callable::HookCallable;
use crate::category::InvocationCategory;
use crate::spec_ref::SpecRef;

/// The value side of a plugin member.
#[derive(Debug, Clone)]
pub enum MemberValue {
    /// A callable with an explicit invocation category.
    Callable(HookCallable),
    /// A module-like grouping of members.
    Module(Vec<Member>),
    /// An instance-like grouping of members.
    Instance(Vec<Member>),
    /// Anything else a namespace may contain (constants, data, ...).
    Opaque,
}

/// One exported member of a plugin: an optional spec-reference tag plus a
/// value.
///
/// The tag records which hook point the member implements. Tagging is
/// independent of registration: a tagged member whose registration failed
/// keeps its tag, so a later re-registration attempt is idempotent-safe.
#[derive(Debug, Clone)]
pub struct Member {
    tag: Option<SpecRef>,
    value: MemberValue,
}

impl Member {
    /// A callable tagged as the implementation of `spec_ref`.
    pub fn implementation(spec_ref: impl Into<SpecRef>, callable: HookCallable) -> Self {
        Self {
            tag: Some(spec_ref.into()),
            value: MemberValue::Callable(callable),
        }
    }

    /// A callable without a tag. Skipped by discovery.
    pub fn untagged(callable: HookCallable) -> Self {
        Self {
            tag: None,
            value: MemberValue::Callable(callable),
        }
    }

    /// A module-like namespace of members.
    pub fn module(members: impl IntoIterator<Item = Member>) -> Self {
        Self {
            tag: None,
            value: MemberValue::Module(members.into_iter().collect()),
        }
    }

    /// An instance-like namespace of members.
    pub fn instance(members: impl IntoIterator<Item = Member>) -> Self {
        Self {
            tag: None,
            value: MemberValue::Instance(members.into_iter().collect()),
        }
    }

    /// A non-callable, non-namespace value.
    pub fn opaque() -> Self {
        Self {
            tag: None,
            value: MemberValue::Opaque,
        }
    }

    /// Returns the spec-reference tag, if any.
    pub fn tag(&self) -> Option<&SpecRef> {
        self.tag.as_ref()
    }

    /// Returns the member's value.
    pub fn value(&self) -> &MemberValue {
        &self.value
    }

    /// Returns the callable if this member is one.
    pub fn callable(&self) -> Option<&HookCallable> {
        match &self.value {
            MemberValue::Callable(callable) => Some(callable),
            _ => None,
        }
    }
}

/// Determines a member's invocation category.
///
/// Total and infallible: callables report the category stated at
/// construction, namespaces report `Module` or `Instance`, and everything
/// else is `Other`. Method-bound callables are closures capturing their
/// receiver and are indistinguishable from free functions here, which is
/// exactly what dispatch requires.
pub fn classify(member: &Member) -> InvocationCategory {
    match member.value() {
        MemberValue::Callable(callable) => callable.category(),
        MemberValue::Module(_) => InvocationCategory::Module,
        MemberValue::Instance(_) => InvocationCategory::Instance,
        MemberValue::Opaque => InvocationCategory::Other,
    }
}
