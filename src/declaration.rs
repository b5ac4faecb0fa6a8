use crate::prelude::graphql::*;
use std::sync::Arc;

/// A reusable, named type declaration.
///
/// Resolving one of these through [`Schema::resolve`] converts it into the engine's
/// representation once, and registers it under [`NamedTypeDecl::type_name`] so it can later be
/// found with [`Schema::get_type`].
pub trait NamedTypeDecl<E: Engine>: Send + Sync {
    /// Stable name under which this declaration is registered.
    fn type_name(&self) -> &str;

    /// Build the engine's representation of this declaration.
    ///
    /// May re-enter [`Schema::resolve`] for nested field or argument declarations; each nested
    /// resolution goes through the same memoized path.
    fn internal_type(&self, schema: &Schema<E>) -> Result<E::InternalType, BoxError>;
}

/// A one-off type declaration: convertible, but never registered by name.
pub trait InlineTypeDecl<E: Engine>: Send + Sync {
    /// Build the engine's representation of this declaration.
    fn internal_type(&self, schema: &Schema<E>) -> Result<E::InternalType, BoxError>;
}

/// A reference to a type as the caller declares it.
pub enum TypeRef<E: Engine> {
    /// A named declaration, registered on first resolution.
    Named(Arc<dyn NamedTypeDecl<E>>),
    /// A one-off declaration, converted but never registered.
    Inline(Arc<dyn InlineTypeDecl<E>>),
    /// A value already in the engine's representation, passed through untouched.
    Resolved(E::InternalType),
}

impl<E: Engine> TypeRef<E> {
    pub fn named(decl: impl NamedTypeDecl<E> + 'static) -> Self {
        TypeRef::Named(Arc::new(decl))
    }

    pub fn named_arc(decl: Arc<dyn NamedTypeDecl<E>>) -> Self {
        TypeRef::Named(decl)
    }

    pub fn inline(decl: impl InlineTypeDecl<E> + 'static) -> Self {
        TypeRef::Inline(Arc::new(decl))
    }

    pub fn resolved(ty: E::InternalType) -> Self {
        TypeRef::Resolved(ty)
    }
}

// Derived Clone would put a `Clone` bound on `E` itself.
impl<E: Engine> Clone for TypeRef<E> {
    fn clone(&self) -> Self {
        match self {
            TypeRef::Named(decl) => TypeRef::Named(Arc::clone(decl)),
            TypeRef::Inline(decl) => TypeRef::Inline(Arc::clone(decl)),
            TypeRef::Resolved(ty) => TypeRef::Resolved(ty.clone()),
        }
    }
}

/// Identity of a declaration, used as the conversion-cache key.
///
/// Keys are allocation identities: two clones of one `Arc` share a key, two structurally
/// identical declarations do not.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct TypeKey(usize);

impl TypeKey {
    pub(crate) fn identity<T: ?Sized>(arc: &Arc<T>) -> Self {
        TypeKey(Arc::as_ptr(arc) as *const () as usize)
    }
}
