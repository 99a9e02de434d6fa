//! Single-method behavior values: predicates, transformers, closures,
//! and factories.
//!
//! Each trait is blanket-implemented for the matching `Fn` shape, so a
//! plain closure works anywhere a functor is expected. The submodules
//! provide combinator constructors (`predicate::and`,
//! `transformer::chained`, ...) that compose functors into new ones.

pub mod closure;
pub mod factory;
pub mod predicate;
pub mod transformer;

pub use closure::Closure;
pub use factory::Factory;
pub use predicate::Predicate;
pub use transformer::Transformer;
