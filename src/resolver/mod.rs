//! Dependency declaration resolution.
//!
//! Resolution asks each declared dependency's provider for its finished
//! Package, then wires a library and a unit test project on top of them.
//! Dependency order is load-bearing: it becomes the link order every
//! generator sees, so it always matches declaration order.

pub mod declaration;
pub mod errors;
pub mod index;
pub mod provider;
pub mod resolve;

pub use declaration::{Declaration, DependencyDecl, TEST_SUFFIX};
pub use errors::ResolveError;
pub use index::{ManifestIndex, ManifestProvider};
pub use provider::{PackageProvider, ProviderRegistry};
pub use resolve::{assemble, resolve, resolve_declaration, resolve_with};
