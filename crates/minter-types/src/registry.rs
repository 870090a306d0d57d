//! Registry trait for self-registering implementations.
//!
//! Each pluggable module (signer, contract binding, metadata store) provides
//! a Registry struct implementing this trait, declaring its configuration
//! name and factory function.

/// Base trait for implementation registries.
pub trait ImplementationRegistry {
	/// The name used in configuration files to reference this implementation,
	/// for example:
	/// - "local" for signer.implementations.local
	/// - "rpc" for contract.implementations.rpc
	/// - "memory" for metadata.implementations.memory
	const NAME: &'static str;

	/// The factory function type this implementation provides.
	///
	/// Each module defines its own factory type, for example SignerFactory
	/// for signer implementations.
	type Factory;

	/// Get the factory function for this implementation.
	fn factory() -> Self::Factory;
}
